//! Rotary-encoder menu simulator for desktop.
//!
//! Runs the same menu engine as the firmware in an embedded-graphics
//! simulator window.
//!
//! # Controls
//!
//! - **Right / Down**: Turn clockwise one detent
//! - **Left / Up**: Turn counter-clockwise one detent
//! - **Enter / Space**: Push the encoder switch

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

mod keyboard;
mod peripherals;
mod timing;

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use menu_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use menu_common::display::execute;
use menu_common::presets::garden_menu;
use menu_common::view::render_fatal;
use menu_common::{EncoderInput, GraphicsDisplay, InitError, InputHandoff, MenuEngine};

use crate::keyboard::KeyboardEncoder;
use crate::peripherals::{ConsoleActuators, FakeMoisture, SystemClock};
use crate::timing::FRAME_TIME;

fn main() {
    let mut display = GraphicsDisplay::new(SimulatorDisplay::<Rgb565>::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Menu Sim", &output_settings);

    let engine = garden_menu()
        .map_err(|error| {
            eprintln!("menu table rejected: {error}");
            InitError::RegistryEmpty
        })
        .and_then(|registry| MenuEngine::new(registry, SystemClock, FakeMoisture::new(), ConsoleActuators::default()));
    let mut engine = match engine {
        Ok(engine) => engine,
        Err(error) => {
            eprintln!("fatal: {error}");
            execute(&mut display, &render_fatal(error));
            window.show_static(display.target());
            return;
        }
    };

    let handoff = InputHandoff::new();
    let mut encoder = KeyboardEncoder::new();
    let mut input = EncoderInput::new(&handoff);
    window.update(display.target());

    loop {
        let frame_start = Instant::now();

        engine.tick(&mut input, &mut display);
        for line in engine.log_mut().drain_new() {
            println!("[menu] {line}");
        }
        if display.take_presented() {
            window.update(display.target());
        }

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => match keycode {
                    Keycode::Right | Keycode::Down => encoder.turn(1),
                    Keycode::Left | Keycode::Up => encoder.turn(-1),
                    Keycode::Return | Keycode::Space if !repeat => encoder.set_held(true),
                    _ => {}
                },
                SimulatorEvent::KeyUp { keycode, .. } => {
                    if matches!(keycode, Keycode::Return | Keycode::Space) {
                        encoder.set_held(false);
                    }
                }
                _ => {}
            }
        }
        encoder.publish(&handoff);

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
