//! Rotary-encoder menu firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Runs the menu engine on the Pimoroni PIM715 Display Pack 2.8" with a
//! KY-040 style encoder, a DS3231 RTC and a soil moisture probe.
//!
//! # Architecture
//!
//! - Encoder task: samples the encoder every millisecond and publishes
//!   detent steps and click edges into the lock-free [`INPUT`] handoff
//! - Main task: ticks the menu engine every `TICK_MS`, then flushes the
//!   framebuffer over DMA when the engine presented a frame
//!
//! # Controls
//!
//! - **Turn**: Move the selection, or change the value while editing
//! - **Click**: Toggle, enter/leave edit, show a status readout, run an action

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
mod board;
mod display;
mod log_buffer;
mod rtc;
mod st7789;

// Re-export testable modules from library for local use
mod config {
    pub use menu_pico2::config::*;
}
mod ds3231 {
    pub use menu_pico2::ds3231::*;
}

use core::fmt::Write;

use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::pwm::Pwm;
use embassy_rp::spi::Spi;
use embassy_time::{Duration, Ticker, Timer};
use embedded_graphics::prelude::Point;
use heapless::String;
use menu_common::config::layout::TEXT_X;
use menu_common::config::{SAMPLE_PERIOD_US, TICK_MS};
use menu_common::display::execute;
use menu_common::presets::garden_menu;
use menu_common::view::{TextSize, render_fatal};
use menu_common::{EncoderInput, GraphicsDisplay, InitError, InputHandoff, MenuDisplay, MenuEngine};
use menu_pico2::sampler::EncoderSampler;
use {defmt_rtt as _, panic_probe as _};

use crate::board::{AdcMoisture, BoardActuators, backlight_pwm_config};
use crate::config::RTC_I2C_HZ;
use crate::display::display_spi_config;
use crate::log_buffer::{LOG_BUFFER, LOG_MSG_LEN};
use crate::rtc::Ds3231Clock;
use crate::st7789::{FRAMEBUFFER, St7789Flusher, St7789Renderer};

type Display = GraphicsDisplay<St7789Renderer<'static>>;

// =============================================================================
// Encoder Input
// =============================================================================

/// Encoder state shared between the sampling task and the menu loop.
static INPUT: InputHandoff = InputHandoff::new();

/// Encoder sampling task - runs at `SAMPLE_PERIOD_US`, independent of the menu.
#[embassy_executor::task]
async fn encoder_task(
    clk: Input<'static>,
    dt: Input<'static>,
    sw: Input<'static>,
) {
    let mut sampler = EncoderSampler::new(clk.is_high(), dt.is_high());
    let mut ticker = Ticker::every(Duration::from_micros(SAMPLE_PERIOD_US));
    loop {
        sampler.sample(clk.is_high(), dt.is_high(), sw.is_low(), &INPUT);
        ticker.next().await;
    }
}

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-menu"),
    embassy_rp::binary_info::rp_program_description!(c"Rotary encoder menu on PIM715 Display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    log_info!("Menu firmware starting");
    let p = embassy_rp::init(Default::default());

    // Display: PIM715 pinout CS=17, DC=16, CLK=18, MOSI=19
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, display_spi_config());
    let mut flusher = St7789Flusher::new(spi, dc, cs);
    let mut display: Display = GraphicsDisplay::new(St7789Renderer::new(FRAMEBUFFER.take()));

    // Backlight stays dark until the engine pushes the Light item
    let pwm = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_20, backlight_pwm_config());
    let actuators = BoardActuators::new(pwm);

    if let Err(error) = flusher.init().await {
        halt(error, &mut display, &mut flusher).await;
    }
    log_info!("Display initialized");

    // RTC on I2C0: SDA=8, SCL=9
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = RTC_I2C_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_9, p.PIN_8, i2c_config);
    let clock = match Ds3231Clock::probe(i2c) {
        Ok(clock) => clock,
        Err(error) => halt(error, &mut display, &mut flusher).await,
    };

    // Moisture probe on ADC0 (GPIO26)
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let sensor = AdcMoisture::new(adc, Channel::new_pin(p.PIN_26, Pull::None));

    // Encoder: CLK=2, DT=3, SW=4, all active-low with pull-ups
    let clk = Input::new(p.PIN_2, Pull::Up);
    let dt = Input::new(p.PIN_3, Pull::Up);
    let sw = Input::new(p.PIN_4, Pull::Up);
    if spawner.spawn(encoder_task(clk, dt, sw)).is_err() {
        INPUT.mark_offline();
        halt(InitError::EncoderInit, &mut display, &mut flusher).await;
    }
    log_info!("Encoder task spawned");

    let registry = match garden_menu() {
        Ok(registry) => registry,
        Err(error) => {
            log_error!("Menu table rejected: {}", error);
            halt(InitError::RegistryEmpty, &mut display, &mut flusher).await
        }
    };
    let mut engine = match MenuEngine::new(registry, clock, sensor, actuators) {
        Ok(engine) => engine,
        Err(error) => halt(error, &mut display, &mut flusher).await,
    };

    let mut input = EncoderInput::new(&INPUT);
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    loop {
        engine.tick(&mut input, &mut display);

        for line in engine.log_mut().drain_new() {
            log_info!("{}", line);
        }

        if display.take_presented() {
            flusher.flush_buffer(display.target().as_bytes()).await;
        }

        ticker.next().await;
    }
}

/// Show the fatal diagnostic with the most recent log lines and stop.
async fn halt(
    error: InitError,
    display: &mut Display,
    flusher: &mut St7789Flusher<'static>,
) -> ! {
    log_error!("Fatal: {}", error.message());
    execute(display, &render_fatal(error));

    let mut y = 96;
    for entry in LOG_BUFFER.lock().await.iter() {
        let mut line: String<{ LOG_MSG_LEN + 12 }> = String::new();
        write!(line, "[{}] {}", entry.timestamp_ms, entry.message).ok();
        display.draw_text(Point::new(TEXT_X, y), &line, entry.level.color(), None, TextSize::Normal);
        y += 14;
    }
    flusher.flush_buffer(display.target().as_bytes()).await;

    loop {
        Timer::after_secs(1).await;
    }
}
