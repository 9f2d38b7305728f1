//! Recording fakes for driving the engine from tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use menu_common::view::TextSize;
use menu_common::{Actuators, Clock, InputEvent, InputSource, MenuDisplay, MoistureSensor, TimeOfDay};

/// Input replayed from a script, idle once the script runs out.
#[derive(Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new() -> Self { Self::default() }

    pub fn steps(
        &mut self,
        delta: i32,
        count: usize,
    ) -> &mut Self {
        for _ in 0..count {
            self.events.push_back(InputEvent::step(delta));
        }
        self
    }

    pub fn click(&mut self) -> &mut Self {
        self.events.push_back(InputEvent::click());
        self
    }

    pub fn idle(
        &mut self,
        count: usize,
    ) -> &mut Self {
        for _ in 0..count {
            self.events.push_back(InputEvent::IDLE);
        }
        self
    }

    pub fn push(
        &mut self,
        event: InputEvent,
    ) -> &mut Self {
        self.events.push_back(event);
        self
    }

    pub fn remaining(&self) -> usize { self.events.len() }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputEvent { self.events.pop_front().unwrap_or(InputEvent::IDLE) }
}

#[derive(Clone, Copy)]
pub struct FixedClock(pub TimeOfDay);

impl Clock for FixedClock {
    fn now(&mut self) -> TimeOfDay { self.0 }
}

/// Sensor returning queued readings, repeating the last one.
pub struct QueuedSensor {
    readings: VecDeque<i32>,
    last: i32,
}

impl QueuedSensor {
    pub fn new(readings: &[i32]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            last: 0,
        }
    }
}

impl MoistureSensor for QueuedSensor {
    fn read(&mut self) -> i32 {
        if let Some(next) = self.readings.pop_front() {
            self.last = next;
        }
        self.last
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    Backlight(bool),
    Contrast(u8),
}

#[derive(Default)]
pub struct RecordingActuators {
    pub calls: Vec<Output>,
}

impl RecordingActuators {
    pub fn last_backlight(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            Output::Backlight(on) => Some(*on),
            Output::Contrast(_) => None,
        })
    }

    pub fn last_contrast(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            Output::Contrast(p) => Some(*p),
            Output::Backlight(_) => None,
        })
    }
}

impl Actuators for RecordingActuators {
    fn set_backlight(
        &mut self,
        on: bool,
    ) {
        self.calls.push(Output::Backlight(on));
    }

    fn set_contrast(
        &mut self,
        percent: u8,
    ) {
        self.calls.push(Output::Contrast(percent));
    }
}

/// Display modelling which texts are on screen.
///
/// A fill or clear erases the texts anchored inside it. `screen` is the
/// state at the last `present`.
#[derive(Default)]
pub struct RecordingDisplay {
    live: Vec<(Point, String, Rgb565)>,
    pub screen: Vec<String>,
    pub colors: Vec<(String, Rgb565)>,
    pub clears: usize,
    pub fills: usize,
    pub presents: usize,
}

impl RecordingDisplay {
    pub fn shows(
        &self,
        text: &str,
    ) -> bool {
        self.screen.iter().any(|t| t == text)
    }

    pub fn shows_containing(
        &self,
        text: &str,
    ) -> bool {
        self.screen.iter().any(|t| t.contains(text))
    }

    /// Color of a text on the presented screen.
    pub fn color_of(
        &self,
        text: &str,
    ) -> Option<Rgb565> {
        self.colors.iter().find(|(t, _)| t == text).map(|(_, color)| *color)
    }
}

impl MenuDisplay for RecordingDisplay {
    fn clear(&mut self) {
        self.clears += 1;
        self.live.clear();
    }

    fn fill_rect(
        &mut self,
        area: Rectangle,
        _color: Rgb565,
    ) {
        self.fills += 1;
        self.live.retain(|(position, _, _)| !area.contains(*position));
    }

    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        color: Rgb565,
        _background: Option<Rgb565>,
        _size: TextSize,
    ) {
        self.live.retain(|(p, _, _)| *p != position);
        self.live.push((position, text.into(), color));
    }

    fn draw_line(
        &mut self,
        _start: Point,
        _end: Point,
        _color: Rgb565,
    ) {
    }

    fn present(&mut self) {
        self.presents += 1;
        self.screen = self.live.iter().map(|(_, text, _)| text.clone()).collect();
        self.colors = self.live.iter().map(|(_, text, color)| (text.clone(), *color)).collect();
    }
}

/// Tiny deterministic generator for input sequences.
pub struct Lcg(u64);

impl Lcg {
    pub const fn new(seed: u64) -> Self { Self(seed) }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }

    /// Uniform-ish value in `[lo, hi]`.
    pub fn range(
        &mut self,
        lo: i32,
        hi: i32,
    ) -> i32 {
        lo + (self.next_u32() % (hi - lo + 1) as u32) as i32
    }
}
