//! Encoder and button input, decoupled from sampling.
//!
//! A high-rate producer (interrupt, timer task or simulator event loop)
//! publishes rotation and button state into an [`InputHandoff`]. The menu
//! loop consumes it at its own pace through an [`InputSource`].
//!
//! # Handoff protocol
//!
//! The handoff is single-producer / single-consumer and lock-free:
//!
//! - Rotation accumulates as detent steps. `take` swaps the count to zero,
//!   so steps published between two polls are delivered exactly once.
//! - The button carries two bits. `HELD` mirrors the debounced level.
//!   `PRESSED` is set on a debounced press edge and cleared by `take`, so a
//!   press shorter than the consumer's poll period is still observed.
//!
//! # Click detection
//!
//! One physical press must yield one click no matter how many polls see the
//! button held. [`ClickLatch`] turns a held level into a single edge and
//! [`DetentCounter`] turns a raw quadrature count into whole detents.

use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, Ordering};

use crate::config::PULSES_PER_DETENT;

// =============================================================================
// Events
// =============================================================================

/// One poll's worth of user input.
///
/// `step` is the signed detent delta since the previous poll. `clicked` is
/// true at most once per physical press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    pub step: i32,
    pub clicked: bool,
}

impl InputEvent {
    /// No rotation and no click.
    pub const IDLE: Self = Self { step: 0, clicked: false };

    #[inline]
    pub const fn step(step: i32) -> Self { Self { step, clicked: false } }

    #[inline]
    pub const fn click() -> Self { Self { step: 0, clicked: true } }

    #[inline]
    pub const fn is_idle(&self) -> bool { self.step == 0 && !self.clicked }
}

/// Source of [`InputEvent`]s for the menu loop.
pub trait InputSource {
    /// Return the input accumulated since the previous poll.
    fn poll(&mut self) -> InputEvent;
}

// =============================================================================
// Lock-free Handoff
// =============================================================================

const HELD: u8 = 0b01;
const PRESSED: u8 = 0b10;

/// Raw state drained from an [`InputHandoff`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawInput {
    pub steps: i32,
    pub held: bool,
    pub pressed: bool,
}

/// Shared state between the input producer and the menu loop.
///
/// Intended to live in a `static`. All methods take `&self`.
pub struct InputHandoff {
    steps: AtomicI32,
    button: AtomicU8,
    online: AtomicBool,
}

impl InputHandoff {
    pub const fn new() -> Self {
        Self {
            steps: AtomicI32::new(0),
            button: AtomicU8::new(0),
            online: AtomicBool::new(true),
        }
    }

    /// Producer: add signed detent steps.
    #[inline]
    pub fn publish_steps(
        &self,
        delta: i32,
    ) {
        if delta != 0 {
            self.steps.fetch_add(delta, Ordering::AcqRel);
        }
    }

    /// Producer: publish the debounced button level.
    ///
    /// `pressed` marks a press edge observed since the last publish.
    pub fn publish_button(
        &self,
        held: bool,
        pressed: bool,
    ) {
        if pressed {
            self.button.fetch_or(PRESSED | HELD, Ordering::AcqRel);
        } else if held {
            self.button.fetch_or(HELD, Ordering::AcqRel);
        }
        if !held {
            self.button.fetch_and(!HELD, Ordering::AcqRel);
        }
    }

    /// Consumer: drain accumulated steps and the press edge.
    ///
    /// Returns idle input while the producer is offline.
    pub fn take(&self) -> RawInput {
        let steps = self.steps.swap(0, Ordering::AcqRel);
        let button = self.button.fetch_and(!PRESSED, Ordering::AcqRel);
        if !self.is_online() {
            return RawInput::default();
        }
        RawInput {
            steps,
            held: button & HELD != 0,
            pressed: button & PRESSED != 0,
        }
    }

    /// Producer: the encoder stopped responding. Input reads as idle.
    pub fn mark_offline(&self) {
        self.online.store(false, Ordering::Release);
        self.steps.store(0, Ordering::Release);
        self.button.store(0, Ordering::Release);
    }

    #[inline]
    pub fn is_online(&self) -> bool { self.online.load(Ordering::Acquire) }
}

impl Default for InputHandoff {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Edge and Detent Helpers
// =============================================================================

/// Converts a held level into a single click edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClickLatch {
    latched: bool,
}

impl ClickLatch {
    pub const fn new() -> Self { Self { latched: false } }

    /// Returns true exactly once per transition from released to held.
    #[inline]
    pub fn update(
        &mut self,
        held: bool,
    ) -> bool {
        let edge = held && !self.latched;
        self.latched = held;
        edge
    }
}

/// Converts a raw quadrature count into whole-detent deltas.
///
/// Uses floor division so the detent boundaries are the same on both sides
/// of zero. The first reading only establishes the reference.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetentCounter {
    last_detent: Option<i32>,
}

impl DetentCounter {
    pub const fn new() -> Self { Self { last_detent: None } }

    /// Feed the absolute pulse count, get the detent delta since last call.
    pub fn update(
        &mut self,
        raw_count: i32,
    ) -> i32 {
        let detent = raw_count.div_euclid(PULSES_PER_DETENT);
        let delta = self.last_detent.map_or(0, |last| detent - last);
        self.last_detent = Some(detent);
        delta
    }
}

// =============================================================================
// Encoder Input Source
// =============================================================================

/// [`InputSource`] reading an [`InputHandoff`] filled by a sampling task.
pub struct EncoderInput<'a> {
    handoff: &'a InputHandoff,
}

impl<'a> EncoderInput<'a> {
    pub const fn new(handoff: &'a InputHandoff) -> Self { Self { handoff } }
}

impl InputSource for EncoderInput<'_> {
    fn poll(&mut self) -> InputEvent {
        let raw = self.handoff.take();
        InputEvent {
            step: raw.steps,
            clicked: raw.pressed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_delivered_exactly_once() {
        let handoff = InputHandoff::new();
        handoff.publish_steps(2);
        handoff.publish_steps(-1);
        assert_eq!(handoff.take().steps, 1);
        assert_eq!(handoff.take().steps, 0);
    }

    #[test]
    fn test_short_press_survives_release_before_poll() {
        let handoff = InputHandoff::new();
        handoff.publish_button(true, true);
        handoff.publish_button(false, false);
        let raw = handoff.take();
        assert!(raw.pressed);
        assert!(!raw.held);
        assert!(!handoff.take().pressed);
    }

    #[test]
    fn test_long_press_yields_one_click() {
        let handoff = InputHandoff::new();
        let mut input = EncoderInput::new(&handoff);
        handoff.publish_button(true, true);
        assert!(input.poll().clicked);
        for _ in 0..10 {
            handoff.publish_button(true, false);
            assert!(!input.poll().clicked);
        }
        handoff.publish_button(false, false);
        assert!(!input.poll().clicked);
        handoff.publish_button(true, true);
        assert!(input.poll().clicked);
    }

    #[test]
    fn test_offline_reads_idle() {
        let handoff = InputHandoff::new();
        handoff.publish_steps(3);
        handoff.mark_offline();
        handoff.publish_steps(1);
        handoff.publish_button(true, true);
        assert!(!handoff.is_online());
        assert_eq!(handoff.take(), RawInput::default());
    }

    #[test]
    fn test_click_latch_single_edge() {
        let mut latch = ClickLatch::new();
        assert!(latch.update(true));
        assert!(!latch.update(true));
        assert!(!latch.update(false));
        assert!(latch.update(true));
    }

    #[test]
    fn test_detent_counter_first_reading_is_reference() {
        let mut counter = DetentCounter::new();
        assert_eq!(counter.update(40), 0);
        assert_eq!(counter.update(44), 1);
        assert_eq!(counter.update(45), 0);
        assert_eq!(counter.update(36), -2);
    }

    #[test]
    fn test_detent_counter_floor_across_zero() {
        let mut counter = DetentCounter::new();
        counter.update(0);
        // -1 is already in the detent below zero
        assert_eq!(counter.update(-1), -1);
        assert_eq!(counter.update(-4), 0);
        assert_eq!(counter.update(-5), -1);
    }

    #[test]
    fn test_input_event_helpers() {
        assert!(InputEvent::IDLE.is_idle());
        assert!(!InputEvent::step(1).is_idle());
        assert!(InputEvent::click().clicked);
    }
}
