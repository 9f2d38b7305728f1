//! Keyboard stand-in for the rotary encoder.
//!
//! Arrow keys move the virtual shaft one detent at a time, Enter or Space is
//! the push switch. The result goes through the same [`InputHandoff`] the
//! firmware's sampling task uses.

use menu_common::InputHandoff;
use menu_common::config::PULSES_PER_DETENT;
use menu_common::input::{ClickLatch, DetentCounter};

/// Virtual encoder fed by key events.
pub struct KeyboardEncoder {
    pulses: i32,
    detents: DetentCounter,
    click: ClickLatch,
    held: bool,
    /// Press edge not yet published. Survives a release in the same frame.
    pending: bool,
}

impl KeyboardEncoder {
    pub fn new() -> Self {
        let mut detents = DetentCounter::new();
        detents.update(0);
        Self {
            pulses: 0,
            detents,
            click: ClickLatch::new(),
            held: false,
            pending: false,
        }
    }

    /// Turn by `detents` (negative is counter-clockwise).
    pub fn turn(
        &mut self,
        detents: i32,
    ) {
        self.pulses = self.pulses.wrapping_add(detents * PULSES_PER_DETENT);
    }

    pub fn set_held(
        &mut self,
        held: bool,
    ) {
        self.pending |= self.click.update(held);
        self.held = held;
    }

    /// Publish everything since the last call.
    pub fn publish(
        &mut self,
        handoff: &InputHandoff,
    ) {
        handoff.publish_steps(self.detents.update(self.pulses));
        handoff.publish_button(self.held, std::mem::take(&mut self.pending));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_publish_detent_steps() {
        let handoff = InputHandoff::new();
        let mut encoder = KeyboardEncoder::new();
        encoder.turn(1);
        encoder.turn(1);
        encoder.turn(-1);
        encoder.publish(&handoff);
        assert_eq!(handoff.take().steps, 1);

        encoder.publish(&handoff);
        assert_eq!(handoff.take().steps, 0);
    }

    #[test]
    fn test_held_key_clicks_once() {
        let handoff = InputHandoff::new();
        let mut encoder = KeyboardEncoder::new();
        encoder.set_held(true);
        encoder.publish(&handoff);
        assert!(handoff.take().pressed);

        encoder.publish(&handoff);
        let raw = handoff.take();
        assert!(raw.held);
        assert!(!raw.pressed);

        encoder.set_held(false);
        encoder.publish(&handoff);
        encoder.set_held(true);
        encoder.publish(&handoff);
        assert!(handoff.take().pressed);
    }

    #[test]
    fn test_tap_within_one_frame_clicks() {
        let handoff = InputHandoff::new();
        let mut encoder = KeyboardEncoder::new();
        encoder.set_held(true);
        encoder.set_held(false);
        encoder.publish(&handoff);
        let raw = handoff.take();
        assert!(raw.pressed);
        assert!(!raw.held);

        encoder.publish(&handoff);
        assert!(!handoff.take().pressed);
    }
}
