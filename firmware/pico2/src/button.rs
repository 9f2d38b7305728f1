//! Push-button debouncing for the encoder switch.
//!
//! The switch is sampled on every encoder tick (1 kHz). A level change is
//! only accepted after it has been seen on `DEBOUNCE_SAMPLES` consecutive
//! samples, which filters contact bounce without reading a clock.

use menu_common::config::DEBOUNCE_SAMPLES;

/// Debounced level plus the press edge, for one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonSample {
    /// Debounced level: button is held down.
    pub held: bool,
    /// The debounced level went from released to held on this sample.
    pub pressed: bool,
}

/// Sample-count debouncer for an active-low button.
pub struct ButtonDebouncer {
    held: bool,
    run: u8,
}

impl ButtonDebouncer {
    /// Create a debouncer in the released state.
    pub const fn new() -> Self { Self { held: false, run: 0 } }

    /// Feed one raw sample. Buttons are active-low, so `is_low` means pressed.
    pub fn sample(
        &mut self,
        is_low: bool,
    ) -> ButtonSample {
        if is_low == self.held {
            self.run = 0;
            return ButtonSample {
                held: self.held,
                pressed: false,
            };
        }

        self.run += 1;
        if self.run < DEBOUNCE_SAMPLES {
            return ButtonSample {
                held: self.held,
                pressed: false,
            };
        }

        self.run = 0;
        self.held = is_low;
        ButtonSample {
            held: is_low,
            pressed: is_low,
        }
    }
}

impl Default for ButtonDebouncer {
    fn default() -> Self { Self::new() }
}
