//! Hardware collaborators used by the engine.
//!
//! Each board (the Pico 2 firmware, the desktop simulator, test fakes)
//! provides its own implementations.

use core::fmt::{self, Write};

use heapless::String;

/// Wall-clock time with minute resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    #[inline]
    pub const fn new(
        hour: u8,
        minute: u8,
    ) -> Self {
        Self { hour, minute }
    }

    /// `HH:MM`, zero padded.
    pub fn hhmm(&self) -> String<5> {
        let mut text = String::new();
        write!(text, "{:02}:{:02}", self.hour % 24, self.minute % 60).ok();
        text
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.hhmm())
    }
}

/// Values shown in the status header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Readout {
    pub moisture: i32,
    pub time: TimeOfDay,
}

/// Real-time clock.
pub trait Clock {
    fn now(&mut self) -> TimeOfDay;
}

/// Analog soil moisture probe. Returns the raw ADC value.
pub trait MoistureSensor {
    fn read(&mut self) -> i32;
}

/// Outputs driven by bound menu items. Fire-and-forget.
pub trait Actuators {
    fn set_backlight(
        &mut self,
        on: bool,
    );

    /// `percent` is in `0..=100`.
    fn set_contrast(
        &mut self,
        percent: u8,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hhmm_zero_padded() {
        assert_eq!(TimeOfDay::new(7, 5).hhmm().as_str(), "07:05");
        assert_eq!(TimeOfDay::new(23, 59).hhmm().as_str(), "23:59");
    }

    #[test]
    fn test_hhmm_wraps_out_of_range_fields() {
        assert_eq!(TimeOfDay::new(24, 60).hhmm().as_str(), "00:00");
    }
}
