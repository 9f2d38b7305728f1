//! Error types.
//!
//! Only start-up can fail. Everything that happens at runtime (out-of-range
//! values, clicks on items that do nothing, encoder noise) is absorbed by
//! policy: values are clamped and meaningless transitions are no-ops.

use core::fmt;

/// Fatal start-up failure. The firmware shows [`InitError::message`] and halts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// The real-time clock did not answer on the bus.
    ClockNotFound,
    /// The display controller could not be initialised.
    DisplayInit,
    /// The encoder sampling task could not be started.
    EncoderInit,
    /// The menu has no items to navigate.
    RegistryEmpty,
}

impl InitError {
    /// Diagnostic text shown on the halt screen.
    pub const fn message(self) -> &'static str {
        match self {
            Self::ClockNotFound => "Couldn't find RTC",
            Self::DisplayInit => "Display init failed",
            Self::EncoderInit => "Encoder init failed",
            Self::RegistryEmpty => "No menu items",
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Rejected registry construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// The registry already holds `MAX_ITEMS` items.
    Full,
    /// An integer item with `min > max`, or an enum item without choices.
    InvalidItem,
}

impl fmt::Display for RegistryError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Full => f.write_str("registry is full"),
            Self::InvalidItem => f.write_str("invalid item definition"),
        }
    }
}
