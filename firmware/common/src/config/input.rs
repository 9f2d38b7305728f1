//! Encoder and push-button sampling parameters.

/// Quadrature pulses produced by one mechanical detent of the encoder.
pub const PULSES_PER_DETENT: i32 = 4;

/// Period of the sampling callback in microseconds (1 kHz).
pub const SAMPLE_PERIOD_US: u64 = 1_000;

/// Consecutive identical samples required before the button level is accepted.
/// At 1 kHz sampling this is a 10 ms debounce window.
pub const DEBOUNCE_SAMPLES: u8 = 10;

const _: () = assert!(PULSES_PER_DETENT > 0);
const _: () = assert!(DEBOUNCE_SAMPLES > 0);
