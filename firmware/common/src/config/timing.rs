//! Tick-based timing.
//!
//! The main loop runs on a fixed tick. Every cadence in the engine (flash rate,
//! header refresh, overlay durations) is expressed in ticks so the engine
//! itself never reads a clock and stays deterministic under test.

/// Main loop period in milliseconds (~50 Hz).
pub const TICK_MS: u64 = 20;

/// Ticks between flash toggles of the selected row / edited value (300 ms).
pub const FLASH_PERIOD_TICKS: u32 = 15;

/// Ticks between moisture/clock samples for the header (1 s).
pub const HEADER_REFRESH_TICKS: u32 = 50;

/// How long a status readout stays on screen (2 s).
pub const STATUS_DURATION_TICKS: u32 = 100;

/// How long the "value set" confirmation stays on screen (500 ms).
pub const VALUE_SET_TICKS: u32 = 25;

const _: () = assert!(FLASH_PERIOD_TICKS > 0);
const _: () = assert!(VALUE_SET_TICKS < STATUS_DURATION_TICKS);
