//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

use menu_common::config::TICK_MS;

/// One engine tick per frame, same cadence as the firmware.
pub const FRAME_TIME: Duration = Duration::from_millis(TICK_MS);

/// Simulated seconds per moisture wave.
pub const MOISTURE_PERIOD_SECS: f32 = 60.0;
