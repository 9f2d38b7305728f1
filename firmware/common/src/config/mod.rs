//! Engine configuration.
//!
//! - `layout`: Display dimensions, redraw zones and text positions
//! - `timing`: Tick period and the cadences derived from it
//! - `input`: Encoder and button sampling parameters
//! - `menu`: Registry and viewport capacities

pub mod input;
pub mod layout;
pub mod menu;
pub mod timing;

// Re-export the constants used across modules
pub use input::{DEBOUNCE_SAMPLES, PULSES_PER_DETENT, SAMPLE_PERIOD_US};
pub use layout::{HEADER_ZONE, MENU_ZONE, SCREEN_HEIGHT, SCREEN_WIDTH, ZONE_SPLIT_Y};
pub use menu::{LABEL_LEN, MAX_ITEMS, TEXT_LEN, VIEWPORT_SIZE};
pub use timing::{FLASH_PERIOD_TICKS, HEADER_REFRESH_TICKS, STATUS_DURATION_TICKS, TICK_MS, VALUE_SET_TICKS};
