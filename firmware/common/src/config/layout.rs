//! Display and layout configuration constants.
//!
//! The screen is split into two independent redraw zones: the status header
//! (soil moisture and clock) in the top half and the menu in the bottom half.
//! Each zone is cleared and redrawn on its own so a clock tick never repaints
//! the menu and a selection change never repaints the header.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7789 on Pimoroni PIM715: 320x240)
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Left margin for all text.
pub const TEXT_X: i32 = 8;

// =============================================================================
// Redraw Zones
// =============================================================================

/// First row of the menu zone. Everything above belongs to the header.
pub const ZONE_SPLIT_Y: u32 = SCREEN_HEIGHT / 2;

/// Top half: moisture reading and time of day.
pub const HEADER_ZONE: Rectangle = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, ZONE_SPLIT_Y));

/// Bottom half: menu title and the visible window of items, or the edit page.
pub const MENU_ZONE: Rectangle = Rectangle::new(
    Point::new(0, ZONE_SPLIT_Y as i32),
    Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - ZONE_SPLIT_Y),
);

// =============================================================================
// Header Layout
// =============================================================================

/// "Moisture: NNN" line.
pub const MOISTURE_POS: Point = Point::new(TEXT_X, 16);

/// "HH:MM" line.
pub const CLOCK_POS: Point = Point::new(TEXT_X, 56);

/// Divider between header and menu, drawn as part of the header zone.
pub const DIVIDER_Y: i32 = ZONE_SPLIT_Y as i32 - 4;

// =============================================================================
// Menu Layout
// =============================================================================

/// "MAIN MENU" title (large font).
pub const MENU_TITLE_POS: Point = Point::new(TEXT_X, ZONE_SPLIT_Y as i32 + 2);

/// Top of the first visible menu row.
pub const MENU_FIRST_ROW_Y: i32 = ZONE_SPLIT_Y as i32 + 36;

/// Vertical pitch of menu rows (normal font is 15 px tall).
pub const MENU_ROW_HEIGHT: i32 = 24;

/// Edit page: rule under the item name.
pub const EDIT_RULE_Y: i32 = ZONE_SPLIT_Y as i32 + 34;

/// Edit page: "Value" caption.
pub const EDIT_CAPTION_POS: Point = Point::new(TEXT_X, ZONE_SPLIT_Y as i32 + 40);

/// Edit page: the flashing value (large font).
pub const EDIT_VALUE_POS: Point = Point::new(TEXT_X, ZONE_SPLIT_Y as i32 + 62);

// =============================================================================
// Full-Screen Overlays
// =============================================================================

/// Overlay caption ("STATUS", "VALUE SET").
pub const OVERLAY_CAPTION_POS: Point = Point::new(TEXT_X, 24);

/// Overlay item name (large font).
pub const OVERLAY_NAME_POS: Point = Point::new(TEXT_X, 64);

/// Overlay value (large font).
pub const OVERLAY_VALUE_POS: Point = Point::new(TEXT_X, 112);

/// Overlay hint line at the bottom.
pub const OVERLAY_HINT_POS: Point = Point::new(TEXT_X, SCREEN_HEIGHT as i32 - 32);

// Three rows must fit below the title inside the menu zone
const _: () = assert!(MENU_FIRST_ROW_Y + 3 * MENU_ROW_HEIGHT <= SCREEN_HEIGHT as i32);
const _: () = assert!(DIVIDER_Y > CLOCK_POS.y);
