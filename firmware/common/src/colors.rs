//! Color constants for the menu display.
//!
//! Rgb565 is native to the ST7789 panel, so these values go to the display
//! buffer without conversion. Standard colors come from the `RgbColor` trait.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Screen background. Zone clears fill with this color.
pub const BACKGROUND: Rgb565 = Rgb565::BLACK;

/// Pure black. Also the "hidden" phase of the flashing edit value.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Default text color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Flash color for the selected row and fatal diagnostics.
pub const RED: Rgb565 = Rgb565::RED;

/// Titles ("MAIN MENU", item name on the edit page).
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Confirmation text after a committed edit.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Dark gray for rules and hint text. RGB565: (8, 16, 8).
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);
