//! Board configuration.
//!
//! Pin map for the Pimoroni PIM715 Display Pack 2.8" plus a KY-040 style
//! rotary encoder, a capacitive soil moisture probe and a DS3231 RTC module.
//!
//! | Signal | GPIO | Peripheral |
//! |--------|------|------------|
//! | Encoder CLK (A) | 2 | input, pull-up |
//! | Encoder DT (B) | 3 | input, pull-up |
//! | Encoder SW | 4 | input, pull-up, active-low |
//! | RTC SDA | 8 | I2C0 |
//! | RTC SCL | 9 | I2C0 |
//! | Display DC | 16 | output |
//! | Display CS | 17 | output |
//! | Display CLK | 18 | SPI0 |
//! | Display MOSI | 19 | SPI0 |
//! | Backlight | 20 | PWM slice 2 A |
//! | Moisture probe | 26 | ADC0 |
//!
//! The encoder pins are wired in `main.rs`; the constants here are what the
//! host-testable logic needs.

/// ST7789 SPI clock. 62.5 MHz is the datasheet maximum.
pub const DISPLAY_SPI_HZ: u32 = 62_500_000;

/// DS3231 I2C clock.
pub const RTC_I2C_HZ: u32 = 100_000;

/// Backlight PWM period in timer counts (~1.2 kHz at 150 MHz / 125).
pub const BACKLIGHT_PWM_TOP: u16 = 999;

/// PWM clock divider for the backlight.
pub const BACKLIGHT_PWM_DIVIDER: u8 = 125;

/// Lowest backlight duty used for contrast 0, so the screen never goes dark
/// while the backlight is on.
pub const MIN_BACKLIGHT_DUTY: u16 = 100;

/// Backlight compare value for a contrast percentage (0-100).
///
/// The PIM715 has no contrast control, so contrast is rendered as backlight
/// brightness between [`MIN_BACKLIGHT_DUTY`] and full on.
pub const fn contrast_duty(percent: u8) -> u16 {
    let percent = if percent > 100 { 100 } else { percent } as u32;
    let span = (BACKLIGHT_PWM_TOP + 1 - MIN_BACKLIGHT_DUTY) as u32;
    MIN_BACKLIGHT_DUTY + (span * percent / 100) as u16
}
