//! DS3231 real-time clock register handling.
//!
//! Only the I2C transfers live in the binary; everything about the register
//! layout is here so it can be tested on the host.
//!
//! # Registers used
//!
//! | Address | Contents |
//! |---------|----------|
//! | `0x00` | Seconds (BCD) |
//! | `0x01` | Minutes (BCD) |
//! | `0x02` | Hours: bit 6 selects 12 h mode, bit 5 is PM in 12 h mode |
//! | `0x0F` | Status: bit 7 is the oscillator-stop flag (OSF) |

use menu_common::TimeOfDay;

/// 7-bit I2C address.
pub const ADDRESS: u8 = 0x68;

/// First timekeeping register.
pub const REG_SECONDS: u8 = 0x00;

/// Control/status register holding OSF.
pub const REG_STATUS: u8 = 0x0F;

const OSF: u8 = 0x80;
const HOUR_12H: u8 = 0x40;
const HOUR_PM: u8 = 0x20;

#[inline]
const fn bcd(value: u8) -> u8 { (value >> 4) * 10 + (value & 0x0F) }

/// Decode seconds/minutes/hours registers into a time of day.
///
/// Out-of-range values (corrupted registers) wrap into range.
pub fn decode_time(regs: [u8; 3]) -> TimeOfDay {
    let minute = bcd(regs[1] & 0x7F) % 60;
    let raw_hour = regs[2];
    let hour = if raw_hour & HOUR_12H != 0 {
        let h12 = bcd(raw_hour & 0x1F) % 12;
        if raw_hour & HOUR_PM != 0 { h12 + 12 } else { h12 }
    } else {
        bcd(raw_hour & 0x3F) % 24
    };
    TimeOfDay::new(hour, minute)
}

/// Whether the oscillator stopped since the flag was last cleared. The
/// stored time is invalid when set (battery removed or flat).
#[inline]
pub const fn oscillator_stopped(status: u8) -> bool { status & OSF != 0 }

/// Status register value with OSF cleared and the other bits kept.
#[inline]
pub const fn clear_oscillator_flag(status: u8) -> u8 { status & !OSF }

/// Write buffer setting 00:00:00 in 24 h mode, starting at [`REG_SECONDS`].
pub const MIDNIGHT_WRITE: [u8; 4] = [REG_SECONDS, 0x00, 0x00, 0x00];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_24h() {
        assert_eq!(decode_time([0x30, 0x45, 0x07]), TimeOfDay::new(7, 45));
        assert_eq!(decode_time([0x00, 0x59, 0x23]), TimeOfDay::new(23, 59));
    }

    #[test]
    fn test_decode_12h() {
        // 12 AM is midnight, 12 PM is noon
        assert_eq!(decode_time([0, 0x00, HOUR_12H | 0x12]), TimeOfDay::new(0, 0));
        assert_eq!(decode_time([0, 0x00, HOUR_12H | HOUR_PM | 0x12]), TimeOfDay::new(12, 0));
        assert_eq!(decode_time([0, 0x15, HOUR_12H | HOUR_PM | 0x03]), TimeOfDay::new(15, 15));
    }

    #[test]
    fn test_decode_ignores_seconds_and_garbage() {
        assert_eq!(decode_time([0xFF, 0x99, 0x3F]), TimeOfDay::new(21, 19));
    }

    #[test]
    fn test_oscillator_flag() {
        assert!(oscillator_stopped(0x88));
        assert!(!oscillator_stopped(0x08));
        assert_eq!(clear_oscillator_flag(0x88), 0x08);
    }

    #[test]
    fn test_midnight_write_decodes_to_midnight() {
        let regs = [MIDNIGHT_WRITE[1], MIDNIGHT_WRITE[2], MIDNIGHT_WRITE[3]];
        assert_eq!(decode_time(regs), TimeOfDay::MIDNIGHT);
    }
}
