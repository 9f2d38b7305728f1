//! DS3231 real-time clock over blocking I2C.

use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use menu_common::{Clock, InitError, TimeOfDay};

use crate::ds3231::{
    ADDRESS,
    MIDNIGHT_WRITE,
    REG_SECONDS,
    REG_STATUS,
    clear_oscillator_flag,
    decode_time,
    oscillator_stopped,
};
use crate::{log_info, log_warn};

/// DS3231 on I2C0. Remembers the last good reading so a failed bus
/// transaction shows a stale time instead of a wrong one.
pub struct Ds3231Clock {
    i2c: I2c<'static, I2C0, Blocking>,
    last: TimeOfDay,
}

impl Ds3231Clock {
    /// Probe the chip and make sure it keeps time.
    ///
    /// Fails with [`InitError::ClockNotFound`] if the status register can't
    /// be read. If the oscillator stopped (battery lost), the time is reset to
    /// midnight and the flag cleared.
    pub fn probe(mut i2c: I2c<'static, I2C0, Blocking>) -> Result<Self, InitError> {
        let mut status = [0u8; 1];
        i2c.blocking_write_read(ADDRESS, &[REG_STATUS], &mut status)
            .map_err(|_| InitError::ClockNotFound)?;

        if oscillator_stopped(status[0]) {
            log_warn!("RTC lost power, time reset");
            i2c.blocking_write(ADDRESS, &MIDNIGHT_WRITE)
                .map_err(|_| InitError::ClockNotFound)?;
            i2c.blocking_write(ADDRESS, &[REG_STATUS, clear_oscillator_flag(status[0])])
                .map_err(|_| InitError::ClockNotFound)?;
        }

        let mut clock = Self { i2c, last: TimeOfDay::MIDNIGHT };
        let now = clock.now();
        log_info!("RTC found, time {}", now.hhmm().as_str());
        Ok(clock)
    }
}

impl Clock for Ds3231Clock {
    fn now(&mut self) -> TimeOfDay {
        let mut regs = [0u8; 3];
        match self.i2c.blocking_write_read(ADDRESS, &[REG_SECONDS], &mut regs) {
            Ok(()) => self.last = decode_time(regs),
            Err(_) => log_warn!("RTC read failed"),
        }
        self.last
    }
}
