//! Desktop stand-ins for the RTC, the moisture probe and the backlight.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use menu_common::{Actuators, Clock, MoistureSensor, TimeOfDay};

use crate::timing::MOISTURE_PERIOD_SECS;

/// Wall clock from the host, in UTC.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> TimeOfDay {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        let minutes = secs / 60 % (24 * 60);
        TimeOfDay::new((minutes / 60) as u8, (minutes % 60) as u8)
    }
}

/// Moisture that slowly swings across the probe's raw ADC range.
pub struct FakeMoisture {
    start: Instant,
}

impl FakeMoisture {
    pub fn new() -> Self { Self { start: Instant::now() } }
}

impl MoistureSensor for FakeMoisture {
    fn read(&mut self) -> i32 {
        let t = self.start.elapsed().as_secs_f32();
        fake_signal(t, 1200.0, 3000.0, std::f32::consts::TAU / MOISTURE_PERIOD_SECS) as i32
    }
}

/// Prints every output change to stdout.
#[derive(Default)]
pub struct ConsoleActuators {
    pub backlight: bool,
    pub contrast: u8,
}

impl Actuators for ConsoleActuators {
    fn set_backlight(
        &mut self,
        on: bool,
    ) {
        if on != self.backlight {
            println!("[out] backlight {}", if on { "on" } else { "off" });
        }
        self.backlight = on;
    }

    fn set_contrast(
        &mut self,
        percent: u8,
    ) {
        if percent != self.contrast {
            println!("[out] contrast {percent}%");
        }
        self.contrast = percent;
    }
}

fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}
