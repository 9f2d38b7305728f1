//! On-board collaborators: backlight PWM and the moisture probe ADC.

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use menu_common::{Actuators, MoistureSensor};

use crate::config::{BACKLIGHT_PWM_DIVIDER, BACKLIGHT_PWM_TOP, contrast_duty};
use crate::log_warn;

/// PWM configuration for the backlight, starting dark.
pub fn backlight_pwm_config() -> PwmConfig {
    let mut config = PwmConfig::default();
    config.top = BACKLIGHT_PWM_TOP;
    config.divider = BACKLIGHT_PWM_DIVIDER.into();
    config.compare_a = 0;
    config
}

/// Backlight switch and brightness on one PWM channel.
///
/// The duty cycle is recomputed from both settings whenever either changes,
/// so switching the light back on restores the last contrast.
pub struct BoardActuators {
    pwm: Pwm<'static>,
    config: PwmConfig,
    backlight: bool,
    contrast: u8,
}

impl BoardActuators {
    pub fn new(pwm: Pwm<'static>) -> Self {
        Self {
            pwm,
            config: backlight_pwm_config(),
            backlight: false,
            contrast: 100,
        }
    }

    fn apply(&mut self) {
        self.config.compare_a = if self.backlight { contrast_duty(self.contrast) } else { 0 };
        self.pwm.set_config(&self.config);
    }
}

impl Actuators for BoardActuators {
    fn set_backlight(
        &mut self,
        on: bool,
    ) {
        self.backlight = on;
        self.apply();
    }

    fn set_contrast(
        &mut self,
        percent: u8,
    ) {
        self.contrast = percent;
        self.apply();
    }
}

/// Capacitive moisture probe on an ADC pin, reported as raw 12-bit counts.
pub struct AdcMoisture {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
    last: i32,
}

impl AdcMoisture {
    pub fn new(
        adc: Adc<'static, Blocking>,
        channel: Channel<'static>,
    ) -> Self {
        Self { adc, channel, last: 0 }
    }
}

impl MoistureSensor for AdcMoisture {
    fn read(&mut self) -> i32 {
        match self.adc.blocking_read(&mut self.channel) {
            Ok(raw) => self.last = i32::from(raw),
            Err(_) => log_warn!("Moisture read failed"),
        }
        self.last
    }
}
