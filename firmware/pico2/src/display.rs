//! SPI setup for the Pimoroni PIM715 Display Pack 2.8" (ST7789).
//!
//! CS and DC are plain outputs driven by the flusher; CLK and MOSI are SPI0.
//! Reset is tied to the RUN pin, so the panel resets with the Pico.

use embassy_rp::spi::Config as SpiConfig;

use crate::config::DISPLAY_SPI_HZ;

/// SPI configuration for the ST7789 display.
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = DISPLAY_SPI_HZ;
    config
}
