//! Async ST7789 display driver for embassy-rp.
//!
//! The menu redraws only what changed, so a single 320x240 RGB565
//! framebuffer (153,600 bytes) is enough: the menu loop draws into it and
//! pushes the whole buffer over DMA after a frame was presented.
//!
//! # Architecture
//!
//! - [`St7789Renderer`]: implements `DrawTarget` over the framebuffer
//! - [`St7789Flusher`]: owns the SPI bus and control pins, sends the buffer
//!
//! Keeping the two apart lets the renderer live inside the generic
//! `GraphicsDisplay` while the flusher stays async.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::Timer;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use menu_common::InitError;
use static_cell::ConstStaticCell;

/// Display dimensions (landscape mode after 90° rotation).
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;
const BUFFER_SIZE: usize = WIDTH * HEIGHT * 2;

/// The framebuffer. Taken once at start-up.
pub static FRAMEBUFFER: ConstStaticCell<[u8; BUFFER_SIZE]> = ConstStaticCell::new([0u8; BUFFER_SIZE]);

// ST7789 Commands
const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVON: u8 = 0x21;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;

// MADCTL flags
const MADCTL_MX: u8 = 0x40; // Column address order
const MADCTL_MV: u8 = 0x20; // Row/column exchange

/// ST7789 flusher - owns SPI and sends the framebuffer.
pub struct St7789Flusher<'d> {
    spi: Spi<'d, SPI0, Async>,
    dc: Output<'d>,
    cs: Output<'d>,
}

impl<'d> St7789Flusher<'d> {
    pub fn new(
        spi: Spi<'d, SPI0, Async>,
        dc: Output<'d>,
        cs: Output<'d>,
    ) -> Self {
        Self { spi, dc, cs }
    }

    /// Initialize the display hardware.
    ///
    /// Fails with [`InitError::DisplayInit`] if any command transfer fails.
    pub async fn init(&mut self) -> Result<(), InitError> {
        self.write_command(SWRESET).await?;
        Timer::after_millis(150).await;

        self.write_command(SLPOUT).await?;
        Timer::after_millis(10).await;

        // RGB565
        self.write_command(COLMOD).await?;
        self.write_data(&[0x55]).await?;

        // Landscape: MV=1 (row/col exchange), MX=1 (mirror X)
        self.write_command(MADCTL).await?;
        self.write_data(&[MADCTL_MV | MADCTL_MX]).await?;

        // Inversion on (required for PIM715)
        self.write_command(INVON).await?;
        Timer::after_millis(10).await;

        self.write_command(NORON).await?;
        Timer::after_millis(10).await;

        self.write_command(DISPON).await?;
        Timer::after_millis(10).await;

        // Full-screen window, every flush writes the whole buffer
        self.set_window(0, 0, WIDTH as u16, HEIGHT as u16).await
    }

    /// Send a command byte (DC low, CS low during transfer).
    async fn write_command(
        &mut self,
        cmd: u8,
    ) -> Result<(), InitError> {
        self.cs.set_low();
        self.dc.set_low();
        let result = self.spi.write(&[cmd]).await;
        self.cs.set_high();
        result.map_err(|_| InitError::DisplayInit)
    }

    /// Send data bytes (DC high, CS low during transfer).
    async fn write_data(
        &mut self,
        data: &[u8],
    ) -> Result<(), InitError> {
        self.cs.set_low();
        self.dc.set_high();
        let result = self.spi.write(data).await;
        self.cs.set_high();
        result.map_err(|_| InitError::DisplayInit)
    }

    async fn set_window(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
    ) -> Result<(), InitError> {
        let x1 = x + w - 1;
        let y1 = y + h - 1;

        self.write_command(CASET).await?;
        self.write_data(&[(x >> 8) as u8, x as u8, (x1 >> 8) as u8, x1 as u8])
            .await?;

        self.write_command(RASET).await?;
        self.write_data(&[(y >> 8) as u8, y as u8, (y1 >> 8) as u8, y1 as u8])
            .await
    }

    /// Send the framebuffer to the display via async DMA.
    ///
    /// A failed transfer only loses this frame; the next present retries.
    pub async fn flush_buffer(
        &mut self,
        buffer: &[u8],
    ) {
        self.cs.set_low();
        self.dc.set_low();
        self.spi.blocking_write(&[RAMWR]).ok();
        self.dc.set_high();
        self.spi.write(buffer).await.ok();
        self.cs.set_high();
    }
}

/// ST7789 renderer - implements DrawTarget over the framebuffer.
pub struct St7789Renderer<'a> {
    framebuffer: &'a mut [u8],
}

impl<'a> St7789Renderer<'a> {
    pub fn new(framebuffer: &'a mut [u8]) -> Self { Self { framebuffer } }

    /// Raw big-endian RGB565 bytes, ready for `flush_buffer`.
    pub fn as_bytes(&self) -> &[u8] { self.framebuffer }

    #[inline]
    fn pixel_bytes(color: Rgb565) -> [u8; 2] {
        let raw: RawU16 = color.into();
        raw.into_inner().to_be_bytes()
    }

    #[inline]
    fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb565,
    ) {
        if x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32 {
            let idx = (y as usize * WIDTH + x as usize) * 2;
            let bytes = Self::pixel_bytes(color);
            self.framebuffer[idx] = bytes[0];
            self.framebuffer[idx + 1] = bytes[1];
        }
    }
}

impl OriginDimensions for St7789Renderer<'_> {
    fn size(&self) -> Size { Size::new(WIDTH as u32, HEIGHT as u32) }
}

impl DrawTarget for St7789Renderer<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }

        let bytes = Self::pixel_bytes(color);
        let x_start = drawable_area.top_left.x as usize;
        let width = drawable_area.size.width as usize;

        for y in drawable_area.rows() {
            let start = (y as usize * WIDTH + x_start) * 2;
            for pixel in self.framebuffer[start..start + width * 2].chunks_exact_mut(2) {
                pixel.copy_from_slice(&bytes);
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let bytes = Self::pixel_bytes(color);
        for pixel in self.framebuffer.chunks_exact_mut(2) {
            pixel.copy_from_slice(&bytes);
        }
        Ok(())
    }
}
