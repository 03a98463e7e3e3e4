//! Async ST7789 display driver for the 240x240 watch panel
//!
//! Renders into a single RAM framebuffer (112.5 KiB for 240x240 RGB565) and
//! flushes it over SPI with DMA. The driver implements
//! `embedded_graphics::DrawTarget`, so the paint layer draws straight into
//! the framebuffer and one `flush` pushes the finished frame to the panel.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Async, Spi};
use embassy_time::Timer;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Panel dimensions
pub const WIDTH: usize = 240;
pub const HEIGHT: usize = 240;
const BUFFER_SIZE: usize = WIDTH * HEIGHT * 2;

// ST7789 commands
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

/// Framebuffer storage, placed in a StaticCell by main
pub struct Framebuffer {
    pixels: [u8; BUFFER_SIZE],
}

impl Framebuffer {
    pub const fn new() -> Self {
        Self {
            pixels: [0; BUFFER_SIZE],
        }
    }
}

/// ST7789 panel driver
pub struct St7789 {
    spi: Spi<'static, SPI0, Async>,
    dc: Output<'static>,
    cs: Output<'static>,
    rst: Output<'static>,
    buffer: &'static mut Framebuffer,
}

impl St7789 {
    /// Create a new driver over an async SPI bus
    pub fn new(
        spi: Spi<'static, SPI0, Async>,
        dc: Output<'static>,
        cs: Output<'static>,
        rst: Output<'static>,
        buffer: &'static mut Framebuffer,
    ) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            buffer,
        }
    }

    /// Initialize the panel
    pub async fn init(&mut self) -> Result<(), spi::Error> {
        // Hardware reset pulse
        self.rst.set_low();
        Timer::after_millis(10).await;
        self.rst.set_high();
        Timer::after_millis(120).await;

        self.command(SWRESET, &[]).await?;
        Timer::after_millis(150).await;
        self.command(SLPOUT, &[]).await?;
        Timer::after_millis(10).await;
        // 16-bit RGB565
        self.command(COLMOD, &[0x55]).await?;
        self.command(MADCTL, &[0x00]).await?;
        // Full-panel window, set once; every flush rewrites the whole frame
        self.command(CASET, &[0x00, 0x00, 0x00, (WIDTH - 1) as u8]).await?;
        self.command(RASET, &[0x00, 0x00, 0x00, (HEIGHT - 1) as u8]).await?;
        self.command(INVON, &[]).await?;
        self.command(NORON, &[]).await?;
        self.command(DISPON, &[]).await?;
        Timer::after_millis(10).await;
        Ok(())
    }

    /// Push the framebuffer to the panel
    pub async fn flush(&mut self) -> Result<(), spi::Error> {
        self.cs.set_low();
        self.dc.set_low();
        self.spi.write(&[RAMWR]).await?;
        self.dc.set_high();
        let result = self.spi.write(&self.buffer.pixels).await;
        self.cs.set_high();
        result
    }

    async fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), spi::Error> {
        self.cs.set_low();
        self.dc.set_low();
        self.spi.write(&[cmd]).await?;
        let result = if params.is_empty() {
            Ok(())
        } else {
            self.dc.set_high();
            self.spi.write(params).await
        };
        self.cs.set_high();
        result
    }
}

impl OriginDimensions for St7789 {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for St7789 {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                let idx = (point.y as usize * WIDTH + point.x as usize) * 2;
                // Panel expects big-endian RGB565
                let raw = RawU16::from(color).into_inner();
                self.buffer.pixels[idx] = (raw >> 8) as u8;
                self.buffer.pixels[idx + 1] = raw as u8;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let raw = RawU16::from(color).into_inner();
        let [hi, lo] = raw.to_be_bytes();
        for pair in self.buffer.pixels.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }
        Ok(())
    }
}
