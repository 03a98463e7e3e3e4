//! Build-time board configuration
//!
//! The face has no runtime configuration surface; per-device facts are fixed
//! when the firmware is built.

use meridian_core::layout::Shape;

/// Glass shape fitted over the panel on this board
pub const DISPLAY_SHAPE: Shape = Shape::Round;

/// Panel restricts ambient rendering to 1-bit colors
pub const LOW_BIT_AMBIENT: bool = false;

/// Wall-clock zone offset in minutes east of UTC
pub const ZONE_OFFSET_MINUTES: i32 = 0;

/// Epoch milliseconds at power-on. Patched by the flashing tool; the stock
/// value makes an unprovisioned watch read 2026-01-01 00:00 UTC.
pub const BOOT_EPOCH_MS: i64 = 1_767_225_600_000;

/// Companion link baud rate
pub const LINK_BAUD: u32 = 115_200;

/// SPI clock for the LCD (ST7789 maximum)
pub const SPI_FREQ_HZ: u32 = 62_500_000;

/// Seconds of inactivity before the face drops to ambient mode
pub const AMBIENT_TIMEOUT_SECS: u64 = 15;
