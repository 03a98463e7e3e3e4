//! Wall-clock time
//!
//! The watch keeps epoch time as a boot-time seed plus the monotonic uptime.
//! Zone handling lives in the face state; this module only answers "what is
//! the UTC epoch time right now".

use embassy_time::Instant;

use crate::config;

/// Current UTC epoch time in milliseconds
pub fn epoch_now_ms() -> i64 {
    config::BOOT_EPOCH_MS + Instant::now().as_millis() as i64
}
