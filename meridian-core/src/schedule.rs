//! Redraw schedule math
//!
//! While the face is visible and interactive it redraws once per minute,
//! phase-aligned to the wall-clock minute boundary so the displayed time
//! flips exactly on `:00`.

/// Interactive redraw period in milliseconds
pub const INTERACTIVE_TICK_MS: u64 = 60_000;

/// Delay from `now_ms` (epoch milliseconds) to the next minute boundary
///
/// Returns a value in `1..=INTERACTIVE_TICK_MS`: a tick that lands exactly
/// on a boundary schedules the next one a full minute out.
pub fn delay_to_next_minute_ms(now_ms: u64) -> u64 {
    INTERACTIVE_TICK_MS - (now_ms % INTERACTIVE_TICK_MS)
}
