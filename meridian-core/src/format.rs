//! Face text formatting
//!
//! Time is `H:MM`: 24-hour, minutes always two digits, hours unpadded.
//! The date line is `Www, Mmm DD YYYY` with short English weekday and month
//! names. Temperatures render as the signed whole number followed by the
//! degree sign.

use core::fmt::Write;

use heapless::String;

use crate::clock::LocalTime;

/// Short weekday names, indexed by days since Sunday
pub const WEEKDAY_ABBR: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Short month names, indexed by month - 1
pub const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format a wall-clock time as `H:MM`
pub fn time_text(hour: u8, minute: u8) -> String<8> {
    let mut text = String::new();
    let _ = write!(text, "{}:{:02}", hour, minute);
    text
}

/// Format the date line, e.g. `Fri, Mar 04 2016`
pub fn date_text(time: &LocalTime) -> String<20> {
    let weekday = WEEKDAY_ABBR[time.weekday as usize % 7];
    let month = MONTH_ABBR[(time.month as usize).saturating_sub(1) % 12];

    let mut text = String::new();
    let _ = write!(text, "{}, {} {:02} {:04}", weekday, month, time.day, time.year);
    text
}

/// Format a temperature as `<degrees>°`
pub fn temp_text(degrees: i32) -> String<16> {
    let mut text = String::new();
    let _ = write!(text, "{}\u{00B0}", degrees);
    text
}
