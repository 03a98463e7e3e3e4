//! Civil-time conversion
//!
//! The firmware keeps wall time as epoch milliseconds plus a zone offset;
//! the face needs calendar fields. chrono does the calendar math.

use chrono::{DateTime, Datelike, Timelike};

/// Calendar fields of a local wall-clock instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    pub year: i32,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// Days since Sunday, 0-6
    pub weekday: u8,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
}

/// Convert epoch milliseconds plus a zone offset to local calendar fields
///
/// Out-of-range instants clamp to the epoch rather than panicking; the face
/// then shows 1970 until the clock is set, which is the conventional
/// unset-RTC display.
pub fn local_time(epoch_ms: i64, zone_offset_minutes: i32) -> LocalTime {
    let shifted = epoch_ms.saturating_add(zone_offset_minutes as i64 * 60_000);
    let utc = DateTime::from_timestamp_millis(shifted).unwrap_or(DateTime::UNIX_EPOCH);

    LocalTime {
        year: utc.year(),
        month: utc.month() as u8,
        day: utc.day() as u8,
        weekday: utc.weekday().num_days_from_sunday() as u8,
        hour: utc.hour() as u8,
        minute: utc.minute() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_is_thursday_midnight() {
        let t = local_time(0, 0);
        assert_eq!(t.year, 1970);
        assert_eq!(t.month, 1);
        assert_eq!(t.day, 1);
        assert_eq!(t.weekday, 4); // Thursday
        assert_eq!(t.hour, 0);
        assert_eq!(t.minute, 0);
    }

    #[test]
    fn test_known_instant() {
        // 2016-03-04 09:05:00 UTC
        let t = local_time(1_457_082_300_000, 0);
        assert_eq!(t.year, 2016);
        assert_eq!(t.month, 3);
        assert_eq!(t.day, 4);
        assert_eq!(t.weekday, 5); // Friday
        assert_eq!(t.hour, 9);
        assert_eq!(t.minute, 5);
    }

    #[test]
    fn test_zone_offset_crosses_midnight() {
        // 2016-03-04 23:30 UTC at +60 minutes is 00:30 the next day
        let t = local_time(1_457_134_200_000, 60);
        assert_eq!(t.day, 5);
        assert_eq!(t.hour, 0);
        assert_eq!(t.minute, 30);
    }

    #[test]
    fn test_negative_offset() {
        // 2016-03-04 00:15 UTC at -30 minutes is 23:45 the previous day
        let t = local_time(1_457_050_500_000, -30);
        assert_eq!(t.day, 3);
        assert_eq!(t.hour, 23);
        assert_eq!(t.minute, 45);
    }
}
