//! Shared weather state for the watch face
//!
//! One instance is owned by the watch firmware behind a mutex; the data
//! receiver writes it and the render engine reads it. Temperatures use
//! `i32::MIN` as the "never received" sentinel, and the face draws
//! temperature text only when **both** values are set.

use meridian_protocol::WeatherUpdate;

use crate::icon::{Icon, IconError};

/// Sentinel meaning "no temperature received yet"
pub const TEMP_UNSET: i32 = i32::MIN;

/// Weather values displayed on the face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherState {
    /// Forecast high, or TEMP_UNSET
    pub high: i32,
    /// Forecast low, or TEMP_UNSET
    pub low: i32,
    /// Last successfully decoded condition icon
    pub icon: Option<Icon>,
}

impl WeatherState {
    /// Create an empty state (both temperatures unset, no icon)
    pub const fn new() -> Self {
        Self {
            high: TEMP_UNSET,
            low: TEMP_UNSET,
            icon: None,
        }
    }

    /// Whether both temperatures have been received
    ///
    /// A single set value is not enough; the face renders either both
    /// temperatures or neither.
    pub fn has_both_temps(&self) -> bool {
        self.high != TEMP_UNSET && self.low != TEMP_UNSET
    }

    /// Apply a weather-update envelope
    ///
    /// Temperatures are stored verbatim, without range validation; a value
    /// equal to TEMP_UNSET is accepted and then indistinguishable from
    /// "never received". An envelope without an icon clears the stored icon;
    /// one whose icon bytes fail to decode leaves the stored icon unchanged
    /// and surfaces the error so the caller can log it. The temperatures
    /// stay applied either way.
    pub fn apply(&mut self, update: &WeatherUpdate) -> Result<(), IconError> {
        self.high = update.high;
        self.low = update.low;

        match &update.icon {
            None => {
                self.icon = None;
                Ok(())
            }
            Some(bytes) => {
                let icon = Icon::decode(bytes)?;
                self.icon = Some(icon);
                Ok(())
            }
        }
    }
}

impl Default for WeatherState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use meridian_protocol::MAX_ICON_BYTES;

    fn icon_bytes(bytes: &[u8]) -> Vec<u8, MAX_ICON_BYTES> {
        let mut v = Vec::new();
        v.extend_from_slice(bytes).unwrap();
        v
    }

    #[test]
    fn test_new_state_has_no_temps() {
        let state = WeatherState::new();
        assert!(!state.has_both_temps());
        assert!(state.icon.is_none());
    }

    #[test]
    fn test_apply_sets_both_temps() {
        let mut state = WeatherState::new();
        state
            .apply(&WeatherUpdate {
                high: 25,
                low: 16,
                icon: None,
            })
            .unwrap();
        assert_eq!(state.high, 25);
        assert_eq!(state.low, 16);
        assert!(state.has_both_temps());
    }

    #[test]
    fn test_single_sentinel_suppresses_temps() {
        let mut state = WeatherState::new();
        state
            .apply(&WeatherUpdate {
                high: 25,
                low: TEMP_UNSET,
                icon: None,
            })
            .unwrap();
        assert!(!state.has_both_temps());

        state
            .apply(&WeatherUpdate {
                high: TEMP_UNSET,
                low: 16,
                icon: None,
            })
            .unwrap();
        assert!(!state.has_both_temps());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let update = WeatherUpdate {
            high: 8,
            low: -2,
            icon: Some(icon_bytes(&[2, 2, 0b1000_0000, 0b0100_0000])),
        };

        let mut once = WeatherState::new();
        once.apply(&update).unwrap();

        let mut twice = WeatherState::new();
        twice.apply(&update).unwrap();
        twice.apply(&update).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_bad_icon_keeps_previous_icon_and_applies_temps() {
        let mut state = WeatherState::new();
        state
            .apply(&WeatherUpdate {
                high: 20,
                low: 10,
                icon: Some(icon_bytes(&[2, 2, 0b1000_0000, 0b0100_0000])),
            })
            .unwrap();
        let good_icon = state.icon.clone();
        assert!(good_icon.is_some());

        // Truncated icon bytes: decode fails, stored icon stays, temps move
        let err = state
            .apply(&WeatherUpdate {
                high: 21,
                low: 11,
                icon: Some(icon_bytes(&[8, 8, 0xFF])),
            })
            .unwrap_err();
        assert_eq!(err, IconError::Truncated);
        assert_eq!(state.icon, good_icon);
        assert_eq!(state.high, 21);
        assert_eq!(state.low, 11);
    }

    #[test]
    fn test_absent_icon_clears_stored_icon() {
        let mut state = WeatherState::new();
        state
            .apply(&WeatherUpdate {
                high: 20,
                low: 10,
                icon: Some(icon_bytes(&[2, 2, 0b1000_0000, 0b0100_0000])),
            })
            .unwrap();
        assert!(state.icon.is_some());

        state
            .apply(&WeatherUpdate {
                high: 20,
                low: 10,
                icon: None,
            })
            .unwrap();
        assert!(state.icon.is_none());
    }
}
