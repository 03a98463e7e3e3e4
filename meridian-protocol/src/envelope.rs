//! Topic-addressed data events and their envelope bodies
//!
//! An envelope is a topic path plus a path-specific body. Only two topics
//! exist:
//! - Watch → Companion: a sync request carrying the watch's timestamp
//! - Companion → Watch: a weather update carrying temperatures and an
//!   optional inline condition icon
//!
//! There is no acknowledgement, versioning, or idempotence guard; receivers
//! filter on event kind and topic path and ignore everything else.

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use heapless::{String, Vec};

/// Topic path for watch-originated sync requests
pub const SYNC_REQUEST_PATH: &str = "/meridian/sync-request";

/// Topic path for companion-originated weather updates
pub const WEATHER_UPDATE_PATH: &str = "/meridian/weather-update";

/// Maximum topic path length in bytes
pub const MAX_PATH_LEN: usize = 48;

/// Maximum encoded icon size: 2-byte header plus 64x64 1-bpp rows
pub const MAX_ICON_BYTES: usize = 2 + 64 * 8;

/// Maximum envelope body length
pub const MAX_BODY_LEN: usize = MAX_PAYLOAD_SIZE - 1 - MAX_PATH_LEN;

// Wire format values for the event kind
const KIND_CHANGED: u8 = 0x01;
const KIND_DELETED: u8 = 0x02;

/// Errors that can occur while encoding or decoding envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnvelopeError {
    /// The frame kind byte is not a known event kind
    UnknownKind,
    /// Topic path exceeds MAX_PATH_LEN
    PathTooLong,
    /// Topic path bytes are not valid UTF-8
    InvalidPath,
    /// Body is shorter than its fixed layout requires
    Truncated,
    /// Body has bytes past the end of its fixed layout
    TrailingBytes,
    /// A body field holds a value outside its wire grammar
    InvalidBody,
    /// Body exceeds MAX_BODY_LEN
    BodyTooLarge,
    /// Inline icon exceeds MAX_ICON_BYTES
    IconTooLarge,
}

/// Kind of a data-channel event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// The value at the topic path was created or replaced
    Changed,
    /// The value at the topic path was removed
    Deleted,
}

impl EventKind {
    /// Parse a kind from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            KIND_CHANGED => Some(EventKind::Changed),
            KIND_DELETED => Some(EventKind::Deleted),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            EventKind::Changed => KIND_CHANGED,
            EventKind::Deleted => KIND_DELETED,
        }
    }
}

/// A decoded data-channel event: kind, topic path, and opaque body bytes
///
/// The body is interpreted by [`SyncRequest::decode`] or
/// [`WeatherUpdate::decode`] once the receiver has matched the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEvent {
    /// What happened to the value at the path
    pub kind: EventKind,
    /// Topic path this event was published on
    pub path: String<MAX_PATH_LEN>,
    /// Path-specific body bytes
    pub body: Vec<u8, MAX_BODY_LEN>,
}

impl DataEvent {
    /// Create an event from parts
    pub fn new(kind: EventKind, path: &str, body: &[u8]) -> Result<Self, EnvelopeError> {
        let mut path_str = String::new();
        path_str
            .push_str(path)
            .map_err(|_| EnvelopeError::PathTooLong)?;

        let mut body_vec = Vec::new();
        body_vec
            .extend_from_slice(body)
            .map_err(|_| EnvelopeError::BodyTooLarge)?;

        Ok(Self {
            kind,
            path: path_str,
            body: body_vec,
        })
    }

    /// True if this is a changed-event on the given topic path
    ///
    /// This is the only filter receivers apply; deleted events and foreign
    /// topics fall through untouched.
    pub fn is_changed_on(&self, path: &str) -> bool {
        self.kind == EventKind::Changed && self.path.as_str() == path
    }

    /// Decode an event from a frame payload
    ///
    /// Payload layout: `path_len: u8 | path bytes | body bytes`.
    pub fn from_frame(frame: &Frame) -> Result<Self, EnvelopeError> {
        let kind = EventKind::from_byte(frame.kind).ok_or(EnvelopeError::UnknownKind)?;

        let payload = frame.payload.as_slice();
        let (&path_len, rest) = payload.split_first().ok_or(EnvelopeError::Truncated)?;
        let path_len = path_len as usize;
        if path_len > MAX_PATH_LEN {
            return Err(EnvelopeError::PathTooLong);
        }
        if rest.len() < path_len {
            return Err(EnvelopeError::Truncated);
        }

        let (path_bytes, body) = rest.split_at(path_len);
        let path = core::str::from_utf8(path_bytes).map_err(|_| EnvelopeError::InvalidPath)?;

        Self::new(kind, path, body)
    }

    /// Encode this event into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
        payload
            .push(self.path.len() as u8)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        payload
            .extend_from_slice(self.path.as_bytes())
            .map_err(|_| FrameError::PayloadTooLarge)?;
        payload
            .extend_from_slice(&self.body)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Frame::new(self.kind.to_byte(), &payload)
    }
}

/// Sync-request body: the watch asks the companion to push fresh weather
///
/// The timestamp makes consecutive requests distinct on the wire; the
/// companion does not interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncRequest {
    /// Watch epoch time in milliseconds
    pub timestamp: i64,
}

impl SyncRequest {
    /// Encode the body bytes
    pub fn encode(&self) -> [u8; 8] {
        self.timestamp.to_le_bytes()
    }

    /// Decode from body bytes
    pub fn decode(body: &[u8]) -> Result<Self, EnvelopeError> {
        let bytes: [u8; 8] = body.try_into().map_err(|_| {
            if body.len() < 8 {
                EnvelopeError::Truncated
            } else {
                EnvelopeError::TrailingBytes
            }
        })?;
        Ok(Self {
            timestamp: i64::from_le_bytes(bytes),
        })
    }

    /// Wrap into a changed-event on the sync-request topic
    pub fn to_event(&self) -> Result<DataEvent, EnvelopeError> {
        DataEvent::new(EventKind::Changed, SYNC_REQUEST_PATH, &self.encode())
    }
}

/// Weather-update body: temperatures plus an optional inline condition icon
///
/// Temperatures are carried verbatim; no range validation happens anywhere,
/// so a value equal to the watch's unset sentinel is legal on the wire and
/// simply renders as "no data" on the face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherUpdate {
    /// Forecast high in whole degrees
    pub high: i32,
    /// Forecast low in whole degrees
    pub low: i32,
    /// Encoded condition icon, if the companion has one for the condition
    pub icon: Option<Vec<u8, MAX_ICON_BYTES>>,
}

impl WeatherUpdate {
    /// Encode the body bytes
    ///
    /// Layout: `high: i32 LE | low: i32 LE | icon_present: u8 | [icon_len:
    /// u16 LE | icon bytes]`.
    pub fn encode(&self) -> Result<Vec<u8, MAX_BODY_LEN>, EnvelopeError> {
        let mut body = Vec::new();

        body.extend_from_slice(&self.high.to_le_bytes())
            .map_err(|_| EnvelopeError::BodyTooLarge)?;
        body.extend_from_slice(&self.low.to_le_bytes())
            .map_err(|_| EnvelopeError::BodyTooLarge)?;

        match &self.icon {
            Some(icon) => {
                body.push(1).map_err(|_| EnvelopeError::BodyTooLarge)?;
                body.extend_from_slice(&(icon.len() as u16).to_le_bytes())
                    .map_err(|_| EnvelopeError::BodyTooLarge)?;
                body.extend_from_slice(icon).map_err(|_| EnvelopeError::BodyTooLarge)?;
            }
            None => {
                body.push(0).map_err(|_| EnvelopeError::BodyTooLarge)?;
            }
        }

        Ok(body)
    }

    /// Decode from body bytes
    pub fn decode(body: &[u8]) -> Result<Self, EnvelopeError> {
        if body.len() < 9 {
            return Err(EnvelopeError::Truncated);
        }

        let high = i32::from_le_bytes(body[0..4].try_into().unwrap());
        let low = i32::from_le_bytes(body[4..8].try_into().unwrap());

        let icon = match body[8] {
            0 => {
                if body.len() > 9 {
                    return Err(EnvelopeError::TrailingBytes);
                }
                None
            }
            1 => {
                if body.len() < 11 {
                    return Err(EnvelopeError::Truncated);
                }
                let icon_len = u16::from_le_bytes(body[9..11].try_into().unwrap()) as usize;
                if icon_len > MAX_ICON_BYTES {
                    return Err(EnvelopeError::IconTooLarge);
                }
                let icon_bytes = &body[11..];
                if icon_bytes.len() < icon_len {
                    return Err(EnvelopeError::Truncated);
                }
                if icon_bytes.len() > icon_len {
                    return Err(EnvelopeError::TrailingBytes);
                }
                let mut icon = Vec::new();
                icon.extend_from_slice(icon_bytes)
                    .map_err(|_| EnvelopeError::IconTooLarge)?;
                Some(icon)
            }
            _ => return Err(EnvelopeError::InvalidBody),
        };

        Ok(Self { high, low, icon })
    }

    /// Wrap into a changed-event on the weather-update topic
    pub fn to_event(&self) -> Result<DataEvent, EnvelopeError> {
        DataEvent::new(EventKind::Changed, WEATHER_UPDATE_PATH, &self.encode()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_roundtrip() {
        for kind in [EventKind::Changed, EventKind::Deleted] {
            assert_eq!(EventKind::from_byte(kind.to_byte()), Some(kind));
        }
        assert!(EventKind::from_byte(0x00).is_none());
        assert!(EventKind::from_byte(0xFF).is_none());
    }

    #[test]
    fn test_sync_request_roundtrip() {
        let request = SyncRequest {
            timestamp: 1_706_000_123_456,
        };
        let event = request.to_event().unwrap();
        assert_eq!(event.kind, EventKind::Changed);
        assert_eq!(event.path.as_str(), SYNC_REQUEST_PATH);

        let decoded = SyncRequest::decode(&event.body).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_sync_request_bad_lengths() {
        assert_eq!(
            SyncRequest::decode(&[0; 7]),
            Err(EnvelopeError::Truncated)
        );
        assert_eq!(
            SyncRequest::decode(&[0; 9]),
            Err(EnvelopeError::TrailingBytes)
        );
    }

    #[test]
    fn test_weather_update_roundtrip_without_icon() {
        let update = WeatherUpdate {
            high: 24,
            low: -3,
            icon: None,
        };
        let body = update.encode().unwrap();
        let decoded = WeatherUpdate::decode(&body).unwrap();
        assert_eq!(decoded, update);
    }

    #[test]
    fn test_weather_update_roundtrip_with_icon() {
        let mut icon = Vec::new();
        icon.extend_from_slice(&[2, 2, 0b1000_0000, 0b0100_0000]).unwrap();
        let update = WeatherUpdate {
            high: 31,
            low: 18,
            icon: Some(icon),
        };
        let body = update.encode().unwrap();
        let decoded = WeatherUpdate::decode(&body).unwrap();
        assert_eq!(decoded, update);
    }

    #[test]
    fn test_weather_update_sentinel_passes_through() {
        // No range validation: the sentinel is legal on the wire
        let update = WeatherUpdate {
            high: i32::MIN,
            low: 10,
            icon: None,
        };
        let body = update.encode().unwrap();
        let decoded = WeatherUpdate::decode(&body).unwrap();
        assert_eq!(decoded.high, i32::MIN);
    }

    #[test]
    fn test_weather_update_truncated_icon() {
        let mut icon = Vec::new();
        icon.extend_from_slice(&[4, 4, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let update = WeatherUpdate {
            high: 0,
            low: 0,
            icon: Some(icon),
        };
        let mut body = update.encode().unwrap();
        body.truncate(body.len() - 2);
        assert_eq!(
            WeatherUpdate::decode(&body),
            Err(EnvelopeError::Truncated)
        );
    }

    #[test]
    fn test_weather_update_bad_icon_flag() {
        let mut body = WeatherUpdate {
            high: 0,
            low: 0,
            icon: None,
        }
        .encode()
        .unwrap();
        body[8] = 2;
        assert_eq!(
            WeatherUpdate::decode(&body),
            Err(EnvelopeError::InvalidBody)
        );
    }

    #[test]
    fn test_data_event_frame_roundtrip() {
        let update = WeatherUpdate {
            high: 7,
            low: -1,
            icon: None,
        };
        let event = update.to_event().unwrap();
        let frame = event.to_frame().unwrap();
        let parsed = DataEvent::from_frame(&frame).unwrap();

        assert!(parsed.is_changed_on(WEATHER_UPDATE_PATH));
        assert!(!parsed.is_changed_on(SYNC_REQUEST_PATH));
        assert_eq!(WeatherUpdate::decode(&parsed.body).unwrap(), update);
    }

    #[test]
    fn test_deleted_event_is_not_changed() {
        let event = DataEvent::new(EventKind::Deleted, SYNC_REQUEST_PATH, &[]).unwrap();
        assert!(!event.is_changed_on(SYNC_REQUEST_PATH));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let frame = Frame::new(0x7F, &[0]).unwrap();
        assert_eq!(
            DataEvent::from_frame(&frame),
            Err(EnvelopeError::UnknownKind)
        );
    }

    #[test]
    fn test_event_with_garbled_path_length() {
        // path_len claims more bytes than the payload holds
        let frame = Frame::new(0x01, &[40, b'/', b'x']).unwrap();
        assert_eq!(
            DataEvent::from_frame(&frame),
            Err(EnvelopeError::Truncated)
        );
    }

    #[test]
    fn test_event_with_invalid_utf8_path() {
        let frame = Frame::new(0x01, &[2, 0xFF, 0xFE]).unwrap();
        assert_eq!(
            DataEvent::from_frame(&frame),
            Err(EnvelopeError::InvalidPath)
        );
    }
}
