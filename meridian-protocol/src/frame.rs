//! Frame encoding and decoding for the Meridian data channel.
//!
//! Frame format:
//! - START (1 byte): 0xA5 synchronization byte
//! - LENGTH (2 bytes, little endian): payload length (0-768)
//! - KIND (1 byte): data-event kind identifier
//! - PAYLOAD (0-768 bytes): envelope data
//! - CHECKSUM (1 byte): XOR of both LENGTH bytes, KIND, and all PAYLOAD bytes
//!
//! The two-byte length exists so a weather envelope can carry its condition
//! icon inline instead of requiring a second fetch round trip.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xA5;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 768;

/// Maximum complete frame size (START + LENGTH + KIND + MAX_PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = 1 + 2 + 1 + MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Frame is incomplete (need more bytes)
    Incomplete,
    /// Invalid frame structure
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Data-event kind identifier
    pub kind: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given kind and payload
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge);
        }

        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            kind,
            payload: payload_vec,
        })
    }

    /// Create a frame with no payload
    pub fn empty(kind: u8) -> Self {
        Self {
            kind,
            payload: Vec::new(),
        }
    }

    /// Calculate checksum for frame data
    fn calculate_checksum(length: u16, kind: u8, payload: &[u8]) -> u8 {
        let [len_lo, len_hi] = length.to_le_bytes();
        let mut checksum = len_lo ^ len_hi ^ kind;
        for &byte in payload {
            checksum ^= byte;
        }
        checksum
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = 5 + self.payload.len(); // START + LENGTH + KIND + payload + CHECKSUM
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u16;
        let checksum = Self::calculate_checksum(length, self.kind, &self.payload);

        buffer[0] = FRAME_START;
        buffer[1..3].copy_from_slice(&length.to_le_bytes());
        buffer[3] = self.kind;
        buffer[4..4 + self.payload.len()].copy_from_slice(&self.payload);
        buffer[4 + self.payload.len()] = checksum;

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// State machine for parsing incoming frames
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    expected_length: u16,
    kind: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for START byte
    WaitingForStart,
    /// Got START, waiting for the low length byte
    WaitingForLengthLo,
    /// Got the low length byte, waiting for the high one
    WaitingForLengthHi,
    /// Got LENGTH, waiting for KIND
    WaitingForKind,
    /// Reading payload bytes
    ReadingPayload,
    /// Waiting for CHECKSUM
    WaitingForChecksum,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            buffer: Vec::new(),
            expected_length: 0,
            kind: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.buffer.clear();
        self.expected_length = 0;
        self.kind = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::WaitingForStart => {
                if byte == FRAME_START {
                    self.state = ParseState::WaitingForLengthLo;
                }
                // Silently ignore non-START bytes while waiting
                Ok(None)
            }
            ParseState::WaitingForLengthLo => {
                self.expected_length = byte as u16;
                self.state = ParseState::WaitingForLengthHi;
                Ok(None)
            }
            ParseState::WaitingForLengthHi => {
                self.expected_length |= (byte as u16) << 8;
                if self.expected_length > MAX_PAYLOAD_SIZE as u16 {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                self.state = ParseState::WaitingForKind;
                Ok(None)
            }
            ParseState::WaitingForKind => {
                self.kind = byte;
                if self.expected_length == 0 {
                    self.state = ParseState::WaitingForChecksum;
                } else {
                    self.buffer.clear();
                    self.state = ParseState::ReadingPayload;
                }
                Ok(None)
            }
            ParseState::ReadingPayload => {
                // This cannot fail since expected_length <= MAX_PAYLOAD_SIZE
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::WaitingForChecksum;
                }
                Ok(None)
            }
            ParseState::WaitingForChecksum => {
                let expected_checksum =
                    Frame::calculate_checksum(self.expected_length, self.kind, &self.buffer);

                if byte != expected_checksum {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let frame = Frame {
                    kind: self.kind,
                    payload: self.buffer.clone(),
                };

                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_encode_empty_payload() {
        let frame = Frame::empty(0x01);
        let mut buffer = [0u8; 10];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 5);
        assert_eq!(buffer[0], FRAME_START);
        assert_eq!(buffer[1], 0); // length lo
        assert_eq!(buffer[2], 0); // length hi
        assert_eq!(buffer[3], 0x01); // kind
        assert_eq!(buffer[4], 0x01); // checksum (0 ^ 0 ^ 0x01 = 0x01)
    }

    #[test]
    fn test_frame_encode_with_payload() {
        let frame = Frame::new(0x01, &[10, 20, 30]).unwrap();
        let mut buffer = [0u8; 16];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 8);
        assert_eq!(buffer[0], FRAME_START);
        assert_eq!(buffer[1], 3); // length lo
        assert_eq!(buffer[2], 0); // length hi
        assert_eq!(buffer[3], 0x01); // kind
        assert_eq!(&buffer[4..7], &[10, 20, 30]);
        assert_eq!(buffer[7], 3 ^ 0x01 ^ 10 ^ 20 ^ 30);
    }

    #[test]
    fn test_frame_roundtrip() {
        let original = Frame::new(0x02, &[1, 2, 3, 4, 5]).unwrap();
        let encoded = original.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();

        assert_eq!(parsed.kind, original.kind);
        assert_eq!(parsed.payload, original.payload);
    }

    #[test]
    fn test_long_payload_roundtrip() {
        // Length must survive the two-byte encoding above 255
        let payload = [0x5Au8; 300];
        let original = Frame::new(0x01, &payload).unwrap();
        let encoded = original.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(parsed.payload.len(), 300);
    }

    #[test]
    fn test_parser_invalid_checksum() {
        let frame = Frame::new(0x01, &[7, 8, 9]).unwrap();
        let mut encoded = frame.encode_to_vec().unwrap();
        // Corrupt the checksum
        let last_idx = encoded.len() - 1;
        encoded[last_idx] ^= 0xFF;

        let mut parser = FrameParser::new();
        let result = parser.feed_bytes(&encoded);
        assert_eq!(result, Err(FrameError::InvalidChecksum));
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        parser.feed(FRAME_START).unwrap();
        parser.feed(0xFF).unwrap();
        // 0x0FFF > MAX_PAYLOAD_SIZE
        assert_eq!(parser.feed(0x0F), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_parser_resync_after_garbage() {
        let frame = Frame::empty(0x02);
        let encoded = frame.encode_to_vec().unwrap();

        // Prepend garbage bytes
        let mut data = Vec::<u8, 20>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12, 0x34]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&data).unwrap().unwrap();

        assert_eq!(parsed.kind, 0x02);
    }

    #[test]
    fn test_parser_recovers_after_bad_checksum() {
        let good = Frame::new(0x01, &[1, 2]).unwrap();
        let mut corrupted = good.encode_to_vec().unwrap();
        let last_idx = corrupted.len() - 1;
        corrupted[last_idx] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert!(parser.feed_bytes(&corrupted).is_err());

        // A clean frame after the error must still parse
        let encoded = good.encode_to_vec().unwrap();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(parsed.payload.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        let result = Frame::new(0x01, &large_payload);
        assert_eq!(result, Err(FrameError::PayloadTooLarge));
    }

    proptest! {
        #[test]
        fn prop_roundtrip_any_payload(kind in 0u8..=255, payload in proptest::collection::vec(any::<u8>(), 0..MAX_PAYLOAD_SIZE)) {
            let original = Frame::new(kind, &payload).unwrap();
            let encoded = original.encode_to_vec().unwrap();

            let mut parser = FrameParser::new();
            let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();
            prop_assert_eq!(parsed.kind, kind);
            prop_assert_eq!(parsed.payload.as_slice(), payload.as_slice());
        }
    }
}
