//! Meridian Data-Channel Protocol
//!
//! This crate defines the serial protocol between the Meridian watch and its
//! companion bridge. The link carries small topic-addressed envelopes in both
//! directions; neither side acknowledges anything.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ KIND │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 2B LE  │ 1B   │ 0–768B      │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! KIND is the data-event kind (changed/deleted). The payload is an envelope:
//! a topic path followed by a path-specific body. Receivers demultiplex on
//! the path string and ignore events on topics they do not listen to.

#![no_std]
#![deny(unsafe_code)]

pub mod envelope;
pub mod frame;

pub use envelope::{
    DataEvent, EnvelopeError, EventKind, SyncRequest, WeatherUpdate, MAX_ICON_BYTES,
    MAX_PATH_LEN, SYNC_REQUEST_PATH, WEATHER_UPDATE_PATH,
};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
