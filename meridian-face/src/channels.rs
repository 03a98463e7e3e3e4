//! Inter-task communication
//!
//! Defines the static channels used for communication between Embassy tasks.
//! The weather state sits behind a mutex shared by the data receiver and the
//! render engine; the receiver announces changes through the redraw signal
//! instead of holding any reference to the engine.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use meridian_core::face::FaceEvent;
use meridian_core::weather::WeatherState;
use meridian_protocol::Frame;

/// Channel capacity for face events
const FACE_EVENT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound link frames
const OUTBOUND_CHANNEL_SIZE: usize = 4;

/// Weather values shared between the data receiver and the render engine
pub static WEATHER: Mutex<CriticalSectionRawMutex, WeatherState> =
    Mutex::new(WeatherState::new());

/// Signal that the face needs repainting (weather changed)
pub static REDRAW: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Face lifecycle events (visibility, ambient transitions)
pub static FACE_EVENTS: Channel<CriticalSectionRawMutex, FaceEvent, FACE_EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Frames queued for the companion link
pub static OUTBOUND_FRAMES: Channel<CriticalSectionRawMutex, Frame, OUTBOUND_CHANNEL_SIZE> =
    Channel::new();
