//! Watch-face engine logic: state machine and per-frame scene composition

pub mod scene;
pub mod state;

pub use scene::{compose, Background, DateLine, Divider, FaceScene, IconAt, Temps, TimeStyle};
pub use state::{FaceEvent, FaceState, PowerMode, Visibility};
