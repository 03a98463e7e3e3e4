//! Embassy tasks for the watch firmware

pub mod link_rx;
pub mod link_tx;
pub mod power;
pub mod render;
