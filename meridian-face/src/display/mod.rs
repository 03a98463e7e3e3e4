//! Display pipeline: panel driver and scene painting

mod paint;
mod st7789;

pub use paint::paint;
pub use st7789::{Framebuffer, St7789};
