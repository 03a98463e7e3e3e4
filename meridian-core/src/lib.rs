//! Board-agnostic watch-face logic for the Meridian wearable
//!
//! This crate contains all face behavior that does not depend on specific
//! hardware:
//!
//! - Shared weather state with unset-sentinel semantics
//! - Face state machine (shown/hidden, interactive/ambient)
//! - Minute-boundary redraw schedule math
//! - Time, date, and temperature text formatting
//! - Shape-dependent layout tables
//! - 1-bpp condition-icon codec
//! - Per-frame scene composition (the draw algorithm)
//!
//! The firmware crates own the peripherals and the paint pipeline; everything
//! here runs and tests on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod face;
pub mod format;
pub mod icon;
pub mod layout;
pub mod schedule;
pub mod weather;
