//! Power and input task
//!
//! Translates the two hardware inputs into face events: the wake button
//! returns the face to interactive mode, the side button toggles the surface
//! on and off, and sustained inactivity drops the face to ambient mode.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use meridian_core::face::FaceEvent;

use crate::channels::FACE_EVENTS;
use crate::config;

/// Debounce hold-off after a button edge
const DEBOUNCE_MS: u64 = 30;

/// Power task - feeds visibility and ambient events to the render engine
#[embassy_executor::task]
pub async fn power_task(mut wake_button: Input<'static>, mut side_button: Input<'static>) {
    info!("Power task started");

    let mut surface_on = true;

    loop {
        let inactivity = Timer::after(Duration::from_secs(config::AMBIENT_TIMEOUT_SECS));

        match select3(
            wake_button.wait_for_falling_edge(),
            side_button.wait_for_falling_edge(),
            inactivity,
        )
        .await
        {
            Either3::First(()) => {
                debug!("Wake button pressed");
                FACE_EVENTS.send(FaceEvent::AmbientExited).await;
                Timer::after_millis(DEBOUNCE_MS).await;
            }
            Either3::Second(()) => {
                surface_on = !surface_on;
                debug!("Side button pressed, surface_on={}", surface_on);
                let event = if surface_on {
                    FaceEvent::SurfaceShown
                } else {
                    FaceEvent::SurfaceHidden
                };
                FACE_EVENTS.send(event).await;
                Timer::after_millis(DEBOUNCE_MS).await;
            }
            Either3::Third(()) => {
                trace!("Inactivity timeout");
                FACE_EVENTS.send(FaceEvent::AmbientEntered).await;
            }
        }
    }
}
