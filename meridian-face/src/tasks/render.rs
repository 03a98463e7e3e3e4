//! Face render engine task
//!
//! Owns the face state machine and the panel. One loop services three wake
//! sources: face events (visibility/ambient transitions), the receiver's
//! redraw signal, and the minute-boundary timer. The timer is never held
//! across iterations: each pass recomputes the deadline from the predicate,
//! which gives cancel-then-maybe-reschedule semantics for free.

use defmt::*;
use embassy_futures::select::{select, select3, Either, Either3};
use embassy_time::{Duration, Instant, Timer};

use meridian_core::clock::local_time;
use meridian_core::face::{compose, FaceEvent, FaceState};
use meridian_core::layout::Layout;
use meridian_core::schedule::delay_to_next_minute_ms;

use crate::channels::{FACE_EVENTS, REDRAW, WEATHER};
use crate::clock;
use crate::config;
use crate::display::{self, St7789};

/// Render task - drives the watch face
#[embassy_executor::task]
pub async fn render_task(mut panel: St7789) {
    info!("Render task started");

    let layout = Layout::for_shape(config::DISPLAY_SHAPE);
    let mut state = FaceState::new(config::LOW_BIT_AMBIENT, config::ZONE_OFFSET_MINUTES);

    // The surface comes up visible after boot
    state = state.transition(FaceEvent::SurfaceShown);
    draw_frame(&mut panel, &state, layout).await;

    loop {
        if state.timer_should_run() {
            let delay = delay_to_next_minute_ms(clock::epoch_now_ms() as u64);
            let deadline = Instant::now() + Duration::from_millis(delay);

            match select3(FACE_EVENTS.receive(), REDRAW.wait(), Timer::at(deadline)).await {
                Either3::First(event) => {
                    debug!("Face event: {:?}", event);
                    state = state.transition(event);
                }
                Either3::Second(()) => trace!("Redraw requested"),
                Either3::Third(()) => trace!("Minute tick"),
            }
        } else {
            match select(FACE_EVENTS.receive(), REDRAW.wait()).await {
                Either::First(event) => {
                    debug!("Face event: {:?}", event);
                    state = state.transition(event);
                }
                Either::Second(()) => trace!("Redraw requested"),
            }
        }

        if state.is_visible() {
            draw_frame(&mut panel, &state, layout).await;
        }
    }
}

/// Compose and paint one frame, then flush it to the panel
async fn draw_frame(panel: &mut St7789, state: &FaceState, layout: &Layout) {
    let now = local_time(clock::epoch_now_ms(), state.zone_offset_minutes());

    {
        // Hold the weather lock only while composing and painting; the
        // receiver blocks for at most one frame build.
        let weather = WEATHER.lock().await;
        let scene = compose(state, &weather, &now, layout);
        // Painting into the framebuffer is infallible
        let _ = display::paint(panel, &scene);
    }

    if let Err(e) = panel.flush().await {
        warn!("Panel flush failed: {:?}", e);
    }
}
