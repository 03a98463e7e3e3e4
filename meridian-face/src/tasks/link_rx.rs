//! Data receiver task
//!
//! Receives frames from the companion link, filters for changed-events on
//! the weather-update topic, and publishes decoded values into the shared
//! weather state. Every failure mode is logged and skipped; one bad payload
//! must never take the receiver down.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use meridian_protocol::{DataEvent, Frame, FrameParser, WeatherUpdate, WEATHER_UPDATE_PATH};

use crate::channels::{REDRAW, WEATHER};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and applies weather updates
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx<'static>) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => handle_frame(&frame).await,
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Handle one parsed frame
async fn handle_frame(frame: &Frame) {
    let event = match DataEvent::from_frame(frame) {
        Ok(event) => event,
        Err(e) => {
            warn!("Bad envelope: {:?}", e);
            return;
        }
    };

    // The watch listens to exactly one topic
    if !event.is_changed_on(WEATHER_UPDATE_PATH) {
        trace!("Ignoring event on {}", event.path.as_str());
        return;
    }

    let update = match WeatherUpdate::decode(&event.body) {
        Ok(update) => update,
        Err(e) => {
            warn!("Weather body decode failed: {:?}", e);
            return;
        }
    };

    {
        let mut weather = WEATHER.lock().await;
        // Temperatures apply even when the icon bytes are bad; the stored
        // icon stays as it was.
        if let Err(e) = weather.apply(&update) {
            warn!("Icon decode failed: {:?}", e);
        }
    }

    debug!("Weather updated: high={} low={}", update.high, update.low);
    REDRAW.signal(());
}
