//! Companion link transmit task
//!
//! Drains the outbound frame queue onto the UART. Sends are best-effort by
//! design: a failed write is logged at debug level and dropped, never
//! retried. The companion will be asked again on the next natural trigger.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use meridian_protocol::frame::MAX_FRAME_SIZE;
use meridian_protocol::SyncRequest;

use crate::channels::OUTBOUND_FRAMES;

/// Link TX task - writes queued frames to the companion
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx<'static>) {
    info!("Link TX task started");

    loop {
        let frame = OUTBOUND_FRAMES.receive().await;

        let mut buf = [0u8; MAX_FRAME_SIZE];
        match frame.encode(&mut buf) {
            Ok(len) => {
                if let Err(e) = tx.write_all(&buf[..len]).await {
                    debug!("Link send failed: {:?}", e);
                }
            }
            Err(e) => {
                warn!("Frame encode failed: {:?}", e);
            }
        }
    }
}

/// Queue a sync request asking the companion for fresh weather
pub async fn send_sync_request(epoch_ms: i64) {
    let request = SyncRequest {
        timestamp: epoch_ms,
    };

    let event = match request.to_event() {
        Ok(event) => event,
        Err(e) => {
            warn!("Sync request envelope failed: {:?}", e);
            return;
        }
    };

    match event.to_frame() {
        Ok(frame) => {
            OUTBOUND_FRAMES.send(frame).await;
            debug!("Sync request queued");
        }
        Err(e) => {
            warn!("Sync request frame failed: {:?}", e);
        }
    }
}
