//! Meridian companion bridge firmware
//!
//! Sits between the host (which knows the forecast) and the watch (which
//! displays it). The host feeds forecast lines over the console UART; the
//! watch link carries sync requests in and weather updates out. Every push
//! is a full snapshot; there is nothing to acknowledge and nothing to
//! retry.

#![no_std]
#![no_main]

mod forecast;
mod icons;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, BufferedUartRx, BufferedUartTx, Config as UartConfig};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embedded_io_async::{Read, Write};
use heapless::{String, Vec};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use meridian_protocol::frame::MAX_FRAME_SIZE;
use meridian_protocol::{
    DataEvent, FrameParser, SyncRequest, WeatherUpdate, SYNC_REQUEST_PATH,
};

use crate::forecast::{parse_line, Forecast};

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

/// Watch link baud rate
const LINK_BAUD: u32 = 115_200;

/// Host console baud rate
const CONSOLE_BAUD: u32 = 115_200;

/// Maximum console line length
const CONSOLE_LINE_LEN: usize = 64;

/// Push queue depth; a burst of sync requests beyond this is dropped
const REFRESH_QUEUE_SIZE: usize = 8;

/// Latest forecast from the host, if any has arrived yet
static FORECAST: Mutex<CriticalSectionRawMutex, Option<Forecast>> = Mutex::new(None);

/// One entry per pending push; preserves one push per sync request
static REFRESH_QUEUE: Channel<CriticalSectionRawMutex, (), REFRESH_QUEUE_SIZE> = Channel::new();

// Static cells for UART buffers (must live forever)
static LINK_TX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
static LINK_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static CONSOLE_TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static CONSOLE_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Meridian companion firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Watch link (UART0: GP0=TX, GP1=RX)
    let mut link_config = UartConfig::default();
    link_config.baudrate = LINK_BAUD;
    let link = BufferedUart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Irqs,
        LINK_TX_BUF.init([0; 1024]),
        LINK_RX_BUF.init([0; 256]),
        link_config,
    );
    let (link_tx, link_rx) = link.split();

    // Host console (UART1: GP4=TX, GP5=RX)
    let mut console_config = UartConfig::default();
    console_config.baudrate = CONSOLE_BAUD;
    let console = BufferedUart::new(
        p.UART1,
        p.PIN_4,
        p.PIN_5,
        Irqs,
        CONSOLE_TX_BUF.init([0; 64]),
        CONSOLE_RX_BUF.init([0; 256]),
        console_config,
    );
    let (_console_tx, console_rx) = console.split();

    unwrap!(spawner.spawn(watch_rx_task(link_rx)));
    unwrap!(spawner.spawn(console_task(console_rx)));
    unwrap!(spawner.spawn(push_task(link_tx)));

    info!("All tasks spawned");
}

/// Watch RX task - turns sync requests into pending pushes
///
/// This is a pure pass-through: filter by topic, enqueue the refresh. No
/// debouncing, so a burst of requests produces a push per request.
#[embassy_executor::task]
async fn watch_rx_task(mut rx: BufferedUartRx<'static>) {
    info!("Watch RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; 64];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match DataEvent::from_frame(&frame) {
                            Ok(event) => handle_event(&event),
                            Err(e) => warn!("Bad envelope: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watch UART read error: {:?}", e),
        }
    }
}

/// Filter one decoded event
fn handle_event(event: &DataEvent) {
    if !event.is_changed_on(SYNC_REQUEST_PATH) {
        trace!("Ignoring event on {}", event.path.as_str());
        return;
    }

    match SyncRequest::decode(&event.body) {
        Ok(request) => debug!("Sync request, watch time {}", request.timestamp),
        Err(e) => {
            warn!("Sync request body decode failed: {:?}", e);
            return;
        }
    }

    if REFRESH_QUEUE.try_send(()).is_err() {
        warn!("Refresh queue full, dropping sync request");
    }
}

/// Console task - reads forecast lines from the host
#[embassy_executor::task]
async fn console_task(mut rx: BufferedUartRx<'static>) {
    info!("Console task started");

    let mut line: String<CONSOLE_LINE_LEN> = String::new();
    let mut buf = [0u8; 32];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match byte {
                        b'\r' => {}
                        b'\n' => {
                            if !line.is_empty() {
                                handle_console_line(line.as_str()).await;
                                line.clear();
                            }
                        }
                        _ => {
                            if line.push(byte as char).is_err() {
                                warn!("Console line too long, discarding");
                                line.clear();
                            }
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Console UART read error: {:?}", e),
        }
    }
}

/// Apply one console line and schedule a push if the forecast changed
async fn handle_console_line(line: &str) {
    match parse_line(line) {
        Ok(new_forecast) => {
            info!(
                "Forecast: high={} low={} condition={:?}",
                new_forecast.high, new_forecast.low, new_forecast.condition
            );
            {
                let mut forecast = FORECAST.lock().await;
                *forecast = Some(new_forecast);
            }
            if REFRESH_QUEUE.try_send(()).is_err() {
                warn!("Refresh queue full, dropping forecast push");
            }
        }
        Err(e) => warn!("Console command rejected: {:?}", e),
    }
}

/// Push task - encodes the current forecast and writes it to the watch
#[embassy_executor::task]
async fn push_task(mut tx: BufferedUartTx<'static>) {
    info!("Push task started");

    loop {
        REFRESH_QUEUE.receive().await;

        let snapshot = *FORECAST.lock().await;
        let Some(forecast) = snapshot else {
            debug!("No forecast from host yet, nothing to push");
            continue;
        };

        push_forecast(&mut tx, &forecast).await;
    }
}

/// Encode and send one weather update
async fn push_forecast(tx: &mut BufferedUartTx<'static>, forecast: &Forecast) {
    let mut icon = Vec::new();
    if icon
        .extend_from_slice(forecast.condition.icon_bytes())
        .is_err()
    {
        warn!("Condition glyph exceeds envelope limit, sending without icon");
        icon.clear();
    }

    let update = WeatherUpdate {
        high: forecast.high,
        low: forecast.low,
        icon: if icon.is_empty() { None } else { Some(icon) },
    };

    let event = match update.to_event() {
        Ok(event) => event,
        Err(e) => {
            warn!("Weather update envelope failed: {:?}", e);
            return;
        }
    };
    let frame = match event.to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Weather update frame failed: {:?}", e);
            return;
        }
    };

    let mut buf = [0u8; MAX_FRAME_SIZE];
    match frame.encode(&mut buf) {
        Ok(len) => {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                debug!("Watch link send failed: {:?}", e);
            } else {
                debug!("Weather update pushed");
            }
        }
        Err(e) => warn!("Frame encode failed: {:?}", e),
    }
}
