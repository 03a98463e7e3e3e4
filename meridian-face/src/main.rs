//! Meridian - watch-face firmware
//!
//! Main firmware binary for the RP2040-based wearable. Renders a digital
//! watch face with weather data relayed from the companion bridge over a
//! framed serial link.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

mod channels;
mod clock;
mod config;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();

// Framebuffer for the panel driver; const cell so 112 KiB never sits on the
// boot stack
static FRAMEBUFFER: ConstStaticCell<display::Framebuffer> =
    ConstStaticCell::new(display::Framebuffer::new());

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Meridian face firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Companion link (UART0: GP0=TX, GP1=RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config::LINK_BAUD;
    let uart = BufferedUart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Irqs,
        TX_BUF.init([0; 512]),
        RX_BUF.init([0; 1024]),
        uart_config,
    );
    let (link_tx, link_rx) = uart.split();

    // Panel (SPI0: GP18=SCK, GP19=MOSI; GP17=CS, GP20=DC, GP21=RST)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = config::SPI_FREQ_HZ;
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, spi_config);
    let dc = Output::new(p.PIN_20, Level::Low);
    let cs = Output::new(p.PIN_17, Level::High);
    let rst = Output::new(p.PIN_21, Level::Low);

    let mut panel = display::St7789::new(spi, dc, cs, rst, FRAMEBUFFER.take());
    if let Err(e) = panel.init().await {
        error!("Panel init failed: {:?}", e);
    } else {
        info!("Panel initialized");
    }

    // Buttons (GP2=wake, GP3=side)
    let wake_button = Input::new(p.PIN_2, Pull::Up);
    let side_button = Input::new(p.PIN_3, Pull::Up);

    unwrap!(spawner.spawn(tasks::link_rx::link_rx_task(link_rx)));
    unwrap!(spawner.spawn(tasks::link_tx::link_tx_task(link_tx)));
    unwrap!(spawner.spawn(tasks::power::power_task(wake_button, side_button)));
    unwrap!(spawner.spawn(tasks::render::render_task(panel)));

    // Ask the companion for fresh weather as soon as the face exists
    tasks::link_tx::send_sync_request(clock::epoch_now_ms()).await;

    info!("All tasks spawned");
}
