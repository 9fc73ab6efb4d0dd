//! Postboard - serial-fed post viewer
//!
//! Firmware for an RP2040 board with an ILI9341 TFT and a single button.
//! A host-side producer sends the latest post over UART; the button switches
//! between the summary and a scrolling full-text view.
//!
//! Everything runs in one cooperative loop: drain the UART, hand the button
//! level and the bytes to `Controller::poll`, send requests, redraw, sleep
//! 10 ms.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{self, Input, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::{Delay, Instant, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9341Rgb565;
use mipidsi::options::{ColorOrder, Orientation, Rotation};
use mipidsi::Builder;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use postboard_core::{Controller, Mode};
use postboard_display::{DisplayBackend, Renderer};
use postboard_hal::{InputPin, UartRx, UartTx};
use postboard_protocol::Request;

use crate::board::{Button, LinkRx, LinkTx};
use crate::display::TftBackend;

mod board;
mod config;
mod display;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Main loop period
const LOOP_PERIOD_MS: u64 = 10;

/// SPI clock of the panel
const SPI_FREQUENCY_HZ: u32 = 40_000_000;

/// Bytes handed to the controller per loop step; the rest waits in RX_BUF
const RX_BATCH: usize = 256;

// Static cells for buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
static PANEL_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Postboard firmware starting...");

    let p = embassy_rp::init(Default::default());
    let view = config::VIEW_CONFIG;

    // Producer link on UART0 (GP0 TX, GP1 RX)
    let serial = config::serial_config();
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 1024]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, board::uart_config(&serial));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let mut link_tx = LinkTx::new(tx);
    let mut link_rx = LinkRx::new(rx);
    info!("UART initialized at {} baud", serial.baudrate);

    // Mode button, active low
    let button = Button::new(Input::new(p.PIN_14, Pull::Up));

    // ILI9341 on SPI1
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);
    let cs = Output::new(p.PIN_9, gpio::Level::High);
    let dc = Output::new(p.PIN_8, gpio::Level::Low);
    let rst = Output::new(p.PIN_12, gpio::Level::High);
    let _backlight = Output::new(p.PIN_13, gpio::Level::High);

    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).unwrap_or_else(|e| match e {});
    let interface = SpiInterface::new(spi_device, dc, PANEL_BUF.init([0u8; 512]));
    let panel = match Builder::new(ILI9341Rgb565, interface)
        .reset_pin(rst)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .color_order(ColorOrder::Bgr)
        .init(&mut Delay)
    {
        Ok(panel) => panel,
        Err(e) => defmt::panic!("Display init failed: {}", Debug2Format(&e)),
    };

    let mut tft = TftBackend::new(panel);
    let (width, height) = tft.dimensions();
    info!("Display initialized: {}x{}", width, height);
    if (width as i32, height as i32) != (view.screen_width, view.screen_height) {
        warn!(
            "Panel is {}x{} but postboard.toml says {}x{}",
            width, height, view.screen_width, view.screen_height
        );
    }

    let renderer = Renderer::new(view);
    if let Err(e) = renderer.render_welcome(&mut tft) {
        error!("Failed to draw welcome screen: {:?}", e);
    }

    let mut controller = Controller::new(view);
    send(&mut link_tx, controller.boot(now_ms()));

    let mut batch = [0u8; RX_BATCH];
    loop {
        let received = drain(&mut link_rx, &mut batch);
        let mode = controller.mode();
        let outcome = controller.poll(button.level(), &batch[..received], now_ms());

        if !outcome.is_idle() {
            trace!(
                "Step: {} byte(s), {} request(s), redraw {}",
                received,
                outcome.requests.len(),
                outcome.redraw
            );
        }
        if controller.mode() != mode {
            info!("Mode {} -> {}", mode, controller.mode());
        }
        if outcome.frame_errors > 0 {
            warn!(
                "Dropped {} line(s), last error: {:?}",
                outcome.frame_errors, outcome.last_error
            );
        }
        for &request in &outcome.requests {
            send(&mut link_tx, request);
        }
        if outcome.redraw {
            redraw(&mut controller, &renderer, &mut tft);
        }

        Timer::after_millis(LOOP_PERIOD_MS).await;
    }
}

/// Milliseconds since boot, wrapping
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Copy buffered UART bytes into `buf` until it is full or the UART is empty
fn drain<R>(rx: &mut R, buf: &mut [u8]) -> usize
where
    R: UartRx,
    R::Error: Format,
{
    let mut filled = 0;
    while filled < buf.len() {
        match rx.read_available(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                break;
            }
        }
    }
    filled
}

fn send<T>(tx: &mut T, request: Request)
where
    T: UartTx,
    T::Error: Format,
{
    info!("-> {}", request.command());
    if let Err(e) = request.write_to(tx) {
        warn!("Failed to send {:?}: {:?}", request, e);
    }
}

fn redraw<B: DisplayBackend>(controller: &mut Controller, renderer: &Renderer, display: &mut B) {
    let measured = controller.scroll().content_height().is_some();

    let result = {
        let screen = controller.screen();
        renderer.render(display, &screen)
    };

    if controller.mode() == Mode::FullText && !measured {
        let scroll = controller.scroll();
        debug!(
            "Content height: {}, max scroll: {}",
            scroll.content_height(),
            scroll.max_offset()
        );
    }
    if let Err(e) = result {
        error!("Draw failed: {:?}", e);
    }
}
