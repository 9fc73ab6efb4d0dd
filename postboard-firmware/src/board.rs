//! RP2040 implementations of the Postboard HAL traits
//!
//! Wiring:
//! - UART0 (GP0 TX, GP1 RX): producer link
//! - GP14: mode button to ground, internal pull-up
//! - SPI1 (GP10 SCK, GP11 MOSI), GP9 CS, GP8 DC, GP12 RST, GP13 backlight:
//!   ILI9341 panel

use embassy_rp::gpio::Input;
use embassy_rp::uart::{self, BufferedUartRx, BufferedUartTx};
use embedded_io::{Read, ReadReady, Write};

use postboard_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use postboard_hal::{InputPin, UartRx, UartTx};

/// Mode button
pub struct Button {
    pin: Input<'static>,
}

impl Button {
    pub fn new(pin: Input<'static>) -> Self {
        Self { pin }
    }
}

impl InputPin for Button {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Transmit half of the producer link
pub struct LinkTx {
    tx: BufferedUartTx,
}

impl LinkTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl UartTx for LinkTx {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        Write::write_all(&mut self.tx, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.tx)
    }
}

/// Receive half of the producer link
pub struct LinkRx {
    rx: BufferedUartRx,
}

impl LinkRx {
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }
}

impl UartRx for LinkRx {
    type Error = uart::Error;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() || !ReadReady::read_ready(&mut self.rx)? {
            return Ok(0);
        }
        Read::read(&mut self.rx, buf)
    }
}

/// Convert a HAL serial configuration to the embassy-rp one
pub fn uart_config(config: &UartConfig) -> uart::Config {
    let mut cfg = uart::Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    cfg
}
