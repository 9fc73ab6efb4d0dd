//! Requests from the display to the producer
//!
//! Requests carry no arguments and no sequence number; the producer answers
//! each with a single message line.

use postboard_hal::UartTx;

/// Line ending written after every request
pub const REQUEST_TERMINATOR: &[u8] = b"\r\n";

/// Requests sent to the producer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// Ask for the latest post summary (`LATEST:` reply)
    Latest,
    /// Ask for the full text of the current post (`PLAINTEXT:` reply)
    PlainText,
}

impl Request {
    /// Command text without terminator
    pub const fn command(self) -> &'static str {
        match self {
            Request::Latest => "REQUEST_LATEST",
            Request::PlainText => "REQUEST_PLAINTEXT",
        }
    }

    /// Write the terminated command to a UART
    pub fn write_to<T: UartTx>(self, tx: &mut T) -> Result<(), T::Error> {
        tx.write_blocking(self.command().as_bytes())?;
        tx.write_blocking(REQUEST_TERMINATOR)?;
        tx.flush()
    }
}
