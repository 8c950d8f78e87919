//! Report sources
//!
//! A source yields one raw input report per read. The poll task bounds each
//! read with a timeout, so sources may wait as long as they like.

use core::fmt;
use std::io;

use heapless::Vec;

pub mod hidraw;
pub mod simulated;

pub use hidraw::HidrawSource;
pub use simulated::SimulatedSource;

/// Largest report a source may return
pub const MAX_REPORT_LEN: usize = 64;

/// One input report as read from the device
pub type RawReport = Vec<u8, MAX_REPORT_LEN>;

/// `ENODEV`: the device was unplugged
const ENODEV: i32 = 19;

/// Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// No report within the read timeout
    Timeout,
    /// Read failed
    Io(io::ErrorKind),
    /// Device is gone
    Disconnected,
}

impl From<io::Error> for TransportError {
    fn from(e: io::Error) -> Self {
        if e.raw_os_error() == Some(ENODEV) || e.kind() == io::ErrorKind::NotFound {
            TransportError::Disconnected
        } else {
            TransportError::Io(e.kind())
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Timeout => write!(f, "read timed out"),
            TransportError::Io(kind) => write!(f, "read failed: {}", kind),
            TransportError::Disconnected => write!(f, "device disconnected"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Async source of raw reports
pub trait ReportSource {
    async fn read(&mut self) -> Result<RawReport, TransportError>;

    /// Start reading again after `Disconnected`
    ///
    /// Sources that cannot come back keep returning `Disconnected`.
    async fn reopen(&mut self) -> Result<(), TransportError> {
        Err(TransportError::Disconnected)
    }
}

/// The sources the daemon can run on
pub enum AnySource {
    Hidraw(HidrawSource),
    Simulated(SimulatedSource),
}

impl ReportSource for AnySource {
    async fn read(&mut self) -> Result<RawReport, TransportError> {
        match self {
            AnySource::Hidraw(source) => source.read().await,
            AnySource::Simulated(source) => source.read().await,
        }
    }

    async fn reopen(&mut self) -> Result<(), TransportError> {
        match self {
            AnySource::Hidraw(source) => source.reopen().await,
            AnySource::Simulated(source) => source.reopen().await,
        }
    }
}
