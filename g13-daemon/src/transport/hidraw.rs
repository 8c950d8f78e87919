//! Linux hidraw source
//!
//! hidraw reads block, so a dedicated thread reads the device and hands
//! reports to the async side through a bounded channel. When the channel is
//! full the newest report is dropped; the next one carries the full button
//! state anyway. The thread ends on disconnect; [`HidrawSource::reopen`]
//! starts a new one once the node is back.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::thread;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;
use log::{debug, info, trace, warn};

use super::{RawReport, ReportSource, TransportError, MAX_REPORT_LEN};
use crate::channels::shutdown_requested;

/// Reports buffered between the reader thread and the poll task
const REPORT_QUEUE_SIZE: usize = 16;

type ReportQueue = Channel<CriticalSectionRawMutex, Result<RawReport, TransportError>, REPORT_QUEUE_SIZE>;

static REPORTS: ReportQueue = Channel::new();

/// Input reports from `/dev/hidrawN`
pub struct HidrawSource {
    path: PathBuf,
    reports: &'static ReportQueue,
}

impl HidrawSource {
    /// Open the device and start the reader thread
    pub fn open(path: &Path) -> Result<Self, TransportError> {
        let source = Self {
            path: path.to_path_buf(),
            reports: &REPORTS,
        };
        source.start_reader()?;
        Ok(source)
    }

    fn start_reader(&self) -> Result<(), TransportError> {
        let file = File::open(&self.path)?;
        let reports = self.reports;

        thread::Builder::new()
            .name("hidraw-reader".into())
            .spawn(move || reader_loop(file, reports))?;

        info!("Reading reports from {}", self.path.display());
        Ok(())
    }
}

impl ReportSource for HidrawSource {
    async fn read(&mut self) -> Result<RawReport, TransportError> {
        self.reports.receive().await
    }

    async fn reopen(&mut self) -> Result<(), TransportError> {
        // Whatever the old reader queued predates the disconnect
        self.reports.clear();
        self.start_reader()
    }
}

fn reader_loop(mut file: File, reports: &'static ReportQueue) {
    let mut buf = [0u8; MAX_REPORT_LEN];

    while !shutdown_requested() {
        let item = match file.read(&mut buf) {
            Ok(0) => Err(TransportError::Disconnected),
            Ok(n) => Ok(Vec::from_slice(&buf[..n]).unwrap_or_default()),
            Err(e) => Err(TransportError::from(e)),
        };

        let disconnected = matches!(item, Err(TransportError::Disconnected));
        if reports.try_send(item).is_err() {
            trace!("Report queue full, dropping report");
        }
        if disconnected {
            warn!("hidraw device disconnected, reader stopping");
            return;
        }
    }

    debug!("hidraw reader stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_reopen_after_end_of_file() {
        // A regular file ends like an unplugged node: one report, then EOF
        let path = std::env::temp_dir().join(format!("g13d-hidraw-{}.bin", std::process::id()));
        let report = [0x01, 128, 128, 0, 0, 0, 0, 0x80];
        std::fs::write(&path, report).unwrap();

        let mut source = HidrawSource::open(&path).unwrap();
        assert_eq!(block_on(source.read()).unwrap().as_slice(), &report);
        assert_eq!(block_on(source.read()), Err(TransportError::Disconnected));

        block_on(source.reopen()).unwrap();
        assert_eq!(block_on(source.read()).unwrap().as_slice(), &report);
        assert_eq!(block_on(source.read()), Err(TransportError::Disconnected));

        std::fs::remove_file(&path).unwrap();
        assert_eq!(block_on(source.reopen()), Err(TransportError::Disconnected));
    }
}
