//! Poll task
//!
//! Reads reports, runs the navigator and the G-key mapper and forwards
//! navigation events to the UI task. After a disconnect the task keeps
//! running without input and tries to reopen the device once per
//! [`REOPEN_INTERVAL_MS`].

use embassy_time::{Duration, Timer};
use log::{debug, info, warn};

use g13_core::keymap::Keymap;

use crate::channels::{shutdown_requested, ACTIVE_PROFILE, NAV_EVENTS, STICK_THRESHOLD};
use crate::poller::{ChannelSink, InputPoller};
use crate::tasks::now_ms;
use crate::transport::{ReportSource, TransportError};

/// Pause after a failed read
pub const READ_BACKOFF: Duration = Duration::from_millis(10);

/// Time between reopen attempts while disconnected (ms)
pub const REOPEN_INTERVAL_MS: u64 = 1_000;

/// Change in device reachability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    Lost,
    Restored,
}

/// Tracks whether reports are arriving
///
/// Only a report counts as proof of life. Timeouts say nothing either way,
/// so a reader that died quietly never looks recovered.
#[derive(Debug, Clone)]
pub struct Link {
    connected: bool,
    next_reopen_ms: u64,
}

impl Default for Link {
    fn default() -> Self {
        Self::new()
    }
}

impl Link {
    pub fn new() -> Self {
        Self {
            connected: true,
            next_reopen_ms: 0,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Update from one poll result
    pub fn observe(
        &mut self,
        result: &Result<usize, TransportError>,
        now_ms: u64,
    ) -> Option<LinkChange> {
        match result {
            Ok(_) if !self.connected => {
                self.connected = true;
                Some(LinkChange::Restored)
            }
            Err(TransportError::Disconnected) if self.connected => {
                self.connected = false;
                self.next_reopen_ms = now_ms + REOPEN_INTERVAL_MS;
                Some(LinkChange::Lost)
            }
            _ => None,
        }
    }

    /// True at most once per interval while disconnected
    pub fn reopen_due(&mut self, now_ms: u64) -> bool {
        if self.connected || now_ms < self.next_reopen_ms {
            return false;
        }
        self.next_reopen_ms = now_ms + REOPEN_INTERVAL_MS;
        true
    }
}

/// `keymaps` holds one keymap per profile, indexed like the profiles
pub async fn poll_task<S: ReportSource>(mut poller: InputPoller<S>, keymaps: Vec<Keymap>) {
    info!("Poll task started");

    let mut sink = ChannelSink::new(&NAV_EVENTS);
    let mut link = Link::new();

    while !shutdown_requested() {
        if let Some(threshold) = STICK_THRESHOLD.try_take() {
            info!("Stick dead zone set to {}", threshold);
            poller.set_threshold(threshold);
        }

        if let Some(profile) = ACTIVE_PROFILE.try_take() {
            let keymap = keymaps.get(profile).cloned().unwrap_or_default();
            debug!("Keymap of profile {}: {} G-keys bound", profile, keymap.bound_count());
            poller.set_keymap(keymap);
        }

        if link.reopen_due(now_ms()) {
            match poller.reopen().await {
                Ok(()) => info!("Device reopened, waiting for reports"),
                Err(e) => debug!("Reopen failed: {}", e),
            }
        }

        let result = poller.poll_once(&mut sink).await;
        match link.observe(&result, now_ms()) {
            Some(LinkChange::Lost) => {
                warn!("Device disconnected");
                poller.reset();
            }
            Some(LinkChange::Restored) => info!("Device reports resumed"),
            None => {}
        }

        match result {
            Ok(_) | Err(TransportError::Timeout) => {}
            Err(TransportError::Disconnected) => Timer::after(READ_BACKOFF).await,
            Err(e) => {
                warn!("Report read failed: {}", e);
                Timer::after(READ_BACKOFF).await;
            }
        }
    }

    info!("Poll task stopped");
}
