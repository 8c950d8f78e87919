//! Inter-task communication
//!
//! The poll task produces navigation events, the UI task consumes them.
//! Everything else crossing between the two goes through the statics here.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use g13_core::NavigationEvent;

/// Channel capacity for navigation events
pub const NAV_CHANNEL_SIZE: usize = 16;

/// Navigation events from the poll task to the UI task
pub static NAV_EVENTS: Channel<CriticalSectionRawMutex, NavigationEvent, NAV_CHANNEL_SIZE> =
    Channel::new();

/// New stick dead zone after a sensitivity change (UI -> poll task)
pub static STICK_THRESHOLD: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Index of the profile just loaded (UI -> poll task, selects the keymap)
pub static ACTIVE_PROFILE: Signal<CriticalSectionRawMutex, usize> = Signal::new();

/// Reports decoded since start (shown on the idle screen)
pub static KEY_COUNT: AtomicU32 = AtomicU32::new(0);

/// One-way stop flag
#[derive(Debug, Default)]
pub struct ShutdownFlag(AtomicBool);

impl ShutdownFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Set once to stop both loops and the hidraw reader
pub static SHUTDOWN: ShutdownFlag = ShutdownFlag::new();

pub fn request_shutdown() {
    SHUTDOWN.request();
}

pub fn shutdown_requested() -> bool {
    SHUTDOWN.is_requested()
}

/// Turn SIGINT and SIGTERM into a shutdown request
pub fn install_signal_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(request_shutdown)
}
