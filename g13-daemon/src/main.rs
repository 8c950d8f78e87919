//! g13d - G13 LCD menu daemon
//!
//! Reads the keypad through hidraw, drives the LCD menus, translates G-keys
//! through the active profile's bindings and persists the user's settings.
//! Without a configured device it plays a scripted demo against a null
//! display. SIGINT and SIGTERM blank the LCD and save before exiting.

use std::path::Path;

use embassy_executor::Spawner;
use embassy_futures::join::join3;
use log::{error, info, warn};

use g13_core::traits::SettingsStore;
use g13_display::DisplaySink;
use g13_protocol::ButtonLayout;

use g13_daemon::channels::{install_signal_handler, SHUTDOWN};
use g13_daemon::config::{self, DaemonConfig, PersistedState};
use g13_daemon::display::{HidrawDisplay, NullDisplay};
use g13_daemon::poller::InputPoller;
use g13_daemon::services::DaemonServices;
use g13_daemon::tasks::{poll_task, stop_after, ui_task};
use g13_daemon::transport::{AnySource, HidrawSource, SimulatedSource};

/// Run time of the demo when no limit is configured (ms)
const DEMO_RUN_MS: u64 = 6_000;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("g13d {} starting", env!("CARGO_PKG_VERSION"));

    let config = match config::load(&config::config_path()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = install_signal_handler() {
        warn!("No signal handler ({}), Ctrl-C will not save state", e);
    }

    let persisted = config.state_file.as_deref().and_then(load_state);
    let services = DaemonServices::new(&config, persisted);

    let (source, display) = match open_device(&config) {
        Some(device) => device,
        None => std::process::exit(1),
    };
    let simulated = matches!(source, AnySource::Simulated(_));

    let poller = InputPoller::new(
        source,
        ButtonLayout::G13,
        config.input.input_config(services.settings()),
        config.input.read_timeout(),
    );
    let run_for_ms = config
        .device
        .run_for_ms
        .or(simulated.then_some(DEMO_RUN_MS));

    join3(
        poll_task(poller, config.keymaps()),
        ui_task(services, display, config.render.frame_period()),
        stop_after(run_for_ms, &SHUTDOWN),
    )
    .await;

    info!("g13d stopped");
    // The executor never returns on its own
    std::process::exit(0);
}

fn load_state(path: &Path) -> Option<PersistedState> {
    match PersistedState::load(path) {
        Ok(state) => state,
        Err(e) => {
            warn!("Ignoring state file {}: {}", path.display(), e);
            None
        }
    }
}

/// Report source and LCD sink for the configured device, or the demo
fn open_device(config: &DaemonConfig) -> Option<(AnySource, Box<dyn DisplaySink>)> {
    let Some(path) = config.device.hidraw.as_deref() else {
        let demo = SimulatedSource::demo();
        info!("No device configured, running demo script ({} reports)", demo.remaining());
        return Some((AnySource::Simulated(demo), Box::new(NullDisplay::new())));
    };

    let source = match HidrawSource::open(path) {
        Ok(source) => source,
        Err(e) => {
            error!("Cannot open {}: {}", path.display(), e);
            return None;
        }
    };

    let display: Box<dyn DisplaySink> = match HidrawDisplay::open(path) {
        Ok(display) => Box::new(display),
        Err(e) => {
            warn!("LCD unavailable ({}), frames are discarded", e);
            Box::new(NullDisplay::new())
        }
    };

    Some((AnySource::Hidraw(source), display))
}
