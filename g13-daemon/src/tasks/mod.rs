//! Daemon loops
//!
//! Both loops run on one embassy executor and talk only through the statics
//! in [`crate::channels`]. Each checks the shutdown flag once per iteration.

use embassy_time::{Duration, Instant, Timer};
use log::info;

use crate::channels::ShutdownFlag;

pub mod poll;
pub mod ui;

pub use poll::poll_task;
pub use ui::ui_task;

/// How often [`stop_after`] looks at the flag
const SHUTDOWN_CHECK: Duration = Duration::from_millis(50);

/// Milliseconds on the embassy clock
pub fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Resolve once `shutdown` is requested, requesting it after `run_for_ms`
///
/// Without a limit only an outside request (a signal) ends the wait.
pub async fn stop_after(run_for_ms: Option<u64>, shutdown: &ShutdownFlag) {
    let deadline = run_for_ms.map(|ms| Instant::now() + Duration::from_millis(ms));

    while !shutdown.is_requested() {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            info!("Run time of {} ms reached, stopping", run_for_ms.unwrap_or_default());
            shutdown.request();
            break;
        }
        Timer::after(SHUTDOWN_CHECK).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use g13_core::config::InputConfig;
    use g13_core::traits::{LedControl, ProfileSource};
    use g13_core::{NavigationController, NavigationEvent};
    use g13_display::Canvas;
    use g13_protocol::ButtonLayout;

    use crate::config::{DaemonConfig, ProfileConfig};
    use crate::display::NullDisplay;
    use crate::poller::{EventSink, InputPoller, SinkError};
    use crate::services::DaemonServices;
    use crate::transport::SimulatedSource;

    #[test]
    fn test_stop_after_limit_requests_shutdown() {
        let flag = ShutdownFlag::new();
        block_on(stop_after(Some(60), &flag));
        assert!(flag.is_requested());
    }

    #[test]
    fn test_stop_after_without_limit_waits_for_request() {
        static FLAG: ShutdownFlag = ShutdownFlag::new();
        let requester = std::thread::spawn(|| {
            std::thread::sleep(std::time::Duration::from_millis(80));
            FLAG.request();
        });

        let started = Instant::now();
        block_on(stop_after(None, &FLAG));
        assert!(started.elapsed() >= Duration::from_millis(80));
        requester.join().unwrap();
    }

    #[derive(Default)]
    struct Events(Vec<NavigationEvent>);

    impl EventSink for Events {
        fn deliver(&mut self, event: NavigationEvent) -> Result<(), SinkError> {
            self.0.push(event);
            Ok(())
        }
    }

    /// Drive the demo script through the same steps both loops perform,
    /// on a simulated clock
    #[test]
    fn test_demo_script_end_to_end() {
        let mut script = SimulatedSource::demo();
        let mut poller = InputPoller::new(
            SimulatedSource::default(),
            ButtonLayout::G13,
            InputConfig::default(),
            Duration::from_millis(100),
        );
        let config = DaemonConfig {
            profiles: vec![ProfileConfig::new("default")],
            ..Default::default()
        };
        let mut services = DaemonServices::new(&config, None);
        let mut controller = NavigationController::new(0);
        let mut canvas = Canvas::new();
        let mut display = NullDisplay::new();

        let mut now = 0;
        let mut max_depth = 0;
        while let Some((delay_ms, report)) = script.next_step() {
            now += delay_ms;
            controller
                .tick(now, &services, &mut canvas, &mut display)
                .unwrap();

            let mut events = Events::default();
            poller.handle_report(&report, now, &mut events).unwrap();
            for event in events.0 {
                controller.on_input(event, &mut services, now);
            }
            max_depth = max_depth.max(controller.manager().depth());
        }

        // Main -> LED Settings -> Brightness
        assert_eq!(max_depth, 4);
        assert_eq!(services.brightness(), 80);
        assert_eq!(services.mode(), 2);
        assert!(controller.manager().is_at_root());
        assert!(!controller.manager().has_overlay());
        assert!(display.frames() > 0);
        assert!(services.has_unsaved_changes());
    }
}
