//! UI task
//!
//! Sole owner of the navigation controller, the canvas, the services and
//! the display. Events are applied as they arrive; rendering happens on the
//! frame ticker and only when something changed.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};
use log::{debug, info, warn};

use g13_core::NavigationController;
use g13_display::{Canvas, DisplaySink};

use super::now_ms;
use crate::channels::{shutdown_requested, NAV_EVENTS};
use crate::services::DaemonServices;

pub async fn ui_task(
    mut services: DaemonServices,
    mut display: Box<dyn DisplaySink>,
    frame_period: Duration,
) {
    info!("UI task started ({} ms per frame)", frame_period.as_millis());

    let mut canvas = Canvas::new();
    let mut controller = NavigationController::new(now_ms());
    let mut ticker = Ticker::every(frame_period);
    let mut display_ok = true;

    while !shutdown_requested() {
        match select(NAV_EVENTS.receive(), ticker.next()).await {
            Either::First(event) => {
                debug!("Input: {}", event.name());
                controller.on_input(event, &mut services, now_ms());
            }
            Either::Second(()) => {
                match controller.tick(now_ms(), &services, &mut canvas, display.as_mut()) {
                    Ok(_) => {
                        if !display_ok {
                            info!("Display writes resumed");
                            display_ok = true;
                        }
                    }
                    Err(e) => {
                        if display_ok {
                            warn!("Display write failed: {:?}", e);
                            display_ok = false;
                        }
                    }
                }
                services.save_if_changed();
            }
        }
    }

    // Leave a blank LCD behind
    canvas.clear();
    if let Err(e) = display.write_frame(canvas.to_bytes()) {
        warn!("Failed to clear display: {:?}", e);
    }
    services.save_if_changed();

    info!("UI task stopped");
}
