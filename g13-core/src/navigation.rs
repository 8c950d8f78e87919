//! Navigation controller
//!
//! Sits in front of the [`ScreenManager`] and owns the gestures that apply
//! regardless of the active screen: the stick press that opens the main
//! menu from idle, the M1-M3 mode keys, and the idle timeout that falls
//! back to the status screen.

use g13_display::{Canvas, DisplayError, DisplaySink};

use crate::input::NavigationEvent;
use crate::manager::ScreenManager;
use crate::screen::{text, IdleScreen, MenuId, Message, Screen, ScreenId, ToastScreen, TOAST_SHORT_MS};
use crate::traits::Services;

pub struct NavigationController {
    manager: ScreenManager,
    last_input_ms: u64,
}

impl NavigationController {
    /// Start on the idle screen
    pub fn new(now_ms: u64) -> Self {
        Self {
            manager: ScreenManager::new(Screen::Idle(IdleScreen::new())),
            last_input_ms: now_ms,
        }
    }

    pub fn manager(&self) -> &ScreenManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ScreenManager {
        &mut self.manager
    }

    /// Handle one navigation event; returns true if it was consumed
    pub fn on_input(
        &mut self,
        event: NavigationEvent,
        services: &mut dyn Services,
        now_ms: u64,
    ) -> bool {
        self.last_input_ms = now_ms;

        if let Some(mode) = event.mode_number() {
            services.set_mode(mode);
            let profile = services.active_profile_name().unwrap_or("None");
            let text: Message = text::format_truncated(format_args!("M{}: {}", mode, profile));
            self.show_toast(&text, TOAST_SHORT_MS, now_ms);
            return true;
        }

        if event == NavigationEvent::StickPress
            && self.manager.is_at_root()
            && !self.manager.has_overlay()
        {
            // Root is never full, so the push cannot fail
            let _ = self.manager.push(ScreenId::Menu(MenuId::Main).build(services));
            return true;
        }

        self.manager.handle_input(event, services, now_ms)
    }

    /// Show a toast over whatever is active
    pub fn show_toast(&mut self, text: &str, duration_ms: u32, now_ms: u64) {
        self.manager
            .show_overlay(Screen::Toast(ToastScreen::new(text)), Some(duration_ms), now_ms);
    }

    /// Pop to the idle screen once the configured timeout has passed
    /// without input
    ///
    /// Returns true if it popped.
    pub fn check_idle_timeout(&mut self, now_ms: u64, services: &dyn Services) -> bool {
        let timeout_s = services.settings().idle_timeout_s;
        if timeout_s == 0 || self.manager.is_at_root() {
            return false;
        }

        let idle_ms = now_ms.saturating_sub(self.last_input_ms);
        if idle_ms >= u64::from(timeout_s) * 1000 {
            self.manager.pop_to_root();
            return true;
        }
        false
    }

    /// Idle timeout check, then a manager tick
    pub fn tick<D: DisplaySink + ?Sized>(
        &mut self,
        now_ms: u64,
        services: &dyn Services,
        canvas: &mut Canvas,
        sink: &mut D,
    ) -> Result<bool, DisplayError> {
        self.check_idle_timeout(now_ms, services);
        self.manager.tick(now_ms, services, canvas, sink)
    }
}
