//! Overlays drawn on top of the active screen

use g13_display::canvas::WIDTH;
use g13_display::{Canvas, FONT_4X6, FONT_5X7};

use super::actions::{self, Command};
use super::text::truncate;
use super::{Message, ScreenContext, View};
use crate::input::NavigationEvent;
use crate::traits::Services;

const TOAST_HEIGHT: i32 = 18;
const TOAST_Y: i32 = 12;
const TOAST_PADDING: i32 = 8;
const TOAST_MAX_WIDTH: i32 = 150;

const DIALOG_X: i32 = 10;
const DIALOG_Y: i32 = 6;
const DIALOG_WIDTH: i32 = 140;
const DIALOG_HEIGHT: i32 = 30;
const NO_X: i32 = 40;
const YES_X: i32 = 90;
const BUTTON_Y: i32 = 24;

/// Transient message box
///
/// Expiry is tracked by the manager; any input dismisses it early.
#[derive(Debug, Clone)]
pub struct ToastScreen {
    message: Message,
    dirty: bool,
}

impl ToastScreen {
    pub fn new(message: &str) -> Self {
        Self {
            message: truncate(message),
            dirty: true,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl View for ToastScreen {
    fn on_input(&mut self, _event: NavigationEvent, ctx: &mut ScreenContext<'_>) -> bool {
        ctx.dismiss_overlay();
        true
    }

    fn render(&self, canvas: &mut Canvas, _services: &dyn Services) {
        let text_width = Canvas::text_width(&self.message, &FONT_5X7, FONT_5X7.spacing);
        let width = (text_width + 2 * TOAST_PADDING).min(TOAST_MAX_WIDTH);
        let x = (WIDTH - width) / 2;

        canvas.rect(x, TOAST_Y, width, TOAST_HEIGHT, true, true);
        canvas.rect(x + 1, TOAST_Y + 1, width - 2, TOAST_HEIGHT - 2, false, false);
        canvas.draw_text(x + TOAST_PADDING, TOAST_Y + 6, &self.message, &FONT_5X7, false);
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// Yes/No dialog
///
/// Starts on "No". The overlay is dismissed before the chosen command runs,
/// so any toast the command raises replaces the dialog.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    message: Message,
    on_confirm: Command,
    on_cancel: Option<Command>,
    yes: bool,
    dirty: bool,
}

impl ConfirmDialog {
    pub fn new(message: &str, on_confirm: Command, on_cancel: Option<Command>) -> Self {
        Self {
            message: truncate(message),
            on_confirm,
            on_cancel,
            yes: false,
            dirty: true,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_yes(&self) -> bool {
        self.yes
    }

    fn cancel(&self, ctx: &mut ScreenContext<'_>) {
        ctx.dismiss_overlay();
        if let Some(command) = self.on_cancel {
            actions::run(command, ctx);
        }
    }

    fn draw_button(canvas: &mut Canvas, x: i32, label: &str, selected: bool) {
        canvas.draw_text(x, BUTTON_Y, label, &FONT_4X6, false);
        if selected {
            canvas.rect(x - 2, BUTTON_Y - 2, 30, 10, false, false);
        }
    }
}

impl View for ConfirmDialog {
    fn on_input(&mut self, event: NavigationEvent, ctx: &mut ScreenContext<'_>) -> bool {
        match event {
            NavigationEvent::StickLeft | NavigationEvent::StickRight => {
                self.yes = !self.yes;
                self.dirty = true;
                true
            }
            NavigationEvent::StickPress => {
                if self.yes {
                    ctx.dismiss_overlay();
                    actions::run(self.on_confirm, ctx);
                } else {
                    self.cancel(ctx);
                }
                true
            }
            NavigationEvent::ButtonBd => {
                self.cancel(ctx);
                true
            }
            _ => false,
        }
    }

    fn render(&self, canvas: &mut Canvas, _services: &dyn Services) {
        canvas.rect(DIALOG_X, DIALOG_Y, DIALOG_WIDTH, DIALOG_HEIGHT, true, true);
        canvas.rect(
            DIALOG_X + 1,
            DIALOG_Y + 1,
            DIALOG_WIDTH - 2,
            DIALOG_HEIGHT - 2,
            false,
            false,
        );

        let message: heapless::String<20> = truncate(&self.message);
        canvas.draw_text(DIALOG_X + 5, DIALOG_Y + 4, &message, &FONT_5X7, false);

        Self::draw_button(canvas, NO_X, "No", !self.yes);
        Self::draw_button(canvas, YES_X, "Yes", self.yes);
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Request;
    use crate::testing::MockServices;
    use crate::traits::SettingsStore;

    #[test]
    fn test_toast_dismissed_by_any_input() {
        let mut services = MockServices::default();
        let mut toast = ToastScreen::new("Saved");
        let mut ctx = ScreenContext::new(&mut services, 0);
        assert!(toast.on_input(NavigationEvent::ButtonM2, &mut ctx));
        assert_eq!(ctx.requests(), &[Request::DismissOverlay]);
    }

    #[test]
    fn test_toast_render_is_centered() {
        let services = MockServices::default();
        let toast = ToastScreen::new("Hi");
        let mut canvas = Canvas::new();
        toast.render(&mut canvas, &services);

        // "Hi" is 12 px wide -> 28 px box at x = 66
        assert!(canvas.get_pixel(66, TOAST_Y));
        assert!(canvas.get_pixel(93, TOAST_Y));
        assert!(!canvas.get_pixel(65, TOAST_Y));
        assert!(!canvas.get_pixel(94, TOAST_Y));
        // Inner border is cleared
        assert!(!canvas.get_pixel(67, TOAST_Y + 1));
    }

    #[test]
    fn test_confirm_defaults_to_no() {
        let mut services = MockServices::default();
        services.settings.show_date = false;
        let mut dialog = ConfirmDialog::new("Reset?", Command::ResetDefaults, None);
        assert!(!dialog.is_yes());

        let mut ctx = ScreenContext::new(&mut services, 0);
        dialog.on_input(NavigationEvent::StickPress, &mut ctx);
        assert_eq!(ctx.requests(), &[Request::DismissOverlay]);
        drop(ctx);
        // Nothing was reset
        assert!(!services.settings().show_date);
    }

    #[test]
    fn test_confirm_yes_dismisses_before_running() {
        let mut services = MockServices::default();
        services.settings.show_date = false;
        let mut dialog = ConfirmDialog::new("Reset?", Command::ResetDefaults, None);

        let mut ctx = ScreenContext::new(&mut services, 0);
        dialog.on_input(NavigationEvent::StickRight, &mut ctx);
        assert!(dialog.is_yes());
        dialog.on_input(NavigationEvent::StickPress, &mut ctx);

        let requests = ctx.into_requests();
        assert_eq!(requests[0], Request::DismissOverlay);
        assert!(matches!(&requests[1], Request::Toast { text, .. } if text == "Settings reset"));
        assert!(services.settings().show_date);
    }

    #[test]
    fn test_confirm_back_runs_cancel_command() {
        let mut services = MockServices::default();
        let mut dialog =
            ConfirmDialog::new("Reset?", Command::ResetDefaults, Some(Command::ToggleDate));

        let mut ctx = ScreenContext::new(&mut services, 0);
        dialog.on_input(NavigationEvent::StickLeft, &mut ctx);
        dialog.on_input(NavigationEvent::ButtonBd, &mut ctx);
        let requests = ctx.into_requests();
        assert_eq!(requests[0], Request::DismissOverlay);
        assert!(matches!(&requests[1], Request::Toast { text, .. } if text == "Date: Off"));
    }

    #[test]
    fn test_confirm_ignores_other_events() {
        let mut services = MockServices::default();
        let mut dialog = ConfirmDialog::new("Reset?", Command::ResetDefaults, None);
        let mut ctx = ScreenContext::new(&mut services, 0);
        assert!(!dialog.on_input(NavigationEvent::StickUp, &mut ctx));
        assert!(!dialog.on_input(NavigationEvent::ButtonM1, &mut ctx));
        assert!(ctx.requests().is_empty());
    }
}
