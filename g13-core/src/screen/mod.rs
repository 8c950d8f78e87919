//! Screens
//!
//! A closed set of screen variants behind one [`View`] trait. Screens never
//! hold a reference to the manager: input handlers record what they want
//! (push, pop, toast, confirm) in a [`ScreenContext`], and the manager
//! applies those requests in order once the handler returns.

use core::fmt;

use g13_display::canvas::WIDTH;
use g13_display::{Canvas, FONT_5X7};
use heapless::{String, Vec};

use crate::input::NavigationEvent;
use crate::traits::Services;

pub mod actions;
pub mod adjust;
pub mod catalog;
pub mod idle;
pub mod menu;
pub mod overlay;
pub mod text;

pub use actions::Command;
pub use adjust::{BrightnessScreen, ColorPickerScreen, COLOR_PRESETS};
pub use catalog::{MenuId, ScreenId, ValueSource};
pub use idle::IdleScreen;
pub use menu::{ItemAction, MenuItem, MenuScreen};
pub use overlay::{ConfirmDialog, ToastScreen};

/// Toast duration after a value change (ms)
pub const TOAST_SHORT_MS: u32 = 1500;

/// Toast duration for informational messages (ms)
pub const TOAST_LONG_MS: u32 = 2000;

/// Maximum transition requests a single input can queue
pub const MAX_REQUESTS: usize = 4;

/// Maximum toast / dialog message length in bytes
pub const MESSAGE_LEN: usize = 32;

/// Toast or dialog text
pub type Message = String<MESSAGE_LEN>;

/// Behavior shared by every screen
pub trait View {
    /// Handle a navigation event; returns true if it was consumed
    fn on_input(&mut self, event: NavigationEvent, ctx: &mut ScreenContext<'_>) -> bool;

    /// Periodic update before rendering
    fn update(&mut self, _now_ms: u64, _services: &dyn Services) {}

    /// Draw onto the canvas (the manager clears it first)
    fn render(&self, canvas: &mut Canvas, services: &dyn Services);

    fn is_dirty(&self) -> bool;

    fn mark_dirty(&mut self);

    fn mark_clean(&mut self);
}

/// Transition requested by a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Build and push a screen
    Push(ScreenId),
    Pop,
    PopToRoot,
    /// Show a toast overlay that expires after `duration_ms`
    Toast { text: Message, duration_ms: u32 },
    /// Show a yes/no overlay; the chosen command runs on commit
    Confirm {
        message: Message,
        on_confirm: Command,
        on_cancel: Option<Command>,
    },
    DismissOverlay,
}

/// Per-call context handed to input handlers
pub struct ScreenContext<'a> {
    /// Capabilities the handler may use directly
    pub services: &'a mut dyn Services,
    now_ms: u64,
    requests: Vec<Request, MAX_REQUESTS>,
}

impl<'a> ScreenContext<'a> {
    pub fn new(services: &'a mut dyn Services, now_ms: u64) -> Self {
        Self {
            services,
            now_ms,
            requests: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn request(&mut self, request: Request) {
        // A full queue drops the request; the current screen stays put.
        let _ = self.requests.push(request);
    }

    pub fn push(&mut self, screen: ScreenId) {
        self.request(Request::Push(screen));
    }

    pub fn pop(&mut self) {
        self.request(Request::Pop);
    }

    pub fn pop_to_root(&mut self) {
        self.request(Request::PopToRoot);
    }

    pub fn dismiss_overlay(&mut self) {
        self.request(Request::DismissOverlay);
    }

    pub fn toast(&mut self, message: &str, duration_ms: u32) {
        self.request(Request::Toast {
            text: text::truncate(message),
            duration_ms,
        });
    }

    /// Toast with formatted text, truncated to [`MESSAGE_LEN`]
    pub fn toast_fmt(&mut self, args: fmt::Arguments<'_>, duration_ms: u32) {
        self.request(Request::Toast {
            text: text::format_truncated(args),
            duration_ms,
        });
    }

    pub fn confirm(&mut self, message: &str, on_confirm: Command, on_cancel: Option<Command>) {
        self.request(Request::Confirm {
            message: text::truncate(message),
            on_confirm,
            on_cancel,
        });
    }

    /// Requests queued so far, in order
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn into_requests(self) -> Vec<Request, MAX_REQUESTS> {
        self.requests
    }
}

/// Every screen the UI can show
#[derive(Debug, Clone)]
pub enum Screen {
    Menu(MenuScreen),
    Idle(IdleScreen),
    Toast(ToastScreen),
    Confirm(ConfirmDialog),
    Brightness(BrightnessScreen),
    ColorPicker(ColorPickerScreen),
}

impl Screen {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu(menu) => menu.title(),
            Screen::Idle(_) => "IDLE",
            Screen::Toast(_) => "TOAST",
            Screen::Confirm(_) => "CONFIRM",
            Screen::Brightness(_) => "BRIGHTNESS",
            Screen::ColorPicker(_) => "SELECT COLOR",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Screen::Idle(_))
    }

    fn view(&self) -> &dyn View {
        match self {
            Screen::Menu(s) => s,
            Screen::Idle(s) => s,
            Screen::Toast(s) => s,
            Screen::Confirm(s) => s,
            Screen::Brightness(s) => s,
            Screen::ColorPicker(s) => s,
        }
    }

    fn view_mut(&mut self) -> &mut dyn View {
        match self {
            Screen::Menu(s) => s,
            Screen::Idle(s) => s,
            Screen::Toast(s) => s,
            Screen::Confirm(s) => s,
            Screen::Brightness(s) => s,
            Screen::ColorPicker(s) => s,
        }
    }
}

impl View for Screen {
    fn on_input(&mut self, event: NavigationEvent, ctx: &mut ScreenContext<'_>) -> bool {
        self.view_mut().on_input(event, ctx)
    }

    fn update(&mut self, now_ms: u64, services: &dyn Services) {
        self.view_mut().update(now_ms, services)
    }

    fn render(&self, canvas: &mut Canvas, services: &dyn Services) {
        self.view().render(canvas, services)
    }

    fn is_dirty(&self) -> bool {
        self.view().is_dirty()
    }

    fn mark_dirty(&mut self) {
        self.view_mut().mark_dirty()
    }

    fn mark_clean(&mut self) {
        self.view_mut().mark_clean()
    }
}

/// Draw the standard title bar (5x7 title, rule at y = 9)
pub(crate) fn draw_title(canvas: &mut Canvas, title: &str) {
    canvas.draw_text(0, 0, title, &FONT_5X7, true);
    canvas.hline(0, 9, WIDTH, true);
}
