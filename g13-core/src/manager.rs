//! Screen stack, overlay and render tick
//!
//! The root screen is always present. One overlay (toast or confirm) may
//! sit above the active screen and receives input first. Rendering only
//! happens when something is dirty, and a failed frame write is retried on
//! the next tick.

use g13_display::{Canvas, DisplayError, DisplaySink};
use heapless::Vec;

use crate::input::NavigationEvent;
use crate::screen::{ConfirmDialog, Request, Screen, ScreenContext, ToastScreen, View, MAX_REQUESTS};
use crate::traits::Services;

/// Maximum stack depth, root included
pub const MAX_STACK_DEPTH: usize = 8;

/// Errors from stack manipulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ManagerError {
    /// Stack already holds [`MAX_STACK_DEPTH`] screens
    StackFull,
}

#[derive(Debug, Clone)]
struct ActiveOverlay {
    screen: Screen,
    /// None for overlays that wait for input
    expires_at: Option<u64>,
}

/// Owns every live screen
pub struct ScreenManager {
    root: Screen,
    /// Screens above the root, top last
    stack: Vec<Screen, { MAX_STACK_DEPTH - 1 }>,
    overlay: Option<ActiveOverlay>,
    redraw_pending: bool,
}

impl ScreenManager {
    pub fn new(root: Screen) -> Self {
        Self {
            root,
            stack: Vec::new(),
            overlay: None,
            redraw_pending: true,
        }
    }

    /// Number of screens on the stack, root included
    pub fn depth(&self) -> usize {
        self.stack.len() + 1
    }

    pub fn is_at_root(&self) -> bool {
        self.stack.is_empty()
    }

    /// Top of the stack
    pub fn active(&self) -> &Screen {
        self.stack.last().unwrap_or(&self.root)
    }

    pub fn active_mut(&mut self) -> &mut Screen {
        self.stack.last_mut().unwrap_or(&mut self.root)
    }

    pub fn overlay(&self) -> Option<&Screen> {
        self.overlay.as_ref().map(|overlay| &overlay.screen)
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Push a screen and make it active
    pub fn push(&mut self, mut screen: Screen) -> Result<(), ManagerError> {
        screen.mark_dirty();
        self.stack.push(screen).map_err(|_| ManagerError::StackFull)
    }

    /// Remove the top screen; the root is never popped
    pub fn pop(&mut self) -> Option<Screen> {
        let popped = self.stack.pop();
        if popped.is_some() {
            self.active_mut().mark_dirty();
        }
        popped
    }

    pub fn pop_to_root(&mut self) {
        if !self.stack.is_empty() {
            self.stack.clear();
            self.root.mark_dirty();
        }
    }

    /// Show an overlay, replacing any current one
    ///
    /// With a duration the overlay expires at `now_ms + duration`.
    pub fn show_overlay(&mut self, mut screen: Screen, duration_ms: Option<u32>, now_ms: u64) {
        screen.mark_dirty();
        self.overlay = Some(ActiveOverlay {
            screen,
            expires_at: duration_ms.map(|ms| now_ms + u64::from(ms)),
        });
    }

    pub fn dismiss_overlay(&mut self) {
        if self.overlay.take().is_some() {
            self.active_mut().mark_dirty();
        }
    }

    /// Route an event to the overlay, or the active screen when there is
    /// none, then apply the transitions it requested
    ///
    /// Returns true if the event was consumed.
    pub fn handle_input(
        &mut self,
        event: NavigationEvent,
        services: &mut dyn Services,
        now_ms: u64,
    ) -> bool {
        let mut ctx = ScreenContext::new(services, now_ms);
        let consumed = match self.overlay.as_mut() {
            Some(overlay) => overlay.screen.on_input(event, &mut ctx),
            None => self.active_mut().on_input(event, &mut ctx),
        };
        let requests = ctx.into_requests();
        self.apply(requests, services, now_ms);
        consumed
    }

    fn apply(&mut self, requests: Vec<Request, MAX_REQUESTS>, services: &dyn Services, now_ms: u64) {
        for request in requests {
            match request {
                Request::Push(id) => {
                    // Full stack: the current screen stays active
                    let _ = self.push(id.build(services));
                }
                Request::Pop => {
                    self.pop();
                }
                Request::PopToRoot => self.pop_to_root(),
                Request::Toast { text, duration_ms } => self.show_overlay(
                    Screen::Toast(ToastScreen::new(&text)),
                    Some(duration_ms),
                    now_ms,
                ),
                Request::Confirm {
                    message,
                    on_confirm,
                    on_cancel,
                } => self.show_overlay(
                    Screen::Confirm(ConfirmDialog::new(&message, on_confirm, on_cancel)),
                    None,
                    now_ms,
                ),
                Request::DismissOverlay => self.dismiss_overlay(),
            }
        }
    }

    /// Expire the overlay, then update the active screen and the overlay
    pub fn update(&mut self, now_ms: u64, services: &dyn Services) {
        let expired = self
            .overlay
            .as_ref()
            .and_then(|overlay| overlay.expires_at)
            .is_some_and(|expires_at| now_ms >= expires_at);
        if expired {
            self.dismiss_overlay();
        }

        self.active_mut().update(now_ms, services);
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.screen.update(now_ms, services);
        }
    }

    pub fn needs_render(&self) -> bool {
        self.redraw_pending
            || self.active().is_dirty()
            || self.overlay().is_some_and(|overlay| overlay.is_dirty())
    }

    /// Redraw on the next tick even if nothing is dirty
    pub fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }

    /// Redraw now, bypassing the dirty check
    pub fn force_render(&mut self, canvas: &mut Canvas, services: &dyn Services) {
        self.redraw_pending = true;
        self.render(canvas, services);
    }

    /// Draw the active screen and overlay if anything changed
    ///
    /// Returns true if the canvas was redrawn.
    pub fn render(&mut self, canvas: &mut Canvas, services: &dyn Services) -> bool {
        if !self.needs_render() {
            return false;
        }

        canvas.clear();
        self.active().render(canvas, services);
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.screen.render(canvas, services);
            overlay.screen.mark_clean();
        }
        self.active_mut().mark_clean();
        self.redraw_pending = false;
        true
    }

    /// Update, render and push the frame to the display
    ///
    /// Returns Ok(true) when a frame was written. On a write error the frame
    /// is marked pending so the next tick retries it.
    pub fn tick<D: DisplaySink + ?Sized>(
        &mut self,
        now_ms: u64,
        services: &dyn Services,
        canvas: &mut Canvas,
        sink: &mut D,
    ) -> Result<bool, DisplayError> {
        self.update(now_ms, services);
        if !self.render(canvas, services) {
            return Ok(false);
        }

        match sink.write_frame(canvas.to_bytes()) {
            Ok(()) => Ok(true),
            Err(e) => {
                self.redraw_pending = true;
                Err(e)
            }
        }
    }
}
