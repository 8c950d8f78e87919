//! Idle (status) screen, the root of the stack
//!
//! ```text
//! Profile name                 14:05:09
//! ─────────────────────────────────────
//!   Uptime: 1:02:05          Tue Mar 05
//!   Keys: 12,345
//!
//!  [M1]      M2        M3
//! ```

use core::fmt::Write;

use g13_display::canvas::WIDTH;
use g13_display::{Canvas, FONT_4X6, FONT_5X7};
use heapless::String;

use super::text::{format_clock, format_count, format_date, format_uptime, truncate};
use super::{ScreenContext, View};
use crate::input::NavigationEvent;
use crate::traits::Services;

const FOOTER_Y: i32 = 35;

#[derive(Debug, Clone)]
pub struct IdleScreen {
    last_clock: String<12>,
    last_keys: u32,
    last_uptime: u64,
    dirty: bool,
}

impl IdleScreen {
    pub fn new() -> Self {
        Self {
            last_clock: String::new(),
            last_keys: 0,
            last_uptime: 0,
            dirty: true,
        }
    }
}

impl Default for IdleScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn clock_text(services: &dyn Services) -> String<12> {
    let settings = services.settings();
    match services.wall_clock() {
        Some(clock) => format_clock(&clock, settings.clock_format, settings.show_seconds),
        None => truncate("--:--"),
    }
}

impl View for IdleScreen {
    /// The menu gesture is handled by the navigation controller
    fn on_input(&mut self, _event: NavigationEvent, _ctx: &mut ScreenContext<'_>) -> bool {
        false
    }

    fn update(&mut self, _now_ms: u64, services: &dyn Services) {
        let clock = clock_text(services);
        if clock != self.last_clock {
            self.last_clock = clock;
            self.dirty = true;
        }

        let keys = services.key_count();
        if keys != self.last_keys {
            self.last_keys = keys;
            self.dirty = true;
        }

        let uptime = services.uptime_s();
        if uptime != self.last_uptime {
            self.last_uptime = uptime;
            self.dirty = true;
        }
    }

    fn render(&self, canvas: &mut Canvas, services: &dyn Services) {
        let name: String<18> = truncate(services.active_profile_name().unwrap_or("No Profile"));
        canvas.draw_text(0, 0, &name, &FONT_5X7, true);

        canvas.draw_text_right(WIDTH, 0, &clock_text(services), &FONT_5X7, true);
        canvas.hline(0, 9, WIDTH, true);

        if services.settings().show_date {
            if let Some(clock) = services.wall_clock() {
                canvas.draw_text_right(WIDTH, 14, &format_date(&clock), &FONT_4X6, true);
            }
        }

        let mut line: String<32> = String::new();
        let _ = write!(line, "Uptime: {}", format_uptime(services.uptime_s()));
        canvas.draw_text(4, 14, &line, &FONT_4X6, true);

        line.clear();
        let _ = write!(line, "Keys: {}", format_count(services.key_count()));
        canvas.draw_text(4, 22, &line, &FONT_4X6, true);

        let active = services.mode();
        for mode in 1..=3u8 {
            let x = 10 + (mode as i32 - 1) * 50;
            let mut label: String<2> = String::new();
            let _ = write!(label, "M{}", mode);

            if mode == active {
                canvas.rect(x - 2, FOOTER_Y - 1, 20, 8, true, true);
                canvas.draw_text(x, FOOTER_Y, &label, &FONT_4X6, false);
            } else {
                canvas.draw_text(x, FOOTER_Y, &label, &FONT_4X6, true);
            }
        }
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
