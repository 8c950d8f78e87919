//! Value adjusters: backlight brightness and color presets
//!
//! Both preview every change on the backlight immediately. Press commits,
//! BD restores the value the screen was opened with.

use core::fmt::Write;

use g13_display::{Canvas, Fill, FONT_4X6, FONT_5X7};
use heapless::String;

use super::{draw_title, ScreenContext, View, TOAST_SHORT_MS};
use crate::config::MAX_BRIGHTNESS;
use crate::input::NavigationEvent;
use crate::traits::{Rgb, Services};

/// Brightness change per stick step (percent)
pub const BRIGHTNESS_STEP: u8 = 10;

/// Named colors offered by the color picker
pub const COLOR_PRESETS: [(&str, Rgb); 10] = [
    ("Red", Rgb::new(255, 0, 0)),
    ("Orange", Rgb::new(255, 128, 0)),
    ("Yellow", Rgb::new(255, 255, 0)),
    ("Green", Rgb::new(0, 255, 0)),
    ("Cyan", Rgb::new(0, 255, 255)),
    ("Blue", Rgb::new(0, 0, 255)),
    ("Purple", Rgb::new(128, 0, 255)),
    ("Magenta", Rgb::new(255, 0, 255)),
    ("Pink", Rgb::new(255, 105, 180)),
    ("White", Rgb::new(255, 255, 255)),
];

/// Preset name for a color, if it is one
pub fn color_name(color: Rgb) -> Option<&'static str> {
    COLOR_PRESETS
        .iter()
        .find(|(_, preset)| *preset == color)
        .map(|(name, _)| *name)
}

/// Brightness adjuster
#[derive(Debug, Clone)]
pub struct BrightnessScreen {
    value: u8,
    original: u8,
    dirty: bool,
}

impl BrightnessScreen {
    pub fn new(current: u8) -> Self {
        let current = current.min(MAX_BRIGHTNESS);
        Self {
            value: current,
            original: current,
            dirty: true,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    fn step(&mut self, up: bool, ctx: &mut ScreenContext<'_>) {
        let value = if up {
            self.value.saturating_add(BRIGHTNESS_STEP).min(MAX_BRIGHTNESS)
        } else {
            self.value.saturating_sub(BRIGHTNESS_STEP)
        };
        if value != self.value {
            self.value = value;
            ctx.services.set_brightness(value);
            self.dirty = true;
        }
    }
}

impl View for BrightnessScreen {
    fn on_input(&mut self, event: NavigationEvent, ctx: &mut ScreenContext<'_>) -> bool {
        match event {
            NavigationEvent::StickLeft => {
                self.step(false, ctx);
                true
            }
            NavigationEvent::StickRight => {
                self.step(true, ctx);
                true
            }
            NavigationEvent::StickPress => {
                ctx.services.set_brightness(self.value);
                ctx.toast_fmt(format_args!("Brightness: {}%", self.value), TOAST_SHORT_MS);
                ctx.pop();
                true
            }
            NavigationEvent::ButtonBd => {
                ctx.services.set_brightness(self.original);
                ctx.pop();
                true
            }
            _ => false,
        }
    }

    fn render(&self, canvas: &mut Canvas, _services: &dyn Services) {
        draw_title(canvas, "BRIGHTNESS");

        let mut text: String<8> = String::new();
        let _ = write!(text, "{}%", self.value);
        canvas.draw_text_centered(18, &text, &FONT_5X7, true);
        canvas.draw_text_centered(30, "< Adjust >", &FONT_4X6, true);
        canvas.progress_bar(10, 37, 140, 5, self.value, Fill::Solid);
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

/// Preset color picker
#[derive(Debug, Clone)]
pub struct ColorPickerScreen {
    selected: usize,
    original: Rgb,
    dirty: bool,
}

impl ColorPickerScreen {
    /// Start on the preset matching `current`, or the first one
    pub fn new(current: Rgb) -> Self {
        let selected = COLOR_PRESETS
            .iter()
            .position(|(_, preset)| *preset == current)
            .unwrap_or(0);
        Self {
            selected,
            original: current,
            dirty: true,
        }
    }

    pub fn selected(&self) -> (&'static str, Rgb) {
        COLOR_PRESETS[self.selected]
    }

    fn step(&mut self, delta: i32, ctx: &mut ScreenContext<'_>) {
        let len = COLOR_PRESETS.len() as i32;
        self.selected = (self.selected as i32 + delta).rem_euclid(len) as usize;
        ctx.services.set_color(self.selected().1);
        self.dirty = true;
    }
}

impl View for ColorPickerScreen {
    fn on_input(&mut self, event: NavigationEvent, ctx: &mut ScreenContext<'_>) -> bool {
        match event {
            NavigationEvent::StickLeft => {
                self.step(-1, ctx);
                true
            }
            NavigationEvent::StickRight => {
                self.step(1, ctx);
                true
            }
            NavigationEvent::StickPress => {
                let (name, color) = self.selected();
                ctx.services.stop_effect();
                ctx.services.set_color(color);
                ctx.toast_fmt(format_args!("Color: {}", name), TOAST_SHORT_MS);
                ctx.pop();
                true
            }
            NavigationEvent::ButtonBd => {
                ctx.services.set_color(self.original);
                ctx.pop();
                true
            }
            _ => false,
        }
    }

    fn render(&self, canvas: &mut Canvas, _services: &dyn Services) {
        draw_title(canvas, "SELECT COLOR");

        let (name, color) = self.selected();
        canvas.draw_text_centered(18, name, &FONT_5X7, true);

        let mut hex: String<12> = String::new();
        let _ = write!(hex, "< {} >", color.to_hex());
        canvas.draw_text_centered(30, &hex, &FONT_4X6, true);

        for (x, channel) in [(10, color.r), (60, color.g), (110, color.b)] {
            let width = channel as i32 * 50 / 255;
            if width > 0 {
                canvas.rect(x, 38, width, 4, true, true);
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
