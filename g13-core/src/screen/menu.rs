//! List menu
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ TITLE                                │  y 0..9, rule at 9
//! ├──────────────────────────────────────┤
//! │ Item one                    value  > │  4 rows x 8 px from y 12
//! │▓Selected item▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓ ┃│
//! │ [Disabled]                           │
//! │ Item four                            │
//! └──────────────────────────────────────┘
//! ```

use core::fmt::Write;

use g13_display::canvas::WIDTH;
use g13_display::{Canvas, FONT_4X6};
use heapless::{String, Vec};

use super::actions::{self, Command};
use super::catalog::{MenuId, ScreenId, ValueSource};
use super::{draw_title, ScreenContext, View};
use crate::input::NavigationEvent;
use crate::traits::Services;

pub const TITLE_HEIGHT: i32 = 10;
pub const ITEM_HEIGHT: i32 = 8;
pub const VISIBLE_ITEMS: usize = 4;
pub const SCROLLBAR_WIDTH: i32 = 4;

/// Maximum items per menu
pub const MAX_MENU_ITEMS: usize = 12;

/// Maximum label length in bytes
pub const LABEL_LEN: usize = 20;

/// What pressing an item does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    /// Display only
    None,
    Run(Command),
    Open(ScreenId),
}

/// One menu row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String<LABEL_LEN>,
    pub action: ItemAction,
    /// Right-aligned value resolved at render time
    pub value: Option<ValueSource>,
    pub enabled: bool,
}

impl MenuItem {
    pub fn new(label: &str, action: ItemAction) -> Self {
        Self {
            label: super::text::truncate(label),
            action,
            value: None,
            enabled: true,
        }
    }

    pub fn command(label: &str, command: Command) -> Self {
        Self::new(label, ItemAction::Run(command))
    }

    pub fn submenu(label: &str, screen: ScreenId) -> Self {
        Self::new(label, ItemAction::Open(screen))
    }

    pub fn info(label: &str) -> Self {
        Self::new(label, ItemAction::None)
    }

    pub fn with_value(mut self, value: ValueSource) -> Self {
        self.value = Some(value);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn is_submenu(&self) -> bool {
        matches!(self.action, ItemAction::Open(_))
    }
}

/// Scrollable list of items with a wrapping selection
#[derive(Debug, Clone)]
pub struct MenuScreen {
    id: MenuId,
    title: &'static str,
    items: Vec<MenuItem, MAX_MENU_ITEMS>,
    selected: usize,
    scroll: usize,
    /// Last (uptime, keys) seen, for menus showing live status
    live_stamp: (u64, u32),
    dirty: bool,
}

impl MenuScreen {
    pub fn new(id: MenuId, title: &'static str) -> Self {
        Self {
            id,
            title,
            items: Vec::new(),
            selected: 0,
            scroll: 0,
            live_stamp: (u64::MAX, u32::MAX),
            dirty: true,
        }
    }

    /// Append an item; returns false when the menu is full
    pub fn add(&mut self, item: MenuItem) -> bool {
        self.items.push(item).is_ok()
    }

    pub fn with_item(mut self, item: MenuItem) -> Self {
        self.add(item);
        self
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Move the selection with wrap-around, keeping it in view
    pub fn move_selection(&mut self, delta: i32) {
        if self.items.is_empty() {
            return;
        }

        let len = self.items.len() as i32;
        self.selected = (self.selected as i32 + delta).rem_euclid(len) as usize;

        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + VISIBLE_ITEMS {
            self.scroll = self.selected + 1 - VISIBLE_ITEMS;
        }

        self.dirty = true;
    }

    fn activate(&mut self, ctx: &mut ScreenContext<'_>) {
        let Some(item) = self.items.get(self.selected) else {
            return;
        };
        if !item.enabled {
            return;
        }

        match item.action {
            ItemAction::Run(command) => {
                actions::run(command, ctx);
                self.dirty = true;
            }
            ItemAction::Open(screen) => ctx.push(screen),
            ItemAction::None => {}
        }
    }

    fn has_live_values(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item.value, Some(v) if v.is_live()))
    }

    fn render_item(&self, canvas: &mut Canvas, item: &MenuItem, y: i32, selected: bool, services: &dyn Services) {
        let on = !selected;
        let right = WIDTH - SCROLLBAR_WIDTH;

        if selected {
            canvas.rect(0, y - 1, right, ITEM_HEIGHT, true, true);
        }

        if item.enabled {
            canvas.draw_text(2, y, &item.label, &FONT_4X6, on);
        } else {
            let mut label: String<{ LABEL_LEN + 2 }> = String::new();
            let _ = write!(label, "[{}]", item.label);
            canvas.draw_text(2, y, &label, &FONT_4X6, on);
        }

        if let Some(value) = item.value {
            let text = value.resolve(services);
            let value_right = if item.is_submenu() { right - 8 } else { right - 2 };
            canvas.draw_text_right(value_right, y, &text, &FONT_4X6, on);
        }

        if item.is_submenu() {
            canvas.draw_text(right - 6, y, ">", &FONT_4X6, on);
        }
    }

    fn render_scrollbar(&self, canvas: &mut Canvas) {
        let count = self.items.len();
        if count <= VISIBLE_ITEMS {
            return;
        }

        let x = WIDTH - 3;
        let top = TITLE_HEIGHT + 2;
        let track = VISIBLE_ITEMS as i32 * ITEM_HEIGHT;
        canvas.vline(x, top, track, true);

        let thumb = (track * VISIBLE_ITEMS as i32 / count as i32).max(4);
        let max_scroll = (count - VISIBLE_ITEMS) as i32;
        let offset = (track - thumb) * self.scroll as i32 / max_scroll;
        canvas.rect(x - 1, top + offset, 3, thumb, true, true);
    }
}

impl View for MenuScreen {
    fn on_input(&mut self, event: NavigationEvent, ctx: &mut ScreenContext<'_>) -> bool {
        match event {
            NavigationEvent::StickUp => {
                self.move_selection(-1);
                true
            }
            NavigationEvent::StickDown => {
                self.move_selection(1);
                true
            }
            NavigationEvent::StickPress => {
                self.activate(ctx);
                true
            }
            NavigationEvent::ButtonBd => {
                ctx.pop();
                true
            }
            _ => false,
        }
    }

    fn update(&mut self, _now_ms: u64, services: &dyn Services) {
        if self.has_live_values() {
            let stamp = (services.uptime_s(), services.key_count());
            if stamp != self.live_stamp {
                self.live_stamp = stamp;
                self.dirty = true;
            }
        }
    }

    fn render(&self, canvas: &mut Canvas, services: &dyn Services) {
        draw_title(canvas, self.title);

        let visible = self.items.iter().enumerate().skip(self.scroll).take(VISIBLE_ITEMS);
        for (row, (index, item)) in visible.enumerate() {
            let y = TITLE_HEIGHT + 2 + row as i32 * ITEM_HEIGHT;
            self.render_item(canvas, item, y, index == self.selected, services);
        }

        self.render_scrollbar(canvas);
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
