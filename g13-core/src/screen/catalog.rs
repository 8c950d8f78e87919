//! Menu catalog
//!
//! Screens are built on demand from a [`ScreenId`], so a push request only
//! carries a small copyable identifier and menus always reflect the current
//! profiles, macros and settings.

use core::fmt::Write;

use heapless::String;

use super::actions::Command;
use super::adjust::{color_name, BrightnessScreen, ColorPickerScreen};
use super::menu::{MenuItem, MenuScreen, MAX_MENU_ITEMS};
use super::text::{format_count, format_uptime, truncate};
use super::Screen;
use crate::config::{format_timeout, ClockFormat, IDLE_TIMEOUT_OPTIONS};
use crate::traits::{Effect, Services};

/// Resolved value text
pub type ValueText = String<16>;

/// Screens that can be pushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenId {
    Menu(MenuId),
    Brightness,
    ColorPicker,
}

impl ScreenId {
    /// Build a fresh screen for this id
    pub fn build(self, services: &dyn Services) -> Screen {
        match self {
            ScreenId::Menu(id) => Screen::Menu(id.build(services)),
            ScreenId::Brightness => Screen::Brightness(BrightnessScreen::new(services.brightness())),
            ScreenId::ColorPicker => Screen::ColorPicker(ColorPickerScreen::new(services.color())),
        }
    }
}

/// Menus in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuId {
    Main,
    Profiles,
    Macros,
    Led,
    Effects,
    Settings,
    Clock,
    Timeout,
    Info,
}

impl MenuId {
    pub fn title(self) -> &'static str {
        match self {
            MenuId::Main => "MENU",
            MenuId::Profiles => "PROFILES",
            MenuId::Macros => "MACROS",
            MenuId::Led => "LED SETTINGS",
            MenuId::Effects => "EFFECTS",
            MenuId::Settings => "SETTINGS",
            MenuId::Clock => "CLOCK",
            MenuId::Timeout => "TIMEOUT",
            MenuId::Info => "SYSTEM INFO",
        }
    }

    pub fn build(self, services: &dyn Services) -> MenuScreen {
        let menu = MenuScreen::new(self, self.title());
        match self {
            MenuId::Main => menu
                .with_item(MenuItem::submenu("Profiles", ScreenId::Menu(MenuId::Profiles)))
                .with_item(MenuItem::submenu("Macros", ScreenId::Menu(MenuId::Macros)))
                .with_item(MenuItem::submenu("LED Settings", ScreenId::Menu(MenuId::Led)))
                .with_item(MenuItem::submenu("Settings", ScreenId::Menu(MenuId::Settings)))
                .with_item(MenuItem::submenu("System Info", ScreenId::Menu(MenuId::Info))),

            MenuId::Profiles => build_profiles(menu, services),

            MenuId::Macros => build_macros(menu, services),

            MenuId::Led => menu
                .with_item(
                    MenuItem::submenu("Color", ScreenId::ColorPicker).with_value(ValueSource::LedColor),
                )
                .with_item(
                    MenuItem::submenu("Brightness", ScreenId::Brightness)
                        .with_value(ValueSource::LedBrightness),
                )
                .with_item(
                    MenuItem::submenu("Effect", ScreenId::Menu(MenuId::Effects))
                        .with_value(ValueSource::LedEffect),
                )
                .with_item(MenuItem::command("Turn Off", Command::LedOff)),

            MenuId::Effects => menu
                .with_item(MenuItem::command("Solid", Command::SetEffect(Effect::Solid)))
                .with_item(MenuItem::command("Pulse", Command::SetEffect(Effect::Pulse)))
                .with_item(MenuItem::command("Rainbow", Command::SetEffect(Effect::Rainbow)))
                .with_item(MenuItem::command("Fade", Command::SetEffect(Effect::Fade)))
                .with_item(MenuItem::command("Stop Effect", Command::StopEffect)),

            MenuId::Settings => menu
                .with_item(MenuItem::submenu("Clock Display", ScreenId::Menu(MenuId::Clock)))
                .with_item(
                    MenuItem::submenu("Idle Timeout", ScreenId::Menu(MenuId::Timeout))
                        .with_value(ValueSource::IdleTimeout),
                )
                .with_item(
                    MenuItem::command("Stick Sensitivity", Command::CycleSensitivity)
                        .with_value(ValueSource::Sensitivity),
                )
                .with_item(MenuItem::command("Reset to Defaults", Command::AskReset)),

            MenuId::Clock => menu
                .with_item(
                    MenuItem::command("24-hour", Command::SetClockFormat(ClockFormat::H24))
                        .with_value(ValueSource::ClockMark(ClockFormat::H24)),
                )
                .with_item(
                    MenuItem::command("12-hour", Command::SetClockFormat(ClockFormat::H12))
                        .with_value(ValueSource::ClockMark(ClockFormat::H12)),
                )
                .with_item(
                    MenuItem::command("Show Seconds", Command::ToggleSeconds)
                        .with_value(ValueSource::ShowSeconds),
                )
                .with_item(
                    MenuItem::command("Show Date", Command::ToggleDate).with_value(ValueSource::ShowDate),
                ),

            MenuId::Timeout => {
                let mut menu = menu;
                for seconds in IDLE_TIMEOUT_OPTIONS {
                    menu.add(
                        MenuItem::command(timeout_label(seconds), Command::SetIdleTimeout(seconds))
                            .with_value(ValueSource::TimeoutMark(seconds)),
                    );
                }
                menu
            }

            MenuId::Info => menu
                .with_item(MenuItem::info("Version").with_value(ValueSource::Version))
                .with_item(MenuItem::info("Uptime").with_value(ValueSource::Uptime))
                .with_item(MenuItem::info("Keys").with_value(ValueSource::KeyCount))
                .with_item(MenuItem::info("Profile").with_value(ValueSource::ProfileName))
                .with_item(MenuItem::info("Mode").with_value(ValueSource::Mode)),
        }
    }
}

fn build_profiles(mut menu: MenuScreen, services: &dyn Services) -> MenuScreen {
    let count = services.profile_count().min(MAX_MENU_ITEMS);
    if count == 0 {
        menu.add(MenuItem::info("No profiles").disabled());
        return menu;
    }

    for index in 0..count {
        let name = services.profile_name(index).unwrap_or("?");
        menu.add(
            MenuItem::command(name, Command::LoadProfile(index as u8))
                .with_value(ValueSource::ProfileMark(index as u8)),
        );
    }
    menu
}

fn build_macros(mut menu: MenuScreen, services: &dyn Services) -> MenuScreen {
    // Leave a row for "Record New"
    let count = services.macro_count().min(MAX_MENU_ITEMS - 1);
    if count == 0 {
        menu.add(MenuItem::info("No macros").disabled());
    }
    for index in 0..count {
        menu.add(MenuItem::info(services.macro_name(index).unwrap_or("?")).disabled());
    }
    menu.add(MenuItem::command("Record New", Command::RecordMacro));
    menu
}

fn timeout_label(seconds: u16) -> &'static str {
    match seconds {
        0 => "Never",
        15 => "15 seconds",
        30 => "30 seconds",
        60 => "1 minute",
        300 => "5 minutes",
        _ => "Custom",
    }
}

/// Right-aligned value shown next to a menu label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueSource {
    LedColor,
    LedBrightness,
    LedEffect,
    IdleTimeout,
    Sensitivity,
    /// `*` when this clock format is active
    ClockMark(ClockFormat),
    ShowSeconds,
    ShowDate,
    /// `*` when this timeout is active
    TimeoutMark(u16),
    /// `*` when this profile is active
    ProfileMark(u8),
    Version,
    Uptime,
    KeyCount,
    ProfileName,
    Mode,
}

impl ValueSource {
    /// Values that change without user input
    pub fn is_live(self) -> bool {
        matches!(self, ValueSource::Uptime | ValueSource::KeyCount)
    }

    pub fn resolve(self, services: &dyn Services) -> ValueText {
        let settings = services.settings();
        let mut out = ValueText::new();
        match self {
            ValueSource::LedColor => {
                let color = services.color();
                match color_name(color) {
                    Some(name) => {
                        let _ = out.push_str(name);
                    }
                    None => {
                        let _ = out.push_str(&color.to_hex());
                    }
                }
            }
            ValueSource::LedBrightness => {
                let _ = write!(out, "{}%", services.brightness());
            }
            ValueSource::LedEffect => {
                let _ = out.push_str(services.effect().map_or("None", Effect::name));
            }
            ValueSource::IdleTimeout => {
                let _ = out.push_str(&format_timeout(settings.idle_timeout_s));
            }
            ValueSource::Sensitivity => {
                let _ = out.push_str(settings.stick_sensitivity.label());
            }
            ValueSource::ClockMark(format) => mark(&mut out, settings.clock_format == format),
            ValueSource::ShowSeconds => {
                let _ = out.push_str(on_off(settings.show_seconds));
            }
            ValueSource::ShowDate => {
                let _ = out.push_str(on_off(settings.show_date));
            }
            ValueSource::TimeoutMark(seconds) => mark(&mut out, settings.idle_timeout_s == seconds),
            ValueSource::ProfileMark(index) => {
                mark(&mut out, services.active_profile() == Some(index as usize))
            }
            ValueSource::Version => out = truncate(services.version()),
            ValueSource::Uptime => out = format_uptime(services.uptime_s()),
            ValueSource::KeyCount => out = format_count(services.key_count()),
            ValueSource::ProfileName => {
                out = truncate(services.active_profile_name().unwrap_or("None"));
            }
            ValueSource::Mode => {
                let _ = write!(out, "M{}", services.mode());
            }
        }
        out
    }
}

fn mark(out: &mut ValueText, active: bool) {
    if active {
        let _ = out.push('*');
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "On"
    } else {
        "Off"
    }
}
