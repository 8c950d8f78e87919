//! Menu commands
//!
//! Every leaf action a menu item can trigger. Commands run against the
//! services in the [`ScreenContext`] and queue their own feedback (toast,
//! pop, confirm).

use super::{text, ScreenContext, TOAST_LONG_MS, TOAST_SHORT_MS};
use crate::config::{format_timeout, ClockFormat, Settings};
use crate::traits::Effect;

/// Leaf action of a menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Activate the profile at this index
    LoadProfile(u8),
    RecordMacro,
    LedOff,
    SetEffect(Effect),
    StopEffect,
    SetClockFormat(ClockFormat),
    ToggleSeconds,
    ToggleDate,
    SetIdleTimeout(u16),
    CycleSensitivity,
    /// Ask before resetting settings
    AskReset,
    ResetDefaults,
}

fn on_off(value: bool) -> &'static str {
    if value {
        "On"
    } else {
        "Off"
    }
}

/// Execute a command
pub fn run(command: Command, ctx: &mut ScreenContext<'_>) {
    match command {
        Command::LoadProfile(index) => {
            let index = index as usize;
            match ctx.services.load_profile(index) {
                Ok(()) => {
                    let name: super::Message =
                        text::truncate(ctx.services.profile_name(index).unwrap_or("?"));
                    ctx.pop();
                    ctx.toast_fmt(format_args!("Loaded: {}", name), TOAST_SHORT_MS);
                }
                Err(_) => ctx.toast("Load failed", TOAST_LONG_MS),
            }
        }

        Command::RecordMacro => ctx.toast("Use GUI to record", TOAST_LONG_MS),

        Command::LedOff => {
            ctx.services.off();
            ctx.toast("LED Off", TOAST_SHORT_MS);
        }

        Command::SetEffect(effect) => {
            match effect {
                Effect::Solid => ctx.services.stop_effect(),
                other => ctx.services.start_effect(other),
            }
            ctx.pop();
            ctx.toast_fmt(format_args!("Effect: {}", effect.name()), TOAST_SHORT_MS);
        }

        Command::StopEffect => {
            ctx.services.stop_effect();
            ctx.pop();
            ctx.toast("Effect stopped", TOAST_SHORT_MS);
        }

        Command::SetClockFormat(format) => {
            ctx.services
                .modify_settings(&mut |settings: &mut Settings| settings.clock_format = format);
            ctx.toast_fmt(format_args!("Format: {}", format.label()), TOAST_SHORT_MS);
        }

        Command::ToggleSeconds => {
            let value = !ctx.services.settings().show_seconds;
            ctx.services
                .modify_settings(&mut |settings: &mut Settings| settings.show_seconds = value);
            ctx.toast_fmt(format_args!("Seconds: {}", on_off(value)), TOAST_SHORT_MS);
        }

        Command::ToggleDate => {
            let value = !ctx.services.settings().show_date;
            ctx.services
                .modify_settings(&mut |settings: &mut Settings| settings.show_date = value);
            ctx.toast_fmt(format_args!("Date: {}", on_off(value)), TOAST_SHORT_MS);
        }

        Command::SetIdleTimeout(seconds) => {
            ctx.services
                .modify_settings(&mut |settings: &mut Settings| settings.idle_timeout_s = seconds);
            ctx.toast_fmt(
                format_args!("Timeout: {}", format_timeout(seconds)),
                TOAST_SHORT_MS,
            );
            ctx.pop();
        }

        Command::CycleSensitivity => {
            let next = ctx.services.settings().stick_sensitivity.next();
            ctx.services
                .modify_settings(&mut |settings: &mut Settings| settings.stick_sensitivity = next);
            ctx.toast_fmt(format_args!("Sensitivity: {}", next.label()), TOAST_SHORT_MS);
        }

        Command::AskReset => ctx.confirm("Reset all settings?", Command::ResetDefaults, None),

        Command::ResetDefaults => {
            ctx.services.reset_settings();
            ctx.toast("Settings reset", TOAST_LONG_MS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StickSensitivity;
    use crate::screen::Request;
    use crate::testing::MockServices;
    use crate::traits::{LedControl, SettingsStore};

    fn toast_text(request: &Request) -> &str {
        match request {
            Request::Toast { text, .. } => text.as_str(),
            other => panic!("expected toast, got {:?}", other),
        }
    }

    #[test]
    fn test_load_profile_pops_and_toasts() {
        let mut services = MockServices::with_profiles(&["Default", "FPS"]);
        let mut ctx = ScreenContext::new(&mut services, 0);
        run(Command::LoadProfile(1), &mut ctx);

        let requests = ctx.into_requests();
        assert_eq!(requests[0], Request::Pop);
        assert_eq!(toast_text(&requests[1]), "Loaded: FPS");
        assert_eq!(services.loaded.as_slice(), &[1]);
    }

    #[test]
    fn test_load_profile_long_name_is_cut() {
        let mut services = MockServices::with_profiles(&["Counter-Strike Competitive Bindings"]);
        let mut ctx = ScreenContext::new(&mut services, 0);
        run(Command::LoadProfile(0), &mut ctx);

        let requests = ctx.into_requests();
        let text = toast_text(&requests[1]);
        assert!(text.starts_with("Loaded: Counter-Strike"));
        assert_eq!(text.len(), crate::screen::MESSAGE_LEN);
    }

    #[test]
    fn test_load_missing_profile_reports_failure() {
        let mut services = MockServices::with_profiles(&["Default"]);
        let mut ctx = ScreenContext::new(&mut services, 0);
        run(Command::LoadProfile(5), &mut ctx);

        let requests = ctx.into_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(toast_text(&requests[0]), "Load failed");
    }

    #[test]
    fn test_toggle_commands_update_settings() {
        let mut services = MockServices::default();
        {
            let mut ctx = ScreenContext::new(&mut services, 0);
            run(Command::ToggleSeconds, &mut ctx);
            assert_eq!(toast_text(&ctx.requests()[0]), "Seconds: Off");
        }
        assert!(!services.settings().show_seconds);

        {
            let mut ctx = ScreenContext::new(&mut services, 0);
            run(Command::CycleSensitivity, &mut ctx);
            assert_eq!(toast_text(&ctx.requests()[0]), "Sensitivity: High");
        }
        assert_eq!(services.settings().stick_sensitivity, StickSensitivity::High);
    }

    #[test]
    fn test_set_timeout_toasts_then_pops() {
        let mut services = MockServices::default();
        let mut ctx = ScreenContext::new(&mut services, 0);
        run(Command::SetIdleTimeout(300), &mut ctx);

        let requests = ctx.into_requests();
        assert_eq!(toast_text(&requests[0]), "Timeout: 5m");
        assert_eq!(requests[1], Request::Pop);
        assert_eq!(services.settings().idle_timeout_s, 300);
    }

    #[test]
    fn test_effects() {
        let mut services = MockServices::default();
        {
            let mut ctx = ScreenContext::new(&mut services, 0);
            run(Command::SetEffect(Effect::Rainbow), &mut ctx);
            assert_eq!(toast_text(&ctx.requests()[1]), "Effect: Rainbow");
        }
        assert_eq!(services.effect(), Some(Effect::Rainbow));

        let mut ctx = ScreenContext::new(&mut services, 0);
        run(Command::SetEffect(Effect::Solid), &mut ctx);
        drop(ctx);
        assert_eq!(services.effect(), None);
    }

    #[test]
    fn test_ask_reset_queues_confirm() {
        let mut services = MockServices::default();
        let mut ctx = ScreenContext::new(&mut services, 0);
        run(Command::AskReset, &mut ctx);

        match &ctx.requests()[0] {
            Request::Confirm {
                on_confirm,
                on_cancel,
                ..
            } => {
                assert_eq!(*on_confirm, Command::ResetDefaults);
                assert_eq!(*on_cancel, None);
            }
            other => panic!("expected confirm, got {:?}", other),
        }
    }
}
