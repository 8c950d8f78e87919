//! Report-to-event translation
//!
//! The navigator keeps the previous [`ButtonState`] for edge detection and
//! the held stick direction for synthetic repeats.

use g13_protocol::{ButtonId, ButtonState};
use heapless::Vec;

use super::events::NavigationEvent;
use super::stick::StickDirection;
use crate::config::InputConfig;

/// Buttons that produce navigation events, in emission order
pub const NAV_BUTTONS: [ButtonId; 7] = [
    ButtonId::Stick,
    ButtonId::Bd,
    ButtonId::Left,
    ButtonId::M1,
    ButtonId::M2,
    ButtonId::M3,
    ButtonId::Mr,
];

/// One direction plus every navigation button
pub const MAX_EVENTS_PER_REPORT: usize = NAV_BUTTONS.len() + 1;

/// Events produced by a single report
pub type NavEvents = Vec<NavigationEvent, MAX_EVENTS_PER_REPORT>;

/// Stateful translator from button states to navigation events
#[derive(Debug, Clone)]
pub struct Navigator {
    config: InputConfig,
    previous: ButtonState,
    held: Option<StickDirection>,
    next_repeat_ms: u64,
}

impl Navigator {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            previous: ButtonState::default(),
            held: None,
            next_repeat_ms: 0,
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Change the stick dead zone
    pub fn set_threshold(&mut self, threshold: u8) {
        self.config.threshold = threshold;
    }

    /// Direction currently held outside the dead zone
    pub fn held_direction(&self) -> Option<StickDirection> {
        self.held
    }

    /// Forget all state (e.g. after the device reconnects)
    pub fn reset(&mut self) {
        self.previous = ButtonState::default();
        self.held = None;
    }

    /// Process one decoded report
    ///
    /// A new stick direction is emitted immediately and arms the repeat
    /// timer. Navigation buttons emit once on their rising edge.
    pub fn process(&mut self, state: &ButtonState, now_ms: u64) -> NavEvents {
        let mut events = NavEvents::new();

        let direction = StickDirection::from_axes(
            state.stick_x,
            state.stick_y,
            self.config.center,
            self.config.threshold,
        );
        if direction != self.held {
            if let Some(direction) = direction {
                let _ = events.push(direction.event());
                self.next_repeat_ms = now_ms + u64::from(self.config.repeat_delay_ms);
            }
            self.held = direction;
        }

        let delta = ButtonState::diff(&self.previous, state);
        for button in NAV_BUTTONS {
            if delta.pressed.contains(button) {
                if let Some(event) = NavigationEvent::from_button(button) {
                    let _ = events.push(event);
                }
            }
        }

        self.previous = *state;
        events
    }

    /// Emit a repeat for the held direction if one is due
    ///
    /// Call after every read attempt, including timeouts. At most one
    /// repeat is produced per call; slots missed while nobody polled are
    /// dropped rather than replayed.
    pub fn poll_repeat(&mut self, now_ms: u64) -> Option<NavigationEvent> {
        let direction = self.held?;
        if now_ms < self.next_repeat_ms {
            return None;
        }

        let interval = u64::from(self.config.repeat_interval_ms.max(1));
        self.next_repeat_ms += interval;
        if self.next_repeat_ms <= now_ms {
            self.next_repeat_ms = now_ms + interval;
        }

        Some(direction.event())
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use g13_protocol::ButtonSet;

    fn state(x: u8, y: u8, buttons: &[ButtonId]) -> ButtonState {
        ButtonState {
            pressed: ButtonSet::from_buttons(buttons),
            stick_x: x,
            stick_y: y,
        }
    }

    fn centered(buttons: &[ButtonId]) -> ButtonState {
        state(128, 128, buttons)
    }

    #[test]
    fn test_idle_reports_emit_nothing() {
        let mut nav = Navigator::default();
        for t in 0..10 {
            assert!(nav.process(&centered(&[]), t * 10).is_empty());
            assert_eq!(nav.poll_repeat(t * 10), None);
        }
    }

    #[test]
    fn test_direction_emits_once_on_entry() {
        let mut nav = Navigator::default();
        let events = nav.process(&state(128, 20, &[]), 0);
        assert_eq!(events.as_slice(), &[NavigationEvent::StickUp]);

        // Still held: no new event from reports
        assert!(nav.process(&state(128, 10, &[]), 50).is_empty());
        assert_eq!(nav.held_direction(), Some(StickDirection::Up));

        // Back to center cancels
        assert!(nav.process(&centered(&[]), 100).is_empty());
        assert_eq!(nav.held_direction(), None);
        assert_eq!(nav.poll_repeat(1000), None);
    }

    #[test]
    fn test_direction_change_emits_new_direction() {
        let mut nav = Navigator::default();
        nav.process(&state(128, 250, &[]), 0);
        let events = nav.process(&state(10, 128, &[]), 20);
        assert_eq!(events.as_slice(), &[NavigationEvent::StickLeft]);
    }

    #[test]
    fn test_repeat_timing() {
        let mut nav = Navigator::default();
        nav.process(&state(128, 250, &[]), 0);

        assert_eq!(nav.poll_repeat(399), None);
        assert_eq!(nav.poll_repeat(400), Some(NavigationEvent::StickDown));
        assert_eq!(nav.poll_repeat(401), None);
        assert_eq!(nav.poll_repeat(549), None);
        assert_eq!(nav.poll_repeat(550), Some(NavigationEvent::StickDown));
    }

    #[test]
    fn test_one_repeat_per_interval_over_duration() {
        let mut nav = Navigator::default();
        nav.process(&state(250, 128, &[]), 0);

        let repeats = (10..=1000u64)
            .step_by(10)
            .filter(|&t| nav.poll_repeat(t).is_some())
            .count();
        // 400, 550, 700, 850, 1000
        assert_eq!(repeats, 5);
    }

    #[test]
    fn test_missed_slots_do_not_burst() {
        let mut nav = Navigator::default();
        nav.process(&state(128, 0, &[]), 0);

        // Nobody polled for a long time
        assert_eq!(nav.poll_repeat(2000), Some(NavigationEvent::StickUp));
        assert_eq!(nav.poll_repeat(2000), None);
        assert_eq!(nav.poll_repeat(2149), None);
        assert_eq!(nav.poll_repeat(2150), Some(NavigationEvent::StickUp));
    }

    #[test]
    fn test_button_rising_edges() {
        let mut nav = Navigator::default();

        let events = nav.process(&centered(&[ButtonId::Stick, ButtonId::G5]), 0);
        assert_eq!(events.as_slice(), &[NavigationEvent::StickPress]);

        // Held: nothing
        assert!(nav
            .process(&centered(&[ButtonId::Stick, ButtonId::G5]), 10)
            .is_empty());

        // Release: nothing
        assert!(nav.process(&centered(&[]), 20).is_empty());

        // Press again
        let events = nav.process(&centered(&[ButtonId::Stick]), 30);
        assert_eq!(events.as_slice(), &[NavigationEvent::StickPress]);
    }

    #[test]
    fn test_all_nav_buttons_in_order() {
        let mut nav = Navigator::default();
        let events = nav.process(&state(128, 0, &NAV_BUTTONS), 0);
        assert_eq!(
            events.as_slice(),
            &[
                NavigationEvent::StickUp,
                NavigationEvent::StickPress,
                NavigationEvent::ButtonBd,
                NavigationEvent::ButtonLeft,
                NavigationEvent::ButtonM1,
                NavigationEvent::ButtonM2,
                NavigationEvent::ButtonM3,
                NavigationEvent::ButtonMr,
            ]
        );
    }

    #[test]
    fn test_threshold_change() {
        let mut nav = Navigator::default();
        // 90 is inside the default dead zone (78..=178)
        assert!(nav.process(&state(128, 90, &[]), 0).is_empty());

        nav.set_threshold(30);
        let events = nav.process(&state(128, 90, &[]), 10);
        assert_eq!(events.as_slice(), &[NavigationEvent::StickUp]);
    }

    #[test]
    fn test_reset_forgets_held_buttons() {
        let mut nav = Navigator::default();
        nav.process(&centered(&[ButtonId::Bd]), 0);
        nav.reset();
        let events = nav.process(&centered(&[ButtonId::Bd]), 10);
        assert_eq!(events.as_slice(), &[NavigationEvent::ButtonBd]);
    }
}
