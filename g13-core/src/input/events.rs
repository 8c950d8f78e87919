//! Navigation events consumed by screens

use g13_protocol::ButtonId;

/// Semantic input delivered to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationEvent {
    // Thumbstick
    StickUp,
    StickDown,
    StickLeft,
    StickRight,
    StickPress,

    // Buttons
    ButtonBd,
    ButtonLeft,
    ButtonM1,
    ButtonM2,
    ButtonM3,
    ButtonMr,
}

impl NavigationEvent {
    /// Event produced by a rising edge on `button`, if it is a navigation
    /// button
    pub fn from_button(button: ButtonId) -> Option<Self> {
        match button {
            ButtonId::Stick => Some(NavigationEvent::StickPress),
            ButtonId::Bd => Some(NavigationEvent::ButtonBd),
            ButtonId::Left => Some(NavigationEvent::ButtonLeft),
            ButtonId::M1 => Some(NavigationEvent::ButtonM1),
            ButtonId::M2 => Some(NavigationEvent::ButtonM2),
            ButtonId::M3 => Some(NavigationEvent::ButtonM3),
            ButtonId::Mr => Some(NavigationEvent::ButtonMr),
            _ => None,
        }
    }

    /// Mode number (1-3) for the M-key events
    pub fn mode_number(&self) -> Option<u8> {
        match self {
            NavigationEvent::ButtonM1 => Some(1),
            NavigationEvent::ButtonM2 => Some(2),
            NavigationEvent::ButtonM3 => Some(3),
            _ => None,
        }
    }

    /// Check if this event is a stick deflection (the only repeating events)
    pub fn is_direction(&self) -> bool {
        matches!(
            self,
            NavigationEvent::StickUp
                | NavigationEvent::StickDown
                | NavigationEvent::StickLeft
                | NavigationEvent::StickRight
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            NavigationEvent::StickUp => "stick_up",
            NavigationEvent::StickDown => "stick_down",
            NavigationEvent::StickLeft => "stick_left",
            NavigationEvent::StickRight => "stick_right",
            NavigationEvent::StickPress => "stick_press",
            NavigationEvent::ButtonBd => "button_bd",
            NavigationEvent::ButtonLeft => "button_left",
            NavigationEvent::ButtonM1 => "button_m1",
            NavigationEvent::ButtonM2 => "button_m2",
            NavigationEvent::ButtonM3 => "button_m3",
            NavigationEvent::ButtonMr => "button_mr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_button() {
        assert_eq!(
            NavigationEvent::from_button(ButtonId::Stick),
            Some(NavigationEvent::StickPress)
        );
        assert_eq!(
            NavigationEvent::from_button(ButtonId::Bd),
            Some(NavigationEvent::ButtonBd)
        );
        assert_eq!(NavigationEvent::from_button(ButtonId::G1), None);
        assert_eq!(NavigationEvent::from_button(ButtonId::Down), None);
        assert_eq!(NavigationEvent::from_button(ButtonId::L1), None);
    }

    #[test]
    fn test_mode_numbers() {
        assert_eq!(NavigationEvent::ButtonM1.mode_number(), Some(1));
        assert_eq!(NavigationEvent::ButtonM3.mode_number(), Some(3));
        assert_eq!(NavigationEvent::ButtonMr.mode_number(), None);
    }

    #[test]
    fn test_directions() {
        assert!(NavigationEvent::StickLeft.is_direction());
        assert!(!NavigationEvent::StickPress.is_direction());
        assert!(!NavigationEvent::ButtonLeft.is_direction());
    }
}
