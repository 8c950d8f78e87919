//! Thumbstick direction classification

use super::events::NavigationEvent;

/// Direction of a deflected stick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StickDirection {
    Up,
    Down,
    Left,
    Right,
}

impl StickDirection {
    /// Classify a stick position
    ///
    /// The dead zone is `center +/- threshold` (exclusive). The Y axis is
    /// checked first; X only counts when Y is inside the dead zone.
    pub fn from_axes(x: u8, y: u8, center: u8, threshold: u8) -> Option<Self> {
        let low = i16::from(center) - i16::from(threshold);
        let high = i16::from(center) + i16::from(threshold);
        let (x, y) = (i16::from(x), i16::from(y));

        if y < low {
            Some(StickDirection::Up)
        } else if y > high {
            Some(StickDirection::Down)
        } else if x < low {
            Some(StickDirection::Left)
        } else if x > high {
            Some(StickDirection::Right)
        } else {
            None
        }
    }

    pub fn event(self) -> NavigationEvent {
        match self {
            StickDirection::Up => NavigationEvent::StickUp,
            StickDirection::Down => NavigationEvent::StickDown,
            StickDirection::Left => NavigationEvent::StickLeft,
            StickDirection::Right => NavigationEvent::StickRight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(x: u8, y: u8) -> Option<StickDirection> {
        StickDirection::from_axes(x, y, 128, 50)
    }

    #[test]
    fn test_center_is_none() {
        assert_eq!(classify(128, 128), None);
    }

    #[test]
    fn test_dead_zone_edges() {
        // 128 - 50 = 78 and 128 + 50 = 178 are still inside
        assert_eq!(classify(128, 78), None);
        assert_eq!(classify(128, 178), None);
        assert_eq!(classify(78, 128), None);
        assert_eq!(classify(178, 128), None);

        assert_eq!(classify(128, 77), Some(StickDirection::Up));
        assert_eq!(classify(128, 179), Some(StickDirection::Down));
        assert_eq!(classify(77, 128), Some(StickDirection::Left));
        assert_eq!(classify(179, 128), Some(StickDirection::Right));
    }

    #[test]
    fn test_vertical_wins() {
        assert_eq!(classify(0, 0), Some(StickDirection::Up));
        assert_eq!(classify(255, 255), Some(StickDirection::Down));
        assert_eq!(classify(0, 255), Some(StickDirection::Down));
    }

    #[test]
    fn test_threshold_near_range_limits() {
        // A dead zone wider than the axis never triggers
        assert_eq!(StickDirection::from_axes(0, 255, 128, 200), None);
        assert_eq!(
            StickDirection::from_axes(128, 0, 128, 30),
            Some(StickDirection::Up)
        );
    }
}
