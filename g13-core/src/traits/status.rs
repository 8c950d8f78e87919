//! Runtime status shown on the idle and info screens

/// Broken-down local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0 = Monday
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Daemon status
pub trait StatusSource {
    /// Seconds since start
    fn uptime_s(&self) -> u64;

    /// Reports processed since start
    fn key_count(&self) -> u32;

    /// Current local time, if a clock is available
    fn wall_clock(&self) -> Option<WallClock>;

    fn version(&self) -> &str;
}
