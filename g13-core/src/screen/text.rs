//! Fixed-capacity text helpers for screen content

use core::fmt::{self, Write};

use heapless::String;

use crate::config::ClockFormat;
use crate::traits::WallClock;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Copy as many whole characters of `text` as fit
pub fn truncate<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Appends whole characters and silently drops the rest once full
struct Truncating<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Format into at most `N` bytes, cutting on a character boundary
pub fn format_truncated<const N: usize>(args: fmt::Arguments<'_>) -> String<N> {
    let mut out = String::new();
    let _ = Truncating(&mut out).write_fmt(args);
    out
}

/// `m:ss` below an hour, `h:mm:ss` above
pub fn format_uptime(seconds: u64) -> String<16> {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{}:{:02}:{:02}", hours, minutes, secs);
    } else {
        let _ = write!(out, "{}:{:02}", minutes, secs);
    }
    out
}

/// Decimal with thousands separators: `1,234,567`
pub fn format_count(value: u32) -> String<16> {
    let mut digits = [0u8; 10];
    let mut len = 0;
    let mut rest = value;
    loop {
        digits[len] = b'0' + (rest % 10) as u8;
        len += 1;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }

    let mut out = String::new();
    for i in (0..len).rev() {
        let _ = out.push(digits[i] as char);
        if i > 0 && i % 3 == 0 {
            let _ = out.push(',');
        }
    }
    out
}

/// Clock text: `14:05:09`, `14:05`, `02:05:09 PM` or `02:05 PM`
pub fn format_clock(clock: &WallClock, format: ClockFormat, show_seconds: bool) -> String<12> {
    let mut out = String::new();
    let hour = match format {
        ClockFormat::H24 => clock.hour,
        ClockFormat::H12 => match clock.hour % 12 {
            0 => 12,
            h => h,
        },
    };

    let _ = write!(out, "{:02}:{:02}", hour, clock.minute);
    if show_seconds {
        let _ = write!(out, ":{:02}", clock.second);
    }
    if format == ClockFormat::H12 {
        let _ = out.push_str(if clock.hour < 12 { " AM" } else { " PM" });
    }
    out
}

/// Date text: `Mon Jan 05`
pub fn format_date(clock: &WallClock) -> String<12> {
    let weekday = WEEKDAYS.get(clock.weekday as usize).copied().unwrap_or("???");
    let month = MONTHS
        .get((clock.month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("???");

    let mut out = String::new();
    let _ = write!(out, "{} {} {:02}", weekday, month, clock.day);
    out
}
