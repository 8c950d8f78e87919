//! Scripted report source
//!
//! Replays a queue of reports, each after an optional delay. Used for the
//! demo run without hardware and by tests. Once the script is exhausted
//! the source reports `Disconnected`.
//!
//! A step's deadline is fixed the first time a read waits for it, so a
//! read cancelled by the poller's timeout resumes the same wait.

use std::collections::VecDeque;

use embassy_time::{Duration, Instant, Timer};
use g13_protocol::{ButtonId, ButtonLayout, G13_REPORT_LEN, STICK_CENTER};
use heapless::Vec;

use super::{RawReport, ReportSource, TransportError};

/// Report id of G13 input reports
const REPORT_ID: u8 = 0x01;

/// Byte 7 bit 7 is always set by the device
const STATUS_BYTE: usize = 7;
const STATUS_FLAG: u8 = 0x80;

/// Stick deflection used by the inject helpers
const DEFLECTION: u8 = 100;

/// Hold time between press and release in the inject helpers (ms)
const TAP_MS: u64 = 40;

struct Step {
    delay_ms: u64,
    report: RawReport,
}

pub struct SimulatedSource {
    layout: ButtonLayout,
    script: VecDeque<Step>,
    /// When the front step is due, once a read started waiting for it
    due: Option<Instant>,
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new(ButtonLayout::G13)
    }
}

impl SimulatedSource {
    pub fn new(layout: ButtonLayout) -> Self {
        Self {
            layout,
            script: VecDeque::new(),
            due: None,
        }
    }

    /// A short walk through the menus: open the menu, lower the LED
    /// brightness by two steps, back out and switch to M2
    pub fn demo() -> Self {
        let mut source = Self::default();
        source.idle(500);
        source.stick_press();
        source.stick_down();
        source.stick_down();
        source.stick_press();
        source.stick_down();
        source.stick_press();
        source.stick_left();
        source.stick_left();
        source.stick_press();
        // Let the confirmation toast expire
        source.idle(1_600);
        source.back();
        source.back();
        source.mode(2);
        source.idle(2000);
        source
    }

    /// Reports left in the script
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Take the next scripted report and its delay without waiting
    pub fn next_step(&mut self) -> Option<(u64, RawReport)> {
        self.due = None;
        self.script
            .pop_front()
            .map(|step| (step.delay_ms, step.report))
    }

    /// Queue a raw report
    pub fn push_report(&mut self, report: &[u8], delay_ms: u64) {
        let report = Vec::from_slice(report).unwrap_or_default();
        self.script.push_back(Step { delay_ms, report });
    }

    /// Queue a report with the given buttons held and stick position
    pub fn push_state(&mut self, buttons: &[ButtonId], stick_x: u8, stick_y: u8, delay_ms: u64) {
        let mut report = [0u8; G13_REPORT_LEN];
        report[0] = REPORT_ID;
        report[self.layout.stick_x] = stick_x;
        report[self.layout.stick_y] = stick_y;
        report[STATUS_BYTE] |= STATUS_FLAG;

        for &button in buttons {
            if let Some(location) = self.layout.locate(button) {
                report[location.byte] |= 1 << location.bit;
            }
        }
        self.push_report(&report, delay_ms);
    }

    /// Nothing held, stick centered
    pub fn idle(&mut self, delay_ms: u64) {
        self.push_state(&[], STICK_CENTER, STICK_CENTER, delay_ms);
    }

    /// Press and release one button
    pub fn tap(&mut self, button: ButtonId) {
        self.push_state(&[button], STICK_CENTER, STICK_CENTER, TAP_MS);
        self.idle(TAP_MS);
    }

    fn flick(&mut self, stick_x: u8, stick_y: u8) {
        self.push_state(&[], stick_x, stick_y, TAP_MS);
        self.idle(TAP_MS);
    }

    pub fn stick_up(&mut self) {
        self.flick(STICK_CENTER, STICK_CENTER - DEFLECTION);
    }

    pub fn stick_down(&mut self) {
        self.flick(STICK_CENTER, STICK_CENTER + DEFLECTION);
    }

    pub fn stick_left(&mut self) {
        self.flick(STICK_CENTER - DEFLECTION, STICK_CENTER);
    }

    pub fn stick_right(&mut self) {
        self.flick(STICK_CENTER + DEFLECTION, STICK_CENTER);
    }

    pub fn stick_press(&mut self) {
        self.tap(ButtonId::Stick);
    }

    pub fn back(&mut self) {
        self.tap(ButtonId::Bd);
    }

    /// Tap M1, M2 or M3
    pub fn mode(&mut self, mode: u8) {
        let button = match mode {
            1 => ButtonId::M1,
            2 => ButtonId::M2,
            _ => ButtonId::M3,
        };
        self.tap(button);
    }
}

impl ReportSource for SimulatedSource {
    async fn read(&mut self) -> Result<RawReport, TransportError> {
        let delay_ms = self
            .script
            .front()
            .ok_or(TransportError::Disconnected)?
            .delay_ms;
        let due = *self
            .due
            .get_or_insert_with(|| Instant::now() + Duration::from_millis(delay_ms));
        Timer::at(due).await;

        self.next_step()
            .map(|(_, report)| report)
            .ok_or(TransportError::Disconnected)
    }
}
