//! Report polling
//!
//! One [`InputPoller`] owns the report source, the navigator and the G-key
//! mapper. Each poll reads at most one report (bounded by the read
//! timeout), turns it into key actions and navigation events and then
//! checks for a due stick repeat, so held directions keep repeating while
//! the device is quiet.

use core::fmt;
use core::sync::atomic::Ordering;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{with_timeout, Duration};
use log::{trace, warn};

use g13_core::config::InputConfig;
use g13_core::keymap::{KeyAction, KeyMapper, Keymap};
use g13_core::{NavigationEvent, Navigator};
use g13_protocol::{ButtonLayout, ReportError};

use crate::channels::KEY_COUNT;
use crate::keys::{KeyOutput, LogKeys};
use crate::tasks::now_ms;
use crate::transport::{ReportSource, TransportError};

/// Event consumer rejected an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    CallbackFailure,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::CallbackFailure => write!(f, "event consumer rejected event"),
        }
    }
}

impl std::error::Error for SinkError {}

/// Destination of navigation events
pub trait EventSink {
    fn deliver(&mut self, event: NavigationEvent) -> Result<(), SinkError>;
}

/// Forwards events into a channel without waiting
pub struct ChannelSink<'a, const N: usize> {
    channel: &'a Channel<CriticalSectionRawMutex, NavigationEvent, N>,
}

impl<'a, const N: usize> ChannelSink<'a, N> {
    pub fn new(channel: &'a Channel<CriticalSectionRawMutex, NavigationEvent, N>) -> Self {
        Self { channel }
    }
}

impl<const N: usize> EventSink for ChannelSink<'_, N> {
    fn deliver(&mut self, event: NavigationEvent) -> Result<(), SinkError> {
        self.channel
            .try_send(event)
            .map_err(|_| SinkError::CallbackFailure)
    }
}

pub struct InputPoller<S> {
    source: S,
    layout: ButtonLayout,
    navigator: Navigator,
    keys: KeyMapper,
    output: Box<dyn KeyOutput>,
    read_timeout: Duration,
}

impl<S: ReportSource> InputPoller<S> {
    /// No G-key bound; key actions go to [`LogKeys`]
    pub fn new(source: S, layout: ButtonLayout, config: InputConfig, read_timeout: Duration) -> Self {
        Self {
            source,
            layout,
            navigator: Navigator::new(config),
            keys: KeyMapper::default(),
            output: Box::new(LogKeys::new()),
            read_timeout,
        }
    }

    pub fn with_key_output(mut self, output: Box<dyn KeyOutput>) -> Self {
        self.output = output;
        self
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn set_threshold(&mut self, threshold: u8) {
        self.navigator.set_threshold(threshold);
    }

    pub fn keymap(&self) -> &Keymap {
        self.keys.keymap()
    }

    /// Switch G-key bindings; keys held under the old ones are released
    pub fn set_keymap(&mut self, keymap: Keymap) {
        let released = self.keys.set_keymap(keymap);
        self.emit_keys(&released);
    }

    /// Forget button and stick state, e.g. after the device went away
    ///
    /// Keys still down are released.
    pub fn reset(&mut self) {
        self.navigator.reset();
        let released = self.keys.release_all();
        self.emit_keys(&released);
    }

    /// Ask the source to start over after `Disconnected`
    pub async fn reopen(&mut self) -> Result<(), TransportError> {
        self.source.reopen().await
    }

    fn emit_keys(&mut self, actions: &[KeyAction]) {
        if actions.is_empty() {
            return;
        }
        if let Err(e) = self.output.emit(actions) {
            warn!("Dropping {} key actions: {}", actions.len(), e);
        }
    }

    /// Decode one report and deliver its events
    ///
    /// Key actions for bound G-keys go out first. Returns the number of
    /// navigation events delivered. A rejected event is logged and does not
    /// stop delivery of the rest.
    pub fn handle_report<K: EventSink + ?Sized>(
        &mut self,
        raw: &[u8],
        now_ms: u64,
        sink: &mut K,
    ) -> Result<usize, ReportError> {
        let state = self.layout.decode(raw)?;

        let actions = self.keys.process(&state.pressed);
        self.emit_keys(&actions);

        let events = self.navigator.process(&state, now_ms);

        let mut delivered = 0;
        for event in events {
            if deliver(sink, event) {
                delivered += 1;
            }
        }
        Ok(delivered)
    }

    /// Deliver a stick repeat if one is due
    pub fn handle_repeat<K: EventSink + ?Sized>(&mut self, now_ms: u64, sink: &mut K) -> bool {
        match self.navigator.poll_repeat(now_ms) {
            Some(event) => deliver(sink, event),
            None => false,
        }
    }

    /// One read attempt followed by the repeat check
    ///
    /// `Ok` means a report arrived; malformed ones are logged and skipped.
    /// A quiet device gives `Err(Timeout)`. Errors are returned after the
    /// repeat check ran, so a held direction keeps repeating either way.
    pub async fn poll_once<K: EventSink + ?Sized>(
        &mut self,
        sink: &mut K,
    ) -> Result<usize, TransportError> {
        let result = match with_timeout(self.read_timeout, self.source.read()).await {
            Ok(Ok(report)) => {
                KEY_COUNT.fetch_add(1, Ordering::Relaxed);
                match self.handle_report(&report, now_ms(), sink) {
                    Ok(delivered) => Ok(delivered),
                    Err(e) => {
                        warn!("Skipping report: {:?}", e);
                        Ok(0)
                    }
                }
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                trace!("No report within {} ms", self.read_timeout.as_millis());
                Err(TransportError::Timeout)
            }
        };

        let repeated = self.handle_repeat(now_ms(), sink);
        result.map(|delivered| delivered + usize::from(repeated))
    }
}

fn deliver<K: EventSink + ?Sized>(sink: &mut K, event: NavigationEvent) -> bool {
    match sink.deliver(event) {
        Ok(()) => {
            trace!("Event: {}", event.name());
            true
        }
        Err(e) => {
            warn!("Dropping {}: {}", event.name(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::SimulatedSource;
    use embassy_futures::block_on;
    use g13_core::KeyCode;
    use g13_protocol::{ButtonId, STICK_CENTER};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shares what it receives with the test
    #[derive(Clone, Default)]
    struct RecordingKeys(Rc<RefCell<Vec<KeyAction>>>);

    impl KeyOutput for RecordingKeys {
        fn emit(&mut self, actions: &[KeyAction]) -> Result<(), SinkError> {
            self.0.borrow_mut().extend_from_slice(actions);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<NavigationEvent>,
        /// Reject everything after this many events
        capacity: Option<usize>,
    }

    impl EventSink for RecordingSink {
        fn deliver(&mut self, event: NavigationEvent) -> Result<(), SinkError> {
            if self.capacity.is_some_and(|cap| self.events.len() >= cap) {
                return Err(SinkError::CallbackFailure);
            }
            self.events.push(event);
            Ok(())
        }
    }

    fn poller(source: SimulatedSource) -> InputPoller<SimulatedSource> {
        InputPoller::new(
            source,
            ButtonLayout::G13,
            InputConfig::default(),
            Duration::from_millis(100),
        )
    }

    fn report(buttons: &[ButtonId], stick_y: u8) -> [u8; 8] {
        let mut raw = [0x01, STICK_CENTER, stick_y, 0, 0, 0, 0, 0x80];
        for &button in buttons {
            let location = ButtonLayout::G13.locate(button).unwrap();
            raw[location.byte] |= 1 << location.bit;
        }
        raw
    }

    #[test]
    fn test_press_emits_once() {
        let mut poller = poller(SimulatedSource::default());
        let mut sink = RecordingSink::default();

        let pressed = report(&[ButtonId::Bd], STICK_CENTER);
        assert_eq!(poller.handle_report(&pressed, 0, &mut sink), Ok(1));
        assert_eq!(poller.handle_report(&pressed, 10, &mut sink), Ok(0));
        let released = report(&[], STICK_CENTER);
        assert_eq!(poller.handle_report(&released, 20, &mut sink), Ok(0));

        assert_eq!(sink.events, vec![NavigationEvent::ButtonBd]);
    }

    #[test]
    fn test_g_keys_are_not_navigation() {
        let mut poller = poller(SimulatedSource::default());
        let mut sink = RecordingSink::default();

        let raw = report(&[ButtonId::G1, ButtonId::G22], STICK_CENTER);
        assert_eq!(poller.handle_report(&raw, 0, &mut sink), Ok(0));
        assert!(sink.events.is_empty());
    }

    #[test]
    fn test_malformed_report() {
        let mut poller = poller(SimulatedSource::default());
        let mut sink = RecordingSink::default();

        let result = poller.handle_report(&[0x01, 128], 0, &mut sink);
        assert_eq!(result, Err(ReportError::Malformed { len: 2, required: 8 }));
    }

    #[test]
    fn test_rejected_event_does_not_stop_delivery() {
        let mut poller = poller(SimulatedSource::default());
        let mut sink = RecordingSink {
            capacity: Some(1),
            ..Default::default()
        };

        // Up plus two buttons in one report; only the first fits
        let raw = report(&[ButtonId::Stick, ButtonId::M1], 20);
        assert_eq!(poller.handle_report(&raw, 0, &mut sink), Ok(1));
        assert_eq!(sink.events, vec![NavigationEvent::StickUp]);
    }

    #[test]
    fn test_repeat_while_held() {
        let mut poller = poller(SimulatedSource::default());
        let mut sink = RecordingSink::default();

        poller.handle_report(&report(&[], 250), 0, &mut sink).unwrap();
        assert!(!poller.handle_repeat(399, &mut sink));
        assert!(poller.handle_repeat(400, &mut sink));
        assert!(!poller.handle_repeat(500, &mut sink));
        assert!(poller.handle_repeat(550, &mut sink));

        poller
            .handle_report(&report(&[], STICK_CENTER), 600, &mut sink)
            .unwrap();
        assert!(!poller.handle_repeat(1000, &mut sink));

        assert_eq!(
            sink.events,
            vec![
                NavigationEvent::StickDown,
                NavigationEvent::StickDown,
                NavigationEvent::StickDown
            ]
        );
    }

    #[test]
    fn test_set_threshold() {
        let mut poller = poller(SimulatedSource::default());
        let mut sink = RecordingSink::default();

        // 40 below center is inside the default dead zone
        let raw = report(&[], STICK_CENTER - 40);
        poller.handle_report(&raw, 0, &mut sink).unwrap();
        assert!(sink.events.is_empty());

        poller.set_threshold(30);
        assert_eq!(poller.navigator().config().threshold, 30);
        poller.handle_report(&raw, 10, &mut sink).unwrap();
        assert_eq!(sink.events, vec![NavigationEvent::StickUp]);
    }

    #[test]
    fn test_poll_once_reads_script() {
        let mut source = SimulatedSource::default();
        source.push_report(&report(&[ButtonId::Stick], STICK_CENTER), 0);
        source.push_report(&[0x01], 0);
        let mut poller = poller(source);
        let mut sink = RecordingSink::default();

        let before = KEY_COUNT.load(Ordering::Relaxed);
        assert_eq!(block_on(poller.poll_once(&mut sink)), Ok(1));
        // Malformed report is skipped, not an error
        assert_eq!(block_on(poller.poll_once(&mut sink)), Ok(0));
        assert_eq!(
            block_on(poller.poll_once(&mut sink)),
            Err(TransportError::Disconnected)
        );

        assert!(KEY_COUNT.load(Ordering::Relaxed) >= before + 2);
        assert_eq!(sink.events, vec![NavigationEvent::StickPress]);
    }

    #[test]
    fn test_step_later_than_read_timeout_is_kept() {
        let mut source = SimulatedSource::default();
        source.push_report(&report(&[ButtonId::Stick], STICK_CENTER), 150);
        let mut poller = poller(source);
        let mut sink = RecordingSink::default();

        assert_eq!(
            block_on(poller.poll_once(&mut sink)),
            Err(TransportError::Timeout)
        );
        assert!(sink.events.is_empty());

        assert_eq!(block_on(poller.poll_once(&mut sink)), Ok(1));
        assert_eq!(sink.events, vec![NavigationEvent::StickPress]);
    }

    #[test]
    fn test_bound_g_key_emits_key_actions() {
        let keys = RecordingKeys::default();
        let mut poller = poller(SimulatedSource::default()).with_key_output(Box::new(keys.clone()));
        let ctrl = KeyCode::from_name("KEY_LEFTCTRL").unwrap();
        let b = KeyCode::from_name("KEY_B").unwrap();
        let mut keymap = Keymap::new();
        keymap.bind(ButtonId::G5, &[ctrl, b]).unwrap();
        poller.set_keymap(keymap);
        let mut sink = RecordingSink::default();

        poller
            .handle_report(&report(&[ButtonId::G5], STICK_CENTER), 0, &mut sink)
            .unwrap();
        poller
            .handle_report(&report(&[], STICK_CENTER), 10, &mut sink)
            .unwrap();

        assert!(sink.events.is_empty());
        assert_eq!(
            keys.0.borrow().as_slice(),
            &[
                KeyAction::press(ctrl),
                KeyAction::press(b),
                KeyAction::release(b),
                KeyAction::release(ctrl)
            ]
        );
    }

    #[test]
    fn test_reset_releases_held_keys() {
        let keys = RecordingKeys::default();
        let mut poller = poller(SimulatedSource::default()).with_key_output(Box::new(keys.clone()));
        let one = KeyCode::from_name("KEY_1").unwrap();
        let mut keymap = Keymap::new();
        keymap.bind(ButtonId::G1, &[one]).unwrap();
        poller.set_keymap(keymap);
        let mut sink = RecordingSink::default();

        poller
            .handle_report(&report(&[ButtonId::G1], STICK_CENTER), 0, &mut sink)
            .unwrap();
        poller.reset();

        assert_eq!(
            keys.0.borrow().as_slice(),
            &[KeyAction::press(one), KeyAction::release(one)]
        );
    }

    #[test]
    fn test_channel_sink_full() {
        let channel: Channel<CriticalSectionRawMutex, NavigationEvent, 1> = Channel::new();
        let mut sink = ChannelSink::new(&channel);

        assert_eq!(sink.deliver(NavigationEvent::StickUp), Ok(()));
        assert_eq!(
            sink.deliver(NavigationEvent::StickDown),
            Err(SinkError::CallbackFailure)
        );
        assert_eq!(channel.try_receive(), Ok(NavigationEvent::StickUp));
    }
}
