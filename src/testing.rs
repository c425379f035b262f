//! A deterministic in-memory harness for driving a [`crate::TapHoldCore`]
//! without real firmware or a real clock.
//!
//! Always available (not test-gated), so a downstream firmware crate can
//! depend on `tapkey_core` and get the same harness this crate tests
//! itself with — the teacher's `keyrx_core::simulator` module plays the
//! same role for its own runtime.
//!
//! [`MockHost`] owns a virtual millisecond clock and a FIFO of scheduled
//! timers; nothing fires on its own. Call [`MockHost::advance`] to move the
//! clock forward and fire every timer whose deadline has passed, in
//! deadline order, exactly as a real `defer_exec` implementation would.

use alloc::vec::Vec;

use crate::host::{Host, PendingTimer};
use crate::key::{KeyCode, KeyEvent, KeyPosition};
use crate::runtime::{Action, Resolution};

/// A raw event the core asked the host to re-inject, or a side effect a
/// classifier performed through [`Host`]. Recorded in call order so tests
/// can assert on the exact sequence a firmware would observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Raw(KeyEvent),
    Mods(u8),
    RegisterMods(u8),
    UnregisterMods(u8),
    TapCode(KeyCode),
    RegisterCode(KeyCode),
    UnregisterCode(KeyCode),
    MoveToLayer(u8),
    DelayMs(u32),
}

struct ScheduledTimer {
    token: u32,
    deadline_ms: u32,
    payload: PendingTimer,
    cancelled: bool,
}

/// An in-memory [`Host`] with a manually-advanced clock.
///
/// `keymap` is a flat `(row, col) -> keycode` table consulted by
/// `current_keycode`; call [`Self::set_keycode`] to populate it before
/// driving events.
pub struct MockHost {
    now_ms: u32,
    next_token: u32,
    timers: Vec<ScheduledTimer>,
    keymap: Vec<(KeyPosition, KeyCode)>,
    mods: u8,
    highest_layer: u8,
    pub events: Vec<HostEvent>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_token: 0,
            timers: Vec::new(),
            keymap: Vec::new(),
            mods: 0,
            highest_layer: 0,
            events: Vec::new(),
        }
    }

    /// Assigns the keycode `current_keycode` should report for `position`.
    pub fn set_keycode(&mut self, position: KeyPosition, keycode: KeyCode) {
        self.keymap.retain(|(p, _)| *p != position);
        self.keymap.push((position, keycode));
    }

    /// Moves the virtual clock forward by `ms` and fires every timer whose
    /// deadline has now passed, in deadline order — the caller is
    /// responsible for routing each fired payload into
    /// `TapHoldCore::on_timeout` (the mock does not know about the core).
    pub fn advance(&mut self, ms: u32) -> Vec<PendingTimer> {
        self.now_ms = self.now_ms.wrapping_add(ms);
        let now = self.now_ms;
        let mut due: Vec<(u32, PendingTimer)> = self
            .timers
            .iter()
            .filter(|t| !t.cancelled && t.deadline_ms <= now)
            .map(|t| (t.deadline_ms, t.payload))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);
        self.timers.retain(|t| t.cancelled || t.deadline_ms > now);
        due.into_iter().map(|(_, payload)| payload).collect()
    }

    pub fn now(&self) -> u32 {
        self.now_ms
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MockHost {
    type Timer = u32;

    fn current_keycode(&self, position: KeyPosition) -> KeyCode {
        self.keymap
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, kc)| *kc)
            .unwrap_or(KeyCode::new(0))
    }

    fn emit_raw(&mut self, event: KeyEvent) {
        self.events.push(HostEvent::Raw(event));
    }

    fn mods(&self) -> u8 {
        self.mods
    }

    fn set_mods(&mut self, mods: u8) {
        self.mods = mods;
        self.events.push(HostEvent::Mods(mods));
    }

    fn register_mods(&mut self, mods: u8) {
        self.mods |= mods;
        self.events.push(HostEvent::RegisterMods(mods));
    }

    fn unregister_mods(&mut self, mods: u8) {
        self.mods &= !mods;
        self.events.push(HostEvent::UnregisterMods(mods));
    }

    fn tap_code16(&mut self, keycode: KeyCode) {
        self.events.push(HostEvent::TapCode(keycode));
    }

    fn register_code16(&mut self, keycode: KeyCode) {
        self.events.push(HostEvent::RegisterCode(keycode));
    }

    fn unregister_code16(&mut self, keycode: KeyCode) {
        self.events.push(HostEvent::UnregisterCode(keycode));
    }

    fn highest_active_layer(&self) -> u8 {
        self.highest_layer
    }

    fn move_to_layer(&mut self, layer: u8) {
        self.highest_layer = layer;
        self.events.push(HostEvent::MoveToLayer(layer));
    }

    fn defer(&mut self, delay_ms: u32, payload: PendingTimer) -> Self::Timer {
        let token = self.next_token;
        self.next_token = self.next_token.wrapping_add(1);
        self.timers.push(ScheduledTimer {
            token,
            deadline_ms: self.now_ms.wrapping_add(delay_ms),
            payload,
            cancelled: false,
        });
        token
    }

    fn cancel(&mut self, timer: Self::Timer) {
        if let Some(t) = self.timers.iter_mut().find(|t| t.token == timer) {
            t.cancelled = true;
        }
    }

    fn timer_read(&self) -> u32 {
        self.now_ms
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(HostEvent::DelayMs(ms));
    }
}

/// A record of one `on_action` call, in the order the classifier actually
/// saw it (which — thanks to the dispatcher — is always press order, never
/// resolution order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedAction {
    pub keycode: KeyCode,
    pub action: Action,
    pub tap_count: u16,
}

/// A [`crate::Classifier`] that logs every call it receives and returns a
/// fixed [`Resolution`] (configurable per instance), for tests that only
/// care about call order and tap counts, not host side effects.
pub struct RecordingClassifier {
    pub calls: Vec<RecordedAction>,
    resolution: Resolution,
}

impl RecordingClassifier {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            calls: Vec::new(),
            resolution,
        }
    }
}

impl<H: Host> crate::Classifier<H> for RecordingClassifier {
    fn on_action(
        &mut self,
        _host: &mut H,
        keycode: KeyCode,
        action: Action,
        tap_count: u16,
    ) -> Resolution {
        self.calls.push(RecordedAction {
            keycode,
            action,
            tap_count,
        });
        self.resolution
    }
}
