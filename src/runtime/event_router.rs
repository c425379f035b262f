//! The event router (spec §4.3-4.4): `apply_to_stack` walks the active
//! stack driving each state's transition, `apply_event` is the per-state
//! transition table, and `create_state` installs a new state for an
//! unmatched press.

use crate::host::Host;
use crate::key::{KeyCode, KeyEvent, KeyPosition};
use crate::runtime::core::TapHoldCore;
use crate::runtime::{Action, Resolution, Stage};
use crate::Classifier;

impl<H: Host, const N: usize> TapHoldCore<H, N> {
    /// True iff some state *later* in the active stack than `from_idx` is
    /// pinned to `key` (spec's "following key" — distinguishes a younger
    /// key's own release from some unrelated, older key's release).
    pub(crate) fn is_following_key(&self, from_idx: u8, key: KeyPosition) -> bool {
        let len = self.stack.len();
        for k in (from_idx as usize + 1)..len {
            let slot = self.stack.get(k as u8);
            if self.pool.get(slot).pressed_key_position == key {
                return true;
            }
        }
        false
    }

    /// Walks the active stack from `start`, driving every state's
    /// transition for `event`, then runs the tail cleanup pass, then
    /// creates a new state if nothing on the stack claimed the event
    /// (spec §4.3).
    pub(crate) fn apply_to_stack<C: Classifier<H>>(
        &mut self,
        host: &mut H,
        classifier: &mut C,
        start: usize,
        kc: KeyCode,
        ev: KeyEvent,
        desired: KeyCode,
    ) {
        let mut matched = false;
        let mut i = start;
        while i < self.stack.len() {
            let slot = self.stack.get(i as u8);
            let state = *self.pool.get(slot);
            let is_state_key = ev.position == state.pressed_key_position
                && (kc == state.pressed_keycode || kc == state.desired_keycode);
            if is_state_key {
                matched = true;
            }
            let removed = self.apply_event(host, classifier, slot, is_state_key, kc, ev);
            if !removed {
                i += 1;
            }
        }

        self.cleanup(host, classifier);

        if !matched && ev.pressed {
            self.create_state(host, classifier, kc, ev, desired);
        }
    }

    /// Top-down tail finalization: while the top of the stack is
    /// `TouchRelease` or `HoldRelease`, finalize it. A tail in `Sequence`
    /// is kept and stops the scan (spec §4.3 step 2).
    fn cleanup<C: Classifier<H>>(&mut self, host: &mut H, classifier: &mut C) {
        loop {
            let len = self.stack.len();
            if len == 0 {
                break;
            }
            let slot = self.stack.get((len - 1) as u8);
            match self.pool.get(slot).stage {
                Stage::TouchRelease => {
                    self.handle_action(host, classifier, slot, Action::Tap);
                    self.apply_stage(host, classifier, slot, Stage::None);
                }
                Stage::HoldRelease => {
                    self.handle_action(host, classifier, slot, Action::Release);
                    self.apply_stage(host, classifier, slot, Stage::None);
                }
                _ => break,
            }
        }
    }

    /// Installs a new state for a press that matched nothing on the stack
    /// (spec §4.3, `create_state`).
    fn create_state<C: Classifier<H>>(
        &mut self,
        host: &mut H,
        classifier: &mut C,
        kc: KeyCode,
        ev: KeyEvent,
        desired: KeyCode,
    ) {
        let Some(slot) = self.pool.find_free() else {
            log::warn!(
                "tapkey_core: state pool exhausted, dropping press at {:?}",
                ev.position
            );
            return;
        };
        let stack_idx = self.stack.len() as u8;
        {
            let s = self.pool.get_mut(slot);
            s.pressed_key_position = ev.position;
            s.pressed_keycode = kc;
            s.desired_keycode = if desired.value() != 0 {
                desired
            } else {
                KeyCode::new(0)
            };
            s.idx = stack_idx;
        }
        self.stack.push(slot);
        self.apply_event(host, classifier, slot, true, kc, ev);
    }

    /// The per-state transition table (spec §4.4). Returns `true` iff the
    /// state transitioned to `Stage::None` (and the stack was compacted),
    /// telling the caller not to advance its walk index.
    pub(crate) fn apply_event<C: Classifier<H>>(
        &mut self,
        host: &mut H,
        classifier: &mut C,
        slot: u8,
        sk: bool,
        _kc: KeyCode,
        ev: KeyEvent,
    ) -> bool {
        let state = *self.pool.get(slot);
        let idx = state.idx;
        let last = idx as usize == self.stack.len() - 1;
        let pressed = ev.pressed;

        match state.stage {
            Stage::None => {
                if sk && pressed {
                    self.apply_stage(host, classifier, slot, Stage::Touch);
                    self.handle_action(host, classifier, slot, Action::Touch);
                }
                false
            }

            Stage::Touch => {
                if last && sk && !pressed {
                    if !self.aggregate_taps(classifier, state.desired_keycode) {
                        self.handle_action(host, classifier, slot, Action::Tap);
                    }
                    self.apply_stage(host, classifier, slot, Stage::Sequence);
                    false
                } else if !last && sk && !pressed {
                    self.apply_stage(host, classifier, slot, Stage::TouchRelease);
                    false
                } else if !sk && !pressed && self.is_following_key(idx, ev.position) {
                    self.apply_stage(host, classifier, slot, Stage::Hold);
                    self.handle_action(host, classifier, slot, Action::Hold);
                    false
                } else {
                    false
                }
            }

            Stage::Sequence => {
                if sk && pressed {
                    self.pool.get_mut(slot).tap_count = state.tap_count.saturating_add(1);
                    self.handle_action(host, classifier, slot, Action::Touch);
                    self.apply_stage(host, classifier, slot, Stage::Touch);
                    false
                } else if !sk && pressed {
                    self.pool.get_mut(slot).resolution = Resolution::Determined;
                    if self.aggregate_taps(classifier, state.desired_keycode) {
                        self.handle_action(host, classifier, slot, Action::Tap);
                    }
                    self.apply_stage(host, classifier, slot, Stage::None);
                    true
                } else {
                    false
                }
            }

            Stage::Hold => {
                if last && sk && !pressed {
                    self.handle_action(host, classifier, slot, Action::Release);
                    self.apply_stage(host, classifier, slot, Stage::None);
                    true
                } else if !last && sk && !pressed {
                    self.apply_stage(host, classifier, slot, Stage::HoldRelease);
                    false
                } else {
                    false
                }
            }

            Stage::TouchRelease => {
                let timeout_ms = self.effective_timeout(
                    classifier,
                    state.desired_keycode,
                    crate::config::Timeout::Release,
                );
                let elapsed_past_timeout = host.timer_elapsed(state.released_time) >= timeout_ms;
                if pressed {
                    self.handle_action(host, classifier, slot, Action::Tap);
                    self.apply_stage(host, classifier, slot, Stage::None);
                    true
                } else if elapsed_past_timeout {
                    self.handle_action(host, classifier, slot, Action::Tap);
                    self.apply_stage(host, classifier, slot, Stage::None);
                    true
                } else if self.is_following_key(idx, ev.position) {
                    self.apply_stage(host, classifier, slot, Stage::HoldRelease);
                    self.handle_action(host, classifier, slot, Action::Hold);
                    false
                } else {
                    false
                }
            }

            Stage::HoldRelease => {
                if !pressed && last {
                    self.handle_action(host, classifier, slot, Action::Release);
                    self.apply_stage(host, classifier, slot, Stage::None);
                    true
                } else {
                    false
                }
            }
        }
    }
}
