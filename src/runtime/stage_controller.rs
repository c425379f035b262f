//! The stage controller: the sole owner of timer tokens and active-stack
//! membership (spec §4.1). Nothing outside `apply_stage` schedules or
//! cancels a timer, and nothing outside it pushes to or removes from the
//! active stack.

use crate::config::Timeout;
use crate::host::{Host, PendingTimer, TimeoutKind};
use crate::runtime::core::TapHoldCore;
use crate::runtime::{Action, Resolution, Stage};
use crate::Classifier;

impl<H: Host, const N: usize> TapHoldCore<H, N> {
    /// Resolves `slot`'s `desired_keycode` from the host's keymap if it is
    /// still the unresolved sentinel, and returns it. Called as early as
    /// `Stage::Touch` so every later classifier-facing lookup (timeout and
    /// feature overrides, `on_action` itself) sees a real keycode, never
    /// the zero sentinel (invariant B3).
    pub(crate) fn resolve_keycode(&mut self, host: &H, slot: u8) -> crate::key::KeyCode {
        let current = self.pool.get(slot).desired_keycode;
        if current.value() != 0 {
            return current;
        }
        let position = self.pool.get(slot).pressed_key_position;
        let resolved = host.current_keycode(position);
        self.pool.get_mut(slot).desired_keycode = resolved;
        resolved
    }

    pub(crate) fn effective_timeout<C: Classifier<H>>(
        &self,
        classifier: &C,
        keycode: crate::key::KeyCode,
        which: Timeout,
    ) -> u32 {
        classifier
            .timeout_override(keycode, which)
            .unwrap_or_else(|| self.config.get(which))
    }

    pub(crate) fn aggregate_taps<C: Classifier<H>>(
        &self,
        classifier: &C,
        keycode: crate::key::KeyCode,
    ) -> bool {
        classifier
            .feature_override(keycode, crate::config::Feature::AggregateTaps)
            .unwrap_or(self.config.aggregate_taps())
    }

    /// Applies a stage transition to `slot` (spec §4.1's effects table).
    /// Schedules the new timer before cancelling the old one, since some
    /// timer services run cancellation synchronously and could otherwise
    /// race a timer that fires between the two calls.
    pub(crate) fn apply_stage<C: Classifier<H>>(
        &mut self,
        host: &mut H,
        classifier: &mut C,
        slot: u8,
        next: Stage,
    ) {
        let now = host.timer_read();
        match next {
            Stage::None => {
                let idx = self.pool.get(slot).idx;
                let old_timer = self.pool.get(slot).timer;
                self.stack.remove(idx);
                let len = self.stack.len();
                for k in (idx as usize)..len {
                    let moved_slot = self.stack.get(k as u8);
                    self.pool.get_mut(moved_slot).idx = k as u8;
                }
                if let Some(t) = old_timer {
                    host.cancel(t);
                }
                self.pool.free(slot);
            }
            Stage::Touch => {
                let keycode = self.resolve_keycode(host, slot);
                let ms = self.effective_timeout(classifier, keycode, Timeout::Tap);
                let generation = self.pool.get(slot).generation;
                let payload = PendingTimer {
                    slot,
                    generation,
                    kind: TimeoutKind::Touch,
                };
                let new_timer = host.defer(ms, payload);
                let old_timer = self.pool.get(slot).timer;
                {
                    let s = self.pool.get_mut(slot);
                    s.stage = Stage::Touch;
                    s.pressed_time = now;
                    s.timer = Some(new_timer);
                }
                if let Some(t) = old_timer {
                    host.cancel(t);
                }
            }
            Stage::Sequence => {
                let keycode = self.pool.get(slot).desired_keycode;
                let ms = self.effective_timeout(classifier, keycode, Timeout::Sequence);
                let generation = self.pool.get(slot).generation;
                let payload = PendingTimer {
                    slot,
                    generation,
                    kind: TimeoutKind::Sequence,
                };
                let new_timer = host.defer(ms, payload);
                let old_timer = self.pool.get(slot).timer;
                {
                    let s = self.pool.get_mut(slot);
                    s.stage = Stage::Sequence;
                    s.released_time = now;
                    // Unconditional reset, not a monotonic `.max()` — entering a new
                    // sequence round re-opens classification even if the prior tap
                    // already reached `Determined` (spec §4.1's documented exception
                    // to invariant I5's otherwise-monotonic resolution).
                    s.resolution = Resolution::Uncertain;
                    s.timer = Some(new_timer);
                }
                if let Some(t) = old_timer {
                    host.cancel(t);
                }
            }
            Stage::Hold => {
                let old_timer = self.pool.get(slot).timer;
                {
                    let s = self.pool.get_mut(slot);
                    s.stage = Stage::Hold;
                    s.timer = None;
                }
                if let Some(t) = old_timer {
                    host.cancel(t);
                }
            }
            Stage::TouchRelease => {
                let keycode = self.pool.get(slot).desired_keycode;
                let ms = self.effective_timeout(classifier, keycode, Timeout::Release);
                let generation = self.pool.get(slot).generation;
                let payload = PendingTimer {
                    slot,
                    generation,
                    kind: TimeoutKind::TouchRelease,
                };
                let new_timer = host.defer(ms, payload);
                let old_timer = self.pool.get(slot).timer;
                {
                    let s = self.pool.get_mut(slot);
                    s.stage = Stage::TouchRelease;
                    s.released_time = now;
                    s.timer = Some(new_timer);
                }
                if let Some(t) = old_timer {
                    host.cancel(t);
                }
            }
            Stage::HoldRelease => {
                let keycode = self.pool.get(slot).desired_keycode;
                let ms = self.effective_timeout(classifier, keycode, Timeout::Release);
                let generation = self.pool.get(slot).generation;
                let payload = PendingTimer {
                    slot,
                    generation,
                    kind: TimeoutKind::HoldRelease,
                };
                let new_timer = host.defer(ms, payload);
                let old_timer = self.pool.get(slot).timer;
                {
                    let s = self.pool.get_mut(slot);
                    s.stage = Stage::HoldRelease;
                    s.released_time = now;
                    s.timer = Some(new_timer);
                }
                if let Some(t) = old_timer {
                    host.cancel(t);
                }
            }
        }
        #[cfg(debug_assertions)]
        log::trace!("tapkey_core: slot {} -> {:?}", slot, next);
    }

    /// Marks `action` as having been fully delivered to the classifier for
    /// `slot`, updating bookkeeping used by the dispatcher's replay logic.
    pub(crate) fn note_dispatched(&mut self, slot: u8, action: Action) {
        self.pool.get_mut(slot).last_dispatched = Some(action);
    }
}
