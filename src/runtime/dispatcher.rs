//! The action dispatcher (spec §4.5): gatekeeps the classifier so it sees
//! actions in press order even when a later key resolves before an
//! earlier one, replaying deferred actions once their predecessor commits.

use arrayvec::ArrayVec;

use crate::host::Host;
use crate::key::KeyPosition;
use crate::runtime::core::TapHoldCore;
use crate::runtime::{Action, Resolution};
use crate::Classifier;

/// The actions needed to bring a state from `last` (exclusive) up to and
/// including `required`, in the fixed order `Touch -> {Tap|Hold} -> Release`.
fn needed_actions(last: Option<Action>, required: Action) -> ArrayVec<Action, 3> {
    let full: ArrayVec<Action, 3> = match required {
        Action::Touch => [Action::Touch].into_iter().collect(),
        Action::Tap => [Action::Touch, Action::Tap].into_iter().collect(),
        Action::Hold => [Action::Touch, Action::Hold].into_iter().collect(),
        Action::Release => [Action::Touch, Action::Hold, Action::Release]
            .into_iter()
            .collect(),
    };
    match last {
        None => full,
        Some(l) => full.into_iter().skip_while(|a| *a != l).skip(1).collect(),
    }
}

impl<H: Host, const N: usize> TapHoldCore<H, N> {
    /// True iff every predecessor of the state at stack position `idx` —
    /// excluding those parked in `Stage::Sequence`, which are treated as
    /// already committed — has reached `Resolution::Determined`.
    fn predecessors_determined(&self, idx: u8) -> bool {
        for j in 0..idx {
            let slot = self.stack.get(j);
            let s = self.pool.get(slot);
            if s.stage != crate::runtime::Stage::Sequence && s.resolution != Resolution::Determined
            {
                return false;
            }
        }
        true
    }

    /// Preserves user-observable action ordering across the stack (spec
    /// §4.5). Defers the call if an earlier, still-undetermined state is
    /// ahead of this one; otherwise dispatches immediately and, if this
    /// call is what newly committed the state to `Determined`, replays any
    /// successor waiting on it.
    pub(crate) fn handle_action<C: Classifier<H>>(
        &mut self,
        host: &mut H,
        classifier: &mut C,
        slot: u8,
        action: Action,
    ) {
        let idx = self.pool.get(slot).idx;
        if !self.predecessors_determined(idx) {
            self.pool.get_mut(slot).action_required = Some(action);
            return;
        }

        let res_before = self.pool.get(slot).resolution;
        self.execute_action(host, classifier, slot, action);
        let res_after = self.pool.get(slot).resolution;
        self.note_dispatched(slot, action);

        if res_before != Resolution::Determined && res_after == Resolution::Determined {
            self.replay_successor(host, classifier, idx + 1);
        }
    }

    /// Replays the state immediately after `idx` in the active stack, if it
    /// has a deferred action waiting (spec §4.5 step 3). Recurses through
    /// `handle_action`, so a chain of waiting successors unwinds naturally:
    /// each replayed call runs its own step 3 once it commits.
    fn replay_successor<C: Classifier<H>>(&mut self, host: &mut H, classifier: &mut C, idx: u8) {
        if idx as usize >= self.stack.len() {
            return;
        }
        let slot = self.stack.get(idx);
        let Some(required) = self.pool.get_mut(slot).action_required.take() else {
            return;
        };
        let last_dispatched = self.pool.get(slot).last_dispatched;
        for act in needed_actions(last_dispatched, required) {
            self.handle_action(host, classifier, slot, act);
        }
    }

    /// Calls the classifier and, if it declines, synthesizes the raw key
    /// event in its place (spec §4.5 `execute_action`, §4.6 injector).
    fn execute_action<C: Classifier<H>>(
        &mut self,
        host: &mut H,
        classifier: &mut C,
        slot: u8,
        action: Action,
    ) {
        let keycode = self.resolve_keycode(host, slot);
        let tap_count = self.pool.get(slot).tap_count;

        self.bypass = true;
        let resolution = classifier.on_action(host, keycode, action, tap_count);
        self.bypass = false;
        let delay = self.config.simultaneous_presses_delay_ms();
        if delay > 0 {
            host.delay_ms(delay);
        }

        {
            let s = self.pool.get_mut(slot);
            s.resolution = s.resolution.max(resolution);
        }

        if resolution == Resolution::Unhandled {
            let position = self.pool.get(slot).pressed_key_position;
            match action {
                Action::Touch => {
                    self.emit_raw(host, position, true);
                    self.pool.get_mut(slot).resolution = Resolution::Determined;
                }
                Action::Tap => self.emit_raw(host, position, false),
                Action::Hold => {}
                Action::Release => self.emit_raw(host, position, false),
            }
        }
    }

    /// Synthesizes a raw key event back into the host (spec §4.6). The
    /// only path that re-enters the host's own input pipeline; brackets
    /// the call with the reentrancy guard (invariant I6).
    fn emit_raw(&mut self, host: &mut H, position: KeyPosition, pressed: bool) {
        self.bypass = true;
        host.emit_raw(crate::key::KeyEvent { position, pressed });
        self.bypass = false;
        let delay = self.config.simultaneous_presses_delay_ms();
        if delay > 0 {
            host.delay_ms(delay);
        }
    }
}
