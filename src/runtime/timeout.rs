//! Routes a fired deferred timer back into the state machine (spec §4.2).
//!
//! Each timeout callback re-checks the stage it expects to find the state
//! in before acting: the stage controller cancels timers on every
//! transition, but a host's timer service may race it and deliver a fire
//! for a state that has already moved on (spec §5, "Cancellation /
//! timeout semantics"). A generation mismatch means the slot itself was
//! freed and reused for a different key in the meantime.

use crate::host::{Host, PendingTimer, TimeoutKind};
use crate::runtime::core::TapHoldCore;
use crate::runtime::{Action, Stage};
use crate::Classifier;

impl<H: Host, const N: usize> TapHoldCore<H, N> {
    /// Entry point for a fired [`PendingTimer`] (spec §6, `defer_exec`
    /// callback).
    pub fn on_timeout<C: Classifier<H>>(
        &mut self,
        host: &mut H,
        classifier: &mut C,
        timer: PendingTimer,
    ) {
        if timer.slot as usize >= N {
            return;
        }
        let state = *self.pool.get(timer.slot);
        if state.generation != timer.generation {
            log::debug!(
                "tapkey_core: stale timer fired for slot {} (generation {} != {})",
                timer.slot,
                timer.generation,
                state.generation
            );
            return;
        }

        match timer.kind {
            TimeoutKind::Touch => {
                if state.stage != Stage::Touch {
                    log::debug!("tapkey_core: unreachable timeout_touch in stage {:?}", state.stage);
                    return;
                }
                self.apply_stage(host, classifier, timer.slot, Stage::Hold);
                self.handle_action(host, classifier, timer.slot, Action::Hold);
            }
            TimeoutKind::Sequence => {
                if state.stage != Stage::Sequence {
                    log::debug!("tapkey_core: unreachable timeout_sequence in stage {:?}", state.stage);
                    return;
                }
                if self.aggregate_taps(classifier, state.desired_keycode) {
                    self.handle_action(host, classifier, timer.slot, Action::Tap);
                }
                self.apply_stage(host, classifier, timer.slot, Stage::None);
            }
            TimeoutKind::TouchRelease => {
                if state.stage != Stage::TouchRelease {
                    log::debug!(
                        "tapkey_core: unreachable timeout_touch_release in stage {:?}",
                        state.stage
                    );
                    return;
                }
                self.handle_action(host, classifier, timer.slot, Action::Tap);
                self.apply_stage(host, classifier, timer.slot, Stage::None);
            }
            TimeoutKind::HoldRelease => {
                if state.stage != Stage::HoldRelease {
                    log::debug!(
                        "tapkey_core: unreachable timeout_hold_release in stage {:?}",
                        state.stage
                    );
                    return;
                }
                self.handle_action(host, classifier, timer.slot, Action::Release);
                self.apply_stage(host, classifier, timer.slot, Stage::None);
            }
        }
    }
}
