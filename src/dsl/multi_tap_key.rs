//! Multi-tap-key template (spec §4.7 "TK", SPEC_FULL §10 `MultiTapKey`).

use super::{at_or_past_threshold, dance};
use crate::host::Host;
use crate::key::KeyCode;
use crate::runtime::{Action, Resolution};

/// Emits `tap_key` on `Touch`, but only once the running `tap_count` has
/// reached `threshold` repeats of the same physical key — a "press N times
/// fast to fire" key with no hold behavior at all (`SMTD_TK4_ON_MKEY`).
/// `Tap`, `Hold`, and `Release` are all no-ops: this template never
/// registers anything, so there is nothing to resolve or release.
#[derive(Debug, Clone, Copy)]
pub struct MultiTapKey {
    tap_key: KeyCode,
    threshold: u16,
}

impl MultiTapKey {
    pub const fn new(tap_key: KeyCode, threshold: u16) -> Self {
        Self { tap_key, threshold }
    }

    pub fn on_action<H: Host>(
        &self,
        host: &mut H,
        action: Action,
        tap_count: u16,
    ) -> Resolution {
        dance(action, || {
            if matches!(action, Action::Touch) && at_or_past_threshold(tap_count, self.threshold) {
                host.tap_code16(self.tap_key);
            }
        })
    }
}
