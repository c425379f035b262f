//! Tap-dance template (spec §4.7 "TD", SPEC_FULL §10 `TapDance`).

use super::{at_or_past_threshold, dance};
use crate::error::{CoreError, CoreResult};
use crate::host::Host;
use crate::key::KeyCode;
use crate::runtime::{Action, Resolution};

/// Tap emits `tap_key`. Hold below `threshold` taps `hold_key` instead
/// (QMK tap-dance idiom: the hold outcome is itself *tapped*, never
/// registered/held); hold at/after `threshold` taps `tap_key` again, the
/// same repeat-count escape hatch as [`super::ModTap`] and
/// [`super::LayerTap`] (`SMTD_TD5_ON_MKEY`'s `threshold` parameter).
/// `Release` mirrors `Hold`'s threshold branch, unregistering whichever key
/// `Hold` tapped (`SMTD_TD5_ON_MKEY`'s `release_action`: `SMTD_LIMIT(threshold,
/// SMTD_UNREGISTER_16(hold_key), SMTD_UNREGISTER_16(tap_key))`, run
/// unconditionally by `SMTD_DANCE`'s `SMTD_ACTION_RELEASE` case).
#[derive(Debug, Clone, Copy)]
pub struct TapDance {
    tap_key: KeyCode,
    hold_key: KeyCode,
    threshold: u16,
}

impl TapDance {
    /// `threshold` must be at least 1 (every hold dances to `hold_key`).
    pub fn new(tap_key: KeyCode, hold_key: KeyCode, threshold: u16) -> CoreResult<Self> {
        if threshold == 0 {
            return Err(CoreError::InvalidThreshold);
        }
        Ok(Self {
            tap_key,
            hold_key,
            threshold,
        })
    }

    pub fn on_action<H: Host>(
        &self,
        host: &mut H,
        action: Action,
        tap_count: u16,
    ) -> Resolution {
        dance(action, || match action {
            Action::Touch => {}
            Action::Tap => host.tap_code16(self.tap_key),
            Action::Hold => {
                if at_or_past_threshold(tap_count, self.threshold) {
                    host.tap_code16(self.tap_key);
                } else {
                    host.tap_code16(self.hold_key);
                }
            }
            Action::Release => {
                if at_or_past_threshold(tap_count, self.threshold) {
                    host.unregister_code16(self.tap_key);
                } else {
                    host.unregister_code16(self.hold_key);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HostEvent, MockHost};

    #[test]
    fn rejects_zero_threshold() {
        assert_eq!(
            TapDance::new(KeyCode::new(4), KeyCode::new(5), 0).unwrap_err(),
            CoreError::InvalidThreshold
        );
    }

    #[test]
    fn tap_emits_tap_key() {
        let td = TapDance::new(KeyCode::new(4), KeyCode::new(5), 1).unwrap();
        let mut host = MockHost::new();
        let res = td.on_action(&mut host, Action::Tap, 0);
        assert_eq!(res, Resolution::Determined);
        assert_eq!(host.events, alloc::vec![HostEvent::TapCode(KeyCode::new(4))]);
    }

    #[test]
    fn hold_below_threshold_taps_hold_key_not_tap_key() {
        let td = TapDance::new(KeyCode::new(4), KeyCode::new(5), 2).unwrap();
        let mut host = MockHost::new();
        let res = td.on_action(&mut host, Action::Hold, 0);
        assert_eq!(res, Resolution::Determined);
        assert_eq!(host.events, alloc::vec![HostEvent::TapCode(KeyCode::new(5))]);
    }

    #[test]
    fn hold_at_threshold_taps_tap_key_instead() {
        let td = TapDance::new(KeyCode::new(4), KeyCode::new(5), 2).unwrap();
        let mut host = MockHost::new();
        let res = td.on_action(&mut host, Action::Hold, 2);
        assert_eq!(res, Resolution::Determined);
        assert_eq!(host.events, alloc::vec![HostEvent::TapCode(KeyCode::new(4))]);
    }

    #[test]
    fn release_below_threshold_unregisters_hold_key() {
        let td = TapDance::new(KeyCode::new(4), KeyCode::new(5), 2).unwrap();
        let mut host = MockHost::new();
        let res = td.on_action(&mut host, Action::Release, 0);
        assert_eq!(res, Resolution::Determined);
        assert_eq!(
            host.events,
            alloc::vec![HostEvent::UnregisterCode(KeyCode::new(5))]
        );
    }

    #[test]
    fn release_at_threshold_unregisters_tap_key() {
        let td = TapDance::new(KeyCode::new(4), KeyCode::new(5), 2).unwrap();
        let mut host = MockHost::new();
        let res = td.on_action(&mut host, Action::Release, 2);
        assert_eq!(res, Resolution::Determined);
        assert_eq!(
            host.events,
            alloc::vec![HostEvent::UnregisterCode(KeyCode::new(4))]
        );
    }
}
