//! Mod-tap template (spec §4.7 "MT", SPEC_FULL §10 `ModTap`).

use super::{at_or_past_threshold, dance};
use crate::error::{CoreError, CoreResult};
use crate::host::Host;
use crate::key::KeyCode;
use crate::runtime::{Action, Resolution};

/// Tap emits `tap_key`; a hold below `threshold` repeats holds `mod_mask`;
/// a hold at or past `threshold` instead registers `tap_key` itself —
/// `SMTD_MT5_ON_MKEY`'s repeat-to-type-through escape hatch.
#[derive(Debug, Clone, Copy)]
pub struct ModTap {
    tap_key: KeyCode,
    mod_mask: u8,
    threshold: u16,
}

impl ModTap {
    /// `threshold` must be at least 1 (every hold is a modifier).
    pub fn new(tap_key: KeyCode, mod_mask: u8, threshold: u16) -> CoreResult<Self> {
        if threshold == 0 {
            return Err(CoreError::InvalidThreshold);
        }
        Ok(Self {
            tap_key,
            mod_mask,
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
                    host.register_code16(self.tap_key);
                } else {
                    host.register_mods(self.mod_mask);
                }
            }
            Action::Release => {
                if at_or_past_threshold(tap_count, self.threshold) {
                    host.unregister_code16(self.tap_key);
                } else {
                    host.unregister_mods(self.mod_mask);
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
            ModTap::new(KeyCode::new(4), 0x01, 0).unwrap_err(),
            CoreError::InvalidThreshold
        );
    }

    #[test]
    fn tap_emits_tap_key() {
        let mt = ModTap::new(KeyCode::new(4), 0x01, 1).unwrap();
        let mut host = MockHost::new();
        let res = mt.on_action(&mut host, Action::Tap, 0);
        assert_eq!(res, Resolution::Determined);
        assert_eq!(host.events, alloc::vec![HostEvent::TapCode(KeyCode::new(4))]);
    }

    #[test]
    fn hold_below_threshold_holds_modifier() {
        let mt = ModTap::new(KeyCode::new(4), 0x01, 2).unwrap();
        let mut host = MockHost::new();
        let res = mt.on_action(&mut host, Action::Hold, 0);
        assert_eq!(res, Resolution::Determined);
        assert_eq!(host.events, alloc::vec![HostEvent::RegisterMods(0x01)]);
    }

    #[test]
    fn hold_at_threshold_registers_tap_key_instead() {
        let mt = ModTap::new(KeyCode::new(4), 0x01, 2).unwrap();
        let mut host = MockHost::new();
        let res = mt.on_action(&mut host, Action::Hold, 2);
        assert_eq!(res, Resolution::Determined);
        assert_eq!(
            host.events,
            alloc::vec![HostEvent::RegisterCode(KeyCode::new(4))]
        );
    }

    #[test]
    fn touch_is_uncertain_and_has_no_side_effects() {
        let mt = ModTap::new(KeyCode::new(4), 0x01, 1).unwrap();
        let mut host = MockHost::new();
        let res = mt.on_action(&mut host, Action::Touch, 0);
        assert_eq!(res, Resolution::Uncertain);
        assert!(host.events.is_empty());
    }
}
