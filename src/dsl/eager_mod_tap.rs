//! Eager mod-tap template (spec §4.7 "MTE", SPEC_FULL §10 `EagerModTap`).

use super::{at_or_past_threshold, dance};
use crate::error::{CoreError, CoreResult};
use crate::host::Host;
use crate::key::KeyCode;
use crate::runtime::{Action, Resolution};

/// Like [`super::ModTap`], but optimistically holds `mod_mask` from
/// `Touch` onward instead of waiting for `Hold` — lower latency for
/// mod-chords, at the cost of a brief false modifier press that gets
/// undone if the key turns out to be a tap (`SMTD_MTE5_ON_MKEY`).
///
/// No extra state is needed to "undo" the eager hold on a fast tap: `Tap`
/// is only ever delivered after `Touch` (invariant I4), so by the time
/// `Tap` fires, the mod is known to already be held.
#[derive(Debug, Clone, Copy)]
pub struct EagerModTap {
    tap_key: KeyCode,
    mod_mask: u8,
    threshold: u16,
}

impl EagerModTap {
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
            Action::Touch => host.register_mods(self.mod_mask),
            Action::Tap => {
                host.unregister_mods(self.mod_mask);
                host.tap_code16(self.tap_key);
            }
            Action::Hold => {
                if at_or_past_threshold(tap_count, self.threshold) {
                    host.unregister_mods(self.mod_mask);
                    host.register_code16(self.tap_key);
                }
                // else: the mod registered on Touch is already the
                // intended hold behavior — nothing more to do.
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
    fn touch_eagerly_holds_the_modifier() {
        let mte = EagerModTap::new(KeyCode::new(4), 0x01, 1).unwrap();
        let mut host = MockHost::new();
        let res = mte.on_action(&mut host, Action::Touch, 0);
        assert_eq!(res, Resolution::Uncertain);
        assert_eq!(host.events, alloc::vec![HostEvent::RegisterMods(0x01)]);
    }

    #[test]
    fn tap_undoes_the_eager_modifier_then_taps() {
        let mte = EagerModTap::new(KeyCode::new(4), 0x01, 1).unwrap();
        let mut host = MockHost::new();
        let _ = mte.on_action(&mut host, Action::Touch, 0);
        host.events.clear();
        let res = mte.on_action(&mut host, Action::Tap, 0);
        assert_eq!(res, Resolution::Determined);
        assert_eq!(
            host.events,
            alloc::vec![HostEvent::UnregisterMods(0x01), HostEvent::TapCode(KeyCode::new(4))]
        );
    }

    #[test]
    fn hold_at_threshold_swaps_modifier_for_tap_key() {
        let mte = EagerModTap::new(KeyCode::new(4), 0x01, 2).unwrap();
        let mut host = MockHost::new();
        let res = mte.on_action(&mut host, Action::Hold, 2);
        assert_eq!(res, Resolution::Determined);
        assert_eq!(
            host.events,
            alloc::vec![
                HostEvent::UnregisterMods(0x01),
                HostEvent::RegisterCode(KeyCode::new(4))
            ]
        );
    }
}
