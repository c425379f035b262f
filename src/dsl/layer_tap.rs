//! Layer-tap template (spec §4.7 "LT", SPEC_FULL §10 `LayerTap`).

use super::{at_or_past_threshold, dance, LayerStack};
use crate::error::{CoreError, CoreResult};
use crate::host::Host;
use crate::key::KeyCode;
use crate::runtime::{Action, Resolution};

/// Tap emits `tap_key`; hold below `threshold` pushes `layer` onto the
/// shared [`LayerStack`] and restores the prior layer on release, once
/// every concurrently-held layer-tap key sharing that stack has released.
/// A hold at/after `threshold` instead registers `tap_key` itself, the
/// same tap-dance-style repeat escape hatch as [`super::ModTap`]
/// (`SMTD_LT_ON_MKEY`'s `threshold` parameter).
#[derive(Debug, Clone, Copy)]
pub struct LayerTap {
    tap_key: KeyCode,
    layer: u8,
    threshold: u16,
}

impl LayerTap {
    /// `threshold` must be at least 1 (every hold pushes the layer).
    pub fn new(tap_key: KeyCode, layer: u8, threshold: u16) -> CoreResult<Self> {
        if threshold == 0 {
            return Err(CoreError::InvalidThreshold);
        }
        Ok(Self {
            tap_key,
            layer,
            threshold,
        })
    }

    /// `stack` must be the same [`LayerStack`] instance shared by every
    /// `LayerTap` key that should restore to a common base layer.
    pub fn on_action<H: Host>(
        &self,
        host: &mut H,
        stack: &mut LayerStack,
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
                    let current = host.highest_active_layer();
                    stack.push(current);
                    host.move_to_layer(self.layer);
                }
            }
            Action::Release => {
                if at_or_past_threshold(tap_count, self.threshold) {
                    host.unregister_code16(self.tap_key);
                } else if let Ok(Some(return_layer)) = stack.pop() {
                    host.move_to_layer(return_layer);
                }
            }
        })
    }
}
