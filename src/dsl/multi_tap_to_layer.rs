//! Multi-tap-to-layer template (spec §4.7 "TTO", SPEC_FULL §10
//! `MultiTapToLayer`).

use super::{at_or_past_threshold, dance};
use crate::host::Host;
use crate::runtime::{Action, Resolution};

/// Moves to an absolute `layer` on `Touch` once `tap_count` reaches
/// `threshold` repeats — the layer equivalent of [`super::MultiTapKey`],
/// with the same no-hold-behavior shape (`SMTD_TTO4_ON_MKEY`).
#[derive(Debug, Clone, Copy)]
pub struct MultiTapToLayer {
    layer: u8,
    threshold: u16,
}

impl MultiTapToLayer {
    pub const fn new(layer: u8, threshold: u16) -> Self {
        Self { layer, threshold }
    }

    pub fn on_action<H: Host>(
        &self,
        host: &mut H,
        action: Action,
        tap_count: u16,
    ) -> Resolution {
        dance(action, || {
            if matches!(action, Action::Touch) && at_or_past_threshold(tap_count, self.threshold) {
                host.move_to_layer(self.layer);
            }
        })
    }
}
