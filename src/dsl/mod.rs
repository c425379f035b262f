//! Classifier-template library (spec §4.7, supplemented by SPEC_FULL §10).
//!
//! The original QMK macro library expands `SMTD_MT5_ON_MKEY(...)` and its
//! five siblings into the body of a big keycode `switch`. Here each
//! template is a small struct with its own `on_action`, built once per key
//! and called from the firmware's single [`crate::Classifier`] impl (which
//! still does the keycode-to-template dispatch — a `match` on keycode is
//! the idiomatic stand-in for the C preprocessor's per-key macro expansion).
//!
//! Every template shares one invariant: `Touch` must resolve to
//! [`crate::Resolution::Uncertain`] (we have not yet committed to tap or
//! hold) and every other action resolves to `Determined`. That is factored
//! into [`dance`] once, mirroring the original's shared `SMTD_DANCE` macro.

mod eager_mod_tap;
mod layer_stack;
mod layer_tap;
mod mod_tap;
mod multi_tap_key;
mod multi_tap_to_layer;
mod tap_dance;

pub use eager_mod_tap::EagerModTap;
pub use layer_stack::LayerStack;
pub use layer_tap::LayerTap;
pub use mod_tap::ModTap;
pub use multi_tap_key::MultiTapKey;
pub use multi_tap_to_layer::MultiTapToLayer;
pub use tap_dance::TapDance;

use crate::runtime::{Action, Resolution};

/// Runs `body` for every action, then grades the action per the shared
/// template invariant: `Uncertain` on `Touch`, `Determined` otherwise.
/// `body` still runs on `Touch` — `EagerModTap` needs to act eagerly there
/// (it holds the modifier optimistically), even though the resolution it
/// returns is the same `Uncertain` as every other template's no-op `Touch`.
pub(crate) fn dance(action: Action, body: impl FnOnce()) -> Resolution {
    body();
    if matches!(action, Action::Touch) {
        Resolution::Uncertain
    } else {
        Resolution::Determined
    }
}

/// Whether `tap_count` (the number of *prior* completed taps before this
/// press, per spec §3) has reached `threshold`, selecting a template's
/// alternate ("escape hatch") behavior over its default one.
///
/// Mirrors the original's `SMTD_LIMIT(threshold, then, otherwise)` macro
/// exactly: `tap_count < threshold ? then : otherwise`. A `threshold` of 1
/// (every template's default) means the default branch runs on the very
/// first press (`tap_count == 0`) and the alternate branch takes over from
/// the second press onward (`tap_count >= 1`) — e.g. `ModTap`'s "hold acts
/// as a modifier the first time, but repeats the tap key on a hold once
/// you've already tapped it at least once in the same sequence".
pub(crate) fn at_or_past_threshold(tap_count: u16, threshold: u16) -> bool {
    tap_count >= threshold
}
