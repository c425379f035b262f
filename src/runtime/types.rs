//! The closed, finite-set types driving the per-key state machine.
//!
//! `Stage`, `Action`, and `Resolution` are all exhaustively matched
//! everywhere they appear; there is no catch-all arm anywhere in this
//! crate for any of them, so the compiler flags an unhandled case the
//! moment a new one is added.

/// One of the six states a key's state-machine slot can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Idle; the pool slot is unused.
    #[default]
    None,
    /// Key is physically held, classification undecided.
    Touch,
    /// Key just released as a tap; waiting for another tap in the same
    /// sequence.
    Sequence,
    /// Key is confirmed as a hold; the classifier has already seen `Hold`.
    Hold,
    /// Key was released while a later key was (or is) pressed; fate
    /// depends on whether the later key releases before the touch-release
    /// timer fires.
    TouchRelease,
    /// Key was released after being held; waiting to finalize the release.
    /// Only the top-of-stack state may complete this path immediately —
    /// lower states wait for the cleanup pass (invariant I7).
    HoldRelease,
}

impl Stage {
    pub const fn is_idle(self) -> bool {
        matches!(self, Stage::None)
    }
}

/// One of the four resolved actions delivered to a classifier.
///
/// Always observed in the order `Touch -> {Tap | Hold} -> Release?`
/// (invariant I4); `Release` never appears without a preceding `Hold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Always the first action for a key; called with the live tap count.
    Touch,
    /// The press turned out to be a tap.
    Tap,
    /// The press turned out to be a hold.
    Hold,
    /// Only delivered after a preceding `Hold`.
    Release,
}

/// How committed the classifier is to an action, in increasing order of
/// finality. A state's stored resolution only ever moves up this order
/// (invariant I5): `Uncertain < Unhandled < Determined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Resolution {
    /// Started handling, cannot commit yet (e.g. `Touch` of a mod-tap
    /// where tap vs. hold is still unknown).
    #[default]
    Uncertain,
    /// The classifier does not know this keycode; the core should emit
    /// the raw key on its behalf.
    Unhandled,
    /// Fully handled; the core must not touch the host for this action.
    Determined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_ordering_matches_spec() {
        assert!(Resolution::Uncertain < Resolution::Unhandled);
        assert!(Resolution::Unhandled < Resolution::Determined);
    }

    #[test]
    fn stage_default_is_none() {
        assert_eq!(Stage::default(), Stage::None);
        assert!(Stage::None.is_idle());
        assert!(!Stage::Touch.is_idle());
    }
}
