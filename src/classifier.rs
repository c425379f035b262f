//! The single extension point firmware authors actually touch.
//!
//! Every other boundary in this crate (`Host`) is infrastructure a board's
//! adapter implements once and forgets about. `Classifier` is where
//! per-key *meaning* lives: a firmware typically implements one
//! `Classifier` for the whole keymap whose `on_action` match-dispatches by
//! keycode to one of the small templates in [`crate::dsl`].

use crate::config::{Feature, Timeout};
use crate::host::Host;
use crate::key::KeyCode;
use crate::runtime::{Action, Resolution};

/// Decides what a resolved action means for a given key.
///
/// `timeout_override` and `feature_override` are the Rust stand-in for the
/// original library's `__attribute__((weak))` override functions: a
/// provided default of `None` means "use the global `RuntimeConfig`
/// value", and a classifier only needs to implement the ones it actually
/// wants to change.
pub trait Classifier<H: Host> {
    /// Called once per resolved action for a key. `keycode` is the host's
    /// current keymap assignment for the key's position (resolved lazily,
    /// never a sentinel zero — see invariant B3). Returning
    /// [`Resolution::Unhandled`] tells the core to fall back to emitting
    /// the action as a raw key event.
    fn on_action(
        &mut self,
        host: &mut H,
        keycode: KeyCode,
        action: Action,
        tap_count: u16,
    ) -> Resolution;

    /// Override the timeout duration for `which`, for this specific
    /// `keycode`. Returning `None` falls back to the core's
    /// `RuntimeConfig`.
    fn timeout_override(&self, _keycode: KeyCode, _which: Timeout) -> Option<u32> {
        None
    }

    /// Override whether `feature` is enabled for this specific `keycode`.
    /// Returning `None` falls back to the core's `RuntimeConfig`.
    fn feature_override(&self, _keycode: KeyCode, _feature: Feature) -> Option<bool> {
        None
    }
}
