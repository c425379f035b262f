//! The boundary between this core and the surrounding firmware.
//!
//! Everything the core needs from the outside world — the keymap lookup
//! table, the modifier register, the deferred-timer service, and the
//! ability to inject synthesized key events back into the host's own event
//! path — is expressed as this one trait. Per the design's "no dynamic
//! dispatch across components" rule, `Host` is always a concrete type
//! parameter, never a trait object; only the classifier/template layer
//! reaches for a narrow form of polymorphism.

use crate::key::{KeyCode, KeyEvent, KeyPosition};

/// Which deferred callback a fired timer corresponds to.
///
/// Distinct from [`crate::config::Timeout`]: that enum selects a *duration*,
/// this one selects a *callback*. `TouchRelease` and `HoldRelease` both use
/// the `Release` duration but dispatch to different state transitions when
/// they fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeoutKind {
    Touch,
    Sequence,
    TouchRelease,
    HoldRelease,
}

/// The payload a host stores alongside a scheduled timer and hands back to
/// [`crate::runtime::TapHoldCore::on_timeout`] when it fires.
///
/// `generation` guards against the arena slot having been freed and reused
/// for a different key between the time the timer was scheduled and the
/// time it fires (the core cancels timers on every stage transition, but a
/// host's timer service may still have a fire already in flight).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub slot: u8,
    pub generation: u32,
    pub kind: TimeoutKind,
}

/// Everything the core asks of the surrounding firmware.
///
/// Implementors are expected to be a thin adapter over the firmware's own
/// APIs (QMK's `register_code16`, `layer_move`, `defer_exec`, and so on);
/// none of these methods are expected to do nontrivial work themselves.
pub trait Host {
    /// Opaque handle returned by [`Host::defer`], later passed to
    /// [`Host::cancel`]. Typically an index or token from the host's own
    /// timer queue.
    type Timer: Copy;

    /// The keycode the host's keymap currently assigns to `position`,
    /// looked up lazily the first time a state's action is dispatched to
    /// the classifier (spec's "desired_keycode is resolved lazily").
    fn current_keycode(&self, position: KeyPosition) -> KeyCode;

    /// Synthesize a key event back into the host's own input path, as if a
    /// physical switch had fired. The core always brackets this call with
    /// its reentrancy guard, so the host's own event loop may call back
    /// into [`crate::runtime::TapHoldCore::process`] without causing
    /// unbounded recursion.
    fn emit_raw(&mut self, event: KeyEvent);

    fn mods(&self) -> u8;
    fn set_mods(&mut self, mods: u8);

    fn register_mods(&mut self, mods: u8) {
        self.set_mods(self.mods() | mods)
    }

    fn unregister_mods(&mut self, mods: u8) {
        self.set_mods(self.mods() & !mods)
    }

    /// Flush modifier/report changes to the host's output, if the host
    /// batches them (QMK's `send_keyboard_report`). Most hosts can leave
    /// this a no-op and flush on their own schedule.
    fn send_report(&mut self) {}

    fn tap_code16(&mut self, keycode: KeyCode);
    fn register_code16(&mut self, keycode: KeyCode);
    fn unregister_code16(&mut self, keycode: KeyCode);

    fn highest_active_layer(&self) -> u8;
    fn move_to_layer(&mut self, layer: u8);

    /// Schedule a deferred callback. The host is responsible for invoking
    /// [`crate::runtime::TapHoldCore::on_timeout`] with `payload` once
    /// `delay_ms` has elapsed, and for remembering the returned handle so
    /// it can be canceled later.
    fn defer(&mut self, delay_ms: u32, payload: PendingTimer) -> Self::Timer;

    /// Cancel a previously scheduled timer. Canceling an already-fired or
    /// already-canceled timer must be a safe no-op.
    fn cancel(&mut self, timer: Self::Timer);

    /// Free-running millisecond clock, wrapping on overflow.
    fn timer_read(&self) -> u32;

    fn timer_elapsed(&self, since: u32) -> u32 {
        self.timer_read().wrapping_sub(since)
    }

    /// Busy-wait used to avoid USB host mis-ordering near-simultaneous key
    /// reports (`SMTD_GLOBAL_SIMULTANEOUS_PRESSES_DELAY_MS` in the original
    /// library). Zero by default; most hosts never need it.
    fn delay_ms(&mut self, _ms: u32) {}
}
