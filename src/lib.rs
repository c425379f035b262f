#![no_std]

//! tapkey_core - tap/hold/sequence keystroke disambiguation core
//!
//! This crate is the platform-agnostic heart of a mechanical keyboard
//! firmware feature: turning a single physical key into several logical
//! actions (tap, repeated tap sequence, hold, tap-then-hold) depending on
//! timing and on overlap with neighboring key events.
//!
//! The crate itself never touches hardware. A host firmware feeds every
//! physical key press/release through [`runtime::TapHoldCore::process`]
//! and implements the [`host::Host`] trait to supply a monotonic clock, a
//! deferred-timer service, a keymap lookup, and modifier/report side
//! effects. The firmware author supplies a [`classifier::Classifier`]
//! that decides, per action, what each key *means* - usually built from
//! the small template library in [`dsl`].

extern crate alloc;

pub mod classifier;
pub mod config;
pub mod dsl;
pub mod error;
pub mod host;
pub mod key;
pub mod runtime;
pub mod testing;

pub use classifier::Classifier;
pub use config::{Feature, RuntimeConfig, Timeout};
pub use error::{CoreError, CoreResult};
pub use host::{Host, PendingTimer, TimeoutKind};
pub use key::{KeyCode, KeyEvent, KeyPosition};
pub use runtime::{Action, Resolution, Stage, TapHoldCore, DEFAULT_POOL_SIZE};

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
