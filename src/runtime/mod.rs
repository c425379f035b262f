//! The tap/hold state machine: per-key stages, the active-stack resolution
//! order, and the action dispatcher (spec §2-§5).
//!
//! [`TapHoldCore`] is the facade a host firmware owns one instance of. Its
//! own logic is split the way the spec splits it:
//!
//! - [`state`] / [`stack`] — the arena and the press-ordered active stack.
//! - [`stage_controller`] — `apply_stage`, the sole owner of timers and
//!   stack membership.
//! - [`event_router`] — `apply_to_stack` / `apply_event`, the per-state
//!   transition table.
//! - [`dispatcher`] — `handle_action` / `execute_action`, the classifier
//!   gatekeeper and the event injector.
//! - [`timeout`] — routes a fired deferred timer back into the machine.

mod core;
mod dispatcher;
mod event_router;
mod stack;
mod stage_controller;
mod state;
mod timeout;
mod types;

pub use core::TapHoldCore;
pub use state::{KeyState, Pool, DEFAULT_POOL_SIZE};
pub use types::{Action, Resolution, Stage};
