//! [`TapHoldCore`]: the facade that owns the pool, the active stack, and
//! the reentrancy guard, and exposes the two entry points a host calls —
//! [`TapHoldCore::process`] for every matrix event and
//! [`TapHoldCore::on_timeout`] for every fired deferred timer.

use crate::config::RuntimeConfig;
use crate::host::Host;
use crate::key::{KeyCode, KeyEvent};
use crate::runtime::state::{Pool, DEFAULT_POOL_SIZE};
use crate::runtime::stack::ActiveStack;
use crate::Classifier;

/// The per-key state machine, multi-key resolution stack, and action
/// dispatcher described in spec §2. `N` is the pool size; the spec fixes
/// it at 10, the crate's [`DEFAULT_POOL_SIZE`].
pub struct TapHoldCore<H: Host, const N: usize = DEFAULT_POOL_SIZE> {
    pub(crate) pool: Pool<H, N>,
    pub(crate) stack: ActiveStack<N>,
    /// Guards re-entrancy into `process` while the core is itself
    /// synthesizing a raw event or calling the classifier (invariant I6).
    pub(crate) bypass: bool,
    pub(crate) config: RuntimeConfig,
}

impl<H: Host, const N: usize> TapHoldCore<H, N> {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            pool: Pool::new(),
            stack: ActiveStack::new(),
            bypass: false,
            config,
        }
    }

    pub fn config(&self) -> RuntimeConfig {
        self.config
    }

    /// Number of currently active (non-idle) states. Exposed mainly for
    /// tests and diagnostics.
    pub fn active_count(&self) -> usize {
        self.stack.len()
    }

    /// Entry point for every host key event (spec §4.3, `process`).
    ///
    /// Returns `true` iff the host should continue handling the event
    /// itself (the core is bypassed and took no action), `false` iff the
    /// core consumed it.
    pub fn process<C: Classifier<H>>(
        &mut self,
        host: &mut H,
        classifier: &mut C,
        pressed_keycode: KeyCode,
        event: KeyEvent,
    ) -> bool {
        self.process_redirected(host, classifier, pressed_keycode, event, KeyCode::new(0))
    }

    /// Same as [`Self::process`], but lets the caller redirect the event to
    /// a specific `desired_keycode` rather than letting the core resolve it
    /// from the live keymap (spec's `process(..., desired_keycode)`).
    pub fn process_redirected<C: Classifier<H>>(
        &mut self,
        host: &mut H,
        classifier: &mut C,
        pressed_keycode: KeyCode,
        event: KeyEvent,
        desired_keycode: KeyCode,
    ) -> bool {
        if self.bypass {
            return true;
        }
        self.apply_to_stack(host, classifier, 0, pressed_keycode, event, desired_keycode);
        false
    }
}

impl<H: Host, const N: usize> Default for TapHoldCore<H, N> {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}
