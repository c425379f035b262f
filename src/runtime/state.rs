//! The state-pool arena: a fixed array of per-key state machine slots.
//!
//! Mirrors the teacher's `PendingKeyRegistry<N>` (`runtime::tap_hold::timeout_handler`)
//! but indexed by slot rather than scanned by key, since this core's stack
//! ordering (not key identity) drives classifier replay order (invariant I2).

use crate::host::Host;
use crate::key::{KeyCode, KeyPosition};
use crate::runtime::{Action, Resolution, Stage};

/// One slot's worth of per-key state machine data (spec §3, "State").
///
/// `H::Timer` is required to be `Copy` by [`Host`], which makes the whole
/// struct `Copy` too (manual impl below, since deriving would also demand
/// `H: Copy`, which is not actually needed).
pub struct KeyState<H: Host> {
    pub pressed_key_position: KeyPosition,
    pub pressed_keycode: KeyCode,
    /// Zero means "unresolved"; never observed by a classifier (invariant B3).
    pub desired_keycode: KeyCode,
    pub tap_count: u16,
    pub pressed_time: u32,
    pub released_time: u32,
    pub timer: Option<H::Timer>,
    pub stage: Stage,
    pub resolution: Resolution,
    /// Most recent action actually delivered to the classifier.
    pub last_dispatched: Option<Action>,
    /// An action that arrived while a predecessor on the stack was still
    /// undetermined; replayed once that predecessor reaches `Determined`
    /// (spec §4.5).
    pub action_required: Option<Action>,
    /// This state's own position in the active stack (invariant I2).
    pub idx: u8,
    /// Bumped every time the slot is freed, so a timer fired for a stale
    /// occupant of this slot can be told apart from the current one.
    pub generation: u32,
}

impl<H: Host> KeyState<H> {
    pub const fn empty() -> Self {
        Self {
            pressed_key_position: KeyPosition::new(0, 0),
            pressed_keycode: KeyCode::new(0),
            desired_keycode: KeyCode::new(0),
            tap_count: 0,
            pressed_time: 0,
            released_time: 0,
            timer: None,
            stage: Stage::None,
            resolution: Resolution::Uncertain,
            last_dispatched: None,
            action_required: None,
            idx: 0,
            generation: 0,
        }
    }
}

impl<H: Host> Clone for KeyState<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: Host> Copy for KeyState<H> {}

/// Fixed-size arena of [`KeyState`] slots (spec §3, "Pool"). `N` defaults to
/// the spec's 10; a slot is free iff its stage is `Stage::None` (invariant I1).
pub struct Pool<H: Host, const N: usize> {
    slots: [KeyState<H>; N],
}

impl<H: Host, const N: usize> Pool<H, N> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| KeyState::empty()),
        }
    }

    pub fn get(&self, slot: u8) -> &KeyState<H> {
        &self.slots[slot as usize]
    }

    pub fn get_mut(&mut self, slot: u8) -> &mut KeyState<H> {
        &mut self.slots[slot as usize]
    }

    /// First slot whose stage is `None`, in pool order.
    pub fn find_free(&self) -> Option<u8> {
        self.slots
            .iter()
            .position(|s| s.stage.is_idle())
            .map(|i| i as u8)
    }

    /// Resets `slot` to its idle default and bumps its generation, so any
    /// timer still in flight for the old occupant is recognizably stale.
    pub fn free(&mut self, slot: u8) {
        let next_gen = self.slots[slot as usize].generation.wrapping_add(1);
        self.slots[slot as usize] = KeyState::empty();
        self.slots[slot as usize].generation = next_gen;
    }
}

impl<H: Host, const N: usize> Default for Pool<H, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// The spec's fixed pool size.
pub const DEFAULT_POOL_SIZE: usize = 10;
