//! The active stack: press-ordered pointers into the [`super::state::Pool`].
//!
//! Append-only on entry; removal happens only on a transition to
//! `Stage::None`, which compacts the array and leaves it to the caller
//! (the stage controller) to renumber the `idx` of everything that shifted
//! down, per invariant I2.

use arrayvec::ArrayVec;

pub struct ActiveStack<const N: usize> {
    slots: ArrayVec<u8, N>,
}

impl<const N: usize> ActiveStack<N> {
    pub fn new() -> Self {
        Self {
            slots: ArrayVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The pool slot at stack position `idx`.
    pub fn get(&self, idx: u8) -> u8 {
        self.slots[idx as usize]
    }

    /// Appends `slot` to the end of the stack (a new press always goes on
    /// top; spec's "install it at the end of the active stack").
    pub fn push(&mut self, slot: u8) {
        let _ = self.slots.try_push(slot);
    }

    /// Removes the entry at stack position `idx`, shifting everything
    /// after it down by one. The caller is responsible for renumbering the
    /// `idx` field stored on each state that moved (see
    /// `TapHoldCore::apply_stage`'s `Stage::None` arm).
    pub fn remove(&mut self, idx: u8) {
        self.slots.remove(idx as usize);
    }
}

impl<const N: usize> Default for ActiveStack<N> {
    fn default() -> Self {
        Self::new()
    }
}
