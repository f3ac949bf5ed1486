use std::sync::{Mutex, PoisonError};

use crate::arena::Arena;

/// Check-out/check-in pool of [`Arena`]s shared between threads.
///
/// [`ArenaPool::get`] transfers full ownership of an arena to the caller;
/// [`ArenaPool::put`] resets it and makes it available to the next caller.
/// An arena must not be returned while byte slices or handles derived from
/// its current generation are still in use — the reset on `put` makes any
/// such handle stale.
#[derive(Default)]
pub struct ArenaPool {
    arenas: Mutex<Vec<Arena>>,
}

impl ArenaPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks out an arena, recycling one if available.
    pub fn get(&self) -> Arena {
        self.arenas
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default()
    }

    /// Resets `arena` and returns it to the pool.
    pub fn put(&self, mut arena: Arena) {
        arena.reset();
        self.arenas
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(arena);
    }
}
