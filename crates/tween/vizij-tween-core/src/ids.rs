//! Identifiers and a simple allocator for engine players.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Monotonic allocator for PlayerId.
/// IDs are never reused within one engine, even after a player is removed.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_player: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_player(&mut self) -> PlayerId {
        let id = PlayerId(self.next_player);
        self.next_player = self.next_player.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
