//! Stable integer identities for simulation entities.

/// Identity assigned at spawn and retired at removal. Never reused within a
/// simulation run, so stale references can be detected by lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Monotonic id source owned by the simulation state.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}
