use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out 1, 2, 3, ... for one kind of identifier.  Each facade owns its own generators, so
/// two simulations never share a counter.
#[derive(Debug)]
pub struct IdGenerator<Id> {
    last: AtomicU64,
    _id: PhantomData<fn() -> Id>,
}

impl<Id: From<u64>> IdGenerator<Id> {
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
            _id: PhantomData,
        }
    }

    pub fn next(&self) -> Id {
        Id::from(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Records an id assigned elsewhere so [next] never hands it out again.
    pub fn observe(&self, id: u64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }
}

impl<Id: From<u64>> Default for IdGenerator<Id> {
    fn default() -> Self {
        Self::new()
    }
}
