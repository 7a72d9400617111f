use alloc::vec::Vec;

use super::handle::Handle;

/// A slot is either holding a live element or is a link in the vacancy chain.
#[derive(Clone)]
enum Slot<T> {
    Occupied(T),
    Vacant { next: Option<Handle> },
}

/// Handle-addressed storage for tree nodes.
///
/// Freed slots are threaded into an intrusive vacancy list and reused before the
/// backing vector grows, so handles stay small and node memory stays contiguous.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    vacant: Option<Handle>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        self.len += 1;
        if let Some(handle) = self.vacant {
            let slot = &mut self.slots[handle.to_index()];
            let Slot::Vacant { next } = *slot else {
                panic!("`Arena::alloc()` - vacancy chain points at an occupied slot!");
            };
            *slot = Slot::Occupied(element);
            self.vacant = next;
            handle
        } else {
            // Strict less-than keeps every index representable by a `Handle`.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Slot::Occupied(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.slots[handle.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get()` - `handle` is invalid!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get_mut()` - `handle` is invalid!"),
        }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = core::mem::replace(&mut self.slots[handle.to_index()], Slot::Vacant { next: self.vacant });
        match slot {
            Slot::Occupied(element) => {
                self.vacant = Some(handle);
                self.len -= 1;
                element
            }
            Slot::Vacant { next } => {
                // Put the chain back the way it was before reporting the misuse.
                self.slots[handle.to_index()] = Slot::Vacant { next };
                panic!("`Arena::take()` - `handle` is invalid!");
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant = None;
        self.len = 0;
    }
}
