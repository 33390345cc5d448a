//! A slab of slots, addressed by generational handles.
//!
//! The store owns every value it hands a handle out for. Handles are small `Copy` tokens which may be freely stored,
//! then resolved against the store at a later time. Deallocating a slot bumps its generation, so that any handle to
//! the previous occupant, and all its copies, are invalidated at once, even once the slot is reused. A slot whose
//! generation is exhausted is retired instead of reused, so that no handle ever resolves to a later occupant.

use alloc::vec::Vec;
use core::{fmt, mem};

/// A handle to a slot of a `SlabStore`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotHandle {
    index: usize,
    generation: u64,
}

impl SlotHandle {
    /// Returns the index of the slot in the store.
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Debug for SlotHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotHandle({}v{})", self.index, self.generation)
    }
}

/// A store of `T`, with O(1) allocation, deallocation, and resolution.
pub struct SlabStore<T> {
    //  Invariant: `live` is the number of `Slot::Occupied` in `slots`.
    slots: Vec<Slot<T>>,
    //  Head of the intrusive list of vacant slots, threaded through `Slot::Vacant::next_free`.
    free: Option<usize>,
    live: usize,
}

impl<T> SlabStore<T> {
    /// Creates a new, empty, store.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            live: 0,
        }
    }

    /// Creates a new, empty, store with space for at least `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: None,
            live: 0,
        }
    }

    /// Returns whether the store holds no value.
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the number of values held by the store.
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Returns whether `handle` currently resolves to a value of this store.
    pub fn contains(&self, handle: SlotHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Returns the number of slots, occupied or vacant; all handles index below it.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Moves `value` into the store, returning a handle to it.
    pub fn allocate(&mut self, value: T) -> SlotHandle {
        self.allocate_with(|_| value)
    }

    /// Moves the value built by `builder` into the store, returning a handle to it.
    ///
    /// `builder` is passed the handle the value will be associated with, so that self-referential values may be
    /// built.
    pub fn allocate_with<F>(&mut self, builder: F) -> SlotHandle
    where
        F: FnOnce(SlotHandle) -> T,
    {
        let Some(index) = self.free else {
            let handle = SlotHandle {
                index: self.slots.len(),
                generation: 0,
            };

            let value = builder(handle);

            self.slots.push(Slot::Occupied {
                generation: handle.generation,
                value,
            });
            self.live += 1;

            return handle;
        };

        let (generation, next_free) = match self.slots[index] {
            Slot::Vacant { generation, next_free } => (generation, next_free),
            Slot::Occupied { .. } | Slot::Retired => unreachable!("Free list references a slot which is not vacant"),
        };

        let handle = SlotHandle { index, generation };
        let value = builder(handle);

        self.slots[index] = Slot::Occupied { generation, value };
        self.free = next_free;
        self.live += 1;

        handle
    }

    /// Moves the value associated to `handle` out of the store.
    ///
    /// `handle`, and all its copies, are invalidated.
    ///
    /// #   Panics
    ///
    /// If `handle` is stale, or was not allocated by this store.
    #[track_caller]
    pub fn deallocate(&mut self, handle: SlotHandle) -> T {
        //  Validates `handle` before modifying anything.
        self.resolve(handle);

        let vacant = match handle.generation.checked_add(1) {
            Some(generation) => Slot::Vacant {
                generation,
                next_free: self.free,
            },
            None => Slot::Retired,
        };

        let reusable = matches!(vacant, Slot::Vacant { .. });

        let Slot::Occupied { value, .. } = mem::replace(&mut self.slots[handle.index], vacant) else {
            unreachable!("Resolved handle references a vacant slot")
        };

        if reusable {
            self.free = Some(handle.index);
        }

        self.live -= 1;

        value
    }

    /// Returns a reference to the value associated to `handle`, if `handle` is still valid.
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        match self.slots.get(handle.index)? {
            Slot::Occupied { generation, value } if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value associated to `handle`, if `handle` is still valid.
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index)? {
            Slot::Occupied { generation, value } if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Resolves `handle` into a reference to its value.
    ///
    /// #   Panics
    ///
    /// If `handle` is stale, or was not allocated by this store.
    #[track_caller]
    pub fn resolve(&self, handle: SlotHandle) -> &T {
        match self.get(handle) {
            Some(value) => value,
            None => Self::stale_handle(handle),
        }
    }

    /// Resolves `handle` into a mutable reference to its value.
    ///
    /// #   Panics
    ///
    /// If `handle` is stale, or was not allocated by this store.
    #[track_caller]
    pub fn resolve_mut(&mut self, handle: SlotHandle) -> &mut T {
        match self.get_mut(handle) {
            Some(value) => value,
            None => Self::stale_handle(handle),
        }
    }

    /// Returns an iterator over the values of the store, and their handles, in slot order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (SlotHandle, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| match slot {
            Slot::Occupied { generation, value } => Some((
                SlotHandle {
                    index,
                    generation: *generation,
                },
                value,
            )),
            Slot::Vacant { .. } | Slot::Retired => None,
        })
    }

    /// Returns an iterator over mutable references to the values of the store, and their handles, in slot order.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (SlotHandle, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| match slot {
            Slot::Occupied { generation, value } => Some((
                SlotHandle {
                    index,
                    generation: *generation,
                },
                value,
            )),
            Slot::Vacant { .. } | Slot::Retired => None,
        })
    }
}

impl<T> Default for SlabStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SlabStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(handle, value)| (handle.index, value)))
            .finish()
    }
}

//
//  Implementation
//

enum Slot<T> {
    Occupied { generation: u64, value: T },
    Vacant { generation: u64, next_free: Option<usize> },
    //  Generation exhausted; never reused.
    Retired,
}

impl<T> SlabStore<T> {
    #[cold]
    #[inline(never)]
    #[track_caller]
    fn stale_handle(handle: SlotHandle) -> ! {
        panic!("{handle:?} is stale, or was not allocated by this store")
    }
}

// mod tests
