//! Provides the node store backing the linked list.

mod slab_store;

pub use slab_store::{SlabStore, SlotHandle};
