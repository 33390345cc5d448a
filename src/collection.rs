//! The linear collections: a linked list, and a dynamic array.
//!
//! Both implement `Sequence`, and may be used interchangeably through it. They differ in cost, and in which positions
//! survive a structural change; see each collection for details.

pub mod dynamic_array;
pub mod linked_list;

mod owner;

#[cfg(test)]
mod utils;

pub use dynamic_array::{ArrayPosition, DynamicArray};
pub use linked_list::{LinkedList, ListPosition};
