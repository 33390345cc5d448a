//! Linear collections, with positions which outlive borrows.
//!
//! This crate provides two interchangeable sequences:
//!
//! -   `LinkedList`, a doubly-linked list terminated by a sentinel node, with O(1) insertion and removal anywhere.
//! -   `DynamicArray`, a contiguous buffer doubling its capacity on overflow.
//!
//! Both are walked through `Position`s, small `Copy` tokens which do not borrow the container, so that a position can
//! be kept across mutations. The two containers differ in what survives a mutation: a list position stays valid until
//! its own node is erased, whereas an array position is invalidated by any reallocation of the buffer. Using an
//! invalidated position, or a position issued by another container, is a precondition violation and panics.

#![cfg_attr(not(test), no_std)]
//  Lints
#![deny(missing_docs)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod collection;
pub mod cursor;
pub mod error;
pub mod interface;
pub mod store;

pub use collection::{DynamicArray, LinkedList};
pub use cursor::{Cursor, CursorMut};
pub use error::{EmptyCollectionError, Error, OutOfRangeError};
pub use interface::Sequence;
