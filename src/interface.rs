//! The `Sequence` trait, the common API of the linear collections.
//!
//! A sequence is walked through positions: small `Copy` tokens identifying both the sequence which issued them and a
//! place within it. A sequence has `len() + 1` valid positions: one per element, plus the end position, one past the
//! last element. The end position is stable, and never denotes an element.
//!
//! #   Validity
//!
//! A position is only meaningful relative to the sequence instance which issued it. Each implementation documents
//! which structural changes invalidate which positions. Passing a position issued by another sequence, or an
//! invalidated position, is a precondition violation: implementations panic rather than report an error.

use core::fmt;

use crate::{
    cursor::{Cursor, CursorMut},
    error::{EmptyCollectionError, OutOfRangeError},
};

/// A sequence of elements, with insertion and removal at both ends and at arbitrary positions.
pub trait Sequence {
    /// The type of the elements.
    type Item;

    /// The type of the positions within the sequence.
    ///
    /// Two positions are equal if and only if they were issued by the same sequence instance, and denote the same
    /// place within it.
    type Position: Copy + Eq + fmt::Debug;

    /// Returns the number of elements in the sequence.
    fn len(&self) -> usize;

    /// Returns whether the sequence is empty, or not.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an element at the back of the sequence.
    fn append(&mut self, element: Self::Item);

    /// Prepends an element at the front of the sequence.
    fn prepend(&mut self, element: Self::Item);

    /// Inserts an element immediately before `position`, returning the position of the new element.
    ///
    /// Inserting before `begin()` prepends, inserting before `end()` appends.
    ///
    /// #   Errors
    ///
    /// If `position` does not denote a place within the sequence.
    fn insert(&mut self, position: Self::Position, element: Self::Item) -> Result<Self::Position, OutOfRangeError>;

    /// Removes and returns the first element.
    ///
    /// #   Errors
    ///
    /// If the sequence is empty.
    fn pop_first(&mut self) -> Result<Self::Item, EmptyCollectionError>;

    /// Removes and returns the last element.
    ///
    /// #   Errors
    ///
    /// If the sequence is empty.
    fn pop_last(&mut self) -> Result<Self::Item, EmptyCollectionError>;

    /// Removes and returns the element at `position`.
    ///
    /// #   Errors
    ///
    /// If the sequence is empty, or `position` is the end position.
    fn erase(&mut self, position: Self::Position) -> Result<Self::Item, OutOfRangeError> {
        self.erase_forward(position).map(|(element, _)| element)
    }

    /// Removes and returns the element at `position`, alongside the position of the element which followed it.
    ///
    /// #   Errors
    ///
    /// If the sequence is empty, or `position` is the end position.
    fn erase_forward(&mut self, position: Self::Position) -> Result<(Self::Item, Self::Position), OutOfRangeError>;

    /// Removes every element in `[first, last_excluded)`.
    ///
    /// An empty range is a no-op. On error, the sequence is left unmodified.
    ///
    /// #   Errors
    ///
    /// If the range does not denote elements of the sequence.
    fn erase_range(&mut self, first: Self::Position, last_excluded: Self::Position) -> Result<(), OutOfRangeError>;

    /// Returns the position of the first element, or `end()` if the sequence is empty.
    fn begin(&self) -> Self::Position;

    /// Returns the end position, one past the last element.
    fn end(&self) -> Self::Position;

    /// Returns a reference to the element at `position`.
    ///
    /// #   Errors
    ///
    /// If `position` does not denote an element, such as the end position.
    fn get(&self, position: Self::Position) -> Result<&Self::Item, OutOfRangeError>;

    /// Returns a mutable reference to the element at `position`.
    ///
    /// #   Errors
    ///
    /// If `position` does not denote an element, such as the end position.
    fn get_mut(&mut self, position: Self::Position) -> Result<&mut Self::Item, OutOfRangeError>;

    /// Returns the position following `position`.
    ///
    /// #   Errors
    ///
    /// If `position` is the end position.
    fn next(&self, position: Self::Position) -> Result<Self::Position, OutOfRangeError>;

    /// Returns the position preceding `position`.
    ///
    /// #   Errors
    ///
    /// If `position` is the first position, there being no position before the first element.
    fn prev(&self, position: Self::Position) -> Result<Self::Position, OutOfRangeError>;

    /// Returns the position `distance` steps away from `position`, forward if positive, backward if negative.
    ///
    /// #   Errors
    ///
    /// If the resulting position would lie after the end position, or before the first position.
    fn offset(&self, position: Self::Position, distance: isize) -> Result<Self::Position, OutOfRangeError>;

    /// Returns a read-only cursor at `position`.
    fn cursor(&self, position: Self::Position) -> Cursor<'_, Self>
    where
        Self: Sized,
    {
        Cursor::new(self, position)
    }

    /// Returns a read-write cursor at `position`.
    ///
    /// This is also the way to upgrade a read-only `Cursor`: `sequence.cursor_mut(cursor.position())`.
    fn cursor_mut(&mut self, position: Self::Position) -> CursorMut<'_, Self>
    where
        Self: Sized,
    {
        CursorMut::new(self, position)
    }

    /// Returns a read-only cursor at the first element, or at the end if the sequence is empty.
    fn cursor_begin(&self) -> Cursor<'_, Self>
    where
        Self: Sized,
    {
        let position = self.begin();

        Cursor::new(self, position)
    }

    /// Returns a read-only cursor at the end position.
    fn cursor_end(&self) -> Cursor<'_, Self>
    where
        Self: Sized,
    {
        let position = self.end();

        Cursor::new(self, position)
    }
}
