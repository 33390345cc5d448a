//! Cursors, views of a sequence at a given position.
//!
//! A cursor pairs a borrow of a sequence with one of its positions. `Cursor` borrows immutably and only exposes read
//! access, whereas `CursorMut` borrows mutably and also exposes write access and structural changes. Both are thin
//! wrappers around the same `Sequence::Position`, which can be extracted with `position()` and kept around once the
//! borrow ends.

use core::fmt;

use crate::{error::OutOfRangeError, interface::Sequence};

/// A read-only view of a sequence, at a position.
pub struct Cursor<'a, S: Sequence> {
    sequence: &'a S,
    position: S::Position,
}

impl<'a, S: Sequence> Cursor<'a, S> {
    /// Creates a cursor over `sequence`, at `position`.
    pub fn new(sequence: &'a S, position: S::Position) -> Self {
        Self { sequence, position }
    }

    /// Returns the sequence the cursor walks.
    pub fn sequence(&self) -> &'a S {
        self.sequence
    }

    /// Returns the current position.
    pub fn position(&self) -> S::Position {
        self.position
    }

    /// Returns whether the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.position == self.sequence.end()
    }

    /// Returns a reference to the current element.
    ///
    /// #   Errors
    ///
    /// If the cursor is at the end position.
    pub fn get(&self) -> Result<&'a S::Item, OutOfRangeError> {
        self.sequence.get(self.position)
    }

    /// Moves the cursor to the following position.
    ///
    /// #   Errors
    ///
    /// If the cursor is at the end position, in which case it is left unmoved.
    pub fn move_next(&mut self) -> Result<(), OutOfRangeError> {
        self.position = self.sequence.next(self.position)?;

        Ok(())
    }

    /// Moves the cursor to the preceding position.
    ///
    /// #   Errors
    ///
    /// If the cursor is at the first position, in which case it is left unmoved.
    pub fn move_prev(&mut self) -> Result<(), OutOfRangeError> {
        self.position = self.sequence.prev(self.position)?;

        Ok(())
    }

    /// Returns a cursor `distance` steps away, forward if positive, backward if negative.
    ///
    /// #   Errors
    ///
    /// If the resulting position would lie outside of the sequence.
    pub fn offset(&self, distance: isize) -> Result<Self, OutOfRangeError> {
        let position = self.sequence.offset(self.position, distance)?;

        Ok(Self::new(self.sequence, position))
    }
}

impl<S: Sequence> Clone for Cursor<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Sequence> Copy for Cursor<'_, S> {}

impl<S: Sequence> fmt::Debug for Cursor<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("position", &self.position).finish()
    }
}

//  Positions already encode the identity of the sequence which issued them.
impl<S: Sequence> PartialEq for Cursor<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<S: Sequence> Eq for Cursor<'_, S> {}

/// A read-write view of a sequence, at a position.
pub struct CursorMut<'a, S: Sequence> {
    sequence: &'a mut S,
    position: S::Position,
}

impl<'a, S: Sequence> CursorMut<'a, S> {
    /// Creates a cursor over `sequence`, at `position`.
    pub fn new(sequence: &'a mut S, position: S::Position) -> Self {
        Self { sequence, position }
    }

    /// Returns the current position.
    pub fn position(&self) -> S::Position {
        self.position
    }

    /// Returns whether the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.position == self.sequence.end()
    }

    /// Returns a read-only cursor at the same position, borrowing from `self`.
    pub fn as_cursor(&self) -> Cursor<'_, S> {
        Cursor::new(self.sequence, self.position)
    }

    /// Returns a reference to the current element.
    ///
    /// #   Errors
    ///
    /// If the cursor is at the end position.
    pub fn get(&self) -> Result<&S::Item, OutOfRangeError> {
        self.sequence.get(self.position)
    }

    /// Returns a mutable reference to the current element.
    ///
    /// #   Errors
    ///
    /// If the cursor is at the end position.
    pub fn get_mut(&mut self) -> Result<&mut S::Item, OutOfRangeError> {
        self.sequence.get_mut(self.position)
    }

    /// Replaces the current element by `element`, returning the previous one.
    ///
    /// #   Errors
    ///
    /// If the cursor is at the end position, in which case `element` is dropped.
    pub fn set(&mut self, element: S::Item) -> Result<S::Item, OutOfRangeError> {
        let current = self.get_mut()?;

        Ok(core::mem::replace(current, element))
    }

    /// Moves the cursor to the following position.
    ///
    /// #   Errors
    ///
    /// If the cursor is at the end position, in which case it is left unmoved.
    pub fn move_next(&mut self) -> Result<(), OutOfRangeError> {
        self.position = self.sequence.next(self.position)?;

        Ok(())
    }

    /// Moves the cursor to the preceding position.
    ///
    /// #   Errors
    ///
    /// If the cursor is at the first position, in which case it is left unmoved.
    pub fn move_prev(&mut self) -> Result<(), OutOfRangeError> {
        self.position = self.sequence.prev(self.position)?;

        Ok(())
    }

    /// Moves the cursor `distance` steps away, forward if positive, backward if negative.
    ///
    /// #   Errors
    ///
    /// If the resulting position would lie outside of the sequence, in which case it is left unmoved.
    pub fn move_by(&mut self, distance: isize) -> Result<(), OutOfRangeError> {
        self.position = self.sequence.offset(self.position, distance)?;

        Ok(())
    }

    /// Inserts `element` before the current position.
    ///
    /// The cursor keeps pointing to the same element, or to the end, even if the insertion invalidated its former
    /// position.
    ///
    /// #   Errors
    ///
    /// If the current position does not denote a place within the sequence.
    pub fn insert_before(&mut self, element: S::Item) -> Result<(), OutOfRangeError> {
        let inserted = self.sequence.insert(self.position, element)?;

        self.position = self.sequence.next(inserted)?;

        Ok(())
    }

    /// Removes and returns the current element, moving the cursor to the element which followed it.
    ///
    /// #   Errors
    ///
    /// If the cursor is at the end position.
    pub fn remove_current(&mut self) -> Result<S::Item, OutOfRangeError> {
        let (element, next) = self.sequence.erase_forward(self.position)?;

        self.position = next;

        Ok(element)
    }
}

impl<S: Sequence> fmt::Debug for CursorMut<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("position", &self.position).finish()
    }
}

// mod tests
