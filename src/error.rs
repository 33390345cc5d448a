//! Errors reported by the collections.
//!
//! Only two failures are recoverable, and they are kept distinct:
//!
//! -   `EmptyCollectionError`: the requested end-element does not exist.
//! -   `OutOfRangeError`: the position argument does not denote an element valid for the operation.
//!
//! Passing a position issued by another container, or a position invalidated by a structural change, is a
//! precondition violation instead, and panics.

use thiserror::Error as ThisError;

/// An element was requested from either end of an empty collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
#[error("cannot {operation} from an empty collection")]
pub struct EmptyCollectionError {
    /// Name of the failed operation.
    pub operation: &'static str,
}

impl EmptyCollectionError {
    pub(crate) const fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

/// A position did not denote an element valid for the operation.
///
/// For example, dereferencing or erasing the end position, or stepping before the first element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
#[error("{operation}: position out of range")]
pub struct OutOfRangeError {
    /// Name of the failed operation.
    pub operation: &'static str,
}

impl OutOfRangeError {
    pub(crate) const fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

/// Any error reported by a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    /// See `EmptyCollectionError`.
    #[error(transparent)]
    EmptyCollection(#[from] EmptyCollectionError),
    /// See `OutOfRangeError`.
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),
}

// mod tests
