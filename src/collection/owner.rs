//! Identity of a collection instance, stamped into the positions it issues.

use core::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

//  Identities are never reused.
static NEXT_OWNER: AtomicUsize = AtomicUsize::new(1);

/// Identity of a collection instance.
///
/// Each instance draws a fresh identity on construction, cloning included, so that positions issued by one instance
/// are never mistaken for positions of another.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Owner(usize);

impl Owner {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }

    /// Panics unless `self` and `other` are the same identity.
    #[track_caller]
    pub(crate) fn check(self, other: Owner) {
        if self != other {
            Self::foreign(self, other)
        }
    }

    #[cold]
    #[inline(never)]
    #[track_caller]
    fn foreign(expected: Owner, actual: Owner) -> ! {
        panic!("Position issued by collection {actual:?}, used with collection {expected:?}")
    }
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// mod tests
