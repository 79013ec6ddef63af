//! Sentinel errors: process-wide values compared by identity

use std::fmt;
use std::ptr;

use crate::identity;

/// A named error value used purely as a comparison target.
///
/// Declare sentinels as `static` items so every reference points at the
/// same value. Equality is address identity: two sentinels carrying the
/// same text are still different sentinels.
///
/// # Example
///
/// ```rust
/// use duet_error::{compose, Sentinel};
///
/// static NOT_FOUND: Sentinel = Sentinel::new("not found");
/// static ALSO_NOT_FOUND: Sentinel = Sentinel::new("not found");
///
/// let err = compose(&NOT_FOUND, None::<duet_error::Cause>);
/// assert!(NOT_FOUND.is_in(&err));
/// assert!(!ALSO_NOT_FOUND.is_in(&err));
/// ```
pub struct Sentinel {
    message: &'static str,
}

impl Sentinel {
    /// Create a sentinel with a fixed message
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }

    /// Get the sentinel message
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Check whether this sentinel is reachable from `err`
    pub fn is_in(&self, err: &(dyn std::error::Error + 'static)) -> bool {
        identity::is(Some(err), Some(self))
    }
}

impl PartialEq for Sentinel {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for Sentinel {}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl fmt::Debug for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sentinel({:?} @ {:p})", self.message, self)
    }
}

impl std::error::Error for Sentinel {}
