//! The two-cause Composed error

use std::error::Error as StdError;
use std::fmt;

use crate::Cause;

/// An error holding exactly two ordered causes.
///
/// Both causes stay reachable for the lifetime of the value and the pair
/// can never be changed after construction, so a tree of compositions is
/// always finite. A `Composed` never answers identity or capability
/// queries itself; the traversals in [`crate::identity`] and
/// [`crate::extract`] ask it for its [`branches`](Composed::branches) and
/// descend, primary first.
///
/// # Example
///
/// ```rust
/// use duet_error::{compose, Inspect, Sentinel};
///
/// static ERR_ONE: Sentinel = Sentinel::new("one");
/// static ERR_TWO: Sentinel = Sentinel::new("two");
///
/// let err = compose(&ERR_ONE, &ERR_TWO);
/// assert_eq!(err.to_string(), "one: two");
/// assert!(err.contains(&ERR_ONE));
/// assert!(err.contains(&ERR_TWO));
/// ```
#[derive(Clone)]
pub struct Composed {
    primary: Cause,
    secondary: Cause,
}

/// Combine two causes into one error value. Never fails.
pub fn compose(primary: impl Into<Cause>, secondary: impl Into<Cause>) -> Composed {
    Composed::new(primary, secondary)
}

impl Composed {
    /// Create a composition of `primary` and `secondary`
    pub fn new(primary: impl Into<Cause>, secondary: impl Into<Cause>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Fold any number of causes into a left-leaning chain of compositions.
    ///
    /// `[a, b, c]` becomes `compose(compose(a, b), c)`, so a primary-first
    /// traversal visits the causes in input order. A single cause is
    /// paired with [`Cause::Absent`]. Returns `None` for empty input.
    pub fn join_all<I>(causes: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<Cause>,
    {
        let mut causes = causes.into_iter();
        let first = causes.next()?;
        let mut joined = match causes.next() {
            Some(second) => Composed::new(first, second),
            None => return Some(Composed::new(first, Cause::Absent)),
        };
        for next in causes {
            joined = Composed::new(joined, next);
        }
        Some(joined)
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the primary cause
    pub fn primary(&self) -> &Cause {
        &self.primary
    }

    /// Get the secondary cause
    pub fn secondary(&self) -> &Cause {
        &self.secondary
    }

    /// Present children in traversal order: primary, then secondary
    pub fn branches(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> + '_ {
        [self.primary.as_error(), self.secondary.as_error()]
            .into_iter()
            .flatten()
    }
}

// =============================================================================
// Display - compact, single-line format for logs
// =============================================================================

impl fmt::Display for Composed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, branch) in self.branches().enumerate() {
            if i > 0 {
                write!(f, ": ")?;
            }
            write!(f, "{}", branch)?;
        }
        Ok(())
    }
}

// =============================================================================
// Debug - verbose, multi-line tree for debugging
// =============================================================================

impl fmt::Debug for Composed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Composed: {}", self)?;
        write_branch(f, "Primary", &self.primary, 1)?;
        write_branch(f, "Secondary", &self.secondary, 1)
    }
}

fn write_branch(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    cause: &Cause,
    depth: usize,
) -> fmt::Result {
    match cause.as_error() {
        Some(err) => write_node(f, label, err, depth),
        None => writeln!(f, "{}{}: <absent>", "    ".repeat(depth), label),
    }
}

fn write_node(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    err: &(dyn StdError + 'static),
    depth: usize,
) -> fmt::Result {
    writeln!(f, "{}{}: {}", "    ".repeat(depth), label, err)?;

    if let Some(composed) = err.downcast_ref::<Composed>() {
        write_branch(f, "Primary", &composed.primary, depth + 1)?;
        return write_branch(f, "Secondary", &composed.secondary, depth + 1);
    }

    match err.source() {
        Some(source) => write_node(f, "Caused by", source, depth + 1),
        None => Ok(()),
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl StdError for Composed {
    /// The first present branch, so single-cause walkers such as
    /// `anyhow::Error::chain` still descend into the primary side.
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.branches().next()
    }
}
