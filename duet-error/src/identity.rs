//! Identity-match traversal
//!
//! Answers "is this error, or anything it caused, the same as `target`?"
//! The walk is depth-first and primary-first, and stops at the first hit.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::{Composed, DynError};

/// The identity-equality contract, asked of the target.
///
/// Every `Error + PartialEq` type satisfies it: the candidate is downcast
/// to the target's type and compared with `==`. [`Sentinel`](crate::Sentinel)
/// compares by address, while a custom error that derives `PartialEq`
/// opts into value equality.
pub trait Identity {
    /// Check whether `candidate` is the same error as `self`
    fn identifies(&self, candidate: &(dyn StdError + 'static)) -> bool;

    /// The target as an error, handed to [`Declares`] roots
    fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        None
    }
}

impl<E> Identity for E
where
    E: StdError + PartialEq + 'static,
{
    fn identifies(&self, candidate: &(dyn StdError + 'static)) -> bool {
        candidate.downcast_ref::<E>().is_some_and(|candidate| candidate == self)
    }

    fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self)
    }
}

/// The identity-equality contract, asked of the candidate.
///
/// Lets an error count as some other error, typically a sentinel, while
/// its `source()` stays the real underlying cause. Only consulted when
/// the error is wrapped in [`Declared`].
pub trait Declares: StdError + Send + Sync + 'static {
    /// Check whether this error should be treated as `target`
    fn declares(&self, target: &(dyn StdError + 'static)) -> bool;
}

/// An error that answers identity queries itself.
///
/// Renders as the wrapped error and exposes it as its single cause, so
/// extraction still finds the concrete type one level down.
///
/// ```rust
/// use duet_error::identity::{Declared, Declares, Identity};
/// use duet_error::{compose, Cause, Inspect, Sentinel};
/// use std::fmt;
///
/// static TIMED_OUT: Sentinel = Sentinel::new("timed out");
///
/// #[derive(Debug)]
/// struct Deadline(std::io::Error);
///
/// impl fmt::Display for Deadline {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "deadline exceeded")
///     }
/// }
///
/// impl std::error::Error for Deadline {
///     fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
///         Some(&self.0)
///     }
/// }
///
/// impl Declares for Deadline {
///     fn declares(&self, target: &(dyn std::error::Error + 'static)) -> bool {
///         TIMED_OUT.identifies(target)
///     }
/// }
///
/// let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "read");
/// let err = compose(Cause::new(Declared::new(Deadline(io))), None::<Cause>);
/// assert!(err.contains(&TIMED_OUT));
/// assert!(err.find::<std::io::Error>().is_some());
/// ```
#[derive(Clone)]
pub struct Declared {
    error: Arc<DynError>,
    rule: Arc<dyn Declares>,
}

impl Declared {
    /// Wrap an error that declares its own identity
    pub fn new<E: Declares>(err: E) -> Self {
        let err = Arc::new(err);
        Self {
            error: err.clone(),
            rule: err,
        }
    }

    /// Get the wrapped error
    pub fn inner(&self) -> &(dyn StdError + 'static) {
        &*self.error
    }

    /// Check whether the wrapped error declares itself to be `target`
    pub fn declares(&self, target: &(dyn StdError + 'static)) -> bool {
        self.rule.declares(target)
    }
}

impl fmt::Display for Declared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl fmt::Debug for Declared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Declared").field(&self.error).finish()
    }
}

impl StdError for Declared {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner())
    }
}

/// Check whether `target` is reachable from `root`.
///
/// An absent root or target never matches. Otherwise the root itself is
/// checked first, by the target and then, for a [`Declared`] root, by the
/// root. A [`Composed`] root delegates to its primary branch and then,
/// only on a miss, its secondary branch; any other error is followed
/// through `source()`.
pub fn is<T>(root: Option<&(dyn StdError + 'static)>, target: Option<&T>) -> bool
where
    T: Identity + ?Sized,
{
    match (root, target) {
        (Some(root), Some(target)) => walk(root, target, 0, "root"),
        _ => false,
    }
}

fn walk<T>(
    mut err: &(dyn StdError + 'static),
    target: &T,
    mut depth: usize,
    mut branch: &'static str,
) -> bool
where
    T: Identity + ?Sized,
{
    loop {
        if target.identifies(err) {
            tracing::trace!(depth, branch, error = %err, "identity matched");
            return true;
        }

        if let (Some(declared), Some(wanted)) = (err.downcast_ref::<Declared>(), target.as_error()) {
            if declared.declares(wanted) {
                tracing::trace!(depth, branch, error = %err, "identity declared by error");
                return true;
            }
        }

        if let Some(composed) = err.downcast_ref::<Composed>() {
            return [("primary", composed.primary()), ("secondary", composed.secondary())]
                .into_iter()
                .any(|(branch, cause)| {
                    cause
                        .as_error()
                        .is_some_and(|child| walk(child, target, depth + 1, branch))
                });
        }

        match err.source() {
            Some(source) => {
                err = source;
                depth += 1;
                branch = "source";
            }
            None => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compose, Cause, Sentinel};
    use std::cell::Cell;

    static ERR_ONE: Sentinel = Sentinel::new("one");
    static ERR_TWO: Sentinel = Sentinel::new("two");
    static ERR_UNRELATED: Sentinel = Sentinel::new("unrelated");

    #[derive(Debug, PartialEq)]
    struct Code(u16);

    impl fmt::Display for Code {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "code {}", self.0)
        }
    }

    impl StdError for Code {}

    #[derive(Debug)]
    struct Wrapped {
        cause: &'static Sentinel,
    }

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "wrapped")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(self.cause)
        }
    }

    fn root(err: &Composed) -> Option<&(dyn StdError + 'static)> {
        Some(err)
    }

    #[test]
    fn test_self_match() {
        assert!(is(Some(&ERR_ONE), Some(&ERR_ONE)));
        assert!(!is(Some(&ERR_ONE), Some(&ERR_TWO)));
    }

    #[test]
    fn test_both_branches() {
        let err = compose(&ERR_ONE, &ERR_TWO);
        assert!(is(root(&err), Some(&ERR_ONE)));
        assert!(is(root(&err), Some(&ERR_TWO)));
        assert!(!is(root(&err), Some(&ERR_UNRELATED)));
    }

    #[test]
    fn test_nested() {
        let err = compose(compose(&ERR_ONE, &ERR_TWO), &ERR_UNRELATED);
        assert!(is(root(&err), Some(&ERR_TWO)));

        let err = compose(&ERR_UNRELATED, compose(Cause::Absent, compose(&ERR_ONE, Cause::Absent)));
        assert!(is(root(&err), Some(&ERR_ONE)));
        assert!(!is(root(&err), Some(&ERR_TWO)));
    }

    #[test]
    fn test_absent_is_false() {
        let err = compose(Cause::Absent, Cause::Absent);
        assert!(!is(root(&err), Some(&ERR_ONE)));
        assert!(!is(None, Some(&ERR_ONE)));
        assert!(!is(root(&err), None::<&Sentinel>));
    }

    #[test]
    fn test_value_equality() {
        let err = compose(&ERR_ONE, Cause::new(Code(404)));
        assert!(is(root(&err), Some(&Code(404))));
        assert!(!is(root(&err), Some(&Code(500))));
    }

    #[test]
    fn test_follows_single_cause() {
        let err = compose(&ERR_UNRELATED, Cause::new(Wrapped { cause: &ERR_TWO }));
        assert!(is(root(&err), Some(&ERR_TWO)));
    }

    #[test]
    fn test_dyn_target() {
        let target: &dyn Identity = &ERR_TWO;
        let err = compose(&ERR_ONE, &ERR_TWO);
        assert!(is(root(&err), Some(target)));
    }

    #[derive(Debug)]
    struct Timeout(std::io::Error);

    impl fmt::Display for Timeout {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "timeout")
        }
    }

    impl StdError for Timeout {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    impl Declares for Timeout {
        fn declares(&self, target: &(dyn StdError + 'static)) -> bool {
            ERR_TWO.identifies(target)
        }
    }

    fn timeout() -> Cause {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "x");
        Cause::new(Declared::new(Timeout(io)))
    }

    #[test]
    fn test_root_declared_equality() {
        let err = compose(&ERR_ONE, timeout());
        assert!(is(root(&err), Some(&ERR_TWO)));
        assert!(is(root(&err), Some(&ERR_ONE)));
        assert!(!is(root(&err), Some(&ERR_UNRELATED)));
    }

    #[test]
    fn test_declared_still_follows_source() {
        let err = compose(timeout(), Cause::Absent);
        let io = crate::extract::find::<std::io::Error>(root(&err)).unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::TimedOut);
        assert!(crate::extract::find::<Timeout>(root(&err)).is_some());
        assert_eq!(err.to_string(), "timeout");
    }

    #[test]
    fn test_declared_needs_error_target() {
        let target: &dyn Identity = &Visits::new(&ERR_TWO);
        let err = compose(timeout(), Cause::Absent);
        assert!(!is(root(&err), Some(target)));
    }

    struct Visits<'a> {
        target: &'a Sentinel,
        count: Cell<usize>,
    }

    impl<'a> Visits<'a> {
        fn new(target: &'a Sentinel) -> Self {
            Self {
                target,
                count: Cell::new(0),
            }
        }
    }

    impl Identity for Visits<'_> {
        fn identifies(&self, candidate: &(dyn StdError + 'static)) -> bool {
            self.count.set(self.count.get() + 1);
            self.target.identifies(candidate)
        }
    }

    #[test]
    fn test_primary_first_short_circuit() {
        let err = compose(&ERR_ONE, compose(&ERR_TWO, &ERR_UNRELATED));

        let visits = Visits::new(&ERR_ONE);
        assert!(is(root(&err), Some(&visits)));
        assert_eq!(visits.count.get(), 2);

        let visits = Visits::new(&ERR_TWO);
        assert!(is(root(&err), Some(&visits)));
        assert_eq!(visits.count.get(), 4);

        let visits = Visits::new(&ERR_UNRELATED);
        assert!(is(root(&err), Some(&visits)));
        assert_eq!(visits.count.get(), 5);
    }

    #[test]
    fn test_same_target_in_both_branches() {
        let err = compose(&ERR_ONE, &ERR_ONE);
        let visits = Visits::new(&ERR_ONE);
        assert!(is(root(&err), Some(&visits)));
        assert_eq!(visits.count.get(), 2);
    }
}
