//! Capability-extraction traversal
//!
//! Finds the first cause exposing a requested capability and hands it
//! back. Order is the same as identity matching: the error itself, then
//! for a [`Composed`] the whole primary subtree before the secondary one,
//! and for anything else its `source()`. When both branches carry the
//! capability the primary side wins.

use std::error::Error as StdError;

use crate::Composed;

/// Find the first cause of concrete type `T`.
///
/// # Example
///
/// ```rust
/// use duet_error::{compose, extract, Cause, Sentinel};
///
/// static ERR_TWO: Sentinel = Sentinel::new("two");
///
/// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
/// let err = compose(&ERR_TWO, Cause::new(io));
///
/// let found = extract::find::<std::io::Error>(Some(&err)).unwrap();
/// assert_eq!(found.kind(), std::io::ErrorKind::NotFound);
/// ```
pub fn find<'a, T>(root: Option<&'a (dyn StdError + 'static)>) -> Option<&'a T>
where
    T: StdError + 'static,
{
    find_map(root, |err| err.downcast_ref::<T>())
}

/// Find the first cause for which `check` yields a value.
///
/// The check decides what the capability is: a downcast to a concrete
/// type, a downcast followed by an upcast to `&dyn Trait`, or any other
/// check on the error.
pub fn find_map<'a, R, F>(root: Option<&'a (dyn StdError + 'static)>, mut check: F) -> Option<R>
where
    F: FnMut(&'a (dyn StdError + 'static)) -> Option<R>,
{
    walk(root?, &mut check, 0, "root")
}

/// Collect every cause of type `T`, in traversal order
pub fn find_all<'a, T>(root: Option<&'a (dyn StdError + 'static)>) -> Vec<&'a T>
where
    T: StdError + 'static,
{
    let mut found = Vec::new();
    if let Some(root) = root {
        visit(root, &mut |err: &'a (dyn StdError + 'static)| {
            if let Some(hit) = err.downcast_ref::<T>() {
                found.push(hit);
            }
        });
    }
    found
}

fn walk<'a, R, F>(
    mut err: &'a (dyn StdError + 'static),
    check: &mut F,
    mut depth: usize,
    mut branch: &'static str,
) -> Option<R>
where
    F: FnMut(&'a (dyn StdError + 'static)) -> Option<R>,
{
    loop {
        if let Some(found) = check(err) {
            tracing::trace!(depth, branch, error = %err, "capability extracted");
            return Some(found);
        }

        if let Some(composed) = err.downcast_ref::<Composed>() {
            return [("primary", composed.primary()), ("secondary", composed.secondary())]
                .into_iter()
                .find_map(|(branch, cause)| walk(cause.as_error()?, check, depth + 1, branch));
        }

        err = err.source()?;
        depth += 1;
        branch = "source";
    }
}

/// Every node in traversal order, without stopping
fn visit<'a, F>(mut err: &'a (dyn StdError + 'static), visitor: &mut F)
where
    F: FnMut(&'a (dyn StdError + 'static)),
{
    loop {
        visitor(err);

        if let Some(composed) = err.downcast_ref::<Composed>() {
            for branch in composed.branches() {
                visit(branch, visitor);
            }
            return;
        }

        match err.source() {
            Some(source) => err = source,
            None => return,
        }
    }
}
