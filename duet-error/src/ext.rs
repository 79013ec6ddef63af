//! Extension traits for call sites

use std::error::Error as StdError;

use crate::{compose, extract, identity, render, Cause, Composed, DynError, Identity};

/// Method-call access to the traversals.
///
/// Implemented for [`Composed`], [`Cause`], `anyhow::Error` and plain
/// `dyn Error` objects, so handling code can ask the same questions no
/// matter how the error reached it.
///
/// ```rust
/// use duet_error::{compose, Inspect, Sentinel};
///
/// static NOT_FOUND: Sentinel = Sentinel::new("not found");
///
/// let err = anyhow::Error::new(compose(&NOT_FOUND, None::<duet_error::Cause>));
/// assert!(err.contains(&NOT_FOUND));
/// ```
pub trait Inspect {
    /// The root handed to the traversals
    fn as_root(&self) -> Option<&(dyn StdError + 'static)>;

    /// Check whether `target` is reachable from this error
    fn contains<T>(&self, target: &T) -> bool
    where
        T: Identity + ?Sized,
    {
        identity::is(self.as_root(), Some(target))
    }

    /// Find the first cause of type `T`
    fn find<T>(&self) -> Option<&T>
    where
        T: StdError + 'static,
    {
        extract::find(self.as_root())
    }

    /// Find the first cause for which `check` yields a value
    fn find_map<'a, R, F>(&'a self, check: F) -> Option<R>
    where
        F: FnMut(&'a (dyn StdError + 'static)) -> Option<R>,
    {
        extract::find_map(self.as_root(), check)
    }

    /// Collect every cause of type `T`
    fn find_all<T>(&self) -> Vec<&T>
    where
        T: StdError + 'static,
    {
        extract::find_all(self.as_root())
    }

    /// Render with the default options; empty when there is no error
    fn render(&self) -> String {
        self.as_root().map(render::render).unwrap_or_default()
    }
}

impl Inspect for Composed {
    fn as_root(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self)
    }
}

impl Inspect for Cause {
    fn as_root(&self) -> Option<&(dyn StdError + 'static)> {
        self.as_error()
    }
}

impl Inspect for anyhow::Error {
    fn as_root(&self) -> Option<&(dyn StdError + 'static)> {
        let err: &(dyn StdError + 'static) = &**self;
        Some(err)
    }
}

impl Inspect for dyn StdError + 'static {
    fn as_root(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self)
    }
}

impl Inspect for DynError {
    fn as_root(&self) -> Option<&(dyn StdError + 'static)> {
        let err: &(dyn StdError + 'static) = self;
        Some(err)
    }
}

/// Compose the error side of a `Result` at a return site.
///
/// ```rust
/// use duet_error::{Inspect, ResultExt, Sentinel};
///
/// static LOAD_FAILED: Sentinel = Sentinel::new("load failed");
///
/// fn load() -> Result<String, std::io::Error> {
///     Err(std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml"))
/// }
///
/// let err = load().compose_err(&LOAD_FAILED).unwrap_err();
/// assert_eq!(err.to_string(), "config.toml: load failed");
/// assert!(err.contains(&LOAD_FAILED));
/// assert!(err.find::<std::io::Error>().is_some());
/// ```
pub trait ResultExt<T> {
    /// Compose the error with `secondary`; the original error stays primary
    fn compose_err<C>(self, secondary: C) -> crate::Result<T>
    where
        C: Into<Cause>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<Cause>,
{
    fn compose_err<C>(self, secondary: C) -> crate::Result<T>
    where
        C: Into<Cause>,
    {
        self.map_err(|err| compose(err, secondary))
    }
}
