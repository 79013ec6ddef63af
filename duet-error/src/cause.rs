//! One side of a composition

use std::error::Error as StdError;
use std::sync::Arc;

use crate::{Composed, Sentinel};

/// Any thread-safe error object
pub type DynError = dyn StdError + Send + Sync + 'static;

/// An immutable, cheaply cloneable handle to a single cause.
///
/// `Absent` is the inert leaf: it renders as nothing, matches no
/// identity and carries no capability. Every other variant hands out the
/// underlying error as `&dyn Error` through [`Cause::as_error`], which is
/// the only view the traversals ever take.
#[derive(Clone, Debug, Default)]
pub enum Cause {
    /// No cause
    #[default]
    Absent,
    /// A `'static` error, usually a [`Sentinel`]
    Static(&'static DynError),
    /// An owned error, possibly a nested [`Composed`]
    Shared(Arc<DynError>),
    /// An error already in `anyhow` form
    Anyhow(Arc<anyhow::Error>),
}

impl Cause {
    /// Wrap a concrete error value
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Cause::Shared(Arc::new(err))
    }

    /// Check if this is the absent leaf
    pub fn is_absent(&self) -> bool {
        matches!(self, Cause::Absent)
    }

    /// Borrow the underlying error, if any
    pub fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Cause::Absent => None,
            Cause::Static(err) => {
                let err: &(dyn StdError + 'static) = *err;
                Some(err)
            }
            Cause::Shared(err) => {
                let err: &(dyn StdError + 'static) = &**err;
                Some(err)
            }
            Cause::Anyhow(err) => {
                let err: &anyhow::Error = err;
                let err: &(dyn StdError + 'static) = &**err;
                Some(err)
            }
        }
    }
}

impl From<&'static Sentinel> for Cause {
    fn from(sentinel: &'static Sentinel) -> Self {
        Cause::Static(sentinel)
    }
}

impl From<Composed> for Cause {
    fn from(composed: Composed) -> Self {
        Cause::new(composed)
    }
}

impl From<Arc<DynError>> for Cause {
    fn from(err: Arc<DynError>) -> Self {
        Cause::Shared(err)
    }
}

impl From<Box<DynError>> for Cause {
    fn from(err: Box<DynError>) -> Self {
        Cause::Shared(Arc::from(err))
    }
}

impl From<anyhow::Error> for Cause {
    fn from(err: anyhow::Error) -> Self {
        Cause::Anyhow(Arc::new(err))
    }
}

impl From<std::io::Error> for Cause {
    fn from(err: std::io::Error) -> Self {
        Cause::new(err)
    }
}

impl<C> From<Option<C>> for Cause
where
    C: Into<Cause>,
{
    fn from(cause: Option<C>) -> Self {
        cause.map_or(Cause::Absent, Into::into)
    }
}
