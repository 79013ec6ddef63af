//! # duet-error
//!
//! Errors that carry two causes at once, and the two traversals that see
//! through them.
//!
//! ## Design Philosophy
//!
//! - **Sentinel**: A process-wide error value compared by identity
//! - **Composed**: An immutable `(primary, secondary)` pair of causes
//! - **Identity match**: Is a given sentinel reachable from this error?
//! - **Capability extraction**: Give me the first cause with this shape
//!
//! ## Usage
//!
//! ```rust
//! use duet_error::{compose, Cause, Inspect, Sentinel};
//! use std::fmt;
//!
//! static ERR_ONE: Sentinel = Sentinel::new("one");
//! static ERR_TWO: Sentinel = Sentinel::new("two");
//!
//! #[derive(Debug)]
//! struct ErrThree {
//!     msg: String,
//! }
//!
//! impl fmt::Display for ErrThree {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str(&self.msg)
//!     }
//! }
//!
//! impl std::error::Error for ErrThree {}
//!
//! let composed = compose(&ERR_ONE, &ERR_TWO);
//! assert!(composed.contains(&ERR_ONE));
//! assert!(composed.contains(&ERR_TWO));
//!
//! let three = Cause::new(ErrThree { msg: "error three".into() });
//! let composed = compose(&ERR_TWO, three);
//! assert_eq!(composed.find::<ErrThree>().unwrap().msg, "error three");
//! assert_eq!(composed.to_string(), "two: error three");
//! ```
//!
//! ## Principles
//!
//! - Compositions are never mutated, so a cause tree is always finite
//! - Traversal is depth-first, primary before secondary, first hit wins
//! - An absent cause is an inert leaf, never a failure
//! - Plain errors are followed through `std::error::Error::source`

mod cause;
mod composed;
mod ext;
mod sentinel;

pub mod extract;
pub mod identity;
pub mod render;

pub use cause::{Cause, DynError};
pub use composed::{compose, Composed};
pub use ext::{Inspect, ResultExt};
pub use identity::{Declared, Declares, Identity};
pub use render::{render, render_with, RenderOptions};
pub use sentinel::Sentinel;

/// Result type alias using a composed error
pub type Result<T> = std::result::Result<T, Composed>;
