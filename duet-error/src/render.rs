//! Human-readable rendering of cause trees

use std::error::Error as StdError;

use serde::{Deserialize, Serialize};

use crate::{Composed, Declared};

/// Options controlling [`render_with`].
///
/// Deserializable so a caller can keep it in its own configuration file;
/// missing fields fall back to the defaults.
///
/// ```rust
/// use duet_error::RenderOptions;
///
/// let options = RenderOptions::new()
///     .with_separator(" | ")
///     .with_follow_sources(true);
/// assert_eq!(options.separator, " | ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Placed between the two sides of a composition and between links
    /// of a followed source chain
    pub separator: String,
    /// Append each plain error's `source()` chain after its own message
    pub follow_sources: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            separator: ": ".to_string(),
            follow_sources: false,
        }
    }
}

impl RenderOptions {
    /// Create options with the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set whether plain errors print their source chain
    pub fn with_follow_sources(mut self, follow_sources: bool) -> Self {
        self.follow_sources = follow_sources;
        self
    }
}

/// Render `err` with the default options.
///
/// A [`Composed`] renders as `"<primary>: <secondary>"`, recursively, with
/// absent sides left out.
pub fn render(err: &(dyn StdError + 'static)) -> String {
    render_with(err, &RenderOptions::default())
}

/// Render `err` with the given options
pub fn render_with(err: &(dyn StdError + 'static), options: &RenderOptions) -> String {
    let mut out = String::new();
    write_node(&mut out, err, options);
    out
}

fn write_node(out: &mut String, err: &(dyn StdError + 'static), options: &RenderOptions) {
    if let Some(composed) = err.downcast_ref::<Composed>() {
        for (i, branch) in composed.branches().enumerate() {
            if i > 0 {
                out.push_str(&options.separator);
            }
            write_node(out, branch, options);
        }
        return;
    }

    if let Some(declared) = err.downcast_ref::<Declared>() {
        return write_node(out, declared.inner(), options);
    }

    out.push_str(&err.to_string());

    if options.follow_sources {
        if let Some(source) = err.source() {
            out.push_str(&options.separator);
            write_node(out, source, options);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compose, Cause, Sentinel};
    use std::fmt;

    static ERR_ONE: Sentinel = Sentinel::new("one");
    static ERR_TWO: Sentinel = Sentinel::new("two");

    #[derive(Debug)]
    struct Loading(Composed);

    impl fmt::Display for Loading {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "loading config")
        }
    }

    impl StdError for Loading {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_render_matches_display() {
        let err = compose(compose(&ERR_ONE, Cause::Absent), &ERR_TWO);
        assert_eq!(render(&err), "one: two");
        assert_eq!(render(&err), err.to_string());
    }

    #[test]
    fn test_render_separator() {
        let err = compose(&ERR_ONE, compose(&ERR_TWO, &ERR_ONE));
        let options = RenderOptions::new().with_separator(" + ");
        assert_eq!(render_with(&err, &options), "one + two + one");
    }

    #[test]
    fn test_follow_sources() {
        let err = compose(Cause::new(Loading(compose(&ERR_ONE, &ERR_TWO))), &ERR_TWO);
        assert_eq!(render(&err), "loading config: two");

        let options = RenderOptions::new()
            .with_separator(" / ")
            .with_follow_sources(true);
        assert_eq!(render_with(&err, &options), "loading config / one / two / two");
    }

    #[test]
    fn test_options_from_json() {
        let options: RenderOptions = serde_json::from_str(r#"{"separator": " -> "}"#).unwrap();
        assert_eq!(options.separator, " -> ");
        assert!(!options.follow_sources);

        let options: RenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, RenderOptions::default());
    }

    #[derive(Debug)]
    struct Stale;

    impl fmt::Display for Stale {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "stale read")
        }
    }

    impl StdError for Stale {}

    impl crate::Declares for Stale {
        fn declares(&self, target: &(dyn StdError + 'static)) -> bool {
            crate::Identity::identifies(&ERR_ONE, target)
        }
    }

    #[test]
    fn test_declared_renders_once() {
        let err = compose(Cause::new(Declared::new(Stale)), &ERR_TWO);
        let options = RenderOptions::new().with_follow_sources(true);
        assert_eq!(render_with(&err, &options), "stale read: two");
        assert_eq!(render(&err), "stale read: two");
    }
}
