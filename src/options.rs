//! Configuration records consumed by resolution, decoding and serialization.
//!
//! - [`Options`]: how references are resolved and how forgiving codecs are
//! - [`ReferenceMode`]: what a generation mismatch means
//! - [`WriteOptions`]: layout of serialized objects
//!
//! Options are plain values. A graph carries its own [`Options`] and reads
//! them at each `resolve` call; stream decoding takes them as an argument.
//! Nothing in the crate reads process-wide state.
//!
//! ## Examples
//!
//! ```rust
//! use pdf_graph::{ObjectGraph, Options, ReferenceMode, Reference, Object};
//!
//! let options = Options::new()
//!     .with_ignore_bad_references(true)
//!     .with_reference_mode(ReferenceMode::Permissive);
//!
//! let graph = ObjectGraph::with_options(options);
//! assert_eq!(graph.resolve(Reference::new(5, 0)).unwrap(), &Object::Null);
//! ```

use serde::{Deserialize, Serialize};

/// What `resolve` does when the object number exists but the generation does not.
///
/// # Examples
///
/// ```rust
/// use pdf_graph::ReferenceMode;
///
/// assert_eq!(ReferenceMode::default(), ReferenceMode::Strict);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReferenceMode {
    /// Fail with `StaleReference`
    #[default]
    Strict,
    /// Fall back to the highest known generation under that number
    Permissive,
}

/// Resolution and decoding configuration.
///
/// # Examples
///
/// ```rust
/// use pdf_graph::Options;
///
/// let options = Options::new();
/// assert!(!options.ignore_bad_references);
/// assert!(!options.ignore_compression_errors);
/// assert_eq!(options.max_reference_hops, 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Substitute `null` for references that cannot be resolved
    pub ignore_bad_references: bool,
    /// Return partially inflated bytes instead of failing on corrupt Flate data
    pub ignore_compression_errors: bool,
    pub reference_mode: ReferenceMode,
    /// Number of dereferences `resolve` may perform before giving up
    pub max_reference_hops: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            ignore_bad_references: false,
            ignore_compression_errors: false,
            reference_mode: ReferenceMode::default(),
            max_reference_hops: 1,
        }
    }
}

impl Options {
    /// Creates strict default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options suited to inspecting damaged or hostile files: bad references
    /// become `null`, stale generations fall back to the newest one, and
    /// corrupt Flate data yields whatever could be inflated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::{Options, ReferenceMode};
    ///
    /// let options = Options::permissive();
    /// assert!(options.ignore_bad_references);
    /// assert_eq!(options.reference_mode, ReferenceMode::Permissive);
    /// ```
    #[must_use]
    pub fn permissive() -> Self {
        Options {
            ignore_bad_references: true,
            ignore_compression_errors: true,
            reference_mode: ReferenceMode::Permissive,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ignore_bad_references(mut self, ignore: bool) -> Self {
        self.ignore_bad_references = ignore;
        self
    }

    #[must_use]
    pub fn with_ignore_compression_errors(mut self, ignore: bool) -> Self {
        self.ignore_compression_errors = ignore;
        self
    }

    #[must_use]
    pub fn with_reference_mode(mut self, mode: ReferenceMode) -> Self {
        self.reference_mode = mode;
        self
    }

    /// Sets how many dereferences a single `resolve` may follow.
    ///
    /// Values below 1 are clamped to 1: the direct lookup always happens.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::Options;
    ///
    /// assert_eq!(Options::new().with_max_reference_hops(0).max_reference_hops, 1);
    /// ```
    #[must_use]
    pub fn with_max_reference_hops(mut self, hops: usize) -> Self {
        self.max_reference_hops = hops.max(1);
        self
    }
}

/// Layout options for serialized objects.
///
/// # Examples
///
/// ```rust
/// use pdf_graph::WriteOptions;
///
/// let options = WriteOptions::pretty().with_indent(4);
/// assert!(options.pretty);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    pub indent: usize,
    pub pretty: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: 2,
            pretty: false,
        }
    }
}

impl WriteOptions {
    /// Compact single-line output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One dictionary entry per line, nested entries indented.
    #[must_use]
    pub fn pretty() -> Self {
        WriteOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Only affects pretty-printed output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
