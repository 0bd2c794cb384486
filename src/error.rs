//! Error types for parsing, resolution, stream filtering and tree maintenance.
//!
//! All fallible operations in this crate return [`Result`], whose error side is
//! the single [`Error`] enum. Codec failures are carried as a nested
//! [`FilterError`] so callers can tell which codec failed and in which
//! direction.
//!
//! ## Error Categories
//!
//! - **Token errors**: the bytes at the cursor do not match the grammar of the
//!   requested token (`InvalidIntegerToken`, `InvalidRealToken`, `Syntax`)
//! - **Reference errors**: a [`Reference`](crate::Reference) cannot be resolved
//!   (`UnresolvedReference`, `StaleReference`, `CyclicReference`). These are the
//!   only errors the permissive resolution flag turns into `null`.
//! - **Filter errors**: a codec rejected its input or its parameters
//! - **Tree errors**: caller mistakes when mutating a counted tree
//!
//! ## Examples
//!
//! ```rust
//! use pdf_graph::{lexer::Cursor, Error};
//!
//! let mut cursor = Cursor::new(b"abc");
//! let err = cursor.parse_integer().unwrap_err();
//! assert!(matches!(err, Error::InvalidIntegerToken { offset: 0 }));
//! ```

use crate::filter::FilterKind;
use crate::value::Reference;
use std::fmt;
use thiserror::Error;

/// Represents every error the crate can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The bytes at `offset` are not an integer token
    #[error("Invalid integer token at offset {offset}")]
    InvalidIntegerToken { offset: usize },

    /// The bytes at `offset` are not a real token
    #[error("Invalid real token at offset {offset}")]
    InvalidRealToken { offset: usize },

    /// Any other malformed token or structure
    #[error("Syntax error at offset {offset}: {msg}")]
    Syntax { offset: usize, msg: String },

    /// Input ended in the middle of a token or structure
    #[error("Unexpected end of input at offset {offset}, expected {expected}")]
    UnexpectedEof { offset: usize, expected: String },

    /// No object is registered under the reference's number
    #[error("Unresolved reference {0}")]
    UnresolvedReference(Reference),

    /// The object number exists, but not with the requested generation
    #[error("Stale reference {reference}: latest generation is {latest}")]
    StaleReference { reference: Reference, latest: u16 },

    /// Reference chain exceeded the hop bound or looped back on itself
    #[error("Cyclic reference chain starting at {0}")]
    CyclicReference(Reference),

    /// Every object number a graph can allocate is in use
    #[error("No free object number left in graph #{0}")]
    NumbersExhausted(u64),

    /// Integer division by zero, bitwise operation on a real, ...
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// A stream codec failed
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Tree index outside `0..=count` (insert) or `1..=count` (get)
    #[error("Index {index} out of range for tree of {count} leaves")]
    IndexOutOfRange { index: usize, count: usize },

    /// An object owned by another graph was attached without being exported
    #[error("Cannot attach {reference} from graph #{source_graph} to graph #{target_graph} without exporting it first")]
    CrossGraphAttachment {
        reference: Reference,
        source_graph: u64,
        target_graph: u64,
    },

    /// A tree child is neither a leaf nor an interior node
    #[error("Object {reference} is not a valid tree child: {msg}")]
    WrongChildKind { reference: Reference, msg: String },

    /// Attaching the node would make it its own ancestor
    #[error("Attaching {0} would create a cycle in the tree")]
    TreeCycle(Reference),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error at a byte offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::Error;
    ///
    /// let err = Error::syntax(10, "unbalanced parenthesis");
    /// assert!(err.to_string().contains("offset 10"));
    /// ```
    pub fn syntax(offset: usize, msg: &str) -> Self {
        Error::Syntax {
            offset,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(offset: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            offset,
            expected: expected.to_string(),
        }
    }

    pub fn arithmetic(msg: &str) -> Self {
        Error::Arithmetic(msg.to_string())
    }

    pub fn wrong_child_kind(reference: Reference, msg: &str) -> Self {
        Error::WrongChildKind {
            reference,
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for the errors the permissive resolution flag may recover.
    #[must_use]
    pub const fn is_reference_error(&self) -> bool {
        matches!(
            self,
            Error::UnresolvedReference(_)
                | Error::StaleReference { .. }
                | Error::CyclicReference(_)
        )
    }
}

/// Direction a codec was running in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Encode,
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Encode => f.write_str("encode"),
            Stage::Decode => f.write_str("decode"),
        }
    }
}

/// Failure of a single stream codec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The input is not valid for the codec
    #[error("{codec} {stage} failed: {msg}")]
    Malformed {
        codec: FilterKind,
        stage: Stage,
        msg: String,
    },

    /// The decode parameters cannot be honoured
    #[error("{codec}: unsupported parameters: {msg}")]
    UnsupportedParams { codec: FilterKind, msg: String },
}

impl FilterError {
    pub fn malformed<T: fmt::Display>(codec: FilterKind, stage: Stage, msg: T) -> Self {
        FilterError::Malformed {
            codec,
            stage,
            msg: msg.to_string(),
        }
    }

    pub fn unsupported<T: fmt::Display>(codec: FilterKind, msg: T) -> Self {
        FilterError::UnsupportedParams {
            codec,
            msg: msg.to_string(),
        }
    }

    /// The codec that reported this error.
    #[must_use]
    pub const fn codec(&self) -> FilterKind {
        match self {
            FilterError::Malformed { codec, .. } | FilterError::UnsupportedParams { codec, .. } => {
                *codec
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
