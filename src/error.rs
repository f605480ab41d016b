//! Error types for data-to-XML conversion and rendering.
//!
//! Every failure is synchronous and fatal to the call that raised it: a failed
//! conversion never leaves a partially usable tree behind for the caller.
//!
//! ## Error Categories
//!
//! - **Naming Errors**: a prefix, a computed list name, or a host element/attribute
//!   name that does not satisfy the naming grammar
//! - **Structural Errors**: recursion limit reached, ambiguous sanitized keys,
//!   shapes that cannot be mapped onto the tree
//! - **Host Errors**: unknown node handles, empty foreign documents, malformed XML
//! - **Render Errors**: reserved render modes, transformer failures
//!
//! ## Examples
//!
//! ```rust
//! use domi::{Converter, Error};
//!
//! let result = Converter::new("1root");
//! assert!(matches!(result, Err(Error::InvalidName { .. })));
//!
//! if let Err(err) = result {
//!     assert!(err.to_string().contains("1root"));
//! }
//! ```

use crate::dom::NodeId;
use crate::render::RenderMode;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while building or rendering a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A node name failed the naming grammar
    #[error("invalid prefix '{name}'")]
    InvalidName { name: String },

    /// Input nested deeper than the configured limit
    #[error("recursion limit of {limit} exceeded while converting nested data")]
    RecursionLimit { limit: usize },

    /// Two record fields collapsed onto the same key after sanitization
    #[error("ambiguous key '{key}': several record fields sanitize to the same name")]
    AmbiguousKey { key: String },

    /// Unsupported value shape
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Render mode that is declared but has no renderer
    #[error("render mode {0:?} is not supported")]
    UnsupportedRenderMode(RenderMode),

    /// Foreign document without a document element
    #[error("document has no root element")]
    EmptyDocument,

    /// Node handle outside the range of the document it was used with
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    /// Malformed XML input or writer failure
    #[error("XML error: {0}")]
    Xml(String),

    /// Failure reported by a transformer
    #[error("Transform error: {0}")]
    Transform(String),

    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates an invalid name error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use domi::Error;
    ///
    /// let err = Error::invalid_name("9lives");
    /// assert_eq!(err.to_string(), "invalid prefix '9lives'");
    /// ```
    pub fn invalid_name(name: &str) -> Self {
        Error::InvalidName {
            name: name.to_string(),
        }
    }

    /// Creates a recursion limit error.
    pub fn recursion_limit(limit: usize) -> Self {
        Error::RecursionLimit { limit }
    }

    /// Creates an ambiguous key error for sanitized record keys that collide.
    pub fn ambiguous_key(key: &str) -> Self {
        Error::AmbiguousKey {
            key: key.to_string(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an XML error from any displayable parser or writer failure.
    pub fn xml<T: fmt::Display>(err: T) -> Self {
        Error::Xml(err.to_string())
    }

    /// Creates a transform error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use domi::Error;
    ///
    /// let err = Error::transform("stylesheet not found");
    /// assert!(err.to_string().contains("stylesheet not found"));
    /// ```
    pub fn transform<T: fmt::Display>(msg: T) -> Self {
        Error::Transform(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
