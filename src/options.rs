//! Configuration options for a converter.
//!
//! - [`ConverterOptions`]: root name, encoding, list suffix, recursion limit and
//!   the duplicate-key policy for sanitized records
//! - [`DuplicateKeyPolicy`]: what happens when two record fields sanitize to the
//!   same name
//!
//! ## Examples
//!
//! ```rust
//! use domi::{data, Converter, ConverterOptions};
//!
//! let options = ConverterOptions::new()
//!     .with_root_name("page")
//!     .with_list_suffix("-items");
//!
//! let mut converter = Converter::with_options(options)?;
//! converter.attach(&data!(["a", "b"]), "entry", None)?;
//!
//! let xml = converter.to_xml_string()?;
//! assert!(xml.contains("<page><entry-items><entry>a</entry>"));
//! # Ok::<(), domi::Error>(())
//! ```

/// Default name of the document's root node.
pub const DEFAULT_ROOT_NAME: &str = "root";

/// Default character encoding declared by the document.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Default suffix appended to the prefix of a list wrapper node.
pub const DEFAULT_LIST_SUFFIX: &str = "-list";

/// Default nesting depth at which conversion gives up.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How to resolve record fields that sanitize to the same key.
///
/// # Examples
///
/// ```rust
/// use domi::DuplicateKeyPolicy;
///
/// assert_eq!(DuplicateKeyPolicy::default(), DuplicateKeyPolicy::LastWins);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateKeyPolicy {
    /// The later field silently replaces the earlier one (a warning is logged).
    #[default]
    LastWins,
    /// Conversion fails with [`Error::AmbiguousKey`](crate::Error::AmbiguousKey).
    Reject,
}

/// Configuration options for a [`Converter`](crate::Converter).
///
/// # Examples
///
/// ```rust
/// use domi::{ConverterOptions, DuplicateKeyPolicy};
///
/// let options = ConverterOptions::new();
/// assert_eq!(options.root_name, "root");
/// assert_eq!(options.list_suffix, "-list");
///
/// let options = ConverterOptions::new()
///     .with_encoding("ISO-8859-1")
///     .with_max_depth(32)
///     .with_duplicate_keys(DuplicateKeyPolicy::Reject);
/// assert_eq!(options.max_depth, 32);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConverterOptions {
    pub root_name: String,
    pub encoding: String,
    pub list_suffix: String,
    pub max_depth: usize,
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        ConverterOptions {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
            list_suffix: DEFAULT_LIST_SUFFIX.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            duplicate_keys: DuplicateKeyPolicy::default(),
        }
    }
}

impl ConverterOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the document's root node.
    ///
    /// The name is validated when the converter is created.
    #[must_use]
    pub fn with_root_name(mut self, root_name: &str) -> Self {
        self.root_name = root_name.to_string();
        self
    }

    /// Sets the encoding declared by the document.
    #[must_use]
    pub fn with_encoding(mut self, encoding: &str) -> Self {
        self.encoding = encoding.to_string();
        self
    }

    /// Sets the suffix used to name list wrapper nodes.
    #[must_use]
    pub fn with_list_suffix(mut self, list_suffix: &str) -> Self {
        self.list_suffix = list_suffix.to_string();
        self
    }

    /// Sets the maximum nesting depth accepted from input data.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the policy for record fields that sanitize to the same key.
    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }
}
