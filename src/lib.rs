//! # domi
//!
//! Converts arbitrary hierarchical data into a well-formed XML document tree,
//! and hands that tree to a rendering step.
//!
//! ## What does it do?
//!
//! A [`Converter`] owns an XML [`Document`] and turns dynamically-typed
//! [`Value`]s into elements, attributes and text:
//!
//! - **Scalars** become elements with text content; booleans read `TRUE` / `FALSE`
//! - **Maps** with name-like keys become one child element per key
//! - **Lists** (and maps with keys that cannot be element names) become a
//!   `prefix-list` wrapper holding one `prefix` element per entry
//! - **Attributed maps** carry `attributes` and `values` entries that end up on
//!   the element itself
//! - **Records** from object introspection have their field names cleaned up
//! - **Foreign nodes** (other documents, other converters) are copied in
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! domi = "1.2"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Building a Document
//!
//! ```rust
//! use domi::{data, Converter};
//!
//! let mut converter = Converter::new("root")?;
//! converter.attach(
//!     &data!({
//!         "name": "Alice",
//!         "roles": ["admin", "dev"]
//!     }),
//!     "user",
//!     None,
//! )?;
//!
//! let xml = converter.to_xml_string()?;
//! assert!(xml.contains(
//!     "<user><name>Alice</name><roles-list><roles>admin</roles><roles>dev</roles></roles-list></user>"
//! ));
//! # Ok::<(), domi::Error>(())
//! ```
//!
//! ### From Rust Types
//!
//! Anything implementing `Serialize` can be converted; structs become records.
//!
//! ```rust
//! use domi::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Product {
//!     id: u32,
//!     name: String,
//!     in_stock: bool,
//! }
//!
//! let product = Product { id: 1, name: "Widget".to_string(), in_stock: true };
//! let xml = to_string(&product, "product").unwrap();
//! assert!(xml.contains("<product><id>1</id><name>Widget</name><in_stock>TRUE</in_stock></product>"));
//! ```
//!
//! ### Attributes
//!
//! ```rust
//! use domi::{data, Converter};
//!
//! let mut converter = Converter::new("root")?;
//! let link = converter.attach(
//!     &data!({ "attributes": { "href": "/home" }, "values": "Home" }),
//!     "link",
//!     None,
//! )?;
//!
//! assert_eq!(
//!     converter.document().node_to_string(link)?,
//!     r#"<link href="/home">Home</link>"#
//! );
//! # Ok::<(), domi::Error>(())
//! ```
//!
//! ## Rendering
//!
//! [`Converter::render`] either serializes the tree ([`RenderMode::Xml`]) or
//! passes it, with a combined stylesheet document, to a caller-supplied
//! [`Transformer`] ([`RenderMode::Html`]). See the [`render`] module.
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: converter
//! creation and list wrapping at `debug`, every converted value at `trace`,
//! overwritten record fields at `warn`. Install any logger to see them.
//!
//! ## Mapping Reference
//!
//! The full data-to-XML mapping is described in the [`format`] module.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - converting a struct and a literal
//! - **`macro.rs`** - building values with the data! macro
//! - **`lists.rs`** - list detection and list suffixes
//! - **`dynamic_values.rs`** - records, foreign documents and attributes
//! - **`custom_options.rs`** - root name, encoding, suffix and duplicate keys
//! - **`render.rs`** - rendering through a transformer
//!
//! Run any example with: `cargo run --example <name>`

pub mod classify;
pub mod convert;
pub mod dom;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod name;
pub mod options;
pub mod render;
pub mod sanitize;
pub mod ser;
pub mod value;

pub use classify::{classify, is_list_node, ForeignKind, Variant};
pub use convert::{generate, Converter, Generated};
pub use dom::{Document, NodeId};
pub use error::{Error, Result};
pub use map::DataMap;
pub use name::{is_valid_prefix, validate_prefix};
pub use options::{ConverterOptions, DuplicateKeyPolicy};
pub use render::{stylesheet_document, RenderMode, Transformer};
pub use sanitize::sanitize_key;
pub use ser::{to_value, ValueSerializer};
pub use value::{ForeignNode, Number, Record, Value};

use serde::Serialize;
use std::io;

/// Converts any `T: Serialize` into a document, attaching it below the root
/// element under `prefix`.
///
/// # Examples
///
/// ```rust
/// use domi::to_document;
///
/// let doc = to_document(&vec!["a", "b"], "letter").unwrap();
/// let root = doc.document_element().unwrap();
/// let wrapper = doc.child_elements(root).unwrap()[0];
/// assert_eq!(doc.name(wrapper).unwrap(), "letter-list");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or `prefix` is not a
/// valid node name.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_document<T>(value: &T, prefix: &str) -> Result<Document>
where
    T: ?Sized + Serialize,
{
    to_document_with_options(value, prefix, ConverterOptions::default())
}

/// Like [`to_document`], with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or converted.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_document_with_options<T>(
    value: &T,
    prefix: &str,
    options: ConverterOptions,
) -> Result<Document>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    let mut converter = Converter::with_options(options)?;
    converter.attach(&value, prefix, None)?;
    Ok(converter.into_document())
}

/// Serializes any `T: Serialize` to XML text.
///
/// # Examples
///
/// ```rust
/// use domi::to_string;
///
/// let xml = to_string(&("x", true), "pair").unwrap();
/// assert_eq!(
///     xml,
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
///      <root><pair-list><pair>x</pair><pair>TRUE</pair></pair-list></root>\n"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or converted.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T, prefix: &str) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, prefix, ConverterOptions::default())
}

/// Serializes any `T: Serialize` to XML text with custom options.
///
/// # Examples
///
/// ```rust
/// use domi::{to_string_with_options, ConverterOptions};
///
/// let options = ConverterOptions::new()
///     .with_root_name("data")
///     .with_list_suffix("s");
/// let xml = to_string_with_options(&[1, 2], "n", options).unwrap();
/// assert!(xml.ends_with("<data><ns><n>1</n><n>2</n></ns></data>\n"));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or converted.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, prefix: &str, options: ConverterOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_document_with_options(value, prefix, options)?.to_xml_string()
}

/// Serializes any `T: Serialize` as XML into a writer.
///
/// # Examples
///
/// ```rust
/// use domi::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &42, "answer").unwrap();
/// assert!(String::from_utf8(buffer).unwrap().contains("<answer>42</answer>"));
/// ```
///
/// # Errors
///
/// Returns an error if conversion fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T, prefix: &str) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_document(value, prefix)?.write_to(writer)
}
