//! The recursive data-to-tree converter.
//!
//! A [`Converter`] owns a [`Document`] whose root element (the *main node*) is
//! created up front. [`Converter::attach`] converts a [`Value`] into a subtree
//! and appends it below the main node or any other node of the document.
//!
//! ## Mapping
//!
//! | Input | Output |
//! |-------|--------|
//! | scalar | `<prefix>text</prefix>` |
//! | `true` / `false` | `<prefix>TRUE</prefix>` / `<prefix>FALSE</prefix>` |
//! | map with valid keys | `<prefix><key>..</key>..</prefix>` |
//! | list, or map with an invalid key | `<prefix-list><prefix>..</prefix>..</prefix-list>` |
//! | map with `attributes` / `values` | attributes and text on the node itself |
//! | record | sanitized into a map first |
//! | foreign node | imported, wrapped in `<prefix>` unless already named `prefix` |
//!
//! ```rust
//! use domi::{data, Converter};
//!
//! let mut converter = Converter::new("root")?;
//! converter.attach(&data!(["one", "two"]), "array", None)?;
//!
//! assert_eq!(
//!     converter.to_xml_string()?,
//!     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
//!      <root><array-list><array>one</array><array>two</array></array-list></root>\n"
//! );
//! # Ok::<(), domi::Error>(())
//! ```

use crate::classify::{classify, is_list_node, Variant, ATTRIBUTES_KEY, VALUES_KEY};
use crate::name::{is_valid_prefix, is_valid_xml_name, validate_prefix};
use crate::options::ConverterOptions;
use crate::render::{render_document, RenderMode, Transformer};
use crate::sanitize::sanitize_record;
use crate::value::{ForeignNode, Record};
use crate::{DataMap, Document, Error, NodeId, Result, Value};
use std::io::Write;

/// Builds an XML document out of dynamically-typed data.
///
/// All conversions of one converter target the same document and run one
/// after another; the converter is not meant to be shared between threads
/// while it is being written to.
#[derive(Clone, Debug, PartialEq)]
pub struct Converter {
    document: Document,
    main_node: NodeId,
    options: ConverterOptions,
}

impl Converter {
    /// Creates a converter whose document root is named `root_name`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidName`] if `root_name` is not a valid prefix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use domi::Converter;
    ///
    /// let converter = Converter::new("catalog")?;
    /// let root = converter.main_node();
    /// assert_eq!(converter.document().name(root)?, "catalog");
    ///
    /// assert!(Converter::new("9lives").is_err());
    /// # Ok::<(), domi::Error>(())
    /// ```
    pub fn new(root_name: &str) -> Result<Self> {
        Self::with_options(ConverterOptions::new().with_root_name(root_name))
    }

    /// Creates a converter from a full set of options.
    pub fn with_options(options: ConverterOptions) -> Result<Self> {
        validate_prefix(&options.root_name)?;

        let mut document = Document::with_encoding(&options.encoding);
        let main_node = document.create_element(&options.root_name)?;
        document.append_root(main_node)?;

        log::debug!(
            "created converter with root '{}' ({})",
            options.root_name,
            options.encoding
        );

        Ok(Converter {
            document,
            main_node,
            options,
        })
    }

    /// The suffix appended to the prefix of list wrapper nodes.
    #[must_use]
    pub fn list_suffix(&self) -> &str {
        &self.options.list_suffix
    }

    /// Changes the list suffix for all following conversions.
    ///
    /// The suffix is checked when a wrapper name is built from it.
    pub fn set_list_suffix(&mut self, suffix: &str) {
        self.options.list_suffix = suffix.to_string();
    }

    /// The options this converter was built with.
    #[must_use]
    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// The document being built.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The document's root element.
    #[must_use]
    pub fn main_node(&self) -> NodeId {
        self.main_node
    }

    /// Consumes the converter, returning its document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Converts `data` and appends it to `parent`, or to the main node when no
    /// parent is given. Returns the node that was appended.
    ///
    /// A prefix of `attributes` (any case) is special: no node is created, the
    /// entries of `data` are set as attributes on the parent, and the parent is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use domi::{data, Converter};
    ///
    /// let mut converter = Converter::new("root")?;
    /// let user = converter.attach(&data!({ "name": "Ann" }), "user", None)?;
    /// converter.attach(&data!({ "id": 7 }), "Attributes", Some(user))?;
    ///
    /// let doc = converter.document();
    /// assert_eq!(doc.attribute(user, "id")?, Some("7"));
    /// assert_eq!(doc.node_to_string(user)?, r#"<user id="7"><name>Ann</name></user>"#);
    /// # Ok::<(), domi::Error>(())
    /// ```
    pub fn attach(&mut self, data: &Value, prefix: &str, parent: Option<NodeId>) -> Result<NodeId> {
        let parent = parent.unwrap_or(self.main_node);

        if prefix.eq_ignore_ascii_case(ATTRIBUTES_KEY) {
            self.set_attributes(parent, data)?;
            return Ok(parent);
        }

        let node = self.convert(data, prefix)?;
        self.document.append_child(parent, node)?;
        Ok(node)
    }

    /// Converts `data` into a detached subtree named after `prefix`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] if `prefix` or a computed wrapper name is invalid
    /// - [`Error::RecursionLimit`] if `data` nests deeper than the configured limit
    /// - [`Error::AmbiguousKey`] if a record collides under the `Reject` policy
    pub fn convert(&mut self, data: &Value, prefix: &str) -> Result<NodeId> {
        self.convert_at(data, prefix, 0)
    }

    fn convert_at(&mut self, data: &Value, prefix: &str, depth: usize) -> Result<NodeId> {
        if depth > self.options.max_depth {
            return Err(Error::recursion_limit(self.options.max_depth));
        }
        validate_prefix(prefix)?;

        let variant = classify(data);
        log::trace!("converting {:?} as '{}'", variant, prefix);

        let node_name = if is_list_node(data) {
            let name = format!("{}{}", prefix, self.options.list_suffix);
            validate_prefix(&name)?;
            log::debug!("'{}' holds a list, wrapping it in '{}'", prefix, name);
            name
        } else {
            prefix.to_string()
        };

        match (variant, data) {
            (Variant::AttributedCollection, Value::Map(map)) => {
                self.convert_attributed(map, prefix, &node_name, depth)
            }
            (Variant::Collection, Value::Map(map)) => {
                let node = self.document.create_element(&node_name)?;
                self.convert_entries(node, map, prefix, depth, false)?;
                Ok(node)
            }
            (Variant::Collection, Value::List(list)) => {
                let node = self.document.create_element(&node_name)?;
                for item in list {
                    let child = self.convert_at(item, prefix, depth + 1)?;
                    self.document.append_child(node, child)?;
                }
                Ok(node)
            }
            (Variant::ForeignNode(_), Value::Node(foreign)) => {
                self.convert_foreign(foreign, prefix, depth)
            }
            (Variant::StructuredRecord, Value::Record(record)) => {
                let map = self.sanitize(record, depth)?;
                self.convert_at(&Value::Map(map), prefix, depth + 1)
            }
            _ => self.document.create_element_with_text(&node_name, &data.to_text()),
        }
    }

    fn convert_attributed(
        &mut self,
        map: &DataMap,
        prefix: &str,
        node_name: &str,
        depth: usize,
    ) -> Result<NodeId> {
        let text = match map.get(VALUES_KEY).filter(|v| !v.is_null()) {
            Some(value) if !is_attribute_value(value) => {
                return Err(Error::unsupported_type(&format!(
                    "'{}' of '{}' must hold a scalar",
                    VALUES_KEY, prefix
                )))
            }
            Some(value) => value.to_text(),
            None => String::new(),
        };
        let node = self.document.create_element_with_text(node_name, &text)?;

        if let Some(attributes) = map.get(ATTRIBUTES_KEY).filter(|v| !v.is_null()) {
            self.set_attributes(node, attributes)?;
        }

        self.convert_entries(node, map, prefix, depth, true)?;
        Ok(node)
    }

    fn convert_entries(
        &mut self,
        node: NodeId,
        map: &DataMap,
        prefix: &str,
        depth: usize,
        skip_reserved: bool,
    ) -> Result<()> {
        for (key, item) in map {
            let key = key.as_str();
            if skip_reserved && (key == ATTRIBUTES_KEY || key == VALUES_KEY) {
                continue;
            }
            let child_prefix = if is_valid_prefix(key) { key } else { prefix };
            let child = self.convert_at(item, child_prefix, depth + 1)?;
            self.document.append_child(node, child)?;
        }
        Ok(())
    }

    fn convert_foreign(
        &mut self,
        foreign: &ForeignNode,
        prefix: &str,
        depth: usize,
    ) -> Result<NodeId> {
        let source = foreign.root()?;
        let nested = foreign.document().subtree_depth(source)?;
        if depth.saturating_add(nested) > self.options.max_depth {
            return Err(Error::recursion_limit(self.options.max_depth));
        }
        let imported = self.document.import_node(foreign.document(), source)?;

        if self.document.name(imported)? == prefix {
            return Ok(imported);
        }

        let wrapper = self.document.create_element(prefix)?;
        self.document.append_child(wrapper, imported)?;
        Ok(wrapper)
    }

    fn sanitize(&self, record: &Record, depth: usize) -> Result<DataMap> {
        let remaining = self.options.max_depth.saturating_sub(depth);
        sanitize_record(record, self.options.duplicate_keys, remaining)
            .map_err(|err| match err {
                Error::RecursionLimit { .. } => Error::recursion_limit(self.options.max_depth),
                other => other,
            })
    }

    fn set_attributes(&mut self, node: NodeId, data: &Value) -> Result<()> {
        let sanitized;
        let map = match data {
            Value::Map(map) => map,
            Value::Record(record) => {
                sanitized =
                    sanitize_record(record, self.options.duplicate_keys, self.options.max_depth)?;
                &sanitized
            }
            Value::Null => return Ok(()),
            other => {
                return Err(Error::unsupported_type(&format!(
                    "attributes must be a map or record, found {:?}",
                    other
                )))
            }
        };

        if !self.document.is_element(node)? {
            return Err(Error::custom("cannot set attributes on a text node"));
        }

        let mut checked = Vec::with_capacity(map.len());
        for (key, value) in map {
            if !is_valid_xml_name(key) {
                return Err(Error::invalid_name(key));
            }
            if !is_attribute_value(value) {
                return Err(Error::unsupported_type(&format!(
                    "attribute '{}' must hold a scalar",
                    key
                )));
            }
            checked.push((key.as_str(), value.to_text()));
        }

        for (key, text) in checked {
            self.document.set_attribute(node, key, &text)?;
        }
        Ok(())
    }

    /// Renders the document.
    ///
    /// [`RenderMode::Xml`] returns the serialized document and never calls the
    /// transformer. [`RenderMode::Html`] builds a stylesheet document including
    /// every non-empty name in `stylesheets` and returns what the transformer
    /// makes of it. The reserved modes fail with
    /// [`Error::UnsupportedRenderMode`].
    pub fn render(
        &self,
        transformer: &dyn Transformer,
        stylesheets: &[&str],
        mode: RenderMode,
    ) -> Result<String> {
        render_document(&self.document, Some(transformer), stylesheets, mode)
    }

    /// Serializes the document, XML declaration included.
    pub fn to_xml_string(&self) -> Result<String> {
        self.document.to_xml_string()
    }

    /// Writes the serialized document to `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        self.document.write_to(writer)
    }
}

fn is_attribute_value(value: &Value) -> bool {
    !matches!(
        value,
        Value::List(_) | Value::Map(_) | Value::Record(_) | Value::Node(_)
    )
}

/// Result of [`generate`]: the converter itself, or its rendered output.
#[derive(Clone, Debug, PartialEq)]
pub enum Generated {
    Converter(Converter),
    Rendered(String),
}

impl Generated {
    /// The converter, if nothing was rendered.
    #[must_use]
    pub fn into_converter(self) -> Option<Converter> {
        match self {
            Generated::Converter(converter) => Some(converter),
            Generated::Rendered(_) => None,
        }
    }

    /// The rendered output, if stylesheets were supplied.
    #[must_use]
    pub fn into_rendered(self) -> Option<String> {
        match self {
            Generated::Rendered(output) => Some(output),
            Generated::Converter(_) => None,
        }
    }
}

/// Builds a converter and optionally renders it in one call.
///
/// - `root` names the document root (default `root`); `data`, when given, is
///   attached below it under the same name
/// - with `stylesheets` left out the converter is returned; otherwise the
///   document is rendered in `mode` (default [`RenderMode::Html`])
///
/// # Examples
///
/// ```rust
/// use domi::{data, generate, RenderMode};
///
/// let xml = generate(Some("greeting"), Some(&data!("hi")), Some(&[]), Some(RenderMode::Xml), None)?
///     .into_rendered()
///     .unwrap();
/// assert!(xml.ends_with("<greeting><greeting>hi</greeting></greeting>\n"));
///
/// let converter = generate(None, None, None, None, None)?.into_converter().unwrap();
/// assert_eq!(converter.document().name(converter.main_node())?, "root");
/// # Ok::<(), domi::Error>(())
/// ```
pub fn generate(
    root: Option<&str>,
    data: Option<&Value>,
    stylesheets: Option<&[&str]>,
    mode: Option<RenderMode>,
    transformer: Option<&dyn Transformer>,
) -> Result<Generated> {
    let root = root.filter(|r| !r.is_empty()).unwrap_or(crate::options::DEFAULT_ROOT_NAME);
    let mut converter = Converter::new(root)?;

    if let Some(data) = data {
        converter.attach(data, root, None)?;
    }

    match stylesheets {
        Some(stylesheets) => {
            let mode = mode.unwrap_or_default();
            let output = render_document(converter.document(), transformer, stylesheets, mode)?;
            Ok(Generated::Rendered(output))
        }
        None => Ok(Generated::Converter(converter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use crate::options::DuplicateKeyPolicy;

    fn xml_of(converter: &Converter, node: NodeId) -> String {
        converter.document().node_to_string(node).unwrap()
    }

    #[test]
    fn test_scalar() {
        let mut converter = Converter::new("root").unwrap();
        let node = converter.convert(&Value::from("bar"), "foo").unwrap();
        assert_eq!(xml_of(&converter, node), "<foo>bar</foo>");
        assert_eq!(converter.document().parent(node).unwrap(), None);
    }

    #[test]
    fn test_booleans() {
        let mut converter = Converter::new("root").unwrap();
        let yes = converter.attach(&Value::from(true), "foo", None).unwrap();
        let no = converter.attach(&Value::from(false), "bar", None).unwrap();
        assert_eq!(xml_of(&converter, yes), "<foo>TRUE</foo>");
        assert_eq!(xml_of(&converter, no), "<bar>FALSE</bar>");
    }

    #[test]
    fn test_null_and_empty_collections() {
        let mut converter = Converter::new("root").unwrap();
        let null = converter.convert(&Value::Null, "nothing").unwrap();
        let empty = converter.convert(&data!([]), "items").unwrap();
        assert_eq!(xml_of(&converter, null), "<nothing/>");
        assert_eq!(xml_of(&converter, empty), "<items/>");
    }

    #[test]
    fn test_mixed_map_keys_repeat_parent_prefix() {
        let mut converter = Converter::new("root").unwrap();
        let node = converter
            .convert(&data!({ "name": "a", "0": "b" }), "entry")
            .unwrap();
        assert_eq!(
            xml_of(&converter, node),
            "<entry-list><name>a</name><entry>b</entry></entry-list>"
        );
    }

    #[test]
    fn test_attributed_collection() {
        let mut converter = Converter::new("root").unwrap();
        let node = converter
            .convert(
                &data!({ "attributes": { "id": 3, "lang": "en" }, "values": "text", "extra": "x" }),
                "item",
            )
            .unwrap();
        assert_eq!(
            xml_of(&converter, node),
            r#"<item id="3" lang="en">text<extra>x</extra></item>"#
        );
    }

    #[test]
    fn test_null_reserved_entries_are_ordinary() {
        let mut converter = Converter::new("root").unwrap();
        let node = converter
            .convert(&data!({ "attributes": null, "name": "x" }), "item")
            .unwrap();
        assert_eq!(
            xml_of(&converter, node),
            "<item><attributes/><name>x</name></item>"
        );
    }

    #[test]
    fn test_invalid_prefix() {
        let mut converter = Converter::new("root").unwrap();
        assert_eq!(
            converter.convert(&Value::from(1), "1st"),
            Err(Error::invalid_name("1st"))
        );
        assert_eq!(
            converter.attach(&Value::from(1), "", None),
            Err(Error::invalid_name(""))
        );
    }

    #[test]
    fn test_invalid_list_suffix() {
        let mut converter = Converter::new("root").unwrap();
        converter.set_list_suffix(" list");
        assert_eq!(
            converter.convert(&data!(["a"]), "item"),
            Err(Error::invalid_name("item list"))
        );
        assert!(converter.convert(&Value::from("a"), "item").is_ok());
    }

    #[test]
    fn test_record_conversion() {
        let record = Record::new("User")
            .with_field("\0User\0id", 5)
            .with_field("name", "Ann");
        let mut converter = Converter::new("root").unwrap();
        let node = converter.convert(&Value::from(record), "user").unwrap();
        assert_eq!(
            xml_of(&converter, node),
            "<user><name>Ann</name><id>5</id></user>"
        );
    }

    #[test]
    fn test_record_reject_policy() {
        let options = ConverterOptions::new().with_duplicate_keys(DuplicateKeyPolicy::Reject);
        let mut converter = Converter::with_options(options).unwrap();
        let record = Record::new("User")
            .with_field("id", 1)
            .with_field("\0User\0id", 2);
        assert_eq!(
            converter.convert(&Value::from(record), "user"),
            Err(Error::ambiguous_key("id"))
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut value = Value::from("leaf");
        for _ in 0..20 {
            value = Value::from(vec![value]);
        }
        let options = ConverterOptions::new().with_max_depth(8);
        let mut converter = Converter::with_options(options).unwrap();
        assert_eq!(
            converter.convert(&value, "n"),
            Err(Error::recursion_limit(8))
        );

        let mut converter = Converter::new("root").unwrap();
        assert!(converter.convert(&value, "n").is_ok());
    }

    #[test]
    fn test_attributes_escape_hatch_rejects_scalars() {
        let mut converter = Converter::new("root").unwrap();
        assert!(matches!(
            converter.attach(&Value::from("x"), "attributes", None),
            Err(Error::UnsupportedType(_))
        ));
        assert!(matches!(
            converter.attach(&data!({ "a": [1] }), "attributes", None),
            Err(Error::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_failed_attributes_leave_parent_untouched() {
        let mut converter = Converter::new("root").unwrap();
        let root = converter.main_node();
        converter.attach(&data!({ "keep": "yes" }), "attributes", None).unwrap();

        assert!(matches!(
            converter.attach(&data!({ "a": 1, "b": [1] }), "attributes", None),
            Err(Error::UnsupportedType(_))
        ));
        assert_eq!(
            converter.attach(&data!({ "a": 1, "bad name": 2 }), "attributes", None),
            Err(Error::invalid_name("bad name"))
        );
        assert_eq!(
            converter.document().attributes(root).unwrap(),
            vec![("keep", "yes")]
        );
    }

    #[test]
    fn test_boolean_attributes_use_element_text_form() {
        let mut converter = Converter::new("root").unwrap();
        let node = converter
            .convert(&data!({ "attributes": { "on": true }, "values": false }), "flag")
            .unwrap();
        assert_eq!(xml_of(&converter, node), r#"<flag on="TRUE">FALSE</flag>"#);
    }

    #[test]
    fn test_values_must_be_scalar() {
        let mut converter = Converter::new("root").unwrap();
        for value in [
            data!({ "values": { "x": 1 }, "attributes": { "id": 1 } }),
            data!({ "values": ["a", "b"] }),
            data!({ "values": (Record::new("Tag")) }),
            data!({ "values": (Document::parse("<x/>").unwrap()) }),
        ] {
            assert!(matches!(
                converter.convert(&value, "item"),
                Err(Error::UnsupportedType(_))
            ));
        }
    }

    #[test]
    fn test_foreign_document_depth_limit() {
        let depth = 20_000;
        let xml = format!("{}x{}", "<a>".repeat(depth), "</a>".repeat(depth));
        let deep = Value::from(Document::parse(&xml).unwrap());

        let mut converter = Converter::new("root").unwrap();
        assert_eq!(
            converter.attach(&deep, "a", None),
            Err(Error::recursion_limit(crate::options::DEFAULT_MAX_DEPTH))
        );
        assert!(converter.document().children(converter.main_node()).unwrap().is_empty());

        let options = ConverterOptions::new().with_max_depth(depth);
        let mut converter = Converter::with_options(options).unwrap();
        let node = converter.attach(&deep, "a", None).unwrap();
        assert_eq!(converter.document().subtree_depth(node).unwrap(), depth - 1);
        assert!(converter.to_xml_string().unwrap().contains(&xml));
    }

    #[test]
    fn test_generate_without_stylesheets() {
        let generated = generate(Some("doc"), Some(&data!({ "a": 1 })), None, None, None).unwrap();
        let converter = generated.into_converter().unwrap();
        let root = converter.main_node();
        assert_eq!(xml_of(&converter, root), "<doc><doc><a>1</a></doc></doc>");
    }

    #[test]
    fn test_generate_html_default() {
        let transformer = |_: &Document, source: &Document| -> Result<String> {
            Ok(format!("{} nodes", source.child_elements(source.document_element().unwrap())?.len()))
        };
        let out = generate(None, Some(&data!("x")), Some(&["a.xsl"]), None, Some(&transformer))
            .unwrap()
            .into_rendered()
            .unwrap();
        assert_eq!(out, "1 nodes");
    }
}
