//! The document host: an in-memory XML tree the converter builds into.
//!
//! A [`Document`] owns every node created through it. Nodes are addressed by
//! [`NodeId`] handles, which are only meaningful for the document that issued
//! them; a node from another document has to be copied in with
//! [`Document::import_node`] before it can be attached.
//!
//! Text and attribute values are stored raw and escaped when the document is
//! written out.
//!
//! ```rust
//! use domi::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.create_element("root")?;
//! doc.append_root(root)?;
//!
//! let greeting = doc.create_element_with_text("greeting", "fish & chips")?;
//! doc.set_attribute(greeting, "lang", "en")?;
//! doc.append_child(root, greeting)?;
//!
//! assert_eq!(
//!     doc.node_to_string(root)?,
//!     r#"<root><greeting lang="en">fish &amp; chips</greeting></root>"#
//! );
//! # Ok::<(), domi::Error>(())
//! ```

use crate::name::is_valid_xml_name;
use crate::{Error, Result};
use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

/// Handle to a node inside a [`Document`].
///
/// A handle is an index into its document's arena. Using it with another
/// document is only caught when the index is out of range there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug, PartialEq)]
enum NodeKind {
    Element {
        name: String,
        attributes: IndexMap<String, String>,
    },
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An XML document tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
    version: String,
    encoding: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty version 1.0, UTF-8 document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_encoding("UTF-8")
    }

    /// Creates an empty document that declares the given character encoding.
    #[must_use]
    pub fn with_encoding(encoding: &str) -> Self {
        Document {
            nodes: Vec::new(),
            root: None,
            version: "1.0".to_string(),
            encoding: encoding.to_string(),
        }
    }

    /// The encoding written into the XML declaration.
    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// The XML version written into the XML declaration.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The document's root element, if one has been attached.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.root
    }

    fn data(&self, node: NodeId) -> Result<&NodeData> {
        self.nodes.get(node.0).ok_or(Error::UnknownNode(node))
    }

    fn data_mut(&mut self, node: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(node.0).ok_or(Error::UnknownNode(node))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Creates a detached, empty element.
    pub fn create_element(&mut self, name: &str) -> Result<NodeId> {
        if !is_valid_xml_name(name) {
            return Err(Error::invalid_name(name));
        }
        Ok(self.push(NodeKind::Element {
            name: name.to_string(),
            attributes: IndexMap::new(),
        }))
    }

    /// Creates a detached element holding `text`. Empty text yields an empty element.
    pub fn create_element_with_text(&mut self, name: &str, text: &str) -> Result<NodeId> {
        let element = self.create_element(name)?;
        if !text.is_empty() {
            let text = self.create_text(text);
            self.append_child(element, text)?;
        }
        Ok(element)
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Sets (or replaces) an attribute on an element.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        if !is_valid_xml_name(name) {
            return Err(Error::invalid_name(name));
        }
        match &mut self.data_mut(node)?.kind {
            NodeKind::Element { attributes, .. } => {
                attributes.insert(name.to_string(), value.to_string());
                Ok(())
            }
            NodeKind::Text(_) => Err(Error::custom("cannot set an attribute on a text node")),
        }
    }

    /// Makes `node` the document element.
    pub fn append_root(&mut self, node: NodeId) -> Result<()> {
        if self.root.is_some() {
            return Err(Error::custom("document already has a root element"));
        }
        if !self.is_element(node)? {
            return Err(Error::custom("document root must be an element"));
        }
        self.detach(node)?;
        self.root = Some(node);
        Ok(())
    }

    /// Appends `child` as the last child of `parent`, moving it out of its
    /// current position if it is already attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.is_element(parent)? {
            return Err(Error::custom("text nodes cannot have children"));
        }
        self.data(child)?;

        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                return Err(Error::custom(
                    "cannot append a node to itself or one of its descendants",
                ));
            }
            ancestor = self.data(current)?.parent;
        }

        self.detach(child)?;
        self.data_mut(child)?.parent = Some(parent);
        self.data_mut(parent)?.children.push(child);
        Ok(())
    }

    fn detach(&mut self, node: NodeId) -> Result<()> {
        if self.root == Some(node) {
            self.root = None;
        }
        if let Some(old_parent) = self.data_mut(node)?.parent.take() {
            self.data_mut(old_parent)?.children.retain(|c| *c != node);
        }
        Ok(())
    }

    /// Copies `node` and all of its descendants out of `source` into this
    /// document. The copy is detached.
    pub fn import_node(&mut self, source: &Document, node: NodeId) -> Result<NodeId> {
        let copy = self.push(source.data(node)?.kind.clone());
        let mut pending = vec![(node, copy)];

        while let Some((original, parent)) = pending.pop() {
            for &child in &source.data(original)?.children {
                let imported = self.push(source.data(child)?.kind.clone());
                self.link(parent, imported);
                pending.push((child, imported));
            }
        }
        Ok(copy)
    }

    /// Number of element levels below `node`; zero for a node without
    /// element children.
    pub fn subtree_depth(&self, node: NodeId) -> Result<usize> {
        let mut deepest = 0;
        let mut pending = vec![(node, 0)];
        while let Some((current, level)) = pending.pop() {
            deepest = deepest.max(level);
            for &child in &self.data(current)?.children {
                if self.is_element(child)? {
                    pending.push((child, level + 1));
                }
            }
        }
        Ok(deepest)
    }

    // Appends a freshly created, detached node. No ancestor walk is needed.
    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Returns `true` if `node` is an element.
    pub fn is_element(&self, node: NodeId) -> Result<bool> {
        Ok(matches!(self.data(node)?.kind, NodeKind::Element { .. }))
    }

    /// The node name: the tag name for elements, `#text` for text nodes.
    pub fn name(&self, node: NodeId) -> Result<&str> {
        match &self.data(node)?.kind {
            NodeKind::Element { name, .. } => Ok(name),
            NodeKind::Text(_) => Ok("#text"),
        }
    }

    /// The node's parent, if it is attached below an element.
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>> {
        Ok(self.data(node)?.parent)
    }

    /// All children of `node`, in document order.
    pub fn children(&self, node: NodeId) -> Result<&[NodeId]> {
        Ok(&self.data(node)?.children)
    }

    /// The element children of `node`, in document order.
    pub fn child_elements(&self, node: NodeId) -> Result<Vec<NodeId>> {
        let mut elements = Vec::new();
        for &child in self.children(node)? {
            if self.is_element(child)? {
                elements.push(child);
            }
        }
        Ok(elements)
    }

    /// Looks up an attribute value.
    pub fn attribute(&self, node: NodeId, name: &str) -> Result<Option<&str>> {
        match &self.data(node)?.kind {
            NodeKind::Element { attributes, .. } => Ok(attributes.get(name).map(String::as_str)),
            NodeKind::Text(_) => Ok(None),
        }
    }

    /// The attributes of `node`, in the order they were first set.
    pub fn attributes(&self, node: NodeId) -> Result<Vec<(&str, &str)>> {
        match &self.data(node)?.kind {
            NodeKind::Element { attributes, .. } => Ok(attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect()),
            NodeKind::Text(_) => Ok(Vec::new()),
        }
    }

    /// Concatenated text of `node` and all of its descendants.
    pub fn text_content(&self, node: NodeId) -> Result<String> {
        let mut out = String::new();
        self.collect_text(node, &mut out)?;
        Ok(out)
    }

    fn collect_text(&self, node: NodeId, out: &mut String) -> Result<()> {
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            let data = self.data(current)?;
            if let NodeKind::Text(text) = &data.kind {
                out.push_str(text);
            }
            pending.extend(data.children.iter().rev());
        }
        Ok(())
    }

    /// Serializes the whole document, XML declaration included.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use domi::Document;
    ///
    /// let mut doc = Document::new();
    /// let root = doc.create_element("root")?;
    /// doc.append_root(root)?;
    ///
    /// assert_eq!(
    ///     doc.to_xml_string()?,
    ///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root/>\n"
    /// );
    /// # Ok::<(), domi::Error>(())
    /// ```
    pub fn to_xml_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer).map_err(Error::xml)
    }

    /// Writes the whole document, XML declaration included.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = Writer::new(writer);
        writer
            .write_event(Event::Decl(BytesDecl::new(
                &self.version,
                Some(&self.encoding),
                None,
            )))
            .map_err(Error::xml)?;
        writer.get_mut().write_all(b"\n").map_err(|e| Error::io(&e.to_string()))?;

        if let Some(root) = self.root {
            self.write_node(&mut writer, root)?;
            writer.get_mut().write_all(b"\n").map_err(|e| Error::io(&e.to_string()))?;
        }
        Ok(())
    }

    /// Serializes a single node and its descendants, without a declaration.
    pub fn node_to_string(&self, node: NodeId) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_node(&mut writer, node)?;
        String::from_utf8(writer.into_inner()).map_err(Error::xml)
    }

    fn write_node<W: Write>(&self, writer: &mut Writer<W>, node: NodeId) -> Result<()> {
        enum Step<'a> {
            Open(NodeId),
            Close(&'a str),
        }

        let mut pending = vec![Step::Open(node)];
        while let Some(step) = pending.pop() {
            let current = match step {
                Step::Open(current) => current,
                Step::Close(name) => {
                    writer
                        .write_event(Event::End(BytesEnd::new(name)))
                        .map_err(Error::xml)?;
                    continue;
                }
            };

            let data = self.data(current)?;
            match &data.kind {
                NodeKind::Text(text) => {
                    writer
                        .write_event(Event::Text(BytesText::new(text)))
                        .map_err(Error::xml)?;
                }
                NodeKind::Element { name, attributes } => {
                    let mut start = BytesStart::new(name.as_str());
                    for (key, value) in attributes {
                        start.push_attribute((key.as_str(), value.as_str()));
                    }

                    if data.children.is_empty() {
                        writer.write_event(Event::Empty(start)).map_err(Error::xml)?;
                    } else {
                        writer.write_event(Event::Start(start)).map_err(Error::xml)?;
                        pending.push(Step::Close(name));
                        pending.extend(data.children.iter().rev().map(|&c| Step::Open(c)));
                    }
                }
            }
        }
        Ok(())
    }

    /// Builds a document from XML text.
    ///
    /// Comments, processing instructions and the doctype are dropped;
    /// whitespace-only text between elements is ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use domi::Document;
    ///
    /// let doc = Document::parse(r#"<user id="7"><name>Alice</name></user>"#)?;
    /// let root = doc.document_element().unwrap();
    ///
    /// assert_eq!(doc.name(root)?, "user");
    /// assert_eq!(doc.attribute(root, "id")?, Some("7"));
    /// assert_eq!(doc.text_content(root)?, "Alice");
    /// # Ok::<(), domi::Error>(())
    /// ```
    pub fn parse(xml: &str) -> Result<Document> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut doc = Document::new();
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event().map_err(Error::xml)? {
                Event::Decl(decl) => {
                    if let Ok(version) = decl.version() {
                        doc.version = String::from_utf8_lossy(&version).into_owned();
                    }
                    if let Some(Ok(encoding)) = decl.encoding() {
                        doc.encoding = String::from_utf8_lossy(&encoding).into_owned();
                    }
                }
                Event::Start(start) => {
                    let element = doc.parsed_element(&start)?;
                    doc.attach_parsed(&stack, element)?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = doc.parsed_element(&start)?;
                    doc.attach_parsed(&stack, element)?;
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(Error::xml)?;
                    doc.parsed_text(&stack, &text)?;
                }
                Event::CData(cdata) => {
                    let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    doc.parsed_text(&stack, &text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::xml("unexpected end of input: unclosed element"));
        }
        Ok(doc)
    }

    fn parsed_element(&mut self, start: &BytesStart<'_>) -> Result<NodeId> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(Error::xml)?
            .to_string();
        let element = self.create_element(&name)?;
        for attr in start.attributes() {
            let attr = attr.map_err(Error::xml)?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(Error::xml)?
                .to_string();
            let value = attr.unescape_value().map_err(Error::xml)?;
            self.set_attribute(element, &key, &value)?;
        }
        Ok(element)
    }

    fn attach_parsed(&mut self, stack: &[NodeId], node: NodeId) -> Result<()> {
        match stack.last() {
            Some(&parent) => {
                self.link(parent, node);
                Ok(())
            }
            None => self.append_root(node),
        }
    }

    fn parsed_text(&mut self, stack: &[NodeId], text: &str) -> Result<()> {
        match stack.last() {
            Some(&parent) => {
                let node = self.create_text(text);
                self.link(parent, node);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(Error::xml("text outside of the root element")),
        }
    }
}
