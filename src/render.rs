//! Rendering a finished document.
//!
//! Rendering is decoupled from conversion. In [`RenderMode::Xml`] the document
//! is serialized as-is. In [`RenderMode::Html`] a combined stylesheet document
//! is built from the requested stylesheet names and handed, together with the
//! data document, to a [`Transformer`]. The crate ships no XSLT engine; the
//! transformer is whatever the caller plugs in.
//!
//! ```rust
//! use domi::{data, Converter, Document, RenderMode, Result};
//!
//! let mut converter = Converter::new("page")?;
//! converter.attach(&data!({ "title": "Hello" }), "content", None)?;
//!
//! let transformer = |stylesheet: &Document, source: &Document| -> Result<String> {
//!     let root = stylesheet.document_element().unwrap();
//!     let includes = stylesheet.child_elements(root)?.len();
//!     let page = source.document_element().unwrap();
//!     Ok(format!("{} include(s): {}", includes, source.text_content(page)?))
//! };
//!
//! let html = converter.render(&transformer, &["page.xsl"], RenderMode::Html)?;
//! assert_eq!(html, "1 include(s): Hello");
//! # Ok::<(), domi::Error>(())
//! ```

use crate::{Document, Error, Result};

/// Namespace of XSLT elements in the combined stylesheet document.
pub const XSL_NAMESPACE: &str = "http://www.w3.org/1999/XSL/Transform";

/// Output format produced by [`Converter::render`](crate::Converter::render).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    /// Reserved; rejected by the renderer.
    View,
    /// Apply the stylesheets through a transformer.
    #[default]
    Html,
    /// Serialize the document tree unchanged.
    Xml,
    /// Reserved; rejected by the renderer.
    Json,
}

impl RenderMode {
    /// The legacy numeric flag of this mode.
    #[must_use]
    pub const fn as_flag(self) -> u8 {
        match self {
            RenderMode::View => 1,
            RenderMode::Html => 2,
            RenderMode::Xml => 4,
            RenderMode::Json => 8,
        }
    }

    /// Looks a mode up by its legacy numeric flag.
    #[must_use]
    pub const fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            1 => Some(RenderMode::View),
            2 => Some(RenderMode::Html),
            4 => Some(RenderMode::Xml),
            8 => Some(RenderMode::Json),
            _ => None,
        }
    }
}

/// Applies a combined stylesheet to a data document.
///
/// Any `Fn(&Document, &Document) -> Result<String>` is a transformer.
pub trait Transformer {
    fn transform(&self, stylesheet: &Document, source: &Document) -> Result<String>;
}

impl<F> Transformer for F
where
    F: Fn(&Document, &Document) -> Result<String>,
{
    fn transform(&self, stylesheet: &Document, source: &Document) -> Result<String> {
        self(stylesheet, source)
    }
}

/// Builds the stylesheet document that includes every named stylesheet.
///
/// Empty names are skipped.
///
/// # Examples
///
/// ```rust
/// use domi::stylesheet_document;
///
/// let xsl = stylesheet_document(&["base.xsl", "", "page.xsl"], "UTF-8")?;
/// let root = xsl.document_element().unwrap();
///
/// assert_eq!(xsl.name(root)?, "xsl:stylesheet");
/// assert_eq!(xsl.attribute(root, "version")?, Some("1.0"));
/// assert_eq!(xsl.child_elements(root)?.len(), 2);
/// # Ok::<(), domi::Error>(())
/// ```
pub fn stylesheet_document(stylesheets: &[&str], encoding: &str) -> Result<Document> {
    let mut doc = Document::with_encoding(encoding);
    let root = doc.create_element("xsl:stylesheet")?;
    doc.set_attribute(root, "version", "1.0")?;
    doc.set_attribute(root, "xmlns:xsl", XSL_NAMESPACE)?;
    doc.append_root(root)?;

    for href in stylesheets.iter().filter(|s| !s.is_empty()) {
        let include = doc.create_element("xsl:include")?;
        doc.set_attribute(include, "href", href)?;
        doc.append_child(root, include)?;
    }

    Ok(doc)
}

/// Renders `document` in the given mode.
///
/// `Html` fails with [`Error::Transform`] when no transformer is supplied.
pub fn render_document(
    document: &Document,
    transformer: Option<&dyn Transformer>,
    stylesheets: &[&str],
    mode: RenderMode,
) -> Result<String> {
    match mode {
        RenderMode::Xml => document.to_xml_string(),
        RenderMode::Html => {
            let transformer =
                transformer.ok_or_else(|| Error::transform("no transformer supplied"))?;
            let stylesheet = stylesheet_document(stylesheets, document.encoding())?;
            log::debug!(
                "rendering through {} stylesheet(s)",
                stylesheets.iter().filter(|s| !s.is_empty()).count()
            );
            transformer.transform(&stylesheet, document)
        }
        RenderMode::View | RenderMode::Json => Err(Error::UnsupportedRenderMode(mode)),
    }
}
