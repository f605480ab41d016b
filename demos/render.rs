//! Rendering a document through a transformer.
//!
//! The crate does not ship an XSLT engine. This demo plugs in a closure that
//! lists the included stylesheets and prints the data as plain text.
//!
//! Run with: cargo run --example render

use domi::{data, generate, Converter, Document, NodeId, RenderMode, Result};
use std::error::Error;

fn outline(doc: &Document, node: NodeId, depth: usize, out: &mut String) -> Result<()> {
    let children = doc.child_elements(node)?;
    if children.is_empty() {
        out.push_str(&format!(
            "{}{}: {}\n",
            "  ".repeat(depth),
            doc.name(node)?,
            doc.text_content(node)?
        ));
    } else {
        out.push_str(&format!("{}{}\n", "  ".repeat(depth), doc.name(node)?));
        for child in children {
            outline(doc, child, depth + 1, out)?;
        }
    }
    Ok(())
}

fn text_transformer(stylesheet: &Document, source: &Document) -> Result<String> {
    let mut out = String::new();
    if let Some(root) = stylesheet.document_element() {
        for include in stylesheet.child_elements(root)? {
            if let Some(href) = stylesheet.attribute(include, "href")? {
                out.push_str(&format!("[include {}]\n", href));
            }
        }
    }
    if let Some(root) = source.document_element() {
        outline(source, root, 0, &mut out)?;
    }
    Ok(out)
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut converter = Converter::new("page")?;
    converter.attach(
        &data!({ "title": "Report", "rows": ["alpha", "beta"] }),
        "content",
        None,
    )?;

    println!("XML mode:");
    println!("{}", converter.render(&text_transformer, &[], RenderMode::Xml)?);

    println!("HTML mode:");
    println!(
        "{}",
        converter.render(&text_transformer, &["layout.xsl", "report.xsl"], RenderMode::Html)?
    );

    println!("One-shot generate:");
    let output = generate(
        Some("greeting"),
        Some(&data!("hello")),
        Some(&["greeting.xsl"]),
        None,
        Some(&text_transformer),
    )?;
    if let Some(text) = output.into_rendered() {
        println!("{}", text);
    }

    match converter.render(&text_transformer, &[], RenderMode::Json) {
        Ok(_) => println!("JSON rendered"),
        Err(err) => println!("JSON mode: {}", err),
    }

    Ok(())
}
