//! Records, foreign documents and attributes.
//!
//! Run with: cargo run --example dynamic_values

use domi::{data, to_value, Converter, Document, Record, Value};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut converter = Converter::new("page")?;

    // Records from introspection may carry marked field names
    let session = Record::new("Session")
        .with_field("\0Session\0token", "abc123")
        .with_field("user", to_value(&User {
            id: 7,
            name: "Alice".to_string(),
            roles: vec!["admin".to_string(), "developer".to_string()],
        })?);
    converter.attach(&Value::from(session), "session", None)?;

    // Pre-built fragments are copied in
    let menu = Document::parse("<menu><item>Home</item><item>About</item></menu>")?;
    converter.attach(&Value::from(menu.clone()), "menu", None)?;
    converter.attach(&Value::from(menu), "navigation", None)?;

    // Attributes and text on a single element
    let link = converter.attach(
        &data!({ "attributes": { "href": "/docs", "rel": "help" }, "values": "Docs" }),
        "link",
        None,
    )?;
    converter.attach(&data!({ "target": "_blank" }), "attributes", Some(link))?;

    println!("{}", converter.to_xml_string()?);

    Ok(())
}
