//! Basic conversion of Rust data into an XML document.
//!
//! Run with: cargo run --example simple

use domi::{to_string, Converter};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
        },
    ];

    // Serialize straight to XML text
    let xml = to_string(&users, "user")?;
    println!("XML output:\n{}", xml);

    // The same, step by step
    let mut converter = Converter::new("root")?;
    let value = domi::to_value(&users)?;
    let node = converter.attach(&value, "user", None)?;
    println!(
        "Attached node: <{}> with {} children",
        converter.document().name(node)?,
        converter.document().child_elements(node)?.len()
    );

    Ok(())
}
