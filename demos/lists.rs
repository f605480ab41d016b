//! How collections turn into list wrappers.
//!
//! Run with: cargo run --example lists

use domi::{data, is_list_node, Converter, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let samples: Vec<(&str, Value)> = vec![
        ("indexed list", data!(["one", "two", "three"])),
        ("named keys", data!({ "one": "uno", "two": "dos" })),
        ("one invalid key", data!({ "name": "a", "2nd": "b" })),
        ("nested lists", data!(["one", ["two", "three"]])),
        ("empty list", data!([])),
    ];

    for (label, value) in &samples {
        let mut converter = Converter::new("root")?;
        let node = converter.attach(value, "array", None)?;
        println!(
            "{:<16} list={:<5} {}",
            label,
            is_list_node(value),
            converter.document().node_to_string(node)?
        );
    }

    // The suffix can be changed per converter
    let mut converter = Converter::new("root")?;
    converter.set_list_suffix("-foobar");
    let node = converter.attach(&data!(["a", "b"]), "list", None)?;
    println!("\nWith suffix '-foobar': {}", converter.document().node_to_string(node)?);

    Ok(())
}
