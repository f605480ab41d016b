//! Using the data! macro to build input values.
//!
//! Run with: cargo run --example macro

use domi::{data, Converter, Value};
use std::error::Error;

fn show(value: &Value, prefix: &str) -> Result<(), Box<dyn Error>> {
    let mut converter = Converter::new("root")?;
    let node = converter.attach(value, prefix, None)?;
    println!("  {}", converter.document().node_to_string(node)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("Scalars:");
    show(&data!(null), "nothing")?;
    show(&data!(true), "flag")?;
    show(&data!(42), "answer")?;
    show(&data!("Hello, XML!"), "greeting")?;

    println!("\nLists:");
    show(&data!([1, 2, 3, 4, 5]), "n")?;
    show(&data!([1, "two", true, null]), "mixed")?;

    println!("\nMaps:");
    show(
        &data!({
            "id": 123,
            "name": "Alice",
            "email": "alice@example.com",
            "active": true
        }),
        "user",
    )?;

    let config = data!({
        "app": {
            "name": "MyApp",
            "version": "1.0.0"
        },
        "database": {
            "host": "localhost",
            "port": 5432
        },
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("\nNested structures:");
    show(&config, "config")?;

    if let Some(name) = config.get("app").and_then(|app| app.get("name")).and_then(Value::as_str) {
        println!("\nApp name: {}", name);
    }

    Ok(())
}
