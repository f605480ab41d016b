//! Customizing a converter with ConverterOptions.
//!
//! Run with: cargo run --example custom_options

use domi::{
    to_string_with_options, Converter, ConverterOptions, DuplicateKeyPolicy, Record, Value,
};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    version: String,
    modules: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        modules: vec!["core".to_string(), "web".to_string()],
    };

    println!("Defaults:");
    println!("{}", domi::to_string(&config, "config")?);

    println!("Custom root, encoding and list suffix:");
    let options = ConverterOptions::new()
        .with_root_name("settings")
        .with_encoding("ISO-8859-1")
        .with_list_suffix("-set");
    println!("{}", to_string_with_options(&config, "config", options)?);

    // Two fields that clean up to the same name
    let record = Record::new("Child")
        .with_field("\0Parent\0secret", "from parent")
        .with_field("\0Child\0secret", "from child");

    println!("Last wins (default, logged at warn):");
    let mut converter = Converter::new("root")?;
    converter.attach(&Value::from(record.clone()), "child", None)?;
    println!("{}", converter.to_xml_string()?);

    println!("Reject:");
    let options = ConverterOptions::new().with_duplicate_keys(DuplicateKeyPolicy::Reject);
    let mut converter = Converter::with_options(options)?;
    match converter.attach(&Value::from(record), "child", None) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(err) => println!("rejected: {}", err),
    }

    Ok(())
}
