use domi::{data, Converter, DataMap, Document, Number, Record, Value};

#[test]
fn test_data_macro_null() {
    let value = data!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_data_macro_booleans() {
    let true_val = data!(true);
    assert_eq!(true_val, Value::Bool(true));

    let false_val = data!(false);
    assert_eq!(false_val, Value::Bool(false));
}

#[test]
fn test_data_macro_numbers() {
    let int_val = data!(42);
    assert_eq!(int_val, Value::Number(Number::Integer(42)));

    let float_val = data!(3.5);
    assert_eq!(float_val, Value::Number(Number::Float(3.5)));

    let negative_val = data!(-123);
    assert_eq!(negative_val, Value::Number(Number::Integer(-123)));
}

#[test]
fn test_data_macro_strings() {
    let string_val = data!("hello world");
    assert_eq!(string_val, Value::String("hello world".to_string()));

    let empty_string = data!("");
    assert_eq!(empty_string, Value::String(String::new()));
}

#[test]
fn test_data_macro_lists() {
    let empty_list = data!([]);
    assert_eq!(empty_list, Value::List(vec![]));

    let number_list = data!([1, 2, 3]);
    assert_eq!(
        number_list,
        Value::List(vec![
            Value::Number(Number::Integer(1)),
            Value::Number(Number::Integer(2)),
            Value::Number(Number::Integer(3)),
        ])
    );

    let mixed = data!(["a", 1, true, null]);
    assert_eq!(mixed.as_list().map(Vec::len), Some(4));
    assert_eq!(mixed.get("3"), Some(&Value::Null));
}

#[test]
fn test_data_macro_maps() {
    let empty = data!({});
    assert_eq!(empty, Value::Map(DataMap::new()));

    let user = data!({
        "name": "Alice",
        "age": 30,
        "active": true
    });
    let map = user.as_map().unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("name"), Some(&Value::from("Alice")));
    assert_eq!(map.get("age"), Some(&Value::from(30)));
    assert_eq!(map.get("active"), Some(&Value::Bool(true)));
}

#[test]
fn test_data_macro_preserves_key_order() {
    let value = data!({ "z": 1, "a": 2, "m": 3 });
    let keys: Vec<_> = value.as_map().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn test_data_macro_nested() {
    let value = data!({
        "attributes": { "id": "u1" },
        "values": "Alice",
        "roles": ["admin", ["nested"]]
    });

    assert_eq!(
        value.get("attributes").and_then(|a| a.get("id")),
        Some(&Value::from("u1"))
    );
    assert_eq!(
        value
            .get("roles")
            .and_then(|r| r.get("1"))
            .and_then(|n| n.get("0")),
        Some(&Value::from("nested"))
    );
}

#[test]
fn test_data_macro_embedded_values() {
    let record = Record::new("Tag").with_field("label", "x");
    let doc = Document::parse("<fragment/>").unwrap();
    let converter = Converter::new("other").unwrap();
    let name = String::from("owned");

    let value = data!({
        "record": (record),
        "doc": (doc),
        "converter": (converter),
        "name": (name)
    });

    assert!(value.get("record").map_or(false, Value::is_record));
    assert!(value.get("doc").map_or(false, Value::is_node));
    assert!(value.get("converter").map_or(false, Value::is_node));
    assert_eq!(value.get("name"), Some(&Value::from("owned")));
}

#[test]
fn test_data_macro_converts() {
    let mut converter = Converter::new("root").unwrap();
    let node = converter
        .attach(&data!({ "list": [1, 2], "flag": false }), "item", None)
        .unwrap();
    assert_eq!(
        converter.document().node_to_string(node).unwrap(),
        "<item><list-list><list>1</list><list>2</list></list-list><flag>FALSE</flag></item>"
    );
}
