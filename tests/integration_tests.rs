use domi::{
    data, generate, to_document, to_value, Converter, ConverterOptions, Document, Error,
    Generated, NodeId, Record, RenderMode, Result, Value,
};
use serde::Serialize;

#[derive(Serialize)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
}

fn convert(data: &Value, prefix: &str) -> String {
    let mut converter = Converter::new("root").unwrap();
    let node = converter.attach(data, prefix, None).unwrap();
    converter.document().node_to_string(node).unwrap()
}

fn names(doc: &Document, node: NodeId) -> Vec<String> {
    doc.child_elements(node)
        .unwrap()
        .into_iter()
        .map(|child| doc.name(child).unwrap().to_string())
        .collect()
}

#[test]
fn test_scalar() {
    assert_eq!(convert(&data!("bar"), "foo"), "<foo>bar</foo>");
}

#[test]
fn test_booleans() {
    assert_eq!(convert(&data!(true), "foo"), "<foo>TRUE</foo>");
    assert_eq!(convert(&data!(false), "bar"), "<bar>FALSE</bar>");
}

#[test]
fn test_indexed_list() {
    let mut converter = Converter::new("root").unwrap();
    let node = converter
        .attach(&data!(["one", "two", "three"]), "array", None)
        .unwrap();
    let doc = converter.document();

    assert_eq!(doc.name(node).unwrap(), "array-list");
    let children = doc.child_elements(node).unwrap();
    assert_eq!(children.len(), 3);
    for (child, text) in children.iter().zip(["one", "two", "three"]) {
        assert_eq!(doc.name(*child).unwrap(), "array");
        assert_eq!(doc.text_content(*child).unwrap(), text);
    }
}

#[test]
fn test_named_collection() {
    let mut converter = Converter::new("root").unwrap();
    let node = converter
        .attach(&data!({ "one": "uno", "two": "dos" }), "array", None)
        .unwrap();
    let doc = converter.document();

    assert_eq!(doc.name(node).unwrap(), "array");
    assert_eq!(names(doc, node), ["one", "two"]);
}

#[test]
fn test_nested_lists() {
    assert_eq!(
        convert(&data!(["one", ["two", "three"]]), "array"),
        "<array-list><array>one</array>\
         <array-list><array>two</array><array>three</array></array-list>\
         </array-list>"
    );
}

#[test]
fn test_list_suffix() {
    let mut converter = Converter::new("root").unwrap();
    converter.set_list_suffix("-foobar");
    assert_eq!(converter.list_suffix(), "-foobar");

    let node = converter
        .attach(&data!(["one", "two", "three"]), "list", None)
        .unwrap();
    let doc = converter.document();
    assert_eq!(doc.name(node).unwrap(), "list-foobar");
    assert_eq!(names(doc, node), ["list", "list", "list"]);
}

#[test]
fn test_attach_defaults_to_main_node() {
    let mut converter = Converter::new("root").unwrap();
    let node = converter.attach(&data!("x"), "a", None).unwrap();
    assert_eq!(
        converter.document().parent(node).unwrap(),
        Some(converter.main_node())
    );
}

#[test]
fn test_attach_to_explicit_parent() {
    let mut converter = Converter::new("root").unwrap();
    let section = converter.attach(&data!({}), "section", None).unwrap();
    converter.attach(&data!("Hello"), "title", Some(section)).unwrap();
    converter.attach(&data!("Body"), "para", Some(section)).unwrap();

    assert_eq!(
        converter.document().node_to_string(converter.main_node()).unwrap(),
        "<root><section><title>Hello</title><para>Body</para></section></root>"
    );
}

#[test]
fn test_attributes_prefix_is_case_insensitive() {
    let mut converter = Converter::new("root").unwrap();
    let item = converter.attach(&data!("text"), "item", None).unwrap();
    let returned = converter
        .attach(&data!({ "id": 1, "class": "big" }), "ATTRIBUTES", Some(item))
        .unwrap();

    assert_eq!(returned, item);
    assert_eq!(
        converter.document().node_to_string(item).unwrap(),
        r#"<item id="1" class="big">text</item>"#
    );
}

#[test]
fn test_attributed_collection_reserved_keys_hidden() {
    let mut converter = Converter::new("root").unwrap();
    let node = converter
        .attach(
            &data!({
                "attributes": { "currency": "EUR" },
                "values": 12.5
            }),
            "price",
            None,
        )
        .unwrap();
    let doc = converter.document();

    assert!(doc.child_elements(node).unwrap().is_empty());
    assert_eq!(doc.attribute(node, "currency").unwrap(), Some("EUR"));
    assert_eq!(doc.text_content(node).unwrap(), "12.5");
}

#[test]
fn test_attributed_list() {
    assert_eq!(
        convert(
            &data!({ "attributes": { "count": 2 }, "0": "a", "1": "b" }),
            "item"
        ),
        r#"<item-list count="2"><item>a</item><item>b</item></item-list>"#
    );
}

#[test]
fn test_escaping() {
    assert_eq!(
        convert(&data!("fish & <chips>"), "dish"),
        "<dish>fish &amp; &lt;chips&gt;</dish>"
    );
    assert_eq!(
        convert(
            &data!({ "attributes": { "title": "say \"hi\"" } }),
            "quote"
        ),
        r#"<quote title="say &quot;hi&quot;"/>"#
    );
}

#[test]
fn test_invalid_prefixes() {
    for prefix in ["", "1abc", "-abc", "a b", "a:b", "é"] {
        let mut converter = Converter::new("root").unwrap();
        assert_eq!(
            converter.attach(&data!("x"), prefix, None),
            Err(Error::invalid_name(prefix)),
            "prefix {:?}",
            prefix
        );
    }
    assert!(matches!(
        Converter::new("bad root"),
        Err(Error::InvalidName { .. })
    ));
}

#[test]
fn test_invalid_keys_fall_back_to_prefix() {
    assert_eq!(
        convert(&data!({ "good": 1, "not good": 2, "3rd": 3 }), "entry"),
        "<entry-list><good>1</good><entry>2</entry><entry>3</entry></entry-list>"
    );
}

#[test]
fn test_foreign_node_same_name_not_wrapped() {
    let source = Document::parse("<user><name>Ann</name></user>").unwrap();
    let user = source.document_element().unwrap();

    assert_eq!(
        convert(&Value::element(source.clone(), user), "user"),
        "<user><name>Ann</name></user>"
    );
    assert_eq!(
        convert(&Value::element(source, user), "owner"),
        "<owner><user><name>Ann</name></user></owner>"
    );
}

#[test]
fn test_foreign_inner_node() {
    let source = Document::parse("<a><b x=\"1\"><c/></b></a>").unwrap();
    let a = source.document_element().unwrap();
    let b = source.child_elements(a).unwrap()[0];

    assert_eq!(
        convert(&Value::element(source, b), "b"),
        r#"<b x="1"><c/></b>"#
    );
}

#[test]
fn test_foreign_document_and_converter() {
    let doc = Document::parse("<?xml version=\"1.0\"?><menu><item>Tea</item></menu>").unwrap();
    assert_eq!(
        convert(&Value::from(doc), "menu"),
        "<menu><item>Tea</item></menu>"
    );

    let mut inner = Converter::new("inner").unwrap();
    inner.attach(&data!("v"), "k", None).unwrap();
    assert_eq!(
        convert(&Value::from(inner), "outer"),
        "<outer><inner><k>v</k></inner></outer>"
    );
}

#[test]
fn test_foreign_import_leaves_source_untouched() {
    let source = Document::parse("<user/>").unwrap();
    let before = source.clone();
    let mut converter = Converter::new("root").unwrap();
    converter
        .attach(&Value::from(source.clone()), "user", None)
        .unwrap();
    assert_eq!(source, before);
}

#[test]
fn test_empty_foreign_document() {
    let mut converter = Converter::new("root").unwrap();
    assert_eq!(
        converter.attach(&Value::from(Document::new()), "x", None),
        Err(Error::EmptyDocument)
    );
}

#[test]
fn test_record_sanitization() {
    let record = Record::new("User")
        .with_field("\0User\0types", data!(["admin", "dev"]))
        .with_field("name", "Ann")
        .with_field("\0*\0id", 9);

    assert_eq!(
        convert(&Value::from(record), "user"),
        "<user><name>Ann</name>\
         <types-list><types>admin</types><types>dev</types></types-list>\
         <id>9</id></user>"
    );
}

#[test]
fn test_nested_records_inside_lists() {
    let record = Record::new("Team").with_field(
        "members",
        vec![
            Value::from(Record::new("Member").with_field("\0Member\0name", "A")),
            Value::from(Record::new("Member").with_field("\0Member\0name", "B")),
        ],
    );

    assert_eq!(
        convert(&Value::from(record), "team"),
        "<team><members-list>\
         <members><name>A</name></members>\
         <members><name>B</name></members>\
         </members-list></team>"
    );
}

#[test]
fn test_nested_struct_via_serde() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![Product {
            sku: "WIDGET-001".to_string(),
            price: 29.99,
            quantity: 2,
        }],
    };

    let doc = to_document(&order, "order").unwrap();
    let root = doc.document_element().unwrap();
    let order_node = doc.child_elements(root).unwrap()[0];
    assert_eq!(names(&doc, order_node), ["order_id", "customer", "items-list"]);

    let customer = doc.child_elements(order_node).unwrap()[1];
    assert_eq!(
        doc.node_to_string(customer).unwrap(),
        "<customer><id>123</id><name>Alice</name><active>TRUE</active>\
         <tags-list><tags>vip</tags></tags-list></customer>"
    );
}

#[test]
fn test_idempotence() {
    let value = to_value(&User {
        id: 1,
        name: "Ann".to_string(),
        active: false,
        tags: vec!["a".to_string(), "b".to_string()],
    })
    .unwrap();

    let build = || {
        let mut converter = Converter::new("root").unwrap();
        converter.attach(&value, "user", None).unwrap();
        converter.into_document()
    };
    assert_eq!(build(), build());
    assert_eq!(build().to_xml_string().unwrap(), build().to_xml_string().unwrap());
}

#[test]
fn test_json_input() {
    let value: Value = serde_json::from_str(
        r#"{"name": "Widget", "sizes": [1, 2], "meta": {"attributes": {"id": "w1"}}}"#,
    )
    .unwrap();

    assert_eq!(
        convert(&value, "product"),
        r#"<product><name>Widget</name><sizes-list><sizes>1</sizes><sizes>2</sizes></sizes-list><meta id="w1"/></product>"#
    );
}

#[test]
fn test_render_xml_and_html() {
    let mut converter = Converter::new("page").unwrap();
    converter.attach(&data!("Hello"), "title", None).unwrap();

    let transformer = |xsl: &Document, source: &Document| -> Result<String> {
        let includes = xsl.child_elements(xsl.document_element().unwrap())?;
        let hrefs: Vec<_> = includes
            .iter()
            .map(|&n| xsl.attribute(n, "href").map(|h| h.unwrap_or_default().to_string()))
            .collect::<Result<_>>()?;
        let page = source.document_element().unwrap();
        Ok(format!("{}|{}", hrefs.join(","), source.text_content(page)?))
    };

    let xml = converter
        .render(&transformer, &[], RenderMode::Xml)
        .unwrap();
    assert_eq!(xml, converter.to_xml_string().unwrap());

    let html = converter
        .render(&transformer, &["base.xsl", "", "page.xsl"], RenderMode::Html)
        .unwrap();
    assert_eq!(html, "base.xsl,page.xsl|Hello");
}

#[test]
fn test_render_reserved_modes() {
    let converter = Converter::new("root").unwrap();
    let transformer = |_: &Document, _: &Document| -> Result<String> { Ok(String::new()) };
    assert_eq!(
        converter.render(&transformer, &[], RenderMode::Json),
        Err(Error::UnsupportedRenderMode(RenderMode::Json))
    );
    assert_eq!(
        converter.render(&transformer, &[], RenderMode::View),
        Err(Error::UnsupportedRenderMode(RenderMode::View))
    );
}

#[test]
fn test_transformer_error_propagates() {
    let converter = Converter::new("root").unwrap();
    let failing = |_: &Document, _: &Document| -> Result<String> {
        Err(Error::transform("missing template"))
    };
    assert_eq!(
        converter.render(&failing, &["x.xsl"], RenderMode::Html),
        Err(Error::transform("missing template"))
    );
}

#[test]
fn test_generate() {
    match generate(Some("data"), Some(&data!({ "a": 1 })), None, None, None).unwrap() {
        Generated::Converter(converter) => {
            assert_eq!(
                converter.document().node_to_string(converter.main_node()).unwrap(),
                "<data><data><a>1</a></data></data>"
            );
        }
        Generated::Rendered(_) => panic!("expected a converter"),
    }

    let xml = generate(None, None, Some(&[]), Some(RenderMode::Xml), None)
        .unwrap()
        .into_rendered()
        .unwrap();
    assert!(xml.ends_with("<root/>\n"));

    assert!(matches!(
        generate(None, None, Some(&["a.xsl"]), None, None),
        Err(Error::Transform(_))
    ));
}

#[test]
fn test_custom_encoding() {
    let options = ConverterOptions::new()
        .with_root_name("doc")
        .with_encoding("ISO-8859-1");
    let converter = Converter::with_options(options).unwrap();
    assert_eq!(
        converter.to_xml_string().unwrap(),
        "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<doc/>\n"
    );
}
