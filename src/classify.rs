//! Shape classification for converter input.
//!
//! [`classify`] decides which conversion branch a [`Value`] takes and
//! [`is_list_node`] decides whether a collection renders as a repeated-element
//! wrapper. Both look at the value only; neither needs a document.

use crate::name::is_valid_prefix;
use crate::value::ForeignNode;
use crate::Value;

/// Reserved collection entry whose members become attributes of the node.
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Reserved collection entry whose value becomes the node's text.
pub const VALUES_KEY: &str = "values";

/// The conversion branch a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Scalar,
    Collection,
    AttributedCollection,
    StructuredRecord,
    ForeignNode(ForeignKind),
    BooleanScalar,
}

/// Which kind of pre-built tree a foreign node came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForeignKind {
    /// Another converter's document.
    SelfDocument,
    Document,
    Node,
}

/// Classifies a value.
///
/// Collections are checked first, then the foreign tree kinds (a converter
/// before a plain document, since a converter is itself a document), then
/// records, then booleans. Everything else converts through its text form.
///
/// # Examples
///
/// ```rust
/// use domi::{classify, data, Value, Variant};
///
/// assert_eq!(classify(&Value::from("x")), Variant::Scalar);
/// assert_eq!(classify(&Value::from(true)), Variant::BooleanScalar);
/// assert_eq!(classify(&data!(["a", "b"])), Variant::Collection);
/// assert_eq!(
///     classify(&data!({ "attributes": { "id": 1 }, "name": "x" })),
///     Variant::AttributedCollection
/// );
/// ```
#[must_use]
pub fn classify(value: &Value) -> Variant {
    match value {
        Value::Map(map) => {
            let reserved = [ATTRIBUTES_KEY, VALUES_KEY]
                .iter()
                .any(|key| map.get(key).is_some_and(|v| !v.is_null()));
            if reserved {
                Variant::AttributedCollection
            } else {
                Variant::Collection
            }
        }
        Value::List(_) => Variant::Collection,
        Value::Node(foreign) => Variant::ForeignNode(match foreign.as_ref() {
            ForeignNode::Converter(_) => ForeignKind::SelfDocument,
            ForeignNode::Document(_) => ForeignKind::Document,
            ForeignNode::Element { .. } => ForeignKind::Node,
        }),
        Value::Record(_) => Variant::StructuredRecord,
        Value::Bool(_) => Variant::BooleanScalar,
        Value::Null
        | Value::Number(_)
        | Value::String(_)
        | Value::Date(_)
        | Value::BigInt(_) => Variant::Scalar,
    }
}

/// Returns `true` if `value` is a collection whose keys cannot all serve as
/// element names.
///
/// A non-empty list always qualifies, since its index keys start with a digit.
/// A map qualifies as soon as one key is not a valid prefix. Records are never
/// lists until they have been sanitized into a map.
///
/// # Examples
///
/// ```rust
/// use domi::{data, is_list_node};
///
/// assert!(is_list_node(&data!(["one", "two"])));
/// assert!(is_list_node(&data!({ "ok": 1, "not ok": 2 })));
/// assert!(!is_list_node(&data!({ "one": "uno", "two": "dos" })));
/// assert!(!is_list_node(&data!([])));
/// ```
#[must_use]
pub fn is_list_node(value: &Value) -> bool {
    match value {
        Value::List(list) => !list.is_empty(),
        Value::Map(map) => !map.keys().all(|key| is_valid_prefix(key)),
        _ => false,
    }
}
