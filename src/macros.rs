/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects keep their key order. Anything that is not a literal `null`, `true`,
/// `false`, list or object goes through `Value::from`, so records, documents
/// and converters can be embedded as `(expr)`.
///
/// ```rust
/// use domi::{data, Record, Value};
///
/// let author = Record::new("Author").with_field("name", "Ann");
/// let book = data!({
///     "title": "Rust",
///     "tags": ["lang", "systems"],
///     "author": (author),
///     "draft": false
/// });
///
/// assert!(book.get("author").map_or(false, Value::is_record));
/// ```
#[macro_export]
macro_rules! data {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::data!($elem)),*])
    };

    ({}) => {
        $crate::Value::Map($crate::DataMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::DataMap::new();
        $(
            map.insert($key.to_string(), $crate::data!($value));
        )*
        $crate::Value::Map(map)
    }};

    ($s:expr) => {
        $crate::Value::from($s)
    };
}
