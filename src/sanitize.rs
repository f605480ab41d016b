//! Record key sanitization.
//!
//! Records produced by object introspection can carry a visibility marker in
//! front of a field name: a run that contains non-printable bytes, such as
//! `"\0User\0types"` or `"\0*\0types"`. The real name is the trailing run of
//! printable bytes (`0x20..=0xFE`), `types` in both examples.
//!
//! Sanitizing a record turns it into a plain [`DataMap`]:
//!
//! - unmarked keys keep their position
//! - marked keys are moved to the end of the map under their clean name
//! - records nested anywhere below (inside lists and maps too) are sanitized the
//!   same way, so the converter only ever sees plain collections
//!
//! When two fields end up with the same name the [`DuplicateKeyPolicy`] decides:
//! the later field wins, or the record is rejected.

use crate::options::{DuplicateKeyPolicy, DEFAULT_MAX_DEPTH};
use crate::value::Record;
use crate::{DataMap, Error, Result, Value};

#[inline]
fn is_printable(byte: u8) -> bool {
    (0x20..=0xFE).contains(&byte)
}

/// Returns `true` if `key` contains a byte outside the printable range.
#[must_use]
pub fn is_marked_key(key: &str) -> bool {
    key.bytes().any(|b| !is_printable(b))
}

/// Strips a visibility marker from `key`, returning the trailing printable run.
///
/// Multi-byte UTF-8 characters are made of bytes in the printable range and
/// survive unchanged.
///
/// # Examples
///
/// ```rust
/// use domi::sanitize_key;
///
/// assert_eq!(sanitize_key("\0User\0types"), "types");
/// assert_eq!(sanitize_key("\0*\0name"), "name");
/// assert_eq!(sanitize_key("plain"), "plain");
/// assert_eq!(sanitize_key("\0Café\0prénom"), "prénom");
/// ```
#[must_use]
pub fn sanitize_key(key: &str) -> &str {
    // Non-printable bytes are ASCII control bytes (0xFF never occurs in UTF-8),
    // so the byte after one always starts a character.
    match key.bytes().rposition(|b| !is_printable(b)) {
        Some(pos) => &key[pos + 1..],
        None => key,
    }
}

impl Record {
    /// Sanitizes this record into a plain map, letting later fields win on
    /// collisions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use domi::{Record, Value};
    ///
    /// let record = Record::new("User")
    ///     .with_field("\0User\0types", "admin")
    ///     .with_field("name", "Alice");
    ///
    /// let map = record.to_map()?;
    /// let keys: Vec<_> = map.keys().map(String::as_str).collect();
    /// assert_eq!(keys, ["name", "types"]);
    /// # Ok::<(), domi::Error>(())
    /// ```
    pub fn to_map(&self) -> Result<DataMap> {
        sanitize_record(self, DuplicateKeyPolicy::LastWins, DEFAULT_MAX_DEPTH)
    }
}

/// Sanitizes `record` into a plain map, normalizing nested records on the way.
pub fn sanitize_record(
    record: &Record,
    policy: DuplicateKeyPolicy,
    max_depth: usize,
) -> Result<DataMap> {
    record_to_map(record, policy, max_depth, 0)
}

/// Returns a copy of `value` in which every record, at any depth, has been
/// sanitized into a plain map.
pub fn normalize(value: &Value, policy: DuplicateKeyPolicy, max_depth: usize) -> Result<Value> {
    normalize_at(value, policy, max_depth, 0)
}

fn record_to_map(
    record: &Record,
    policy: DuplicateKeyPolicy,
    max_depth: usize,
    depth: usize,
) -> Result<DataMap> {
    let mut map = DataMap::with_capacity(record.len());
    let mut marked = Vec::new();

    for (key, value) in record.fields() {
        if is_marked_key(key) {
            marked.push((sanitize_key(key), value));
        } else {
            let value = normalize_at(value, policy, max_depth, depth + 1)?;
            insert_field(&mut map, key, value, policy)?;
        }
    }

    for (key, value) in marked {
        let value = normalize_at(value, policy, max_depth, depth + 1)?;
        insert_field(&mut map, key, value, policy)?;
    }

    Ok(map)
}

fn insert_field(
    map: &mut DataMap,
    key: &str,
    value: Value,
    policy: DuplicateKeyPolicy,
) -> Result<()> {
    if map.contains_key(key) {
        match policy {
            DuplicateKeyPolicy::Reject => return Err(Error::ambiguous_key(key)),
            DuplicateKeyPolicy::LastWins => {
                log::warn!("record field '{}' overwrites an earlier field of the same name", key);
            }
        }
    }
    map.insert(key.to_string(), value);
    Ok(())
}

fn normalize_at(
    value: &Value,
    policy: DuplicateKeyPolicy,
    max_depth: usize,
    depth: usize,
) -> Result<Value> {
    if depth > max_depth {
        return Err(Error::recursion_limit(max_depth));
    }

    Ok(match value {
        Value::Record(record) => Value::Map(record_to_map(record, policy, max_depth, depth)?),
        Value::List(list) => Value::List(
            list.iter()
                .map(|v| normalize_at(v, policy, max_depth, depth + 1))
                .collect::<Result<_>>()?,
        ),
        Value::Map(map) => Value::Map(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), normalize_at(v, policy, max_depth, depth + 1)?)))
                .collect::<Result<_>>()?,
        ),
        other => other.clone(),
    })
}
