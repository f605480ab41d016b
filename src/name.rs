//! Node name validation.
//!
//! Two grammars are checked here:
//!
//! - **Prefixes** (`^[A-Za-z][-A-Za-z0-9_.]*$`): the names the converter is
//!   willing to give the nodes it creates. A collection key that is not a valid
//!   prefix is evidence that the collection is a list.
//! - **XML names**: the looser check the document host applies to any element or
//!   attribute it is asked to create, so pre-built fragments such as
//!   `xsl:stylesheet` or `_id` can be reproduced.

use crate::{Error, Result};

/// Returns `true` if `name` can be used as a node name by the converter.
///
/// A prefix starts with an ASCII letter, followed by ASCII letters, digits,
/// `-`, `_` or `.`.
///
/// # Examples
///
/// ```rust
/// use domi::is_valid_prefix;
///
/// assert!(is_valid_prefix("user"));
/// assert!(is_valid_prefix("user-list"));
/// assert!(is_valid_prefix("a.b_c-9"));
/// assert!(!is_valid_prefix("0"));
/// assert!(!is_valid_prefix("-user"));
/// assert!(!is_valid_prefix(""));
/// ```
#[must_use]
pub fn is_valid_prefix(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        }
        _ => false,
    }
}

/// Fails with [`Error::InvalidName`] unless `name` is a valid prefix.
pub fn validate_prefix(name: &str) -> Result<()> {
    if is_valid_prefix(name) {
        Ok(())
    } else {
        Err(Error::invalid_name(name))
    }
}

/// Returns `true` if `name` is acceptable as an element or attribute name in a
/// host document.
#[must_use]
pub fn is_valid_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == ':' => chars
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '\u{B7}')),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_prefixes() {
        for name in ["a", "Z", "root", "array-list", "v1.2", "snake_case", "x-"] {
            assert!(is_valid_prefix(name), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_prefixes() {
        for name in ["", "1", "0abc", "_x", "-x", ".x", "a b", "a:b", "naïve", "a/b"] {
            assert!(!is_valid_prefix(name), "{name} should be invalid");
        }
    }

    #[test]
    fn test_validate_prefix() {
        assert!(validate_prefix("ok").is_ok());
        assert_eq!(validate_prefix("4"), Err(Error::invalid_name("4")));
    }

    #[test]
    fn test_xml_names() {
        assert!(is_valid_xml_name("xsl:stylesheet"));
        assert!(is_valid_xml_name("_id"));
        assert!(is_valid_xml_name("naïve"));
        assert!(!is_valid_xml_name("1st"));
        assert!(!is_valid_xml_name("a b"));
        assert!(!is_valid_xml_name(""));
    }
}
