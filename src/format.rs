//! The data-to-XML mapping
//!
//! This module documents how values are turned into elements, attributes and
//! text. It contains no code.
//!
//! # Node Names
//!
//! Every element the converter emits is named by a *prefix* matching
//! `/^[a-zA-Z][-a-zA-Z0-9_.]*$/`:
//!
//! - starts with an ASCII letter
//! - continues with letters, digits, `-`, `_` or `.`
//! - `user`, `order-line`, `v1.item` are valid; `1st`, `-x`, `my key`, `ns:tag` are not
//!
//! An invalid prefix passed by the caller aborts the conversion with
//! [`Error::InvalidName`](crate::Error::InvalidName). An invalid collection key
//! is not an error: it marks the collection as a list.
//!
//! # Scalars
//!
//! | Value | Element text |
//! |-------|--------------|
//! | String | the string |
//! | Integer / Float | decimal form, `2.5`, `-12` |
//! | Infinity / -Infinity / NaN | `INF`, `-INF`, `NAN` |
//! | Boolean | `TRUE` or `FALSE` |
//! | Null | nothing, `<prefix/>` |
//! | Date | RFC 3339, `2024-01-15T10:30:00+00:00` |
//! | BigInt | decimal digits |
//!
//! Markup characters are escaped on output:
//!
//! ```text
//! convert("fish & <chips>", "dish")
//! <dish>fish &amp; &lt;chips&gt;</dish>
//! ```
//!
//! # Collections
//!
//! A map whose keys are all valid prefixes produces one child per key, named
//! after the key:
//!
//! ```text
//! convert({"one": "uno", "two": "dos"}, "array")
//! <array><one>uno</one><two>dos</two></array>
//! ```
//!
//! A non-empty list, or a map with at least one invalid key, is a *list*. It is
//! wrapped in `prefix + list suffix` (default `-list`) and every entry whose key
//! is not a valid prefix repeats the parent prefix:
//!
//! ```text
//! convert(["one", ["two", "three"]], "array")
//! <array-list>
//!   <array>one</array>
//!   <array-list><array>two</array><array>three</array></array-list>
//! </array-list>
//! ```
//!
//! The suffix is applied once, where the list is found; children of a list are
//! classified on their own. An empty list has no keys at all, so it is not a
//! list and yields `<prefix/>`.
//!
//! # Attributes and Values
//!
//! A map with a non-null `attributes` or `values` entry is *attributed*:
//!
//! - the `values` entry becomes the element's text
//! - each entry of the `attributes` map becomes an attribute
//! - both reserved entries are removed before the remaining entries become
//!   children
//!
//! Both must hold scalars; a collection, record or node in either place is
//! [`Error::UnsupportedType`](crate::Error::UnsupportedType). Scalars use the
//! same text forms as elements, so a boolean attribute reads `TRUE` or
//! `FALSE`.
//!
//! ```text
//! convert({"attributes": {"id": 3}, "values": "text", "note": "x"}, "item")
//! <item id="3">text<note>x</note></item>
//! ```
//!
//! Attaching with the prefix `attributes` (in any case) sets the entries of
//! the value as attributes on the parent node instead of creating a child.
//! The entries are checked before any is set, so a rejected call leaves the
//! parent untouched.
//!
//! # Records
//!
//! A record is turned into a map before conversion. Field names that carry a
//! visibility marker (bytes outside `0x20..=0xFE`, as in `"\0User\0types"`)
//! are reduced to their trailing printable run, `types`, and moved to the end
//! of the map. Records nested inside the record are cleaned the same way.
//! Fields that collide after cleanup are resolved by the converter's
//! [`DuplicateKeyPolicy`](crate::DuplicateKeyPolicy).
//!
//! # Foreign Nodes
//!
//! A node from another document, a whole document, or another converter is
//! reduced to one node (the node itself, the document element, or the main
//! node) and deep-copied into the target document. When the copied node is
//! already named `prefix` it is used directly; otherwise it is wrapped:
//!
//! ```text
//! attach(<user>..</user>, "user")    =>  <user>..</user>
//! attach(<user>..</user>, "owner")   =>  <owner><user>..</user></owner>
//! ```
//!
//! # Rendering
//!
//! | Mode | Flag | Output |
//! |------|------|--------|
//! | View | 1 | reserved, rejected |
//! | Html | 2 | transformer output |
//! | Xml | 4 | serialized document |
//! | Json | 8 | reserved, rejected |
//!
//! In `Html` mode the transformer receives this stylesheet document alongside
//! the data document:
//!
//! ```text
//! <xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
//!   <xsl:include href="base.xsl"/>
//!   <xsl:include href="page.xsl"/>
//! </xsl:stylesheet>
//! ```
