//! Per-field type coercion for decoded XML text.
//!
//! These rules are the leaf of the decoder: each maps the raw text
//! content of one element to a typed value. They are deliberately
//! narrow — the wire format's quirks (notably the boolean rule) must
//! be reproduced exactly.

use chrono::{DateTime, Utc};

use crate::error::XmlError;

/// Coerce wire text to a boolean.
///
/// Exactly the literal `"true"` is true; every other text — including
/// `"false"`, `"TRUE"`, empty, or garbage — is false. The remote
/// service only ever emits lowercase `true`/`false`, and this
/// exact-match rule is what the wire format's consumers have always
/// relied on, so it never fails.
#[must_use]
pub fn flag(text: &str) -> bool {
    text == "true"
}

/// Coerce wire text to an integer, or fail with the field name and the
/// raw text.
pub fn int(field: &'static str, text: &str) -> Result<i32, XmlError> {
    text.parse::<i32>().map_err(|_| XmlError::Decode {
        field,
        value: text.to_string(),
    })
}

/// Parse wire text as an RFC 3339 / ISO 8601 timestamp.
pub fn timestamp(field: &'static str, text: &str) -> Result<DateTime<Utc>, XmlError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.fZ")
                .map(|ndt| ndt.and_utc())
        })
        .map_err(|_| XmlError::Decode {
            field,
            value: text.to_string(),
        })
}
