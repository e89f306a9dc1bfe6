//! Entity ID and name utilities.
//!
//! Entity IDs look like `syn123`. Entity names are restricted to a small
//! ASCII alphabet and a maximum length; [`sanitize_entity_name`] folds
//! arbitrary text into that alphabet.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::query::to_value;

/// Maximum length of an entity name, in characters.
pub const ENTITY_NAME_MAX_LEN: usize = 256;

/// Punctuation allowed in entity names besides letters and digits.
pub const ENTITY_NAME_PUNCTUATION: &str = " _-.+'(),";

/// Default replacement for disallowed name characters.
pub const DEFAULT_REPLACEMENT: &str = "_";

static SYNAPSE_ID: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)^syn[0-9]+$").expect("Invalid entity ID regex")
});

/// Returns whether `value` is formatted as an entity ID.
///
/// Surrounding whitespace is ignored and the `syn` prefix is matched
/// case-insensitively. Whether the entity exists is not checked.
///
/// # Examples
///
/// ```
/// use synapsis_core::util::ids::is_synapse_id;
///
/// assert!(is_synapse_id("syn123"));
/// assert!(is_synapse_id("  SYN42 "));
/// assert!(!is_synapse_id("syn"));
/// assert!(!is_synapse_id("syn12a"));
/// ```
pub fn is_synapse_id(value: &str) -> bool {
    SYNAPSE_ID.is_match(value.trim())
}

/// Extracts an entity ID from an object, a string, or a number.
///
/// Objects yield their `id` field. Strings are returned trimmed and numbers
/// as-is. Anything else is a usage error.
pub fn id_of<T: Serialize + ?Sized>(obj: &T) -> Result<Value> {
    match to_value(obj)? {
        Value::Object(map) => match map.get("id") {
            Some(id @ (Value::String(_) | Value::Number(_))) => Ok(id.clone()),
            _ => Err(Error::usage("object has no usable 'id' field")),
        },
        Value::String(s) => Ok(Value::String(s.trim().to_string())),
        n @ Value::Number(_) => Ok(n),
        other => Err(Error::usage(format!("cannot take an entity ID from {other}"))),
    }
}

/// A sanitized entity name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedName {
    /// The name with disallowed characters replaced.
    pub name: String,
    /// Each distinct character that was replaced, in first-seen order.
    pub replaced: Vec<char>,
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || ENTITY_NAME_PUNCTUATION.contains(c)
}

/// Makes `name` valid as an entity or file name.
///
/// The name is NFKD-normalized and non-ASCII remnants are dropped, so
/// accented letters keep their base letter. Any other disallowed character
/// is replaced by `replace`, which may be empty to remove it outright.
///
/// Fails with [`Error::InvalidName`] when the result is longer than
/// [`ENTITY_NAME_MAX_LEN`].
///
/// # Examples
///
/// ```
/// use synapsis_core::util::ids::sanitize_entity_name;
///
/// let clean = sanitize_entity_name("abc.)(%&^%$^(*&.txt", "_").unwrap();
/// assert_eq!(clean.name, "abc.)(______(__.txt");
///
/// let clean = sanitize_entity_name("Café: v2", "").unwrap();
/// assert_eq!(clean.name, "Cafe v2");
/// assert_eq!(clean.replaced, vec![':']);
/// ```
pub fn sanitize_entity_name(name: &str, replace: &str) -> Result<SanitizedName> {
    let mut clean = String::with_capacity(name.len());
    let mut replaced: Vec<char> = Vec::new();

    for c in name.nfkd().filter(char::is_ascii) {
        if is_allowed(c) {
            clean.push(c);
        } else {
            clean.push_str(replace);
            if !replaced.contains(&c) {
                replaced.push(c);
            }
        }
    }

    let len = clean.chars().count();
    if len > ENTITY_NAME_MAX_LEN {
        return Err(Error::invalid_name(format!(
            "entity name exceeds limit of {ENTITY_NAME_MAX_LEN} ({len}): {clean}"
        )));
    }

    Ok(SanitizedName {
        name: clean,
        replaced,
    })
}
