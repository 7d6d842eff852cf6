//! Presence handling for free-text form fields.
//!
//! A field is present iff it holds at least one character. Whitespace-only text
//! counts as present; only the empty string collapses to `None`. Absent fields
//! serialize back as `""` so form clients can bind them directly.

use serde::{Deserialize, Deserializer, Serializer};

/// Converts a raw form value into its stored representation.
pub fn present(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(present))
}
