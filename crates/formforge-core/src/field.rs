//! Field definitions
//!
//! A [`FieldDefinition`] describes one question in a form: a display label,
//! a type from a closed set, and a required flag. Fields carry a stable
//! generated id used as the reconciliation key for edit, delete, and
//! reorder; the label (`name`) is only the submission-value lookup key.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// The closed set of field types a form can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    /// Single-line text input
    #[default]
    Text,
    /// Numeric input
    Number,
    /// Email address input
    Email,
    /// Multi-line text area
    MultilineText,
    /// 5-point star rating
    StarRating,
}

impl FieldType {
    /// Wire name used in persisted field lists.
    pub fn as_wire(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::MultilineText => "multiline-text",
            FieldType::StarRating => "star-rating",
        }
    }

    /// Parse a wire name.
    ///
    /// Unknown names degrade to [`FieldType::Text`] so that a field list
    /// written by a newer version still renders instead of crashing the
    /// form. The fallback is this explicit default arm, nothing else.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "text" => FieldType::Text,
            "number" => FieldType::Number,
            "email" => FieldType::Email,
            "multiline-text" => FieldType::MultilineText,
            "star-rating" => FieldType::StarRating,
            _ => FieldType::Text,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(FieldType::from_wire(&s))
    }
}

/// One question in a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Stable identity, unique within the owning form. Persisted alongside
    /// the field; legacy payloads without an id get a fresh one at decode.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Display label, also the submission-value lookup key
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether a value must be provided
    pub required: bool,
}

impl FieldDefinition {
    /// Create a field with a fresh id.
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            field_type,
            required,
        }
    }

    /// Create an optional text field, the builder default.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text, false)
    }
}
