//! Response viewer
//!
//! Renders stored submissions against the originating field list. This is
//! the inverse mapping of the form renderer: value in, display widget out.
//! Field lists drift after submissions exist, so a submission missing a
//! key renders that field as blank, and keys with no matching field are
//! ignored.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::field::{FieldDefinition, FieldType};
use crate::schema::ValueMap;

/// Character budget for a multiline value before it is truncated behind
/// a scroll affordance.
pub const MULTILINE_PREVIEW_CHARS: usize = 280;

/// One stored submission as read back from persistence.
#[derive(Debug, Clone)]
pub struct StoredSubmission {
    /// Submission id
    pub id: Uuid,
    /// Owning form id
    pub form_id: Uuid,
    /// Answers keyed by field name
    pub values: ValueMap,
    /// When the submission was recorded
    pub submitted_at: DateTime<Utc>,
}

impl StoredSubmission {
    /// Decode a stored value-map blob.
    ///
    /// A malformed blob degrades to an empty map; the card renders with
    /// every field blank rather than failing the whole page.
    pub fn decode(id: Uuid, form_id: Uuid, raw: &str, submitted_at: DateTime<Utc>) -> Self {
        let values = match serde_json::from_str(raw) {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(%err, submission = %id, "malformed stored submission blob");
                ValueMap::new()
            }
        };
        Self {
            id,
            form_id,
            values,
            submitted_at,
        }
    }
}

/// How one answer is displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    /// Plain text
    Text(String),
    /// Multiline text, truncated when over the preview budget
    Multiline {
        /// Visible text
        text: String,
        /// True when the original ran past the budget
        truncated: bool,
    },
    /// Star row, `filled` of `max` icons filled
    Stars {
        /// Filled icon count, clamped to `0..=max`
        filled: u8,
        /// Total icon count
        max: u8,
    },
    /// Field had no value in this submission
    Blank,
}

/// One field of one rendered response card.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseField {
    /// Field name
    pub name: String,
    /// Field type, for the icon beside the value
    pub field_type: FieldType,
    /// Formatted value
    pub value: DisplayValue,
}

/// One submission rendered as a read-only card.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseCard {
    /// Submission id
    pub submission_id: Uuid,
    /// When the submission was recorded
    pub submitted_at: DateTime<Utc>,
    /// One entry per field in the current field list, in field order
    pub fields: Vec<ResponseField>,
}

/// Render stored submissions as read-only cards against the current
/// field list.
pub fn render_responses(
    fields: &[FieldDefinition],
    submissions: &[StoredSubmission],
) -> Vec<ResponseCard> {
    submissions
        .iter()
        .map(|submission| ResponseCard {
            submission_id: submission.id,
            submitted_at: submission.submitted_at,
            fields: fields
                .iter()
                .map(|field| ResponseField {
                    name: field.name.clone(),
                    field_type: field.field_type,
                    value: display_value(field, submission.values.get(&field.name)),
                })
                .collect(),
        })
        .collect()
}

fn display_value(field: &FieldDefinition, value: Option<&Value>) -> DisplayValue {
    let value = match value {
        None | Some(Value::Null) => return DisplayValue::Blank,
        Some(v) => v,
    };
    match field.field_type {
        FieldType::StarRating => {
            let filled = value.as_i64().unwrap_or(0).clamp(0, 5) as u8;
            DisplayValue::Stars { filled, max: 5 }
        }
        FieldType::MultilineText => {
            let text = stringify(value);
            if text.chars().count() > MULTILINE_PREVIEW_CHARS {
                DisplayValue::Multiline {
                    text: text.chars().take(MULTILINE_PREVIEW_CHARS).collect(),
                    truncated: true,
                }
            } else {
                DisplayValue::Multiline {
                    text,
                    truncated: false,
                }
            }
        }
        FieldType::Text | FieldType::Email | FieldType::Number => {
            DisplayValue::Text(stringify(value))
        }
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
