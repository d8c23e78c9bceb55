//! Form aggregate
//!
//! [`FormDefinition`] is the parent aggregate: name, description, visual
//! style, the ordered field list, and the `live` flag gating whether
//! submissions are accepted. The aggregate owns its fields exclusively;
//! the builder operations here are the only way to mutate them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FormError, Result};
use crate::field::{FieldDefinition, FieldType};

/// Default per-form field limit.
pub const DEFAULT_FIELD_LIMIT: usize = 5;
/// Default per-account project limit.
pub const DEFAULT_PROJECT_LIMIT: usize = 5;

/// Gradient applied when a form has no stored style or the stored style
/// fails to parse.
pub const DEFAULT_GRADIENT: &str = "linear-gradient(135deg, #667eea 0%, #764ba2 100%)";

/// Visual style of a form: a CSS gradient descriptor or an image URL.
///
/// Wire shape is `{"type": "gradient" | "image", "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FormStyle {
    /// CSS gradient descriptor
    Gradient(String),
    /// Background image URL
    Image(String),
}

impl Default for FormStyle {
    fn default() -> Self {
        FormStyle::Gradient(DEFAULT_GRADIENT.to_string())
    }
}

/// Partial update applied to a single field by the builder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldPatch {
    /// New display label
    pub name: Option<String>,
    /// New field type
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
    /// New required flag
    pub required: Option<bool>,
}

/// A named, styled aggregate of field definitions plus publish state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Form id
    pub id: Uuid,
    /// Owning account id
    pub owner_id: Uuid,
    /// Form name
    pub name: String,
    /// Form description
    pub description: String,
    /// Visual style
    pub style: FormStyle,
    /// Ordered field list
    pub fields: Vec<FieldDefinition>,
    /// Whether submissions are accepted
    pub live: bool,
    /// Opaque secret a submitter must present
    pub secret: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last mutation time
    pub updated_at: DateTime<Utc>,
}

impl FormDefinition {
    /// Create a draft form with no fields and a fresh secret.
    pub fn create(owner_id: Uuid, name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            description: description.into(),
            style: FormStyle::default(),
            fields: Vec::new(),
            live: false,
            secret: Uuid::new_v4().simple().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a new optional text field and return its id.
    ///
    /// `limit` is the per-form field cap for the owning account.
    pub fn add_field(&mut self, limit: usize) -> Result<Uuid> {
        if self.fields.len() >= limit {
            return Err(FormError::FieldLimitReached(limit));
        }
        let field = FieldDefinition::text(format!("Field {}", self.fields.len() + 1));
        let id = field.id;
        self.fields.push(field);
        self.touch();
        Ok(id)
    }

    /// Apply a partial update to the field with the given id.
    pub fn update_field(&mut self, id: Uuid, patch: FieldPatch) -> Result<()> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| FormError::FieldNotFound(id.to_string()))?;
        if let Some(name) = patch.name {
            field.name = name;
        }
        if let Some(ty) = patch.field_type {
            field.field_type = ty;
        }
        if let Some(required) = patch.required {
            field.required = required;
        }
        self.touch();
        Ok(())
    }

    /// Remove the field with the given id.
    pub fn remove_field(&mut self, id: Uuid) -> Result<()> {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != id);
        if self.fields.len() == before {
            return Err(FormError::FieldNotFound(id.to_string()));
        }
        self.touch();
        Ok(())
    }

    /// Move the field at `from` to position `to`, shifting the rest.
    ///
    /// This is the order a drag-and-drop produces: remove at the source
    /// index, insert at the destination index.
    pub fn reorder_fields(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.fields.len() {
            return Err(FormError::IndexOutOfBounds(from));
        }
        if to >= self.fields.len() {
            return Err(FormError::IndexOutOfBounds(to));
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        self.touch();
        Ok(())
    }

    /// Set whether the form accepts submissions.
    pub fn set_live(&mut self, live: bool) {
        self.live = live;
        self.touch();
    }

    /// Check a submitter-presented secret against the stored one.
    pub fn verify_secret(&self, presented: &str) -> Result<()> {
        if presented.is_empty() || presented != self.secret {
            return Err(FormError::InvalidSecret);
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Serialize a field list to the JSON array string the persistence
/// collaborator stores.
pub fn encode_fields(fields: &[FieldDefinition]) -> String {
    serde_json::to_string(fields).unwrap_or_else(|_| "[]".to_string())
}

/// Parse a stored field-list string.
///
/// A malformed blob degrades to an empty list; the worst case is a form
/// rendering with zero fields, never a crash.
pub fn decode_fields(raw: &str) -> Vec<FieldDefinition> {
    match serde_json::from_str(raw) {
        Ok(fields) => fields,
        Err(err) => {
            tracing::warn!(%err, "malformed stored field list, rendering empty form");
            Vec::new()
        }
    }
}

/// Serialize a style descriptor to its stored JSON string.
pub fn encode_style(style: &FormStyle) -> String {
    serde_json::to_string(style).unwrap_or_else(|_| "{}".to_string())
}

/// Parse a stored style string, degrading to the default gradient.
pub fn decode_style(raw: &str) -> FormStyle {
    match serde_json::from_str(raw) {
        Ok(style) => style,
        Err(err) => {
            tracing::warn!(%err, "malformed stored style, using default gradient");
            FormStyle::default()
        }
    }
}
