//! API models
//!
//! Wire shapes for the Formforge API. Projects persist their `fields`
//! and `style` as JSON-encoded strings, exactly as the external store
//! holds them; decoding back into typed lists happens through
//! `formforge-core`, which degrades malformed blobs instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use formforge_core::form::{decode_fields, decode_style, encode_fields, encode_style};
use formforge_core::response::DisplayValue;
use formforge_core::{FieldDefinition, FormDefinition, FormStyle, ValueMap};

/// Standard API response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(payload: T) -> Self {
        Self {
            success: true,
            message: "Success".to_string(),
            payload: Some(payload),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
        }
    }
}

// ============ Users ============

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDocument {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Maximum number of projects this account may own
    pub project_limit: usize,
    /// Maximum number of fields per form
    pub max_fields: usize,
    pub created_at: DateTime<Utc>,
}

/// Registration request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
}

/// Login request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
}

/// Issued bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthToken {
    pub token: String,
    pub user_id: Uuid,
}

// ============ Projects ============

/// Project as stored and returned to its owner.
///
/// `fields` and `style` are JSON strings; field ids are persisted inside
/// the `fields` blob, never re-derived from array position.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectDocument {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    /// JSON-encoded array of field definitions, in display order
    pub fields: String,
    /// JSON-encoded `{type, value}` style descriptor
    pub style: String,
    /// Opaque secret a submitter must present
    pub secret: String,
    /// Whether submissions are accepted
    pub live: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectDocument {
    /// Serialize a form aggregate into its stored shape.
    pub fn from_form(form: &FormDefinition) -> Self {
        Self {
            id: form.id,
            user_id: form.owner_id,
            name: form.name.clone(),
            description: form.description.clone(),
            fields: encode_fields(&form.fields),
            style: encode_style(&form.style),
            secret: form.secret.clone(),
            live: form.live,
            created_at: form.created_at,
            updated_at: form.updated_at,
        }
    }

    /// Decode back into the form aggregate. Malformed stored blobs
    /// degrade to an empty field list / default style.
    pub fn to_form(&self) -> FormDefinition {
        FormDefinition {
            id: self.id,
            owner_id: self.user_id,
            name: self.name.clone(),
            description: self.description.clone(),
            style: decode_style(&self.style),
            fields: decode_fields(&self.fields),
            live: self.live,
            secret: self.secret.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Project creation request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectCreate {
    pub name: String,
    pub description: String,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub style: Option<FormStyle>,
    #[serde(default)]
    pub live: bool,
}

/// Partial project update; `fields` replaces the whole list in the
/// order given, which is how reorders reach the store.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub fields: Option<Vec<FieldDefinition>>,
    #[schema(value_type = Option<Object>)]
    pub style: Option<FormStyle>,
    pub live: Option<bool>,
}

/// Public, decoded view of a project for embedding and preview.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PreviewDocument {
    pub name: String,
    pub description: String,
    #[schema(value_type = Object)]
    pub style: FormStyle,
    #[schema(value_type = Vec<Object>)]
    pub fields: Vec<FieldDefinition>,
    pub live: bool,
}

// ============ Feedback ============

/// Submission request body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeedbackSubmit {
    /// Must match the project's stored secret
    pub secret: String,
    /// Answers keyed by field name
    #[serde(default)]
    #[schema(value_type = Object)]
    pub data: ValueMap,
}

/// Stored submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackDocument {
    pub id: Uuid,
    pub project_id: Uuid,
    /// JSON-encoded value map
    pub data: String,
    pub created_at: DateTime<Utc>,
}

// ============ Response viewer ============

/// One submission rendered against the current field list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResponseCardDto {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub fields: Vec<ResponseFieldDto>,
    /// Raw submitted values, keyed by field name
    #[schema(value_type = Object)]
    pub values: ValueMap,
}

/// One field of a rendered response card.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResponseFieldDto {
    pub name: String,
    /// Wire name of the field type, for the icon beside the value
    pub field_type: String,
    pub value: DisplayDto,
}

/// Display form of one answer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayDto {
    Text { text: String },
    Multiline { text: String, truncated: bool },
    Stars { filled: u8, max: u8 },
    Blank,
}

impl From<DisplayValue> for DisplayDto {
    fn from(value: DisplayValue) -> Self {
        match value {
            DisplayValue::Text(text) => DisplayDto::Text { text },
            DisplayValue::Multiline { text, truncated } => DisplayDto::Multiline { text, truncated },
            DisplayValue::Stars { filled, max } => DisplayDto::Stars { filled, max },
            DisplayValue::Blank => DisplayDto::Blank,
        }
    }
}
