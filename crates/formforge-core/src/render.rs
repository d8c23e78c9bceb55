//! Form and preview rendering
//!
//! [`render`] maps each field definition to a widget description; the
//! interactive and preview variants differ only in whether the widgets
//! accept input. [`FormSession`] is the submit side: it validates a value
//! map against the compiled schema and forwards it to an injected
//! [`SubmissionSink`], suppressing duplicate submissions while one is in
//! flight.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{FormError, Result};
use crate::field::{FieldDefinition, FieldType};
use crate::schema::{compile, FormSchema, ValueMap};

/// How widgets are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Live form: widgets accept input and wire into validation state
    Interactive,
    /// Read-only embed/preview: inert widgets
    Preview,
}

/// Number of points on a star-rating widget.
pub const STAR_RATING_MAX: u8 = 5;

/// The input control a field renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    /// Single-line text input
    TextInput,
    /// Numeric input
    NumberInput,
    /// Email input
    EmailInput,
    /// Multi-line text area
    TextArea,
    /// Clickable star row
    StarRating {
        /// Number of selectable stars
        max: u8,
    },
}

/// One rendered form control.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    /// Id of the originating field
    pub field_id: Uuid,
    /// Display label
    pub label: String,
    /// Control kind
    pub kind: WidgetKind,
    /// Placeholder text, where the control has one
    pub placeholder: Option<String>,
    /// Whether the required marker is shown
    pub required: bool,
    /// False for preview renders
    pub interactive: bool,
}

/// Map a field list to its widget tree.
pub fn render(fields: &[FieldDefinition], mode: RenderMode) -> Vec<Widget> {
    fields
        .iter()
        .map(|field| {
            let kind = match field.field_type {
                FieldType::Text => WidgetKind::TextInput,
                FieldType::Number => WidgetKind::NumberInput,
                FieldType::Email => WidgetKind::EmailInput,
                FieldType::MultilineText => WidgetKind::TextArea,
                FieldType::StarRating => WidgetKind::StarRating {
                    max: STAR_RATING_MAX,
                },
            };
            let placeholder = match kind {
                WidgetKind::StarRating { .. } => None,
                _ => Some(format!("Enter {}", field.name.to_lowercase())),
            };
            Widget {
                field_id: field.id,
                label: field.name.clone(),
                kind,
                placeholder,
                required: field.required,
                interactive: mode == RenderMode::Interactive,
            }
        })
        .collect()
}

/// External collaborator that persists a validated submission.
///
/// Constructed by the caller and passed in explicitly; the core never
/// reaches for an ambient client.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Persist one validated value map for a form.
    async fn deliver(&self, form_id: Uuid, values: &ValueMap) -> Result<()>;
}

/// Submit side of one rendered form instance.
///
/// Holds the compiled schema and the in-flight flag. The flag is scoped
/// to this instance only; two sessions for the same form do not share it.
pub struct FormSession {
    form_id: Uuid,
    schema: FormSchema,
    in_flight: AtomicBool,
}

impl FormSession {
    /// Compile a session for a form's current field list.
    pub fn new(form_id: Uuid, fields: &[FieldDefinition]) -> Self {
        Self {
            form_id,
            schema: compile(fields),
            in_flight: AtomicBool::new(false),
        }
    }

    /// The compiled schema, shared with the rendering side.
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Whether a submit is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate `values` and forward them to the sink.
    ///
    /// Returns [`FormError::SubmissionInFlight`] if a previous submit has
    /// not completed, and [`FormError::Validation`] with per-field errors
    /// on rejection. The in-flight flag clears when this call returns,
    /// success or failure.
    pub async fn submit(&self, values: &ValueMap, sink: &dyn SubmissionSink) -> Result<()> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        self.schema.validate(values).map_err(FormError::Validation)?;
        sink.deliver(self.form_id, values).await
    }
}

/// Clears the in-flight flag on drop, even when the sink errors.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| FormError::SubmissionInFlight)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
