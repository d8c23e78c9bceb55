//! Formforge core
//!
//! Domain logic for the Formforge feedback platform: field definitions,
//! the form aggregate, the schema compiler, form/preview rendering, and
//! the response viewer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        FORM PIPELINE                         │
//! │                                                              │
//! │  Builder ──► Vec<FieldDefinition> ──► persisted (JSON)       │
//! │                      │                                       │
//! │                      ▼                                       │
//! │              ┌───────────────┐                               │
//! │              │ schema::compile│  one validator per field     │
//! │              └───────┬───────┘                               │
//! │                      ▼                                       │
//! │   render() ──► widgets ──► FormSession::submit ──► sink      │
//! │                      │                                       │
//! │                      ▼                                       │
//! │          response::render_responses ──► cards                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure and backend-free: persistence and HTTP live in
//! the `formforge-api` crate, which injects a [`render::SubmissionSink`]
//! where delivery is needed.

#![warn(missing_docs)]

pub mod error;
pub mod field;
pub mod form;
pub mod render;
pub mod response;
pub mod schema;

pub use error::{FormError, Result};
pub use field::{FieldDefinition, FieldType};
pub use form::{FormDefinition, FormStyle};
pub use render::{FormSession, RenderMode, SubmissionSink, Widget, WidgetKind};
pub use response::{DisplayValue, ResponseCard, StoredSubmission};
pub use schema::{compile, FieldErrors, FormSchema, ValueMap};
