//! Public submission endpoint
//!
//! Accepts one feedback submission for a live project. The caller must
//! present the project secret; values are validated against the schema
//! compiled from the project's current field list, and every violated
//! field is reported so errors can render beside their inputs.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use uuid::Uuid;

use formforge_core::form::decode_fields;
use formforge_core::schema::compile;

use crate::error::ApiError;
use crate::models::{ApiResponse, FeedbackDocument, FeedbackSubmit};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:id", post(submit_feedback))
}

/// Submit feedback for a live project
#[utoipa::path(
    post,
    path = "/api/feedback/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = FeedbackSubmit,
    responses(
        (status = 201, description = "Feedback created"),
        (status = 400, description = "Missing or invalid secret"),
        (status = 403, description = "Project is not live"),
        (status = 404, description = "Project not found"),
        (status = 422, description = "Validation failed, per-field errors in body")
    ),
    tag = "feedback"
)]
pub async fn submit_feedback(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(input): Json<FeedbackSubmit>,
) -> Result<(StatusCode, Json<ApiResponse<Uuid>>), ApiError> {
    if input.secret.is_empty() {
        return Err(ApiError::bad_request("Please provide secret"));
    }

    let projects = state.projects.read().await;
    let doc = projects
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ApiError::not_found("Project not found"))?;
    if doc.secret != input.secret {
        return Err(ApiError::bad_request("Invalid secret or project id"));
    }
    if !doc.live {
        return Err(ApiError::forbidden("Form is not accepting submissions"));
    }

    let schema = compile(&decode_fields(&doc.fields));
    schema.validate(&input.data).map_err(ApiError::validation)?;
    drop(projects);

    let feedback = FeedbackDocument {
        id: Uuid::new_v4(),
        project_id: id,
        data: serde_json::to_string(&input.data).unwrap_or_else(|_| "{}".to_string()),
        created_at: Utc::now(),
    };
    let feedback_id = feedback.id;
    state.feedback.write().await.push(feedback);

    tracing::info!(project = %id, submission = %feedback_id, "feedback created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(feedback_id))))
}
