//! Public preview endpoint
//!
//! Read-only, unauthenticated view of a project used by the embedded
//! form and the preview page. Returns the decoded field list and style;
//! malformed stored blobs degrade to an empty list / default style
//! instead of failing the page.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use formforge_core::form::{decode_fields, decode_style};

use crate::error::ApiError;
use crate::models::{ApiResponse, PreviewDocument};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:id", get(get_preview))
}

/// Public decoded view of a project
#[utoipa::path(
    get,
    path = "/api/preview/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Decoded project", body = PreviewDocument),
        (status = 404, description = "Project not found")
    ),
    tag = "preview"
)]
pub async fn get_preview(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PreviewDocument>>, ApiError> {
    let projects = state.projects.read().await;
    let doc = projects
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    Ok(Json(ApiResponse::success(PreviewDocument {
        name: doc.name.clone(),
        description: doc.description.clone(),
        style: decode_style(&doc.style),
        fields: decode_fields(&doc.fields),
        live: doc.live,
    })))
}
