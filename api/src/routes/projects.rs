//! Project (form) management endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use uuid::Uuid;

use formforge_core::form::decode_fields;
use formforge_core::response::{render_responses, StoredSubmission};
use formforge_core::FormDefinition;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::models::{
    ApiResponse, ProjectCreate, ProjectDocument, ProjectUpdate, ResponseCardDto, ResponseFieldDto,
    UserDocument,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/:id/responses", get(list_responses))
}

async fn find_user(state: &AppState, claims: &Claims) -> Result<UserDocument, ApiError> {
    let users = state.users.read().await;
    users
        .iter()
        .find(|u| u.id == claims.sub)
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Unknown account"))
}

/// List the caller's projects
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Projects owned by the caller", body = Vec<ProjectDocument>)
    ),
    security(("bearer" = [])),
    tag = "projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
    claims: Claims,
) -> Json<ApiResponse<Vec<ProjectDocument>>> {
    let projects = state.projects.read().await;
    let owned: Vec<ProjectDocument> = projects
        .iter()
        .filter(|p| p.user_id == claims.sub)
        .cloned()
        .collect();
    Json(ApiResponse::success(owned))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = ProjectCreate,
    responses(
        (status = 201, description = "Project created", body = ProjectDocument),
        (status = 400, description = "Project or field limit reached")
    ),
    security(("bearer" = [])),
    tag = "projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    claims: Claims,
    Json(input): Json<ProjectCreate>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectDocument>>), ApiError> {
    let user = find_user(&state, &claims).await?;

    let mut projects = state.projects.write().await;
    let owned = projects.iter().filter(|p| p.user_id == user.id).count();
    if owned >= user.project_limit {
        return Err(ApiError::bad_request(
            "You have reached the maximum number of projects",
        ));
    }
    if input.fields.len() > user.max_fields {
        return Err(ApiError::bad_request(
            "You have reached the maximum number of fields",
        ));
    }

    let mut form = FormDefinition::create(user.id, input.name, input.description);
    form.fields = input.fields;
    if let Some(style) = input.style {
        form.style = style;
    }
    form.live = input.live;

    let doc = ProjectDocument::from_form(&form);
    projects.push(doc.clone());
    tracing::info!(project = %doc.id, owner = %user.id, "project created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(doc))))
}

/// Get one project
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project details", body = ProjectDocument),
        (status = 404, description = "Project not found")
    ),
    security(("bearer" = [])),
    tag = "projects"
)]
pub async fn get_project(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<ApiResponse<ProjectDocument>>, ApiError> {
    let projects = state.projects.read().await;
    projects
        .iter()
        .find(|p| p.id == id && p.user_id == claims.sub)
        .cloned()
        .map(|doc| Json(ApiResponse::success(doc)))
        .ok_or_else(|| ApiError::not_found("Project not found"))
}

/// Update a project
///
/// `fields` replaces the whole list in the given order, re-serialized to
/// the stored JSON string.
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = ProjectUpdate,
    responses(
        (status = 200, description = "Updated project", body = ProjectDocument),
        (status = 404, description = "Project not found")
    ),
    security(("bearer" = [])),
    tag = "projects"
)]
pub async fn update_project(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    claims: Claims,
    Json(input): Json<ProjectUpdate>,
) -> Result<Json<ApiResponse<ProjectDocument>>, ApiError> {
    let user = find_user(&state, &claims).await?;

    let mut projects = state.projects.write().await;
    let doc = projects
        .iter_mut()
        .find(|p| p.id == id && p.user_id == claims.sub)
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    let mut form = doc.to_form();
    if let Some(name) = input.name {
        form.name = name;
    }
    if let Some(description) = input.description {
        form.description = description;
    }
    if let Some(fields) = input.fields {
        if fields.len() > user.max_fields {
            return Err(ApiError::bad_request(
                "You have reached the maximum number of fields",
            ));
        }
        form.fields = fields;
    }
    if let Some(style) = input.style {
        form.style = style;
    }
    if let Some(live) = input.live {
        form.live = live;
    }
    form.updated_at = Utc::now();

    *doc = ProjectDocument::from_form(&form);
    Ok(Json(ApiResponse::success(doc.clone())))
}

/// Delete a project and its submissions
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found")
    ),
    security(("bearer" = [])),
    tag = "projects"
)]
pub async fn delete_project(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    claims: Claims,
) -> Result<StatusCode, ApiError> {
    let mut projects = state.projects.write().await;
    let before = projects.len();
    projects.retain(|p| !(p.id == id && p.user_id == claims.sub));
    if projects.len() == before {
        return Err(ApiError::not_found("Project not found"));
    }
    drop(projects);

    state.feedback.write().await.retain(|f| f.project_id != id);
    Ok(StatusCode::NO_CONTENT)
}

/// List a project's submissions, rendered against its current fields
#[utoipa::path(
    get,
    path = "/api/projects/{id}/responses",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Rendered response cards", body = Vec<ResponseCardDto>),
        (status = 404, description = "Project not found")
    ),
    security(("bearer" = [])),
    tag = "projects"
)]
pub async fn list_responses(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<ApiResponse<Vec<ResponseCardDto>>>, ApiError> {
    let projects = state.projects.read().await;
    let doc = projects
        .iter()
        .find(|p| p.id == id && p.user_id == claims.sub)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Project not found"))?;
    drop(projects);

    let fields = decode_fields(&doc.fields);
    let feedback = state.feedback.read().await;
    let submissions: Vec<StoredSubmission> = feedback
        .iter()
        .filter(|f| f.project_id == id)
        .map(|f| StoredSubmission::decode(f.id, f.project_id, &f.data, f.created_at))
        .collect();
    drop(feedback);

    let cards = render_responses(&fields, &submissions)
        .into_iter()
        .zip(submissions)
        .map(|(card, submission)| ResponseCardDto {
            id: card.submission_id,
            submitted_at: card.submitted_at,
            fields: card
                .fields
                .into_iter()
                .map(|field| ResponseFieldDto {
                    name: field.name,
                    field_type: field.field_type.as_wire().to_string(),
                    value: field.value.into(),
                })
                .collect(),
            values: submission.values,
        })
        .collect();

    Ok(Json(ApiResponse::success(cards)))
}
