//! Account endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use uuid::Uuid;

use formforge_core::form::{DEFAULT_FIELD_LIMIT, DEFAULT_PROJECT_LIMIT};

use crate::auth::create_token;
use crate::error::ApiError;
use crate::models::{ApiResponse, AuthToken, LoginRequest, RegisterRequest, UserDocument};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register an account and issue a token
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthToken),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthToken>>), ApiError> {
    if input.email.is_empty() {
        return Err(ApiError::bad_request("Email is required"));
    }

    let mut users = state.users.write().await;
    if users.iter().any(|u| u.email == input.email) {
        return Err(ApiError::conflict("Email already registered"));
    }

    let user = UserDocument {
        id: Uuid::new_v4(),
        email: input.email,
        name: input.name,
        project_limit: DEFAULT_PROJECT_LIMIT,
        max_fields: DEFAULT_FIELD_LIMIT,
        created_at: Utc::now(),
    };
    let token = create_token(user.id, &user.email)
        .map_err(|_| ApiError::bad_request("Could not issue token"))?;
    let user_id = user.id;
    users.push(user);

    tracing::info!(%user_id, "account registered");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AuthToken { token, user_id })),
    ))
}

/// Log in and issue a token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = AuthToken),
        (status = 401, description = "Unknown account")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthToken>>, ApiError> {
    let users = state.users.read().await;
    let user = users
        .iter()
        .find(|u| u.email == input.email)
        .ok_or_else(|| ApiError::unauthorized("Unknown account"))?;

    let token = create_token(user.id, &user.email)
        .map_err(|_| ApiError::bad_request("Could not issue token"))?;
    Ok(Json(ApiResponse::success(AuthToken {
        token,
        user_id: user.id,
    })))
}
