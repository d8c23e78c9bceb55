//! Formforge API
//!
//! REST API for the Formforge feedback platform: project (form) CRUD for
//! authenticated owners, a public decoded preview, public feedback
//! submission gated by a project secret, and a rendered response listing.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                       FORMFORGE API                           │
//! │                                                               │
//! │  ┌─────────────────────────────────────────────────────────┐  │
//! │  │                     REST API                            │  │
//! │  │  OpenAPI 3 | JWT bearer auth | permissive CORS          │  │
//! │  └─────────────────────────────────────────────────────────┘  │
//! │                                                               │
//! │  owner (auth)                     public                      │
//! │  /api/projects CRUD               /api/preview/:id            │
//! │  /api/projects/:id/responses      /api/feedback/:id           │
//! │                                                               │
//! │  ┌─────────────────────────────────────────────────────────┐  │
//! │  │              formforge-core                             │  │
//! │  │  schema compiler | renderers | response viewer          │  │
//! │  └─────────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

pub use models::*;
pub use state::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Formforge API",
        version = "1.0.0",
        description = "Feedback form builder - projects, previews, submissions",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::auth::register,
        routes::auth::login,
        routes::projects::list_projects,
        routes::projects::create_project,
        routes::projects::get_project,
        routes::projects::update_project,
        routes::projects::delete_project,
        routes::projects::list_responses,
        routes::preview::get_preview,
        routes::feedback::submit_feedback,
    ),
    components(
        schemas(
            UserDocument, RegisterRequest, LoginRequest, AuthToken,
            ProjectDocument, ProjectCreate, ProjectUpdate, PreviewDocument,
            FeedbackSubmit, FeedbackDocument,
            ResponseCardDto, ResponseFieldDto, DisplayDto
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Account registration and login"),
        (name = "projects", description = "Form project management"),
        (name = "preview", description = "Public decoded form previews"),
        (name = "feedback", description = "Public feedback submission")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .nest("/api/auth", routes::auth::router())
        .nest("/api/projects", routes::projects::router())
        .nest("/api/preview", routes::preview::router())
        .nest("/api/feedback", routes::feedback::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
