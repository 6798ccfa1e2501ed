use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Health check route
pub mod health;
/// Upload authorization route
pub mod uploads;

/// Creates the router with all handler routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::handler))
        .route(
            "/v1/uploads/presigned-urls",
            post(uploads::create_upload_authorization),
        )
}
