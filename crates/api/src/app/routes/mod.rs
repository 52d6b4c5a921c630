use axum::{Router, routing::get};

pub mod auth;
pub mod clients;
pub mod system;

/// Full routing tree. Authentication is enforced by the edge filter layered
/// on top of this router, not per-route here.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::index))
        .route("/health", get(system::health))
        .route("/whoami", get(system::whoami))
        .nest("/auth", auth::router())
        .nest("/client", clients::router())
}
