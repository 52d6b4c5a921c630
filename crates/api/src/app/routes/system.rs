use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::context::VerifiedUser;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn index() -> &'static str {
    "ledgerkeep"
}

/// Echo the identity the edge filter verified and forwarded.
pub async fn whoami(user: VerifiedUser) -> impl IntoResponse {
    Json(serde_json::json!({
        "username": user.username(),
    }))
}
