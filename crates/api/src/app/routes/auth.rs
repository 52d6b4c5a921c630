//! Accountant login and registration.

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use ledgerkeep_auth::{Role, credential};
use ledgerkeep_core::PrincipalId;

use crate::app::AppServices;
use crate::app::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::app::errors::{domain_error_to_response, json_error};
use crate::app::store::PrincipalRecord;

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

/// Authenticate an accountant and mint a token on success.
///
/// Unknown usernames and wrong secrets produce the same response, so the
/// endpoint cannot be used to enumerate accounts.
pub async fn login(
    Extension(services): Extension<AppServices>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let record = services.accountants.find_by_username(&body.username);

    let verified = record
        .as_ref()
        .map(|r| credential::verify_secret(&body.secret, &r.secret_hash))
        .unwrap_or(false);

    if !verified {
        tracing::debug!(username = %body.username, "accountant login denied");
        return (StatusCode::UNAUTHORIZED, Json(LoginResponse::denied())).into_response();
    }

    let token = match services.codec.mint(&body.username, Role::Accountant) {
        Ok(token) => token,
        Err(e) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, "signing_error", e.to_string()),
    };

    (StatusCode::OK, Json(LoginResponse::granted(token))).into_response()
}

/// Register a new accountant with a hashed secret.
pub async fn register(
    Extension(services): Extension<AppServices>,
    Json(body): Json<RegisterRequest>,
) -> axum::response::Response {
    if body.username.trim().is_empty() || body.secret.is_empty() {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "username and secret are required",
        );
    }

    if services.accountants.exists(&body.username) {
        return (
            StatusCode::BAD_REQUEST,
            Json(RegisterResponse {
                success: false,
                message: "username is already taken".to_string(),
            }),
        )
            .into_response();
    }

    let secret_hash = match credential::hash_secret(&body.secret) {
        Ok(hash) => hash,
        Err(e) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, "hashing_error", e.to_string()),
    };

    let record = PrincipalRecord {
        id: PrincipalId::new(),
        username: body.username.clone(),
        secret_hash,
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
        phone: body.phone,
    };

    if let Err(e) = services.accountants.insert(record) {
        return domain_error_to_response(e);
    }

    tracing::info!(username = %body.username, "accountant registered");

    (
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "registration completed".to_string(),
        }),
    )
        .into_response()
}
