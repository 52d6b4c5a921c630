//! Client login and the accountant-facing client roster.
//!
//! Everything except `/client/login` sits behind the edge filter; the
//! handlers trust [`VerifiedUser`] and never touch the token again.

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};

use ledgerkeep_auth::{Role, credential};
use ledgerkeep_core::PrincipalId;

use crate::app::AppServices;
use crate::app::dto::{
    ClientLoginResponse, ClientSummary, CreateClientRequest, CreateClientResponse, LoginRequest,
};
use crate::app::errors::{domain_error_to_response, json_error};
use crate::app::store::ClientRecord;
use crate::context::VerifiedUser;

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/create", post(create))
        .route("/list", get(list))
        .route("/count", get(count))
        .route("/delete/:tax_id", delete(remove))
}

/// Authenticate a client and mint a token on success.
///
/// Structurally parallel to the accountant flow; only the role claim and
/// the record store differ. The failure response shape is identical for
/// unknown usernames and wrong secrets.
pub async fn login(
    Extension(services): Extension<AppServices>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let record = services.clients.find_by_username(&body.username);

    let verified = record
        .as_ref()
        .map(|r| credential::verify_secret(&body.secret, &r.secret_hash))
        .unwrap_or(false);

    let Some(record) = record.filter(|_| verified) else {
        tracing::debug!(username = %body.username, "client login denied");
        return (StatusCode::UNAUTHORIZED, Json(ClientLoginResponse::denied())).into_response();
    };

    let token = match services.codec.mint(&record.username, Role::Client) {
        Ok(token) => token,
        Err(e) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, "signing_error", e.to_string()),
    };

    (
        StatusCode::OK,
        Json(ClientLoginResponse::granted(token, record.tax_id)),
    )
        .into_response()
}

/// Create a client record owned by the calling accountant.
pub async fn create(
    Extension(services): Extension<AppServices>,
    user: VerifiedUser,
    Json(body): Json<CreateClientRequest>,
) -> axum::response::Response {
    if body.username.trim().is_empty() || body.secret.is_empty() || body.tax_id.trim().is_empty() {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "username, secret and tax id are required",
        );
    }

    let secret_hash = match credential::hash_secret(&body.secret) {
        Ok(hash) => hash,
        Err(e) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, "hashing_error", e.to_string()),
    };

    let record = ClientRecord {
        id: PrincipalId::new(),
        username: body.username.clone(),
        secret_hash,
        company_name: body.company_name,
        tax_id: body.tax_id,
        accountant: user.username().to_string(),
    };

    if let Err(e) = services.clients.insert(record) {
        return domain_error_to_response(e);
    }

    tracing::info!(username = %body.username, accountant = user.username(), "client created");

    (
        StatusCode::CREATED,
        Json(CreateClientResponse {
            success: true,
            message: "client created".to_string(),
        }),
    )
        .into_response()
}

/// Roster of the calling accountant's clients.
pub async fn list(
    Extension(services): Extension<AppServices>,
    user: VerifiedUser,
) -> impl IntoResponse {
    let clients: Vec<ClientSummary> = services
        .clients
        .list_for_accountant(user.username())
        .into_iter()
        .map(ClientSummary::from)
        .collect();

    Json(clients)
}

/// Roster size, for dashboard display.
pub async fn count(
    Extension(services): Extension<AppServices>,
    user: VerifiedUser,
) -> impl IntoResponse {
    let count = services.clients.list_for_accountant(user.username()).len();

    Json(serde_json::json!({ "count": count }))
}

/// Remove a client owned by the calling accountant.
pub async fn remove(
    Extension(services): Extension<AppServices>,
    user: VerifiedUser,
    Path(tax_id): Path<String>,
) -> axum::response::Response {
    match services.clients.remove(user.username(), &tax_id) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => domain_error_to_response(e),
    }
}
