//! HTTP application wiring (Axum router + edge filter).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per service area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses
//! - `store.rs`: record storage behind traits

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use ledgerkeep_auth::TokenCodec;

use crate::middleware::{self, AuthState};
use crate::policy::PublicPathPolicy;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod store;

/// Shared service wiring handed to handlers.
#[derive(Clone)]
pub struct AppServices {
    pub codec: Arc<TokenCodec>,
    pub accountants: Arc<dyn store::PrincipalStore>,
    pub clients: Arc<dyn store::ClientStore>,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The signing key is loaded exactly once here: a single [`TokenCodec`]
/// instance is shared by the edge filter and the login handlers. The filter
/// wraps the whole tree; the public-path policy, not router nesting, decides
/// which requests skip authentication.
pub fn build_app(jwt_secret: String) -> Router {
    let codec = Arc::new(TokenCodec::new(jwt_secret.as_bytes()));

    let auth_state = AuthState {
        codec: codec.clone(),
        policy: Arc::new(PublicPathPolicy::new()),
    };

    let services = AppServices {
        codec,
        accountants: Arc::new(store::InMemoryPrincipalStore::new()),
        clients: Arc::new(store::InMemoryClientStore::new()),
    };

    routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::edge_auth,
        ))
        .layer(ServiceBuilder::new())
}
