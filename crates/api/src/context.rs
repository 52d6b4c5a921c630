use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};

use crate::middleware::USER_NAME_HEADER;

/// Verified identity of the caller, read from the header the edge filter
/// injected.
///
/// Handlers behind the filter take this as an argument and trust it without
/// re-verifying the token. Rejects with 401 if the header is absent, which
/// only happens when a handler is wired onto a public path by mistake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser(String);

impl VerifiedUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    pub fn username(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for VerifiedUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_NAME_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(Self::new)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
