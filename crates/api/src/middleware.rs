use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use ledgerkeep_auth::TokenCodec;

use crate::policy::PublicPathPolicy;

/// Header the filter injects into forwarded requests.
///
/// Downstream handlers treat its presence as proof of prior verification.
/// The filter is the only writer: on protected paths it overwrites whatever
/// the client sent.
pub const USER_NAME_HEADER: &str = "x-user-name";

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<TokenCodec>,
    pub policy: Arc<PublicPathPolicy>,
}

/// Edge authentication filter, run once per request before any routing.
///
/// Public paths pass through untouched. Protected paths must carry
/// `Authorization: Bearer <token>`; the verified subject is forwarded in
/// [`USER_NAME_HEADER`]. Every rejection is terminal: 401, a short JSON
/// body naming the reason, and the request is never forwarded.
pub async fn edge_auth(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if state.policy.is_public(req.uri().path()) {
        return next.run(req).await;
    }

    let token = match bearer_token(req.headers()) {
        Some(token) => token,
        None => {
            return reject(
                req.uri().path(),
                "malformed_header",
                "missing or invalid Authorization header",
            );
        }
    };

    if !state.codec.validate(token) {
        return reject(req.uri().path(), "invalid_token", "invalid bearer token");
    }

    let subject = match state.codec.extract_subject(token) {
        Ok(subject) if !subject.is_empty() => subject,
        _ => {
            return reject(
                req.uri().path(),
                "empty_identity",
                "token carries no usable identity",
            );
        }
    };

    let value = match HeaderValue::from_str(&subject) {
        Ok(value) => value,
        Err(_) => {
            return reject(
                req.uri().path(),
                "empty_identity",
                "token carries no usable identity",
            );
        }
    };
    req.headers_mut().insert(USER_NAME_HEADER, value);

    next.run(req).await
}

/// The token portion of an `Authorization: Bearer <token>` header.
///
/// `None` when the header is absent, unreadable, or lacks the literal
/// `Bearer ` prefix.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn reject(path: &str, code: &'static str, message: &'static str) -> Response {
    tracing::debug!(path, reason = code, "request rejected at edge");

    (
        StatusCode::UNAUTHORIZED,
        axum::Json(serde_json::json!({
            "error": code,
            "message": message,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_literal_and_required() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), Some(""));
    }
}
