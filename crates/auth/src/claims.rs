use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::Role;

/// Signed claim set carried by a token.
///
/// Field names follow the registered JWT claim names (`sub`, `iat`, `exp`)
/// so the wire format stays interoperable; `role` is ours. Claims are
/// immutable once signed — a new login mints a new token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal's unique username.
    pub sub: String,

    /// Principal kind granted at login.
    pub role: Role,

    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,

    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    /// Build a claim set issued at `issued_at` and expiring `validity` later.
    pub fn new(
        subject: impl Into<String>,
        role: Role,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Self {
        Self {
            sub: subject.into(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + validity).timestamp(),
        }
    }
}
