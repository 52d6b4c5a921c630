//! Public-path policy for the edge filter.
//!
//! The allowlist is a fixed table of (match kind, pattern) pairs evaluated
//! in order. Everything the table does not match is protected.

/// How a pattern is compared against a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The path must equal the pattern byte-for-byte.
    Exact,
    /// The path must start with the pattern.
    Prefix,
}

/// One allowlist entry.
#[derive(Debug, Clone, Copy)]
pub struct PublicRoute {
    pub kind: MatchKind,
    pub pattern: &'static str,
}

const fn exact(pattern: &'static str) -> PublicRoute {
    PublicRoute {
        kind: MatchKind::Exact,
        pattern,
    }
}

const fn prefix(pattern: &'static str) -> PublicRoute {
    PublicRoute {
        kind: MatchKind::Prefix,
        pattern,
    }
}

/// Routes reachable without a token: the login endpoints for both principal
/// kinds, registration, index pages, liveness, and static-asset prefixes.
const PUBLIC_ROUTES: &[PublicRoute] = &[
    exact("/auth/login"),
    exact("/auth/register"),
    exact("/client/login"),
    exact("/"),
    exact("/index"),
    exact("/index.html"),
    exact("/favicon.ico"),
    exact("/health"),
    prefix("/frontend/"),
    prefix("/assets/"),
    prefix("/app/"),
];

/// Decides public vs protected for every inbound request path.
#[derive(Debug, Clone)]
pub struct PublicPathPolicy {
    routes: &'static [PublicRoute],
}

impl PublicPathPolicy {
    pub fn new() -> Self {
        Self {
            routes: PUBLIC_ROUTES,
        }
    }

    /// True if `path` may be served without a token.
    pub fn is_public(&self, path: &str) -> bool {
        self.routes.iter().any(|route| match route.kind {
            MatchKind::Exact => path == route.pattern,
            MatchKind::Prefix => path.starts_with(route.pattern),
        })
    }
}

impl Default for PublicPathPolicy {
    fn default() -> Self {
        Self::new()
    }
}
