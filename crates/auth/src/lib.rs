//! `ledgerkeep-auth` — token issuing/verification and credential checking.
//!
//! This crate is intentionally decoupled from HTTP and storage. The codec is
//! the single trust mechanism shared by every service: a token is worth
//! exactly as much as its signature and expiry, nothing else.

pub mod claims;
pub mod codec;
pub mod credential;
pub mod roles;

pub use claims::Claims;
pub use codec::{TOKEN_VALIDITY_HOURS, TokenCodec, TokenError};
pub use credential::{HashSecretError, hash_secret, verify_secret};
pub use roles::{ParseRoleError, Role};
