use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::{Claims, Role};

/// Fixed validity window applied to every minted token, in hours.
pub const TOKEN_VALIDITY_HOURS: i64 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch, structural corruption, or expiry.
    ///
    /// Deliberately coarse: callers get no hint which of the three failed,
    /// and no claim data accompanies the error.
    #[error("invalid token")]
    Invalid,

    /// The claim set could not be signed. Unreachable with a loaded key.
    #[error("token signing failed")]
    Signing,
}

/// Stateless issuer/verifier for the compact signed tokens shared by all
/// services.
///
/// Signs with HS256 over a symmetric key loaded once at startup. Holds no
/// per-request state, so one instance is shared across request tasks with
/// plain `Arc` and no locking.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; the default 60s leeway would keep tokens alive
        // past their window.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mint a signed token for `subject` carrying the given role claim.
    ///
    /// The claim set is stamped with the current instant and the fixed
    /// validity window.
    pub fn mint(&self, subject: &str, role: Role) -> Result<String, TokenError> {
        let claims = Claims::new(
            subject,
            role,
            Utc::now(),
            Duration::hours(TOKEN_VALIDITY_HOURS),
        );

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Signing)
    }

    /// Verify `token` and return its subject claim.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        Ok(self.decode(token)?.sub)
    }

    /// Verify `token` and return its role claim.
    pub fn extract_role(&self, token: &str) -> Result<Role, TokenError> {
        Ok(self.decode(token)?.role)
    }

    /// Boolean gate: true iff the signature verifies and the token is
    /// unexpired. Never errors.
    pub fn validate(&self, token: &str) -> bool {
        self.decode(token).is_ok()
    }

    /// Decode the claims of a verified token.
    ///
    /// The single verification path behind every operation above. All
    /// failures collapse to [`TokenError::Invalid`].
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"unit-test-secret";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET)
    }

    /// Sign an arbitrary claim set with the test secret, bypassing `mint`.
    fn sign_raw(claims: &Claims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[test]
    fn minted_token_validates_and_round_trips() {
        let codec = codec();
        let token = codec.mint("noa", Role::Accountant).unwrap();

        assert!(codec.validate(&token));
        assert_eq!(codec.extract_subject(&token).unwrap(), "noa");
        assert_eq!(codec.extract_role(&token).unwrap(), Role::Accountant);
    }

    #[test]
    fn role_claim_is_preserved_exactly() {
        let codec = codec();

        let accountant = codec.mint("noa", Role::Accountant).unwrap();
        let client = codec.mint("dana", Role::Client).unwrap();

        assert_eq!(codec.extract_role(&accountant).unwrap(), Role::Accountant);
        assert_eq!(codec.extract_role(&client).unwrap(), Role::Client);
    }

    #[test]
    fn validation_is_idempotent() {
        let codec = codec();
        let token = codec.mint("noa", Role::Accountant).unwrap();

        for _ in 0..3 {
            assert!(codec.validate(&token));
            assert_eq!(codec.extract_subject(&token).unwrap(), "noa");
        }
    }

    #[test]
    fn garbage_is_invalid() {
        let codec = codec();

        assert!(!codec.validate("not-a-token"));
        assert!(!codec.validate(""));
        assert_eq!(codec.extract_subject("not-a-token"), Err(TokenError::Invalid));
        assert_eq!(codec.extract_role("a.b.c"), Err(TokenError::Invalid));
    }

    #[test]
    fn every_single_byte_flip_invalidates() {
        let codec = codec();
        let token = codec.mint("noa", Role::Accountant).unwrap();

        for i in 0..token.len() {
            let mut bytes = token.as_bytes().to_vec();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            if tampered == token {
                continue;
            }
            assert!(!codec.validate(&tampered), "byte {i} flip went undetected");
        }
    }

    #[test]
    fn token_signed_with_other_key_is_invalid() {
        let codec = codec();
        let other = TokenCodec::new(b"some-other-secret");

        let token = other.mint("noa", Role::Accountant).unwrap();
        assert!(!codec.validate(&token));
        assert_eq!(codec.extract_subject(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn expired_token_fails_even_with_intact_signature() {
        let codec = codec();

        // Minted 10h1s ago: one second past the window.
        let issued_at =
            Utc::now() - Duration::hours(TOKEN_VALIDITY_HOURS) - Duration::seconds(1);
        let claims = Claims::new(
            "noa",
            Role::Accountant,
            issued_at,
            Duration::hours(TOKEN_VALIDITY_HOURS),
        );
        let token = sign_raw(&claims);

        assert!(!codec.validate(&token));
        assert_eq!(codec.extract_subject(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn token_inside_window_is_still_valid() {
        let codec = codec();

        // Minted 9h59m ago: one minute of validity left.
        let issued_at = Utc::now() - Duration::hours(TOKEN_VALIDITY_HOURS) + Duration::minutes(1);
        let claims = Claims::new(
            "noa",
            Role::Accountant,
            issued_at,
            Duration::hours(TOKEN_VALIDITY_HOURS),
        );

        assert!(codec.validate(&sign_raw(&claims)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any subject round-trips through mint/extract.
            #[test]
            fn subject_round_trips(subject in "[A-Za-z0-9_.@-]{1,40}", is_client in any::<bool>()) {
                let codec = codec();
                let role = if is_client { Role::Client } else { Role::Accountant };

                let token = codec.mint(&subject, role).unwrap();
                prop_assert!(codec.validate(&token));
                prop_assert_eq!(codec.extract_subject(&token).unwrap(), subject);
                prop_assert_eq!(codec.extract_role(&token).unwrap(), role);
            }

            /// Property: replacing any one byte of the compact form with a
            /// different alphabet byte is detected.
            #[test]
            fn tampered_byte_is_detected(seed in any::<prop::sample::Index>()) {
                let codec = codec();
                let token = codec.mint("noa", Role::Accountant).unwrap();

                let i = seed.index(token.len());
                let mut bytes = token.as_bytes().to_vec();
                bytes[i] = if bytes[i] == b'x' { b'y' } else { b'x' };
                let tampered = String::from_utf8(bytes).unwrap();

                prop_assume!(tampered != token);
                prop_assert!(!codec.validate(&tampered));
            }
        }
    }
}
