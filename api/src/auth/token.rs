//! Signed, short-lived access tokens.
//!
//! A token is a JWT carrying `{sub, exp}`. Nothing is stored server side:
//! a token is valid iff its signature checks out under the configured key
//! and `exp` is still in the future.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;

pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub exp: usize,
}

/// Issues and validates access tokens with one fixed key.
///
/// The signing scheme is chosen at construction: [`TokenIssuer::hs256`] for
/// a shared secret, [`TokenIssuer::ed25519_pem`] for an EdDSA key pair, or
/// [`TokenIssuer::new`] for any other `jsonwebtoken` key.
#[derive(Clone)]
pub struct TokenIssuer {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(algorithm: Algorithm, encoding_key: EncodingKey, decoding_key: DecodingKey) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            header: Header::new(algorithm),
            encoding_key,
            decoding_key,
            validation,
            ttl: Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
        }
    }

    pub fn hs256(secret: &[u8]) -> Self {
        Self::new(
            Algorithm::HS256,
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
        )
    }

    pub fn ed25519_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, AppError> {
        Ok(Self::new(
            Algorithm::EdDSA,
            EncodingKey::from_ed_pem(private_pem)?,
            DecodingKey::from_ed_pem(public_pem)?,
        ))
    }

    /// Mints a token for `subject` expiring one TTL from now.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Config("token expiry out of range".to_string()))?
            .timestamp();

        let claims = Claims {
            sub: subject.to_string(),
            exp: usize::try_from(expiration)
                .map_err(|_| AppError::Config("token expiry out of range".to_string()))?,
        };
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        Ok(encode(&self.header, claims, &self.encoding_key)?)
    }

    /// Returns the claims of a well-formed, correctly signed, unexpired
    /// token. Every other input is [`AppError::Unauthenticated`].
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(reason = %e, "rejected access token");
                AppError::Unauthenticated
            })?
            .claims;

        // jsonwebtoken accepts exp == now; we want strictly before.
        let now = Utc::now().timestamp();
        if i64::try_from(claims.exp).map_or(true, |exp| exp <= now) {
            debug!("rejected access token: expired");
            return Err(AppError::Unauthenticated);
        }
        if claims.sub.is_empty() {
            debug!("rejected access token: empty subject");
            return Err(AppError::Unauthenticated);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"unit-test-secret-that-is-long-enough!!";

    fn claims_expiring_in(seconds: i64) -> Claims {
        Claims {
            sub: "alice".to_string(),
            exp: (Utc::now().timestamp() + seconds) as usize,
        }
    }

    #[test]
    fn issued_token_validates_immediately() {
        let issuer = TokenIssuer::hs256(SECRET);
        let token = issuer.issue("alice").unwrap();

        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[test]
    fn issued_token_expires_after_fifteen_minutes() {
        let issuer = TokenIssuer::hs256(SECRET);
        let before = Utc::now().timestamp();
        let claims = issuer.validate(&issuer.issue("alice").unwrap()).unwrap();
        let after = Utc::now().timestamp();

        let ttl = ACCESS_TOKEN_TTL_MINUTES * 60;
        let exp = claims.exp as i64;
        assert!(exp >= before + ttl && exp <= after + ttl);
    }

    #[test]
    fn expired_token_is_rejected_despite_valid_signature() {
        let issuer = TokenIssuer::hs256(SECRET);
        let token = issuer.sign(&claims_expiring_in(-1)).unwrap();

        assert!(matches!(
            issuer.validate(&token),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let issuer = TokenIssuer::hs256(SECRET);
        let token = issuer.issue("alice").unwrap();

        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        let i = sig_start + 5;
        bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(issuer.validate(&tampered).is_err());
    }

    #[test]
    fn swapped_payload_is_rejected() {
        let issuer = TokenIssuer::hs256(SECRET);
        let alice = issuer.issue("alice").unwrap();
        let mallory = issuer
            .sign(&Claims {
                sub: "mallory".to_string(),
                ..claims_expiring_in(600)
            })
            .unwrap();

        let alice_parts: Vec<&str> = alice.split('.').collect();
        let mallory_parts: Vec<&str> = mallory.split('.').collect();
        let forged = format!("{}.{}.{}", alice_parts[0], mallory_parts[1], alice_parts[2]);

        assert!(issuer.validate(&forged).is_err());
    }

    #[test]
    fn token_from_another_key_is_rejected() {
        let ours = TokenIssuer::hs256(SECRET);
        let theirs = TokenIssuer::hs256(b"some-other-secret-also-long-enough!!");
        let token = theirs.issue("alice").unwrap();

        assert!(ours.validate(&token).is_err());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let issuer = TokenIssuer::hs256(SECRET);
        for token in ["", "abc", "a.b.c", "Bearer x.y.z"] {
            assert!(issuer.validate(token).is_err(), "accepted {token:?}");
        }
    }

    #[test]
    fn empty_subject_is_rejected() {
        let issuer = TokenIssuer::hs256(SECRET);
        let token = issuer
            .sign(&Claims {
                sub: String::new(),
                ..claims_expiring_in(600)
            })
            .unwrap();

        assert!(issuer.validate(&token).is_err());
    }

    #[test]
    fn ed25519_keys_round_trip() {
        let issuer = TokenIssuer::ed25519_pem(
            include_bytes!("../../tests/fixtures/ed25519_private.pem"),
            include_bytes!("../../tests/fixtures/ed25519_public.pem"),
        )
        .unwrap();
        let token = issuer.issue("bob").unwrap();

        assert_eq!(issuer.validate(&token).unwrap().sub, "bob");
        assert!(TokenIssuer::hs256(SECRET).validate(&token).is_err());
    }
}
