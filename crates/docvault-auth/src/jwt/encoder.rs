//! Identity token signing.
//!
//! Production tokens come from the external identity provider; this issuer
//! exists for local development and tests that need a signed token.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use docvault_core::config::AuthConfig;
use docvault_core::error::AppError;

use super::claims::IdentityClaims;

/// Signs identity tokens with the shared HS256 secret.
#[derive(Clone)]
pub struct IdentityTokenIssuer {
    encoding_key: EncodingKey,
    issuer: Option<String>,
    audience: Option<String>,
}

impl std::fmt::Debug for IdentityTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityTokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl IdentityTokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Sign the given claims as-is.
    pub fn issue(&self, claims: &IdentityClaims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode identity token: {e}")))
    }

    /// Sign a token for `email` valid for `ttl`, stamped with the configured
    /// issuer and audience.
    pub fn issue_for(
        &self,
        email: &str,
        name: Option<&str>,
        picture: Option<&str>,
        ttl: Duration,
    ) -> Result<String, AppError> {
        self.issue(&IdentityClaims {
            email: email.to_string(),
            name: name.map(str::to_string),
            picture: picture.map(str::to_string),
            exp: (Utc::now() + ttl).timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        })
    }
}
