use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Claims read from a stored ID token.
///
/// The signature is not checked here; the backend verifies every request.
/// These claims only decide whether a stored session is worth restoring.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdTokenClaims {
    pub sub: Option<String>,
    /// Firebase mirrors the uid here
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub exp: Option<i64>,
}

impl IdTokenClaims {
    pub fn uid(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .or(self.sub.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// A token without `exp` never expires.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }
}

pub fn decode_claims(token: &str) -> Result<IdTokenClaims> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_sig), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ClientError::Identity("Malformed ID token".into()));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| ClientError::Identity("Malformed ID token payload".into()))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::Identity(format!("Invalid ID token claims: {}", e)))
}
