//! Identity provider adapter.
//!
//! The provider turns a third-party credential (a Google ID token obtained by
//! whatever owns the UI) into a platform user id plus the bearer token the
//! REST API expects.

mod firebase;
mod token;

use std::future::Future;

pub use firebase::{FirebaseAuth, IDENTITY_TOOLKIT_URL};
pub use token::{IdTokenClaims, decode_claims};

use crate::error::Result;

/// Credential handed to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdpCredential {
    GoogleIdToken(String),
    GoogleAccessToken(String),
}

impl IdpCredential {
    pub fn provider_id(&self) -> &'static str {
        match self {
            IdpCredential::GoogleIdToken(_) | IdpCredential::GoogleAccessToken(_) => "google.com",
        }
    }

    /// Form-encoded `postBody` for `accounts:signInWithIdp`.
    pub(crate) fn post_body(&self) -> String {
        let (field, value) = match self {
            IdpCredential::GoogleIdToken(t) => ("id_token", t),
            IdpCredential::GoogleAccessToken(t) => ("access_token", t),
        };
        format!(
            "{}={}&providerId={}",
            field,
            urlencoding::encode(value),
            self.provider_id()
        )
    }
}

/// Outcome of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub uid: String,
    /// Bearer token for the REST API
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Token lifetime in seconds, when the provider reports it
    pub expires_in: Option<u64>,
}

pub trait IdentityProvider: Send + Sync {
    fn sign_in(&self, credential: &IdpCredential) -> impl Future<Output = Result<SignedIn>> + Send;

    /// Revoke the provider-side session.
    fn sign_out(&self) -> impl Future<Output = Result<()>> + Send;
}
