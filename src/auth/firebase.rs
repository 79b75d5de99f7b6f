//! Firebase Authentication over the Identity Toolkit REST API.

use std::sync::RwLock;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use super::{IdentityProvider, IdpCredential, SignedIn};
use crate::config::Config;
use crate::error::{ClientError, Result};

pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpResponse {
    local_id: String,
    id_token: String,
    refresh_token: Option<String>,
    email: Option<String>,
    display_name: Option<String>,
    expires_in: Option<String>,
}

#[derive(Deserialize)]
struct FirebaseErrorBody {
    error: FirebaseError,
}

#[derive(Deserialize)]
struct FirebaseError {
    message: String,
}

pub struct FirebaseAuth {
    base_url: String,
    api_key: String,
    request_uri: String,
    http: HttpClient,
    session: RwLock<Option<SignedIn>>,
}

impl FirebaseAuth {
    /// `base_url` is the Identity Toolkit root, e.g. [`IDENTITY_TOOLKIT_URL`]
    /// or `http://127.0.0.1:9099/identitytoolkit.googleapis.com` for the emulator.
    /// An empty `api_key` is accepted here and only rejected at sign-in.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let http = HttpClient::builder()
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            request_uri: "http://localhost".to_string(),
            http,
            session: RwLock::new(None),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut auth = Self::new(&config.identity_base_url(), &config.firebase.api_key)?;
        if let Some(domain) = &config.firebase.auth_domain {
            auth.request_uri = format!("https://{}", domain);
        }
        if config.dev_mode {
            tracing::info!(url = %auth.base_url, "Using Firebase auth emulator");
        }
        Ok(auth)
    }

    /// Session established by the last successful sign-in, if any.
    pub fn current_session(&self) -> Option<SignedIn> {
        self.session.read().ok()?.clone()
    }
}

impl IdentityProvider for FirebaseAuth {
    async fn sign_in(&self, credential: &IdpCredential) -> Result<SignedIn> {
        if self.api_key.is_empty() {
            return Err(ClientError::Config("FIREBASE_API_KEY is required to sign in".into()));
        }

        let url = format!(
            "{}/v1/accounts:signInWithIdp?key={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        );

        let body = SignInWithIdpRequest {
            post_body: credential.post_body(),
            request_uri: &self.request_uri,
            return_idp_credential: true,
            return_secure_token: true,
        };

        let response = self.http.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .json::<FirebaseErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("Sign-in failed: {}", status));
            return Err(ClientError::Identity(message));
        }

        let data: SignInWithIdpResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Identity(format!("Invalid sign-in response: {}", e)))?;

        let signed_in = SignedIn {
            uid: data.local_id,
            id_token: data.id_token,
            refresh_token: data.refresh_token,
            email: data.email,
            display_name: data.display_name,
            expires_in: data.expires_in.and_then(|s| s.parse().ok()),
        };

        if let Ok(mut session) = self.session.write() {
            *session = Some(signed_in.clone());
        }

        Ok(signed_in)
    }

    async fn sign_out(&self) -> Result<()> {
        // The web SDK's signOut is local too: the ID token simply stops being used.
        if let Ok(mut session) = self.session.write() {
            *session = None;
        }
        Ok(())
    }
}

impl std::fmt::Debug for FirebaseAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseAuth")
            .field("base_url", &self.base_url)
            .field("request_uri", &self.request_uri)
            .finish()
    }
}
