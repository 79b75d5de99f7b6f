//! HTTP client adapter for the REST API.
//!
//! Every request is resolved against the configured base URL and carries
//! `Authorization: Bearer <token>` whenever a token is stored under
//! [`keys::AUTH_TOKEN`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ClientError, Result};
use crate::storage::{StorageAdapter, keys};

const USER_AGENT: &str = concat!("semillas/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    storage: Arc<dyn StorageAdapter>,
    http: HttpClient,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        storage: Arc<dyn StorageAdapter>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        if base_url.is_empty() {
            return Err(ClientError::Config("API base URL is required".into()));
        }

        let mut builder = HttpClient::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            storage,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &Arc<dyn StorageAdapter> {
        &self.storage
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::read_json(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Self::read_json(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::read_json(response).await
    }

    /// PUT where the response body is irrelevant.
    pub async fn put_no_content<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(self.request(Method::PUT, path).json(body))
            .await
            .map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path))
            .await
            .map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match self.storage.get(keys::AUTH_TOKEN) {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status().as_u16();

        if response.status().is_success() {
            return Ok(response);
        }

        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<String>,
            details: Option<String>,
            message: Option<String>,
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(ErrorResponse {
                error: Some(err),
                details: Some(details),
                ..
            }) => format!("{}: {}", err, details),
            Ok(ErrorResponse {
                error: Some(err), ..
            }) => err,
            Ok(ErrorResponse {
                message: Some(msg), ..
            }) => msg,
            Ok(ErrorResponse {
                details: Some(details),
                ..
            }) => details,
            _ if !body.trim().is_empty() && body.len() <= 512 => body.trim().to_string(),
            _ => format!("Request failed: {}", status),
        };

        Err(ClientError::from_status(status, message))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("storage", &"<storage>")
            .finish()
    }
}
