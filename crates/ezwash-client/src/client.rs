//! The HTTP choke point for all EZWash API calls.

use std::sync::Arc;

use ezwash_core::{ErrorBody, TokenStore};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Tracing target for client operations.
pub const TRACING_TARGET: &str = "ezwash_client::client";

/// Inner client that holds the HTTP client, configuration, and token store.
struct ApiClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    tokens: Arc<dyn TokenStore>,
}

/// HTTP client for the EZWash REST API.
///
/// This is the single place requests are built: it merges the JSON content
/// type, a correlation id, the bearer token (for authenticated calls), and
/// any caller-supplied headers — caller headers win. A 401 from any
/// endpoint clears the persisted token pair before the error is returned;
/// the client never redirects and never retries.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use ezwash_client::{ApiClient, ClientConfig};
/// use ezwash_core::{ApiProvider, MemoryTokenStore};
/// use ezwash_core::types::Credentials;
///
/// let tokens = Arc::new(MemoryTokenStore::new());
/// let client = ApiClient::new(ClientConfig::default(), tokens)?;
/// let pair = client.login(&Credentials::new("ama", "hunter2")).await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a new client with the given configuration and token store.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the underlying
    /// HTTP client cannot be created.
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let base_url = config.base_url()?;
        let timeout = config.effective_timeout();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_ms = timeout.as_millis(),
            "creating api client"
        );

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.effective_user_agent())
            .build()?;

        let inner = ApiClientInner {
            http,
            config,
            tokens,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Gets the shared token store.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.inner.tokens
    }

    /// Issues one request against the API and decodes the JSON response.
    ///
    /// `path` is an endpoint path relative to the configured base URL.
    /// When `requires_auth` is set and an access token is persisted, the
    /// token is attached as a bearer header. Extra headers are applied
    /// after the defaults, so callers can override anything.
    pub async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: &[(&str, &str)],
        requires_auth: bool,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.inner.config.base_path(), path);
        let token = self.inner.tokens.access();
        let request_id = Uuid::now_v7();

        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            path,
            request_id = %request_id,
            requires_auth,
            has_token = token.is_some(),
            "sending api request"
        );

        let mut request = self
            .inner
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header("X-Request-Id", request_id.to_string());

        if requires_auth && let Some(token) = token {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Any 401 means the stored pair is no longer usable, whatever
            // the cause. Clearing is this client's only storage write.
            tracing::warn!(
                target: TRACING_TARGET,
                path,
                request_id = %request_id,
                "authentication rejected, clearing stored tokens"
            );
            self.inner.tokens.clear();
        }

        if !status.is_success() {
            let bytes = response.bytes().await.unwrap_or_default();
            let body = ErrorBody::from_bytes(&bytes);
            let message = body.message_or_default();

            tracing::debug!(
                target: TRACING_TARGET,
                method = %method,
                path,
                request_id = %request_id,
                status = status.as_u16(),
                message = %message,
                "api request failed"
            );

            return Err(Error::Api {
                status: status.as_u16(),
                message,
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Convenience wrapper for body-less GET requests.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, requires_auth: bool) -> Result<T> {
        self.send::<T, ()>(Method::GET, path, None, &[], requires_auth)
            .await
    }

    /// Convenience wrapper for JSON POST requests.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B, requires_auth: bool) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, Some(body), &[], requires_auth)
            .await
    }
}
