//! Folha HTTP client

pub mod auth;
pub mod benefits;
pub mod dashboard;
pub mod employees;
pub mod error;
pub mod import;
pub mod org_chart;
pub mod payroll;
pub mod reports;
pub mod request;
pub mod rubrics;
pub mod units;
pub mod users;

pub use error::ClientError;
pub use request::ApiRequest;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::session::store::{MemoryTokenStore, TokenStore};
use crate::session::{SessionManager, TokenRefresher};
use auth::HttpTokenRefresher;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8083/api";

/// Folha API client
///
/// Every request except the `/auth/*` endpoints carries the stored access
/// token. A request rejected with 401 or 403 triggers one session refresh
/// and is replayed once with the new token.
#[derive(Clone, Debug)]
pub struct FolhaClient {
    client: Client,
    base_url: String,
    session: Arc<SessionManager>,
}

impl FolhaClient {
    /// Create a new client with default configuration and an in-memory session
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> FolhaClientBuilder {
        FolhaClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session shared by every clone of this client
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Send a request, refreshing the session and replaying it once if rejected
    pub async fn send(&self, request: ApiRequest) -> Result<Response, ClientError> {
        if request.is_auth_endpoint() {
            let response = request.build(&self.client, &self.base_url, None)?.send().await?;
            return check_status(response).await;
        }

        let token = self.session.access_token().await?;
        match self.send_with(&request, &token).await {
            Err(e) if e.is_auth_rejection() => {
                debug!(method = %request.method(), path = request.path(), error = %e, "Request rejected, refreshing session");
                let token = self.session.refresh_after_rejection(&token).await?;
                self.send_with(&request, &token).await
            }
            other => other,
        }
    }

    async fn send_with(&self, request: &ApiRequest, token: &str) -> Result<Response, ClientError> {
        let response = request
            .build(&self.client, &self.base_url, Some(token))?
            .send()
            .await
            .inspect_err(|e| debug!(path = request.path(), error = %e, "Request failed"))?;
        check_status(response).await
    }

    /// Execute a request and decode the JSON response
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let body = self.send(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Execute a request, mapping 404 to `None`
    pub async fn execute_optional<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Option<T>, ClientError> {
        match self.execute(request).await {
            Ok(value) => Ok(Some(value)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Execute a request whose response body is ignored
    pub async fn execute_empty(&self, request: ApiRequest) -> Result<(), ClientError> {
        self.send(request).await?;
        Ok(())
    }

    /// Execute a request and return the raw response body
    pub async fn execute_bytes(&self, request: ApiRequest) -> Result<Bytes, ClientError> {
        Ok(self.send(request).await?.bytes().await?)
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ClientError::from_status(status, message))
    }
}

/// Builder for `FolhaClient`
#[derive(Default)]
pub struct FolhaClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    token_store: Option<Arc<dyn TokenStore>>,
    refresher: Option<Arc<dyn TokenRefresher>>,
    refresh_skew: Option<chrono::Duration>,
}

impl FolhaClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Where the session tokens are kept (in memory by default)
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Replace the `/auth/refresh` exchange
    pub fn token_refresher(mut self, refresher: Arc<dyn TokenRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// Refresh access tokens this long before they expire
    pub fn refresh_skew(mut self, skew: chrono::Duration) -> Self {
        self.refresh_skew = Some(skew);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<FolhaClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url '{base_url}': {e}")))?;

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        client_builder = client_builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| concat!("folha-client/", env!("CARGO_PKG_VERSION")).to_string()),
        );

        let client = client_builder.build()?;

        let store = self
            .token_store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()) as Arc<dyn TokenStore>);
        let refresher = self.refresher.unwrap_or_else(|| {
            Arc::new(HttpTokenRefresher::new(client.clone(), base_url.clone())) as Arc<dyn TokenRefresher>
        });
        let mut session = SessionManager::new(store, refresher);
        if let Some(skew) = self.refresh_skew {
            session = session.with_skew(skew);
        }

        Ok(FolhaClient {
            client,
            base_url,
            session: Arc::new(session),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = FolhaClient::new("http://localhost:8083/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8083/api");
    }

    #[test]
    fn test_builder_rejects_invalid_url() {
        assert!(matches!(
            FolhaClient::new("not a url"),
            Err(ClientError::Configuration(_))
        ));
    }
}
