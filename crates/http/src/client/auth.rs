//! Authentication API client methods

use async_trait::async_trait;
use folha_core::models::LoginRequest;
use folha_core::{TokenResponse, TokenSet, Validate};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use super::{ApiRequest, ClientError, FolhaClient, check_status};
use crate::session::{LogoutReason, TokenRefresher};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenRequest<'a> {
    refresh_token: &'a str,
}

fn into_token_set(response: TokenResponse) -> Result<TokenSet, ClientError> {
    TokenSet::try_from(response)
        .map_err(|e| ClientError::AuthenticationFailed(format!("incomplete token response: {e}")))
}

/// Token exchange against `POST /auth/refresh`
#[derive(Debug, Clone)]
pub struct HttpTokenRefresher {
    client: Client,
    base_url: String,
}

impl HttpTokenRefresher {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, ClientError> {
        let request = ApiRequest::post("/auth/refresh").json(&RefreshTokenRequest { refresh_token })?;
        let response = request.build(&self.client, &self.base_url, None)?.send().await?;
        let body = check_status(response).await?.bytes().await?;
        into_token_set(serde_json::from_slice(&body)?)
    }
}

impl FolhaClient {
    /// Log in and persist the issued token pair
    pub async fn login(&self, credentials: &LoginRequest) -> Result<TokenSet, ClientError> {
        credentials.validate()?;
        let request = ApiRequest::post("/auth/login").json(credentials)?;
        let mut tokens = into_token_set(self.execute(request).await?)?;
        if tokens.login.is_empty() {
            tokens.login.clone_from(&credentials.login);
        }
        self.session().establish(&tokens)?;
        Ok(tokens)
    }

    /// Revoke the refresh token and clear the local session
    ///
    /// The local session is cleared even when the backend cannot be reached.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Some(tokens) = self.session().tokens()? {
            let revoke = ApiRequest::post("/auth/logout").json(&RefreshTokenRequest {
                refresh_token: &tokens.refresh_token,
            })?;
            match self.execute_empty(revoke).await {
                Ok(()) => info!(login = %tokens.login, "Refresh token revoked"),
                Err(e) => warn!(error = %e, "Could not revoke refresh token"),
            }
        }
        self.session().end(LogoutReason::Requested)
    }

    /// Force a token exchange and return the new pair
    pub async fn refresh_session(&self) -> Result<TokenSet, ClientError> {
        self.session().refresh().await?;
        self.session().tokens()?.ok_or(ClientError::NotAuthenticated)
    }
}
