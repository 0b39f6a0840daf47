//! Session management with single-flight token refresh
//!
//! [`SessionManager`] owns the stored token pair and the refresh state
//! machine shared by every request issued through a client:
//!
//! - `Idle`: requests run with the stored access token.
//! - `Refreshing`: one caller is exchanging the refresh token; every other
//!   caller that needs a token parks a oneshot receiver in the queue.
//!
//! When the exchange finishes the new pair is persisted and the queue is
//! resolved with the new access token. When it fails the queue is rejected,
//! the store is cleared and [`SessionEvent::LoggedOut`] is broadcast. Either
//! way the state returns to `Idle`.

pub mod store;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Duration;
use folha_core::session::{self, default_refresh_skew};
use folha_core::{TokenSet, TokenStatus};
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, info, warn};

use crate::client::ClientError;
use store::TokenStore;

const EVENT_CAPACITY: usize = 16;

/// Exchanges a refresh token for a new token pair
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, ClientError>;
}

/// Why a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutReason {
    /// Explicit logout
    Requested,
    /// The refresh token had already expired locally
    RefreshExpired,
    /// The backend refused the refresh token or could not be reached
    RefreshFailed(String),
}

/// Session lifecycle notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn { login: String },
    Refreshed { login: String },
    LoggedOut { reason: LogoutReason },
}

type Waiter = oneshot::Sender<Result<String, String>>;

#[derive(Debug, Default)]
enum RefreshState {
    #[default]
    Idle,
    Refreshing { waiters: Vec<Waiter> },
}

enum Turn {
    /// This caller drives the refresh
    Lead,
    /// A refresh is already running; wait for its outcome
    Wait(oneshot::Receiver<Result<String, String>>),
    /// The stored token is newer than the rejected one
    Ready(String),
}

/// Shared token/session state for a client
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    refresher: Arc<dyn TokenRefresher>,
    state: Mutex<RefreshState>,
    events: broadcast::Sender<SessionEvent>,
    skew: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("refreshing", &self.is_refreshing())
            .field("skew", &self.skew)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Manager over `store` using `refresher` for token exchanges
    pub fn new(store: Arc<dyn TokenStore>, refresher: Arc<dyn TokenRefresher>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            refresher,
            state: Mutex::new(RefreshState::Idle),
            events,
            skew: default_refresh_skew(),
        }
    }

    /// Treat access tokens expiring within `skew` as already expired
    #[must_use]
    pub fn with_skew(mut self, skew: Duration) -> Self {
        self.skew = skew;
        self
    }

    /// How long before expiry an access token is refreshed
    pub fn skew(&self) -> Duration {
        self.skew
    }

    /// Receive session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Stored token pair, if any
    pub fn tokens(&self) -> Result<Option<TokenSet>, ClientError> {
        Ok(self.store.load()?)
    }

    /// Status of the stored session against the local clock
    pub fn status(&self) -> Result<TokenStatus, ClientError> {
        let tokens = self.tokens()?;
        Ok(session::session_status(tokens.as_ref(), session::now(), self.skew))
    }

    /// Whether a token exchange is in flight
    pub fn is_refreshing(&self) -> bool {
        matches!(*self.lock_state(), RefreshState::Refreshing { .. })
    }

    /// Persist a freshly issued token pair
    pub fn establish(&self, tokens: &TokenSet) -> Result<(), ClientError> {
        self.store.save(tokens)?;
        info!(login = %tokens.login, "Session established");
        self.emit(SessionEvent::LoggedIn {
            login: tokens.login.clone(),
        });
        Ok(())
    }

    /// Clear the stored session and notify subscribers
    pub fn end(&self, reason: LogoutReason) -> Result<(), ClientError> {
        self.store.clear()?;
        info!(?reason, "Session ended");
        self.emit(SessionEvent::LoggedOut { reason });
        Ok(())
    }

    /// Access token to send with the next request
    ///
    /// Refreshes first when the stored token is inside the skew window and
    /// the refresh token is still usable.
    pub async fn access_token(&self) -> Result<String, ClientError> {
        let tokens = self.tokens()?.ok_or(ClientError::NotAuthenticated)?;
        let now = session::now();

        if tokens.is_refresh_expired_at(now) {
            warn!(login = %tokens.login, "Refresh token expired, ending session");
            self.end(LogoutReason::RefreshExpired)?;
            return Err(ClientError::SessionExpired("refresh token expired".into()));
        }

        if tokens.needs_refresh_at(now, self.skew) {
            debug!(login = %tokens.login, "Access token about to expire, refreshing");
            return self.refresh().await;
        }

        Ok(tokens.token)
    }

    /// Refresh the session, joining a refresh already in flight
    pub async fn refresh(&self) -> Result<String, ClientError> {
        self.refresh_from(None).await
    }

    /// Refresh after the backend rejected `rejected`
    ///
    /// If the stored token has already been replaced by a newer one it is
    /// returned without another exchange.
    pub async fn refresh_after_rejection(&self, rejected: &str) -> Result<String, ClientError> {
        self.refresh_from(Some(rejected)).await
    }

    async fn refresh_from(&self, rejected: Option<&str>) -> Result<String, ClientError> {
        match self.take_turn(rejected)? {
            Turn::Ready(token) => Ok(token),
            Turn::Wait(rx) => match rx.await {
                Ok(Ok(token)) => Ok(token),
                Ok(Err(reason)) => Err(ClientError::SessionExpired(reason)),
                Err(_) => Err(ClientError::SessionExpired("refresh was abandoned".into())),
            },
            Turn::Lead => {
                let guard = RefreshGuard {
                    manager: self,
                    finished: false,
                };
                let outcome = self.exchange().await;
                guard.finish(outcome.as_ref().cloned().map_err(ToString::to_string));
                outcome
            }
        }
    }

    fn take_turn(&self, rejected: Option<&str>) -> Result<Turn, ClientError> {
        let mut state = self.lock_state();

        if let RefreshState::Refreshing { waiters } = &mut *state {
            let (tx, rx) = oneshot::channel();
            waiters.push(tx);
            debug!(queued = waiters.len(), "Refresh in flight, queueing request");
            return Ok(Turn::Wait(rx));
        }

        if let Some(rejected) = rejected {
            let replacement = self.store.load()?.filter(|current| {
                current.token != rejected && !current.is_access_expired_at(session::now(), self.skew)
            });
            if let Some(current) = replacement {
                debug!("Stored token already replaced, retrying without refresh");
                return Ok(Turn::Ready(current.token));
            }
        }

        *state = RefreshState::Refreshing {
            waiters: Vec::new(),
        };
        debug!("Session state IDLE -> REFRESHING");
        Ok(Turn::Lead)
    }

    async fn exchange(&self) -> Result<String, ClientError> {
        let current = self.store.load()?.ok_or(ClientError::NotAuthenticated)?;

        if current.is_refresh_expired_at(session::now()) {
            warn!(login = %current.login, "Refresh token expired, ending session");
            self.end(LogoutReason::RefreshExpired)?;
            return Err(ClientError::SessionExpired("refresh token expired".into()));
        }

        match self.refresher.refresh(&current.refresh_token).await {
            Ok(mut tokens) => {
                if tokens.login.is_empty() {
                    tokens.login = current.login;
                }
                self.store.save(&tokens)?;
                info!(login = %tokens.login, "Session refreshed");
                self.emit(SessionEvent::Refreshed {
                    login: tokens.login.clone(),
                });
                Ok(tokens.token)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, ending session");
                let reason = e.to_string();
                self.end(LogoutReason::RefreshFailed(reason.clone()))?;
                Err(ClientError::SessionExpired(reason))
            }
        }
    }

    fn take_waiters(&self) -> Vec<Waiter> {
        match std::mem::take(&mut *self.lock_state()) {
            RefreshState::Refreshing { waiters } => waiters,
            RefreshState::Idle => Vec::new(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

/// Returns the state to `Idle` even if the leading request is dropped
struct RefreshGuard<'a> {
    manager: &'a SessionManager,
    finished: bool,
}

impl RefreshGuard<'_> {
    fn finish(mut self, outcome: Result<String, String>) {
        self.finished = true;
        let waiters = self.manager.take_waiters();
        debug!(
            waiters = waiters.len(),
            success = outcome.is_ok(),
            "Session state REFRESHING -> IDLE"
        );
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let waiters = self.manager.take_waiters();
            warn!(waiters = waiters.len(), "Refresh abandoned before completion");
        }
    }
}
