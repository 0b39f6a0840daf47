//! Session tokens and their validity rules
//!
//! The backend hands out a short-lived access token and a long-lived refresh
//! token, each with an expiration expressed as a local date-time without
//! offset. All checks take an explicit `now` so they can be exercised
//! deterministically; the `*_now` helpers read the local clock.

use crate::CoreError;
use chrono::{Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Access tokens expiring within this many seconds are treated as expired
pub const DEFAULT_REFRESH_SKEW_SECS: i64 = 5 * 60;

/// Default refresh skew as a duration
pub fn default_refresh_skew() -> Duration {
    Duration::seconds(DEFAULT_REFRESH_SKEW_SECS)
}

/// Access and refresh credentials with their expirations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    pub login: String,
    pub token: String,
    pub refresh_token: String,
    pub token_expiration: NaiveDateTime,
    pub refresh_expiration: NaiveDateTime,
}

/// Token payload as returned by `/auth/login` and `/auth/refresh`
///
/// Every field is optional on the wire; [`TokenSet::try_from`] rejects
/// responses that do not carry a complete pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_expiration: Option<NaiveDateTime>,
    #[serde(default)]
    pub refresh_expiration: Option<NaiveDateTime>,
}

impl TryFrom<TokenResponse> for TokenSet {
    type Error = CoreError;

    fn try_from(response: TokenResponse) -> Result<Self, Self::Error> {
        fn required<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
            value.ok_or_else(|| CoreError::validation(field, "missing from token response"))
        }

        let token = required(response.token.filter(|t| !t.is_empty()), "token")?;
        let refresh_token = required(
            response.refresh_token.filter(|t| !t.is_empty()),
            "refreshToken",
        )?;

        Ok(Self {
            login: response.login.unwrap_or_default(),
            token,
            refresh_token,
            token_expiration: required(response.token_expiration, "tokenExpiration")?,
            refresh_expiration: required(response.refresh_expiration, "refreshExpiration")?,
        })
    }
}

/// Overall state of a stored session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    NoSession,
    Valid,
    AccessExpired,
    RefreshExpired,
}

impl std::fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSession => write!(f, "not logged in"),
            Self::Valid => write!(f, "valid"),
            Self::AccessExpired => write!(f, "access expired"),
            Self::RefreshExpired => write!(f, "refresh expired"),
        }
    }
}

impl TokenSet {
    /// Access token expires within `skew` of `now`
    pub fn is_access_expired_at(&self, now: NaiveDateTime, skew: Duration) -> bool {
        self.token_expiration - now < skew
    }

    /// Refresh token expiration is in the past
    pub fn is_refresh_expired_at(&self, now: NaiveDateTime) -> bool {
        self.refresh_expiration < now
    }

    /// Both tokens present and the refresh token still usable
    pub fn has_valid_tokens_at(&self, now: NaiveDateTime) -> bool {
        !self.token.is_empty() && !self.refresh_token.is_empty() && !self.is_refresh_expired_at(now)
    }

    /// The access token should be exchanged before the next request
    pub fn needs_refresh_at(&self, now: NaiveDateTime, skew: Duration) -> bool {
        self.has_valid_tokens_at(now) && self.is_access_expired_at(now, skew)
    }

    pub fn status_at(&self, now: NaiveDateTime, skew: Duration) -> TokenStatus {
        if self.is_refresh_expired_at(now) {
            TokenStatus::RefreshExpired
        } else if self.is_access_expired_at(now, skew) {
            TokenStatus::AccessExpired
        } else {
            TokenStatus::Valid
        }
    }

    pub fn needs_refresh_now(&self, skew: Duration) -> bool {
        self.needs_refresh_at(now(), skew)
    }

    pub fn is_refresh_expired_now(&self) -> bool {
        self.is_refresh_expired_at(now())
    }

    pub fn status_now(&self, skew: Duration) -> TokenStatus {
        self.status_at(now(), skew)
    }
}

/// Status of an optional stored session
pub fn session_status(tokens: Option<&TokenSet>, now: NaiveDateTime, skew: Duration) -> TokenStatus {
    tokens.map_or(TokenStatus::NoSession, |t| t.status_at(now, skew))
}

/// Current local time, matching how the backend stamps expirations
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Render the time left until `until` as `Nd Nh`, `Nh Nm` or `Nm`
///
/// Returns `None` once the instant has passed.
pub fn format_remaining(now: NaiveDateTime, until: NaiveDateTime) -> Option<String> {
    let diff = until - now;
    if diff <= Duration::zero() {
        return None;
    }

    let minutes = diff.num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    Some(if days > 0 {
        format!("{days}d {}h", hours % 24)
    } else if hours > 0 {
        format!("{hours}h {}m", minutes % 60)
    } else {
        format!("{minutes}m")
    })
}
