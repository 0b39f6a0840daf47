//! Folha HTTP client
//!
//! Typed access to the payroll backend REST API with a shared session that
//! refreshes its access token transparently.

pub mod client;
pub mod session;

pub use client::{ApiRequest, ClientError, DEFAULT_BASE_URL, FolhaClient, FolhaClientBuilder};
pub use session::store::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore};
pub use session::{LogoutReason, SessionEvent, SessionManager, TokenRefresher};
