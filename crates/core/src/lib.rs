//! Folha core types and utilities

pub mod error;
pub mod models;
pub mod org_tree;
pub mod session;
pub mod validation;

pub use error::{CoreError, CoreResult};
pub use org_tree::OrgTree;
pub use session::{TokenResponse, TokenSet, TokenStatus};
pub use validation::Validate;
