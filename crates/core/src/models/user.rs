use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::validation::{Validate, validators};

/// Application user (usuário)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "centroCusto", default)]
    pub cost_center: Option<String>,
    #[serde(rename = "permissoes", default)]
    pub permissions: Vec<String>,
    #[serde(rename = "primeiroAcesso", default)]
    pub first_access: bool,
}

impl User {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p.eq_ignore_ascii_case(permission))
    }
}

/// Create/update payload for a user
///
/// The password is only sent when set; updates without one keep the
/// current password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    pub login: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "senha", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "funcionarioId", skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    #[serde(rename = "permissoes")]
    pub permissions: Vec<String>,
}

impl Validate for UserRequest {
    fn validate(&self) -> Result<(), CoreError> {
        validators::validate_not_empty(&self.login, "login")?;
        validators::validate_not_empty(&self.name, "nome")?;
        if let Some(password) = &self.password {
            validators::validate_not_empty(password, "senha")?;
        }
        Ok(())
    }
}

/// Filters accepted by the user listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub name: Option<String>,
    pub login: Option<String>,
    pub employee_id: Option<i64>,
}

impl UserFilter {
    /// Query pairs for the filters that are set
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            params.push(("nome", name.to_string()));
        }
        if let Some(login) = self.login.as_deref().filter(|l| !l.is_empty()) {
            params.push(("login", login.to_string()));
        }
        if let Some(id) = self.employee_id {
            params.push(("funcionarioId", id.to_string()));
        }
        params
    }
}

/// Credentials sent to `/auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), CoreError> {
        validators::validate_not_empty(&self.login, "login")?;
        validators::validate_not_empty(&self.password, "senha")
    }
}

/// Password change request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
}

impl Validate for PasswordChange {
    fn validate(&self) -> Result<(), CoreError> {
        validators::validate_not_empty(&self.current, "senhaAtual")?;
        validators::validate_not_empty(&self.new, "novaSenha")?;
        if self.current == self.new {
            return Err(CoreError::validation(
                "novaSenha",
                "must differ from the current password",
            ));
        }
        Ok(())
    }
}
