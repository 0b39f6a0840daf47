//! User management API client methods

use folha_core::Validate;
use folha_core::models::{PasswordChange, User, UserFilter, UserRequest};

use super::request::path_segment;
use super::{ApiRequest, ClientError, FolhaClient};

impl FolhaClient {
    /// Users matching the filters that are set
    pub async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, ClientError> {
        self.execute(ApiRequest::get("/usuarios").query_pairs(filter.query()))
            .await
    }

    /// User by id
    pub async fn get_user(&self, id: i64) -> Result<User, ClientError> {
        self.execute(ApiRequest::get(format!("/usuarios/{id}"))).await
    }

    /// User with this login, `None` if there is none
    pub async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, ClientError> {
        let request = ApiRequest::get(format!("/usuarios/login/{}", path_segment(login)?));
        self.execute_optional(request).await
    }

    /// Create a user; a password is required
    pub async fn create_user(&self, user: &UserRequest) -> Result<User, ClientError> {
        user.validate()?;
        if user.password.is_none() {
            return Err(ClientError::Validation(folha_core::CoreError::validation(
                "senha",
                "required when creating a user",
            )));
        }
        self.execute(ApiRequest::post("/usuarios").json(user)?).await
    }

    /// Update a user; the password is only changed when given
    pub async fn update_user(&self, id: i64, user: &UserRequest) -> Result<User, ClientError> {
        user.validate()?;
        self.execute(ApiRequest::put(format!("/usuarios/{id}")).json(user)?)
            .await
    }

    /// Delete a user
    pub async fn delete_user(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/usuarios/{id}")))
            .await
    }

    /// Change a user's password; the backend checks the current one
    pub async fn change_password(&self, id: i64, change: &PasswordChange) -> Result<(), ClientError> {
        change.validate()?;
        let request = ApiRequest::post(format!("/usuarios/{id}/alterar-senha"))
            .query("senhaAtual", &change.current)
            .query("novaSenha", &change.new);
        self.execute_empty(request).await
    }

    /// Permission names that can be granted to users
    pub async fn list_permissions(&self) -> Result<Vec<String>, ClientError> {
        self.execute(ApiRequest::get("/usuarios/permissoes")).await
    }
}
