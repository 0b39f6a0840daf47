//! Rubric API client methods

use std::collections::HashMap;

use folha_core::Validate;
use folha_core::models::{Rubric, RubricKind, RubricRequest};

use super::{ApiRequest, ClientError, FolhaClient};

impl FolhaClient {
    /// All rubrics
    pub async fn list_rubrics(&self) -> Result<Vec<Rubric>, ClientError> {
        self.execute(ApiRequest::get("/rubricas")).await
    }

    /// Rubric kinds by rubric id, as needed to total payroll entries
    pub async fn rubric_kinds(&self) -> Result<HashMap<i64, RubricKind>, ClientError> {
        Ok(self
            .list_rubrics()
            .await?
            .into_iter()
            .map(|rubric| (rubric.id, rubric.kind))
            .collect())
    }

    /// Rubric by id
    pub async fn get_rubric(&self, id: i64) -> Result<Rubric, ClientError> {
        self.execute(ApiRequest::get(format!("/rubricas/{id}"))).await
    }

    /// Create a rubric after local validation
    pub async fn create_rubric(&self, rubric: &RubricRequest) -> Result<Rubric, ClientError> {
        rubric.validate()?;
        self.execute(ApiRequest::post("/rubricas").json(rubric)?).await
    }

    /// Replace a rubric after local validation
    pub async fn update_rubric(&self, id: i64, rubric: &RubricRequest) -> Result<Rubric, ClientError> {
        rubric.validate()?;
        self.execute(ApiRequest::put(format!("/rubricas/{id}")).json(rubric)?)
            .await
    }

    /// Delete a rubric
    pub async fn delete_rubric(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/rubricas/{id}")))
            .await
    }
}
