//! Business line, cost center and job role API client methods

use folha_core::Validate;
use folha_core::models::{BusinessLine, CostCenter, CostCenterRequest, DescriptionRequest, JobRole};

use super::{ApiRequest, ClientError, FolhaClient};

impl FolhaClient {
    /// All business lines
    pub async fn list_business_lines(&self) -> Result<Vec<BusinessLine>, ClientError> {
        self.execute(ApiRequest::get("/linhas-negocio")).await
    }

    /// Business line by id
    pub async fn get_business_line(&self, id: i64) -> Result<BusinessLine, ClientError> {
        self.execute(ApiRequest::get(format!("/linhas-negocio/{id}"))).await
    }

    /// Create a business line after validating its description
    pub async fn create_business_line(
        &self,
        line: &DescriptionRequest,
    ) -> Result<BusinessLine, ClientError> {
        line.validate()?;
        self.execute(ApiRequest::post("/linhas-negocio").json(line)?).await
    }

    /// Rename a business line after validating its description
    pub async fn update_business_line(
        &self,
        id: i64,
        line: &DescriptionRequest,
    ) -> Result<BusinessLine, ClientError> {
        line.validate()?;
        self.execute(ApiRequest::put(format!("/linhas-negocio/{id}")).json(line)?)
            .await
    }

    /// Delete a business line
    pub async fn delete_business_line(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/linhas-negocio/{id}")))
            .await
    }

    /// All cost centers
    pub async fn list_cost_centers(&self) -> Result<Vec<CostCenter>, ClientError> {
        self.execute(ApiRequest::get("/centros-custo")).await
    }

    /// Cost centers belonging to one business line
    pub async fn cost_centers_by_business_line(
        &self,
        business_line_id: i64,
    ) -> Result<Vec<CostCenter>, ClientError> {
        self.execute(ApiRequest::get(format!(
            "/centros-custo/linha-negocio/{business_line_id}"
        )))
        .await
    }

    /// Cost center by id
    pub async fn get_cost_center(&self, id: i64) -> Result<CostCenter, ClientError> {
        self.execute(ApiRequest::get(format!("/centros-custo/{id}"))).await
    }

    /// Create a cost center under a business line
    pub async fn create_cost_center(
        &self,
        cost_center: &CostCenterRequest,
    ) -> Result<CostCenter, ClientError> {
        cost_center.validate()?;
        self.execute(ApiRequest::post("/centros-custo").json(cost_center)?)
            .await
    }

    /// Update a cost center
    pub async fn update_cost_center(
        &self,
        id: i64,
        cost_center: &CostCenterRequest,
    ) -> Result<CostCenter, ClientError> {
        cost_center.validate()?;
        self.execute(ApiRequest::put(format!("/centros-custo/{id}")).json(cost_center)?)
            .await
    }

    /// Delete a cost center
    pub async fn delete_cost_center(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/centros-custo/{id}")))
            .await
    }

    /// All job roles
    pub async fn list_job_roles(&self) -> Result<Vec<JobRole>, ClientError> {
        self.execute(ApiRequest::get("/cargos")).await
    }

    /// Job role by id
    pub async fn get_job_role(&self, id: i64) -> Result<JobRole, ClientError> {
        self.execute(ApiRequest::get(format!("/cargos/{id}"))).await
    }

    /// Create a job role after validating its description
    pub async fn create_job_role(&self, role: &DescriptionRequest) -> Result<JobRole, ClientError> {
        role.validate()?;
        self.execute(ApiRequest::post("/cargos").json(role)?).await
    }

    /// Rename a job role after validating its description
    pub async fn update_job_role(
        &self,
        id: i64,
        role: &DescriptionRequest,
    ) -> Result<JobRole, ClientError> {
        role.validate()?;
        self.execute(ApiRequest::put(format!("/cargos/{id}")).json(role)?)
            .await
    }

    /// Delete a job role
    pub async fn delete_job_role(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/cargos/{id}"))).await
    }
}
