//! Benefit API client methods

use chrono::NaiveDate;
use folha_core::Validate;
use folha_core::models::{Benefit, BenefitRequest};

use super::request::path_segment;
use super::{ApiRequest, ClientError, FolhaClient};

impl FolhaClient {
    /// All benefits
    pub async fn list_benefits(&self) -> Result<Vec<Benefit>, ClientError> {
        self.execute(ApiRequest::get("/beneficios")).await
    }

    /// Benefits of an employee active on `date`
    pub async fn benefits_by_employee(
        &self,
        employee_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Benefit>, ClientError> {
        let request =
            ApiRequest::get(format!("/beneficios/funcionario/{employee_id}")).query("data", date);
        self.execute(request).await
    }

    /// Benefits of a cost center (by description) active on `date`
    pub async fn benefits_by_cost_center(
        &self,
        cost_center: &str,
        date: NaiveDate,
    ) -> Result<Vec<Benefit>, ClientError> {
        let request = ApiRequest::get(format!(
            "/beneficios/centro-custo/{}",
            path_segment(cost_center)?
        ))
        .query("data", date);
        self.execute(request).await
    }

    /// Benefit by id
    pub async fn get_benefit(&self, id: i64) -> Result<Benefit, ClientError> {
        self.execute(ApiRequest::get(format!("/beneficios/{id}"))).await
    }

    /// Create a benefit after local validation
    pub async fn create_benefit(&self, benefit: &BenefitRequest) -> Result<Benefit, ClientError> {
        benefit.validate()?;
        self.execute(ApiRequest::post("/beneficios").json(benefit)?).await
    }

    /// Replace a benefit after local validation
    pub async fn update_benefit(&self, id: i64, benefit: &BenefitRequest) -> Result<Benefit, ClientError> {
        benefit.validate()?;
        self.execute(ApiRequest::put(format!("/beneficios/{id}")).json(benefit)?)
            .await
    }

    /// Delete a benefit
    pub async fn delete_benefit(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/beneficios/{id}")))
            .await
    }
}
