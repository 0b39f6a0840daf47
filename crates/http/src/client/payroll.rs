//! Payroll entry and payroll summary API client methods

use chrono::NaiveDate;
use folha_core::Validate;
use folha_core::models::{PayrollEntry, PayrollEntryRequest, PayrollSummary, Period};

use super::{ApiRequest, ClientError, FolhaClient};

const PERIOD_START: &str = "dataInicio";
const PERIOD_END: &str = "dataFim";

impl FolhaClient {
    /// Payroll entries, optionally restricted to a period
    pub async fn list_payroll(&self, period: Option<Period>) -> Result<Vec<PayrollEntry>, ClientError> {
        let mut request = ApiRequest::get("/folha-pagamento");
        if let Some(period) = period {
            request = request.query_pairs(period.query(PERIOD_START, PERIOD_END));
        }
        self.execute(request).await
    }

    /// Entries of one employee within `period`
    pub async fn payroll_by_employee(
        &self,
        employee_id: i64,
        period: Period,
    ) -> Result<Vec<PayrollEntry>, ClientError> {
        let request = ApiRequest::get(format!("/folha-pagamento/funcionario/{employee_id}"))
            .query_pairs(period.query(PERIOD_START, PERIOD_END));
        self.execute(request).await
    }

    /// Entries of one cost center within `period`
    pub async fn payroll_by_cost_center(
        &self,
        cost_center_id: i64,
        period: Period,
    ) -> Result<Vec<PayrollEntry>, ClientError> {
        let request = ApiRequest::get(format!("/folha-pagamento/centro-custo/{cost_center_id}"))
            .query_pairs(period.query(PERIOD_START, PERIOD_END));
        self.execute(request).await
    }

    /// Payroll entry by id
    pub async fn get_payroll_entry(&self, id: i64) -> Result<PayrollEntry, ClientError> {
        self.execute(ApiRequest::get(format!("/folha-pagamento/{id}"))).await
    }

    /// Create a payroll entry after local validation
    pub async fn create_payroll_entry(
        &self,
        entry: &PayrollEntryRequest,
    ) -> Result<PayrollEntry, ClientError> {
        entry.validate()?;
        self.execute(ApiRequest::post("/folha-pagamento").json(entry)?).await
    }

    /// Replace a payroll entry after local validation
    pub async fn update_payroll_entry(
        &self,
        id: i64,
        entry: &PayrollEntryRequest,
    ) -> Result<PayrollEntry, ClientError> {
        entry.validate()?;
        self.execute(ApiRequest::put(format!("/folha-pagamento/{id}")).json(entry)?)
            .await
    }

    /// Delete a payroll entry
    pub async fn delete_payroll_entry(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/folha-pagamento/{id}")))
            .await
    }

    /// Every imported payroll summary
    pub async fn list_payroll_summaries(&self) -> Result<Vec<PayrollSummary>, ClientError> {
        self.execute(ApiRequest::get("/resumo-folha-pagamento")).await
    }

    /// Summaries whose competence overlaps `period`
    pub async fn payroll_summaries_in(&self, period: Period) -> Result<Vec<PayrollSummary>, ClientError> {
        let request = ApiRequest::get("/resumo-folha-pagamento/periodo")
            .query_pairs(period.query(PERIOD_START, PERIOD_END));
        self.execute(request).await
    }

    /// Summary of exactly one competence, `None` if it was never imported
    pub async fn payroll_summary_for(
        &self,
        competence_start: NaiveDate,
        competence_end: NaiveDate,
    ) -> Result<Option<PayrollSummary>, ClientError> {
        let period = Period::new(competence_start, competence_end)?;
        let request = ApiRequest::get("/resumo-folha-pagamento/competencia")
            .query_pairs(period.query("competenciaInicio", "competenciaFim"));
        self.execute_optional(request).await
    }

    /// Most recently imported summaries
    pub async fn latest_payroll_summaries(&self) -> Result<Vec<PayrollSummary>, ClientError> {
        self.execute(ApiRequest::get("/resumo-folha-pagamento/latest")).await
    }
}
