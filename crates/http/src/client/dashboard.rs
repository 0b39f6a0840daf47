//! Dashboard API client methods

use folha_core::models::DashboardStats;

use super::{ApiRequest, ClientError, FolhaClient};

impl FolhaClient {
    /// Headcount, payroll cost and per-unit aggregates
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        self.execute(ApiRequest::get("/dashboard/stats")).await
    }
}
