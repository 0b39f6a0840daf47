//! Report API client methods

use bytes::Bytes;
use folha_core::Validate;
use folha_core::models::{Report, ReportKind, ReportRequest};

use super::{ApiRequest, ClientError, FolhaClient};

fn reports_path(kind: ReportKind) -> String {
    format!("/relatorios/{}", kind.path_segment())
}

impl FolhaClient {
    /// Ask the backend to generate a report for a month
    pub async fn generate_report(
        &self,
        kind: ReportKind,
        request: &ReportRequest,
    ) -> Result<Report, ClientError> {
        request.validate()?;
        self.execute(ApiRequest::post(reports_path(kind)).json(request)?)
            .await
    }

    /// Reports of one family
    pub async fn list_reports(&self, kind: ReportKind) -> Result<Vec<Report>, ClientError> {
        self.execute(ApiRequest::get(reports_path(kind))).await
    }

    /// Raw bytes of a generated report file
    pub async fn download_report(&self, kind: ReportKind, id: i64) -> Result<Bytes, ClientError> {
        self.execute_bytes(ApiRequest::get(format!("{}/{id}/download", reports_path(kind))))
            .await
    }
}
