//! File import API client methods

use bytes::Bytes;
use folha_core::models::{ImportKind, ImportOutcome};
use tracing::{info, warn};

use super::{ApiRequest, ClientError, FolhaClient};

/// Multipart field carrying the uploaded file
const FILE_FIELD: &str = "arquivo";

impl FolhaClient {
    /// Upload a spreadsheet to one of the import endpoints
    ///
    /// Endpoints that answer with an empty body are reported as accepted. A
    /// 400 carrying an import summary is returned as an unsuccessful outcome
    /// rather than an error.
    pub async fn import_file(
        &self,
        kind: ImportKind,
        file_name: &str,
        contents: impl Into<Bytes>,
    ) -> Result<ImportOutcome, ClientError> {
        let contents = contents.into();
        let size = contents.len() as u64;
        let request = ApiRequest::post(kind.path()).file(
            FILE_FIELD,
            file_name,
            content_type_for(file_name),
            contents,
        );

        let body = match self.execute_bytes(request).await {
            Ok(body) => body,
            Err(ClientError::BadRequest(message)) => {
                return match serde_json::from_str::<ImportOutcome>(&message) {
                    Ok(outcome) => {
                        warn!(%kind, file = file_name, message = ?outcome.message, "Import rejected");
                        Ok(outcome)
                    }
                    Err(_) => Err(ClientError::BadRequest(message)),
                };
            }
            Err(e) => return Err(e),
        };

        let outcome = if body.iter().all(u8::is_ascii_whitespace) {
            ImportOutcome::accepted(file_name, size)
        } else {
            serde_json::from_slice(&body)?
        };

        info!(%kind, file = file_name, size, "Import accepted");
        Ok(outcome)
    }
}

fn content_type_for(file_name: &str) -> Option<String> {
    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        "csv" => "text/csv",
        _ => return None,
    };
    Some(mime.to_string())
}
