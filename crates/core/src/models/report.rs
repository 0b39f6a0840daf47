use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::validation::{Validate, validators};

/// Which report family a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Payroll,
    Benefit,
}

impl ReportKind {
    /// Path segment under `/relatorios`
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Payroll => "folha",
            Self::Benefit => "beneficio",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Pendente,
    Processado,
    Erro,
}

/// Generated payroll or benefit report
///
/// Both report families share one shape; payroll reports fill
/// `total_employees`/`total_payroll`, benefit reports fill `total_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(rename = "mes")]
    pub month: u32,
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "totalFuncionarios", default)]
    pub total_employees: Option<i64>,
    #[serde(rename = "totalFolha", default)]
    pub total_payroll: Option<Decimal>,
    #[serde(rename = "totalBeneficios", default)]
    pub total_benefits: Option<Decimal>,
    #[serde(rename = "totalValor", default)]
    pub total_amount: Option<Decimal>,
    pub status: ReportStatus,
    #[serde(rename = "dataProcessamento", default)]
    pub processed_at: Option<NaiveDateTime>,
    #[serde(rename = "erro", default)]
    pub error: Option<String>,
}

/// Month/year a report is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(rename = "mes")]
    pub month: u32,
    #[serde(rename = "ano")]
    pub year: i32,
}

impl Validate for ReportRequest {
    fn validate(&self) -> Result<(), CoreError> {
        validators::validate_range(self.month, 1, 12, "mes")?;
        validators::validate_range(self.year, 1900, 9999, "ano")
    }
}
