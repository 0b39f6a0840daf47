use serde::{Deserialize, Serialize};

use super::payroll::PayrollEntry;

/// File import endpoints under `/importacao`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// Generic payroll spreadsheet
    Payroll,
    /// Payroll export from the ADP system
    PayrollAdp,
    Benefits,
}

impl ImportKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::Payroll => "/importacao/folha",
            Self::PayrollAdp => "/importacao/folha-adp",
            Self::Benefits => "/importacao/beneficios",
        }
    }
}

impl std::fmt::Display for ImportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Payroll => write!(f, "payroll"),
            Self::PayrollAdp => write!(f, "payroll (ADP)"),
            Self::Benefits => write!(f, "benefits"),
        }
    }
}

/// Outcome of an import
///
/// The generic payroll and benefit endpoints answer with an empty body;
/// those are reported as a bare success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "arquivo", default)]
    pub file_name: Option<String>,
    #[serde(rename = "tamanho", default)]
    pub size: Option<u64>,
    #[serde(rename = "registrosProcessados", default)]
    pub records_processed: usize,
    #[serde(rename = "folhasPagamento", default)]
    pub entries: Vec<PayrollEntry>,
}

impl ImportOutcome {
    pub fn accepted(file_name: impl Into<String>, size: u64) -> Self {
        Self {
            success: true,
            message: None,
            file_name: Some(file_name.into()),
            size: Some(size),
            records_processed: 0,
            entries: Vec::new(),
        }
    }
}
