use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::rubric::RubricKind;
use crate::CoreError;
use crate::validation::{Validate, validators};

/// One compensation line of a pay period (folha de pagamento)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollEntry {
    pub id: i64,
    #[serde(rename = "funcionarioId")]
    pub employee_id: i64,
    #[serde(rename = "funcionarioNome", default)]
    pub employee_name: Option<String>,
    #[serde(rename = "rubricaId")]
    pub rubric_id: i64,
    #[serde(rename = "rubricaCodigo", default)]
    pub rubric_code: Option<String>,
    #[serde(rename = "rubricaDescricao", default)]
    pub rubric_description: Option<String>,
    #[serde(rename = "dataInicio")]
    pub period_start: NaiveDate,
    #[serde(rename = "dataFim")]
    pub period_end: NaiveDate,
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "quantidade", default)]
    pub quantity: Option<Decimal>,
    #[serde(rename = "baseCalculo", default)]
    pub calculation_base: Option<Decimal>,
}

/// Net pay of `entries`: earnings minus deductions
///
/// `kinds` maps rubric ids to their kind; entries with an unknown rubric are
/// left out of the total and counted in the second tuple element.
pub fn net_total(entries: &[PayrollEntry], kinds: &HashMap<i64, RubricKind>) -> (Decimal, usize) {
    entries
        .iter()
        .fold((Decimal::ZERO, 0), |(total, unknown), entry| match kinds.get(&entry.rubric_id) {
            Some(kind) => (total + entry.amount * Decimal::from(kind.sign()), unknown),
            None => (total, unknown + 1),
        })
}

/// Create/update payload for a payroll entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollEntryRequest {
    #[serde(rename = "funcionarioId")]
    pub employee_id: i64,
    #[serde(rename = "rubricaId")]
    pub rubric_id: i64,
    #[serde(rename = "dataInicio")]
    pub period_start: NaiveDate,
    #[serde(rename = "dataFim")]
    pub period_end: NaiveDate,
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "quantidade", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[serde(rename = "baseCalculo", skip_serializing_if = "Option::is_none")]
    pub calculation_base: Option<Decimal>,
}

impl Validate for PayrollEntryRequest {
    fn validate(&self) -> Result<(), CoreError> {
        validators::validate_period(self.period_start, self.period_end, "dataInicio")
    }
}

/// Inclusive date range used to filter payroll queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Build a period, rejecting one that ends before it starts
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        validators::validate_period(start, end, "periodo")?;
        Ok(Self { start, end })
    }

    /// Query pairs using the given parameter names
    pub fn query(&self, start_key: &'static str, end_key: &'static str) -> [(&'static str, String); 2] {
        [
            (start_key, self.start.to_string()),
            (end_key, self.end.to_string()),
        ]
    }
}

/// Imported payroll totals for one competence period (resumo da folha)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSummary {
    pub id: i64,
    #[serde(rename = "totalEmpregados")]
    pub total_employees: i32,
    #[serde(rename = "totalEncargos")]
    pub total_charges: Decimal,
    #[serde(rename = "totalPagamentos")]
    pub total_payments: Decimal,
    #[serde(rename = "totalDescontos")]
    pub total_deductions: Decimal,
    #[serde(rename = "totalLiquido")]
    pub total_net: Decimal,
    #[serde(rename = "competenciaInicio")]
    pub competence_start: NaiveDate,
    #[serde(rename = "competenciaFim")]
    pub competence_end: NaiveDate,
    #[serde(rename = "dataImportacao", default)]
    pub imported_at: Option<NaiveDateTime>,
    #[serde(rename = "ativo", default)]
    pub active: Option<bool>,
}
