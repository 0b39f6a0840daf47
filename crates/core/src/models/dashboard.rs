use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregates returned by `/dashboard/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(rename = "totalFuncionarios")]
    pub total_employees: i64,
    #[serde(rename = "custoMensalFolha")]
    pub monthly_payroll_cost: Decimal,
    #[serde(rename = "totalBeneficiosAtivos")]
    pub active_benefits: i64,
    #[serde(rename = "porLinhaNegocio", default)]
    pub by_business_line: Vec<UnitStats>,
    #[serde(rename = "porCentroCusto", default)]
    pub by_cost_center: Vec<UnitStats>,
    #[serde(rename = "porCargo", default)]
    pub by_job_role: Vec<JobRoleStats>,
    #[serde(rename = "totalProventos")]
    pub total_earnings: Decimal,
    #[serde(rename = "totalDescontos")]
    pub total_deductions: Decimal,
    #[serde(rename = "topProventos", default)]
    pub top_earnings: Vec<RubricStats>,
    #[serde(rename = "topDescontos", default)]
    pub top_deductions: Vec<RubricStats>,
    #[serde(rename = "evolucaoMensal", default)]
    pub monthly_trend: Vec<MonthlyTrend>,
}

impl DashboardStats {
    pub fn net_total(&self) -> Decimal {
        self.total_earnings - self.total_deductions
    }
}

/// Headcount and cost of a business line or cost center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub id: i64,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "quantidadeFuncionarios")]
    pub employee_count: i64,
    #[serde(rename = "valorTotal")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRoleStats {
    pub id: i64,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "quantidadeFuncionarios")]
    pub employee_count: i64,
    #[serde(rename = "valorMedio")]
    pub average: Decimal,
    #[serde(rename = "valorTotal")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricStats {
    pub id: i64,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valorTotal")]
    pub total: Decimal,
    #[serde(rename = "quantidadeOcorrencias")]
    pub occurrences: i64,
}

/// One month of the payroll trend, keyed by `MM/YYYY`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    #[serde(rename = "mesAno")]
    pub month: String,
    #[serde(rename = "valorTotal")]
    pub total: Decimal,
    #[serde(rename = "quantidadeFuncionarios")]
    pub employee_count: i32,
}
