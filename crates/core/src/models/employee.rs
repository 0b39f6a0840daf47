use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::validation::{Validate, validators};

/// Employee (funcionário) as exposed by `/funcionarios`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cargo", default)]
    pub job_role: Option<String>,
    #[serde(rename = "centroCusto", default)]
    pub cost_center: Option<String>,
    #[serde(rename = "linhaNegocio", default)]
    pub business_line: Option<String>,
    #[serde(rename = "idExterno", default)]
    pub external_id: Option<String>,
    #[serde(rename = "dataAdmissao", default)]
    pub hired_on: Option<NaiveDate>,
    #[serde(rename = "sexo", default)]
    pub sex: Option<String>,
    #[serde(rename = "tipoSalario", default)]
    pub salary_type: Option<String>,
    #[serde(rename = "funcao", default)]
    pub function: Option<String>,
    #[serde(rename = "depIrrf", default)]
    pub income_tax_dependents: Option<i32>,
    #[serde(rename = "depSalFamilia", default)]
    pub family_allowance_dependents: Option<i32>,
    #[serde(rename = "vinculo", default)]
    pub employment_bond: Option<String>,
}

/// Create/update payload for an employee
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cargo", skip_serializing_if = "Option::is_none")]
    pub job_role: Option<String>,
    #[serde(rename = "centroCusto", skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    #[serde(rename = "linhaNegocio", skip_serializing_if = "Option::is_none")]
    pub business_line: Option<String>,
    #[serde(rename = "idExterno", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "dataAdmissao", skip_serializing_if = "Option::is_none")]
    pub hired_on: Option<NaiveDate>,
    #[serde(rename = "sexo", skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(rename = "tipoSalario", skip_serializing_if = "Option::is_none")]
    pub salary_type: Option<String>,
    #[serde(rename = "funcao", skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(rename = "depIrrf", skip_serializing_if = "Option::is_none")]
    pub income_tax_dependents: Option<i32>,
    #[serde(rename = "depSalFamilia", skip_serializing_if = "Option::is_none")]
    pub family_allowance_dependents: Option<i32>,
    #[serde(rename = "vinculo", skip_serializing_if = "Option::is_none")]
    pub employment_bond: Option<String>,
}

impl Validate for EmployeeRequest {
    fn validate(&self) -> Result<(), CoreError> {
        validators::validate_not_empty(&self.name, "nome")?;
        if let Some(deps) = self.income_tax_dependents {
            validators::validate_range(deps, 0, i32::MAX, "depIrrf")?;
        }
        if let Some(deps) = self.family_allowance_dependents {
            validators::validate_range(deps, 0, i32::MAX, "depSalFamilia")?;
        }
        Ok(())
    }
}
