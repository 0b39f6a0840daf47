//! Organizational units: business lines, cost centers and job roles

use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::validation::{Validate, validators};

const DESCRIPTION_MIN: usize = 3;
const DESCRIPTION_MAX: usize = 100;

/// Business line (linha de negócio), the top-level grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessLine {
    pub id: i64,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "ativo", default)]
    pub active: Option<bool>,
}

/// Cost center (centro de custo), always owned by a business line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    pub id: i64,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "ativo", default)]
    pub active: Option<bool>,
    #[serde(rename = "linhaNegocioId", default)]
    pub business_line_id: Option<i64>,
}

/// Job role (cargo)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRole {
    pub id: i64,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "ativo", default)]
    pub active: Option<bool>,
}

/// Payload for units that carry only a description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionRequest {
    #[serde(rename = "descricao")]
    pub description: String,
}

impl DescriptionRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl Validate for DescriptionRequest {
    fn validate(&self) -> Result<(), CoreError> {
        validators::validate_length(&self.description, DESCRIPTION_MIN, DESCRIPTION_MAX, "descricao")
    }
}

/// Create/update payload for a cost center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenterRequest {
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "linhaNegocioId")]
    pub business_line_id: i64,
}

impl Validate for CostCenterRequest {
    fn validate(&self) -> Result<(), CoreError> {
        validators::validate_length(&self.description, DESCRIPTION_MIN, DESCRIPTION_MAX, "descricao")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_bounds() {
        assert!(DescriptionRequest::new("TI").validate().is_err());
        assert!(DescriptionRequest::new("Financeiro").validate().is_ok());

        let request = CostCenterRequest {
            description: "x".repeat(101),
            business_line_id: 1,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_cost_center_wire_names() {
        let request = CostCenterRequest {
            description: "Operações".into(),
            business_line_id: 4,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["descricao"], "Operações");
        assert_eq!(value["linhaNegocioId"], 4);
    }
}
