use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::validation::{Validate, validators};

/// Kind of payroll line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RubricKind {
    /// Earning (provento)
    Provento,
    /// Deduction (desconto)
    Desconto,
    /// Informational entry, neither paid nor deducted
    Informativo,
}

impl RubricKind {
    /// Sign applied when the entry contributes to net pay
    pub fn sign(self) -> i8 {
        match self {
            Self::Provento => 1,
            Self::Desconto => -1,
            Self::Informativo => 0,
        }
    }
}

impl std::fmt::Display for RubricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provento => write!(f, "PROVENTO"),
            Self::Desconto => write!(f, "DESCONTO"),
            Self::Informativo => write!(f, "INFORMATIVO"),
        }
    }
}

impl std::str::FromStr for RubricKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PROVENTO" => Ok(Self::Provento),
            "DESCONTO" => Ok(Self::Desconto),
            "INFORMATIVO" => Ok(Self::Informativo),
            other => Err(CoreError::validation("tipo", format!("unknown rubric kind '{other}'"))),
        }
    }
}

/// Payroll line-item code (rubrica)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub id: i64,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: RubricKind,
    #[serde(rename = "porcentagem", default)]
    pub percentage: Option<f64>,
}

/// Create/update payload for a rubric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricRequest {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: RubricKind,
    #[serde(rename = "porcentagem", skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl Validate for RubricRequest {
    fn validate(&self) -> Result<(), CoreError> {
        validators::validate_not_empty(&self.code, "codigo")?;
        validators::validate_not_empty(&self.description, "descricao")?;
        if let Some(pct) = self.percentage {
            validators::validate_range(pct, 0.0, 100.0, "porcentagem")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_wire_name() {
        let rubric: Rubric = serde_json::from_value(serde_json::json!({
            "id": 1,
            "codigo": "900",
            "descricao": "INSS",
            "tipo": "DESCONTO",
            "porcentagem": 11.0
        }))
        .unwrap();
        assert_eq!(rubric.kind, RubricKind::Desconto);
        assert_eq!(rubric.kind.sign(), -1);
        assert_eq!("informativo".parse::<RubricKind>().unwrap(), RubricKind::Informativo);
        assert!("bonus".parse::<RubricKind>().is_err());
    }
}
