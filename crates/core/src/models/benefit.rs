use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::validation::{Validate, validators};

/// Benefit granted to an employee (benefício)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: i64,
    #[serde(rename = "funcionarioId")]
    pub employee_id: i64,
    #[serde(rename = "funcionarioNome", default)]
    pub employee_name: Option<String>,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "dataInicio")]
    pub starts_on: NaiveDate,
    #[serde(rename = "dataFim", default)]
    pub ends_on: Option<NaiveDate>,
    #[serde(rename = "observacao", default)]
    pub note: Option<String>,
}

impl Benefit {
    /// A benefit is active on `date` when it has started and not yet ended
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.starts_on <= date && self.ends_on.is_none_or(|end| date <= end)
    }
}

/// Create/update payload for a benefit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitRequest {
    #[serde(rename = "funcionarioId")]
    pub employee_id: i64,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "dataInicio")]
    pub starts_on: NaiveDate,
    #[serde(rename = "dataFim", skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
    #[serde(rename = "observacao", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Validate for BenefitRequest {
    fn validate(&self) -> Result<(), CoreError> {
        validators::validate_not_empty(&self.description, "descricao")?;
        if let Some(end) = self.ends_on {
            validators::validate_period(self.starts_on, end, "dataInicio")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_open_ended_benefit_stays_active() {
        let benefit = Benefit {
            id: 1,
            employee_id: 2,
            employee_name: None,
            description: "Vale refeição".into(),
            amount: Decimal::new(80_000, 2),
            starts_on: date(1, 1),
            ends_on: None,
            note: None,
        };
        assert!(!benefit.is_active_on(date(1, 1).pred_opt().unwrap()));
        assert!(benefit.is_active_on(date(12, 31)));

        let ended = Benefit {
            ends_on: Some(date(6, 30)),
            ..benefit
        };
        assert!(ended.is_active_on(date(6, 30)));
        assert!(!ended.is_active_on(date(7, 1)));
    }

    #[test]
    fn test_request_rejects_end_before_start() {
        let request = BenefitRequest {
            employee_id: 2,
            description: "Plano de saúde".into(),
            amount: Decimal::new(30_000, 2),
            starts_on: date(5, 1),
            ends_on: Some(date(4, 1)),
            note: None,
        };
        assert!(request.validate().is_err());
    }
}
