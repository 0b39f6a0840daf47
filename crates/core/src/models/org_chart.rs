use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::employee::Employee;
use super::organization::CostCenter;
use crate::CoreError;
use crate::validation::{Validate, validators};

/// Org chart node (nó do organograma) as a flat parent-pointer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgNode {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    /// Depth assigned by the backend, 0 for roots
    #[serde(rename = "nivel", default)]
    pub level: i32,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<i64>,
    #[serde(rename = "parentNome", default)]
    pub parent_name: Option<String>,
    /// Order among siblings
    #[serde(rename = "posicao", default)]
    pub position: i32,
    #[serde(rename = "ativo", default)]
    pub active: Option<bool>,
    #[serde(rename = "organogramaAtivo", default)]
    pub in_active_chart: Option<bool>,
    #[serde(rename = "funcionarioIds", default, deserialize_with = "null_as_empty")]
    pub employee_ids: Vec<i64>,
    #[serde(rename = "funcionarios", default, deserialize_with = "null_as_empty")]
    pub employees: Vec<Employee>,
    #[serde(rename = "centroCustoIds", default, deserialize_with = "null_as_empty")]
    pub cost_center_ids: Vec<i64>,
    #[serde(rename = "centrosCusto", default, deserialize_with = "null_as_empty")]
    pub cost_centers: Vec<CostCenter>,
    /// Only populated by the server-side tree endpoints
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<OrgNode>,
    #[serde(rename = "dataCriacao", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "dataAtualizacao", default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(rename = "criadoPor", default)]
    pub created_by: Option<String>,
    #[serde(rename = "atualizadoPor", default)]
    pub updated_by: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

const NODE_NAME_MAX: usize = 100;
const NODE_DESCRIPTION_MAX: usize = 1000;

/// Create/update payload for a node
///
/// When `position` is omitted on create the backend appends the node after
/// its last sibling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgNodeRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(rename = "posicao", skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

impl Validate for OrgNodeRequest {
    fn validate(&self) -> Result<(), CoreError> {
        validators::validate_length(&self.name, 1, NODE_NAME_MAX, "nome")?;
        validators::validate_max_length(self.description.as_deref(), NODE_DESCRIPTION_MAX, "descricao")?;
        if let Some(position) = self.position {
            validators::validate_range(position, 0, i32::MAX, "posicao")?;
        }
        Ok(())
    }
}

/// Association of an employee with a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeAssignment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "funcionarioId")]
    pub employee_id: i64,
    #[serde(rename = "funcionario", default)]
    pub employee: Option<Employee>,
    #[serde(rename = "noOrganogramaId")]
    pub node_id: i64,
    #[serde(rename = "dataCriacao", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "criadoPor", default)]
    pub created_by: Option<String>,
}

/// Association of a cost center with a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterAssignment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "centroCustoId")]
    pub cost_center_id: i64,
    #[serde(rename = "centroCusto", default)]
    pub cost_center: Option<CostCenter>,
    #[serde(rename = "noOrganogramaId")]
    pub node_id: i64,
    #[serde(rename = "dataCriacao", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "criadoPor", default)]
    pub created_by: Option<String>,
}

/// Explicit edits issued against the org chart
///
/// These replace the drag-and-drop gestures of an interactive editor:
/// dropping an employee or cost center on a node, removing it again, or
/// dragging a node to a new parent/position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgChartCommand {
    AttachEmployee { node_id: i64, employee_id: i64 },
    DetachEmployee { node_id: i64, employee_id: i64 },
    AttachCostCenter { node_id: i64, cost_center_id: i64 },
    DetachCostCenter { node_id: i64, cost_center_id: i64 },
    MoveNode {
        node_id: i64,
        new_parent_id: Option<i64>,
        new_position: Option<i32>,
    },
}

impl OrgChartCommand {
    /// Node the command is applied to
    pub fn node_id(&self) -> i64 {
        match *self {
            Self::AttachEmployee { node_id, .. }
            | Self::DetachEmployee { node_id, .. }
            | Self::AttachCostCenter { node_id, .. }
            | Self::DetachCostCenter { node_id, .. }
            | Self::MoveNode { node_id, .. } => node_id,
        }
    }
}

/// Result of applying an [`OrgChartCommand`]
#[derive(Debug, Clone, PartialEq)]
pub enum OrgChartOutcome {
    EmployeeAttached(EmployeeAssignment),
    CostCenterAttached(CostCenterAssignment),
    Detached,
    Moved(OrgNode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_tolerates_null_collections() {
        let node: OrgNode = serde_json::from_value(serde_json::json!({
            "id": 5,
            "nome": "Diretoria",
            "nivel": 0,
            "parentId": null,
            "posicao": 2,
            "funcionarioIds": null,
            "children": null
        }))
        .unwrap();
        assert_eq!(node.parent_id, None);
        assert!(node.employee_ids.is_empty());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_request_limits() {
        let mut request = OrgNodeRequest {
            name: "Financeiro".into(),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        request.description = Some("d".repeat(1001));
        assert!(request.validate().is_err());

        request.description = None;
        request.name = "   ".into();
        assert!(request.validate().is_err());
    }
}
