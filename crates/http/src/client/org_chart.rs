//! Org chart API client methods

use folha_core::models::{
    CostCenterAssignment, EmployeeAssignment, OrgChartCommand, OrgChartOutcome, OrgNode,
    OrgNodeRequest,
};
use folha_core::{CoreError, OrgTree, Validate};
use tracing::debug;

use super::{ApiRequest, ClientError, FolhaClient};

impl FolhaClient {
    /// All nodes as flat parent-pointer records
    pub async fn list_org_nodes(&self) -> Result<Vec<OrgNode>, ClientError> {
        self.execute(ApiRequest::get("/organograma")).await
    }

    /// Fetch every node and build the tree locally
    pub async fn org_tree(&self) -> Result<OrgTree, ClientError> {
        Ok(OrgTree::build(self.list_org_nodes().await?))
    }

    /// Tree as nested by the backend
    pub async fn org_tree_nested(&self) -> Result<Vec<OrgNode>, ClientError> {
        self.execute(ApiRequest::get("/organograma/arvore")).await
    }

    /// Org chart node by id
    pub async fn get_org_node(&self, id: i64) -> Result<OrgNode, ClientError> {
        self.execute(ApiRequest::get(format!("/organograma/{id}"))).await
    }

    /// Direct children of `parent_id`, or the roots when `None`
    pub async fn org_children(&self, parent_id: Option<i64>) -> Result<Vec<OrgNode>, ClientError> {
        self.execute(ApiRequest::get("/organograma/filhos").query_opt("parentId", parent_id))
            .await
    }

    /// Create a node after validating name and description
    pub async fn create_org_node(&self, node: &OrgNodeRequest) -> Result<OrgNode, ClientError> {
        node.validate()?;
        self.execute(ApiRequest::post("/organograma").json(node)?).await
    }

    /// Update a node after validating name and description
    pub async fn update_org_node(&self, id: i64, node: &OrgNodeRequest) -> Result<OrgNode, ClientError> {
        node.validate()?;
        self.execute(ApiRequest::put(format!("/organograma/{id}")).json(node)?)
            .await
    }

    /// Delete a node; the backend refuses nodes that still have children
    pub async fn delete_org_node(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/organograma/{id}")))
            .await
    }

    /// Delete a node together with its whole subtree
    pub async fn delete_org_node_cascade(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/organograma/{id}/cascata")))
            .await
    }

    /// Re-parent and/or reposition a node
    pub async fn move_org_node(
        &self,
        id: i64,
        new_parent_id: Option<i64>,
        new_position: Option<i32>,
    ) -> Result<OrgNode, ClientError> {
        let request = ApiRequest::put(format!("/organograma/{id}/mover"))
            .query_opt("novoParentId", new_parent_id)
            .query_opt("novaPosicao", new_position);
        self.execute(request).await
    }

    /// Root of the active org chart with its subtree, if one is active
    pub async fn active_org_chart(&self) -> Result<Option<OrgNode>, ClientError> {
        self.execute_optional(ApiRequest::get("/organograma/ativo"))
            .await
    }

    /// Make the chart rooted at `root_id` the active one
    pub async fn activate_org_chart(&self, root_id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::put(format!("/organograma/{root_id}/ativar")))
            .await
    }

    /// Clear the active org chart
    pub async fn deactivate_org_chart(&self) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::put("/organograma/desativar"))
            .await
    }

    /// Attach an employee to a node
    pub async fn attach_employee(
        &self,
        node_id: i64,
        employee_id: i64,
    ) -> Result<EmployeeAssignment, ClientError> {
        self.execute(ApiRequest::post(format!(
            "/organograma/{node_id}/funcionarios/{employee_id}"
        )))
        .await
    }

    /// Remove an employee from a node
    pub async fn detach_employee(&self, node_id: i64, employee_id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!(
            "/organograma/{node_id}/funcionarios/{employee_id}"
        )))
        .await
    }

    /// Employee assignments of a node
    pub async fn node_employees(&self, node_id: i64) -> Result<Vec<EmployeeAssignment>, ClientError> {
        self.execute(ApiRequest::get(format!("/organograma/{node_id}/funcionarios")))
            .await
    }

    /// Attach a cost center to a node
    pub async fn attach_cost_center(
        &self,
        node_id: i64,
        cost_center_id: i64,
    ) -> Result<CostCenterAssignment, ClientError> {
        self.execute(ApiRequest::post(format!(
            "/organograma/{node_id}/centros-custo/{cost_center_id}"
        )))
        .await
    }

    /// Remove a cost center from a node
    pub async fn detach_cost_center(&self, node_id: i64, cost_center_id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!(
            "/organograma/{node_id}/centros-custo/{cost_center_id}"
        )))
        .await
    }

    /// Cost center assignments of a node
    pub async fn node_cost_centers(
        &self,
        node_id: i64,
    ) -> Result<Vec<CostCenterAssignment>, ClientError> {
        self.execute(ApiRequest::get(format!("/organograma/{node_id}/centros-custo")))
            .await
    }

    /// Issue an org chart command
    pub async fn apply(&self, command: OrgChartCommand) -> Result<OrgChartOutcome, ClientError> {
        debug!(?command, "Applying org chart command");
        Ok(match command {
            OrgChartCommand::AttachEmployee {
                node_id,
                employee_id,
            } => OrgChartOutcome::EmployeeAttached(self.attach_employee(node_id, employee_id).await?),
            OrgChartCommand::DetachEmployee {
                node_id,
                employee_id,
            } => {
                self.detach_employee(node_id, employee_id).await?;
                OrgChartOutcome::Detached
            }
            OrgChartCommand::AttachCostCenter {
                node_id,
                cost_center_id,
            } => OrgChartOutcome::CostCenterAttached(
                self.attach_cost_center(node_id, cost_center_id).await?,
            ),
            OrgChartCommand::DetachCostCenter {
                node_id,
                cost_center_id,
            } => {
                self.detach_cost_center(node_id, cost_center_id).await?;
                OrgChartOutcome::Detached
            }
            OrgChartCommand::MoveNode {
                node_id,
                new_parent_id,
                new_position,
            } => OrgChartOutcome::Moved(
                self.move_org_node(node_id, new_parent_id, new_position)
                    .await?,
            ),
        })
    }

    /// Check `command` against a local tree before issuing it
    ///
    /// Unknown nodes and moves that would create a cycle are rejected without
    /// a request.
    pub async fn apply_checked(
        &self,
        tree: &OrgTree,
        command: OrgChartCommand,
    ) -> Result<OrgChartOutcome, ClientError> {
        match command {
            OrgChartCommand::MoveNode {
                node_id,
                new_parent_id,
                ..
            } => tree.validate_move(node_id, new_parent_id)?,
            other if !tree.contains(other.node_id()) => {
                return Err(CoreError::NodeNotFound {
                    id: other.node_id(),
                }
                .into());
            }
            _ => {}
        }
        self.apply(command).await
    }
}
