//! Org chart tree built from flat parent-pointer records
//!
//! The backend lists nodes as flat records carrying an optional parent id
//! and a sibling position. [`OrgTree`] keeps them in an index arena, builds
//! the child lists in one pass and orders every sibling group by position
//! (ties broken by id so the order is stable across reloads).
//!
//! Nodes that cannot be reached from a root, because their parent is missing
//! from the input or because they sit on a parent cycle, are kept out of the
//! hierarchy and reported by [`OrgTree::detached`].

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::CoreError;
use crate::models::{CostCenter, Employee, OrgNode};

/// Index-based org chart tree
#[derive(Debug, Clone, Default)]
pub struct OrgTree {
    nodes: Vec<OrgNode>,
    index: HashMap<i64, usize>,
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    reachable: Vec<bool>,
}

impl OrgTree {
    /// Build the tree from flat records
    ///
    /// Later records repeating an id already seen are ignored.
    pub fn build(records: impl IntoIterator<Item = OrgNode>) -> Self {
        let mut nodes = Vec::new();
        let mut index = HashMap::new();

        for mut node in records {
            if index.contains_key(&node.id) {
                warn!(node_id = node.id, "Ignoring duplicate org chart node");
                continue;
            }
            // Nested children are flattened by from_nested; flat records must not carry them.
            node.children.clear();
            index.insert(node.id, nodes.len());
            nodes.push(node);
        }

        let mut parent = vec![None; nodes.len()];
        let mut children = vec![Vec::new(); nodes.len()];
        let mut roots = Vec::new();

        for (i, node) in nodes.iter().enumerate() {
            match node.parent_id {
                None => roots.push(i),
                Some(parent_id) => {
                    if let Some(&p) = index.get(&parent_id).filter(|&&p| p != i) {
                        parent[i] = Some(p);
                        children[p].push(i);
                    }
                }
            }
        }

        let order = |a: &usize, b: &usize| {
            let (a, b) = (&nodes[*a], &nodes[*b]);
            (a.position, a.id).cmp(&(b.position, b.id))
        };
        roots.sort_by(order);
        for group in &mut children {
            group.sort_by(order);
        }

        let mut tree = Self {
            reachable: vec![false; nodes.len()],
            nodes,
            index,
            parent,
            children,
            roots,
        };
        tree.mark_reachable();
        tree
    }

    /// Build the tree from the nested form returned by `/organograma/arvore`
    ///
    /// Parent ids are taken from the nesting, not from the records.
    pub fn from_nested(roots: Vec<OrgNode>) -> Self {
        let mut flat = Vec::new();
        let mut stack: Vec<(Option<i64>, OrgNode)> =
            roots.into_iter().rev().map(|node| (None, node)).collect();

        while let Some((parent_id, mut node)) = stack.pop() {
            node.parent_id = parent_id;
            let children = std::mem::take(&mut node.children);
            let id = node.id;
            flat.push(node);
            stack.extend(children.into_iter().rev().map(|child| (Some(id), child)));
        }

        Self::build(flat)
    }

    fn mark_reachable(&mut self) {
        let mut stack: Vec<usize> = self.roots.clone();
        while let Some(i) = stack.pop() {
            if self.reachable[i] {
                continue;
            }
            self.reachable[i] = true;
            stack.extend(self.children[i].iter().copied());
        }

        let detached = self.reachable.iter().filter(|r| !**r).count();
        if detached > 0 {
            warn!(detached, "Org chart has nodes unreachable from any root");
        }
    }

    /// Total number of distinct nodes, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node with the given id, reachable or not
    pub fn get(&self, id: i64) -> Option<&OrgNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Whether a node with this id exists
    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    /// Root nodes ordered by position
    pub fn roots(&self) -> impl Iterator<Item = &OrgNode> + '_ {
        self.roots.iter().map(|&i| &self.nodes[i])
    }

    /// Direct children of `id` ordered by position
    pub fn children(&self, id: i64) -> impl Iterator<Item = &OrgNode> + '_ {
        self.index
            .get(&id)
            .map_or(&[][..], |&i| self.children[i].as_slice())
            .iter()
            .map(|&c| &self.nodes[c])
    }

    /// Parent of `id`; `None` for roots and for nodes whose parent is missing
    pub fn parent(&self, id: i64) -> Option<&OrgNode> {
        let &i = self.index.get(&id)?;
        self.parent[i].map(|p| &self.nodes[p])
    }

    /// Distance from the root, `None` for unknown or detached nodes
    pub fn depth(&self, id: i64) -> Option<usize> {
        let &i = self.index.get(&id)?;
        if !self.reachable[i] {
            return None;
        }
        let mut depth = 0;
        let mut current = i;
        while let Some(p) = self.parent[current] {
            depth += 1;
            current = p;
        }
        Some(depth)
    }

    /// Ancestors of `id` from its parent up to the root
    ///
    /// Stops at the first node already visited, so a parent cycle yields
    /// each of its members once.
    pub fn ancestors(&self, id: i64) -> Vec<&OrgNode> {
        let mut out = Vec::new();
        let Some(&start) = self.index.get(&id) else {
            return out;
        };
        let mut seen = vec![false; self.nodes.len()];
        seen[start] = true;
        let mut current = self.parent[start];
        while let Some(p) = current {
            if std::mem::replace(&mut seen[p], true) {
                break;
            }
            out.push(&self.nodes[p]);
            current = self.parent[p];
        }
        out
    }

    /// All nodes below `id` in pre-order, `id` itself excluded
    pub fn descendants(&self, id: i64) -> Vec<&OrgNode> {
        let Some(&start) = self.index.get(&id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut seen = vec![false; self.nodes.len()];
        seen[start] = true;
        let mut stack: Vec<usize> = self.children[start].iter().rev().copied().collect();
        while let Some(i) = stack.pop() {
            if std::mem::replace(&mut seen[i], true) {
                continue;
            }
            out.push(&self.nodes[i]);
            stack.extend(self.children[i].iter().rev().copied());
        }
        out
    }

    /// Whether `node` sits somewhere below `ancestor`
    pub fn is_descendant(&self, ancestor: i64, node: i64) -> bool {
        self.ancestors(node).iter().any(|a| a.id == ancestor)
    }

    /// Every reachable node with its depth, in display order
    pub fn walk(&self) -> Vec<(usize, &OrgNode)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|&i| (0, i)).collect();
        while let Some((depth, i)) = stack.pop() {
            out.push((depth, &self.nodes[i]));
            stack.extend(self.children[i].iter().rev().map(|&c| (depth + 1, c)));
        }
        out
    }

    /// Nodes not reachable from any root, ordered by id
    pub fn detached(&self) -> Vec<&OrgNode> {
        let mut out: Vec<&OrgNode> = self
            .nodes
            .iter()
            .zip(&self.reachable)
            .filter(|(_, reachable)| !**reachable)
            .map(|(node, _)| node)
            .collect();
        out.sort_by_key(|node| node.id);
        out
    }

    /// Check that `node_id` may be re-parented under `new_parent_id`
    ///
    /// `None` moves the node to the top level. Rejects unknown nodes and any
    /// move that would place a node under itself or its own subtree.
    pub fn validate_move(&self, node_id: i64, new_parent_id: Option<i64>) -> Result<(), CoreError> {
        if !self.contains(node_id) {
            return Err(CoreError::NodeNotFound { id: node_id });
        }
        let Some(new_parent_id) = new_parent_id else {
            return Ok(());
        };
        if !self.contains(new_parent_id) {
            return Err(CoreError::NodeNotFound { id: new_parent_id });
        }
        if new_parent_id == node_id || self.is_descendant(node_id, new_parent_id) {
            return Err(CoreError::HierarchyCycle {
                node_id,
                new_parent_id,
            });
        }
        Ok(())
    }

    /// Ids of employees attached to any node
    pub fn assigned_employee_ids(&self) -> BTreeSet<i64> {
        self.nodes
            .iter()
            .flat_map(|node| node.employee_ids.iter().copied())
            .collect()
    }

    /// Employees from `all` not attached to any node
    pub fn unassigned_employees<'a>(&self, all: &'a [Employee]) -> Vec<&'a Employee> {
        let assigned = self.assigned_employee_ids();
        all.iter().filter(|e| !assigned.contains(&e.id)).collect()
    }

    /// Full employee records for the ids attached to `node_id`
    ///
    /// Ids with no matching record are skipped.
    pub fn employees_of<'a>(&self, node_id: i64, all: &'a [Employee]) -> Vec<&'a Employee> {
        let Some(node) = self.get(node_id) else {
            return Vec::new();
        };
        let by_id: HashMap<i64, &Employee> = all.iter().map(|e| (e.id, e)).collect();
        node.employee_ids
            .iter()
            .filter_map(|id| by_id.get(id).copied())
            .collect()
    }

    /// Full cost center records for the ids attached to `node_id`
    pub fn cost_centers_of<'a>(&self, node_id: i64, all: &'a [CostCenter]) -> Vec<&'a CostCenter> {
        let Some(node) = self.get(node_id) else {
            return Vec::new();
        };
        let by_id: HashMap<i64, &CostCenter> = all.iter().map(|c| (c.id, c)).collect();
        node.cost_center_ids
            .iter()
            .filter_map(|id| by_id.get(id).copied())
            .collect()
    }

    /// Rebuild the nested form, children ordered by position
    pub fn to_nested(&self) -> Vec<OrgNode> {
        self.roots.iter().map(|&i| self.nest(i)).collect()
    }

    fn nest(&self, i: usize) -> OrgNode {
        let mut node = self.nodes[i].clone();
        node.children = self.children[i].iter().map(|&c| self.nest(c)).collect();
        node
    }
}
