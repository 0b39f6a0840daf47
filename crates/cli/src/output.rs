//! Plain-text rendering for command output

use chrono::NaiveDateTime;
use folha_core::models::{Employee, OrgNode};
use folha_core::session::{format_remaining, session_status};
use folha_core::{OrgTree, TokenSet, TokenStatus};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Money with exactly two decimal places, half-cents rounded away from zero
pub fn money(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

/// Left-aligned columns sized to their widest cell
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = vec![render_row(headers.iter().copied(), &widths)];
    out.extend(rows.iter().map(|row| render_row(row.iter().map(String::as_str), &widths)));
    out.join("\n")
}

fn node_label(node: &OrgNode) -> String {
    let mut label = format!("{} [{}]", node.name, node.id);
    if node.in_active_chart == Some(true) {
        label.push_str(" (active)");
    }
    label
}

fn push_node(
    tree: &OrgTree,
    employees: Option<&[Employee]>,
    depth: usize,
    node: &OrgNode,
    lines: &mut Vec<String>,
) {
    let indent = "  ".repeat(depth);
    lines.push(format!("{indent}{}", node_label(node)));
    if let Some(all) = employees {
        for employee in tree.employees_of(node.id, all) {
            lines.push(format!("{indent}  - {} [{}]", employee.name, employee.id));
        }
    }
}

/// Indented org chart, optionally listing each node's employees
///
/// Nodes unreachable from a root are listed under a separate heading.
pub fn render_tree(tree: &OrgTree, employees: Option<&[Employee]>) -> String {
    if tree.is_empty() {
        return "(empty org chart)".to_string();
    }

    let mut lines = Vec::new();
    for (depth, node) in tree.walk() {
        push_node(tree, employees, depth, node, &mut lines);
    }

    let detached = tree.detached();
    if !detached.is_empty() {
        lines.push(String::new());
        lines.push("Detached nodes:".to_string());
        for node in detached {
            push_node(tree, employees, 1, node, &mut lines);
        }
    }

    lines.join("\n")
}

/// Human-readable session summary
pub fn render_status(
    base_url: &str,
    tokens: Option<&TokenSet>,
    now: NaiveDateTime,
    skew: chrono::Duration,
) -> String {
    let status = session_status(tokens, now, skew);
    let mut lines = vec![format!("Server:  {base_url}"), format!("Session: {status}")];

    if let Some(tokens) = tokens {
        lines.push(format!("Login:   {}", tokens.login));
        let remaining = |until| format_remaining(now, until).unwrap_or_else(|| "expired".to_string());
        lines.push(format!(
            "Access:  {} ({})",
            remaining(tokens.token_expiration),
            tokens.token_expiration.format("%Y-%m-%d %H:%M")
        ));
        lines.push(format!(
            "Refresh: {} ({})",
            remaining(tokens.refresh_expiration),
            tokens.refresh_expiration.format("%Y-%m-%d %H:%M")
        ));
    }

    if status == TokenStatus::RefreshExpired || status == TokenStatus::NoSession {
        lines.push("Run `folha login` to start a session.".to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::str::FromStr;

    fn node(id: i64, parent: Option<i64>, position: i32) -> OrgNode {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "nome": format!("Node {id}"),
            "parentId": parent,
            "posicao": position
        }))
        .unwrap()
    }

    fn employee(id: i64, name: &str) -> Employee {
        serde_json::from_value(serde_json::json!({"id": id, "nome": name})).unwrap()
    }

    #[test]
    fn test_money_always_has_two_places() {
        assert_eq!(money(Decimal::from(1500)), "1500.00");
        assert_eq!(money(Decimal::from_str("10.005").unwrap()), "10.01");
        assert_eq!(money(Decimal::from_str("-3.1").unwrap()), "-3.10");
    }

    #[test]
    fn test_table_pads_columns() {
        let rendered = table(
            &["ID", "Name"],
            &[vec!["1".into(), "Ana".into()], vec!["20".into(), "Bruno".into()]],
        );
        assert_eq!(rendered, "ID  Name\n1   Ana\n20  Bruno");
    }

    #[test]
    fn test_tree_is_indented_and_lists_detached_nodes() {
        let tree = OrgTree::build(vec![
            node(1, None, 0),
            node(2, Some(1), 0),
            node(3, Some(99), 0),
        ]);
        let rendered = render_tree(&tree, None);
        assert_eq!(
            rendered,
            "Node 1 [1]\n  Node 2 [2]\n\nDetached nodes:\n  Node 3 [3]"
        );
    }

    #[test]
    fn test_tree_lists_employees_under_nodes() {
        let mut root = node(1, None, 0);
        root.employee_ids = vec![7];
        let tree = OrgTree::build(vec![root]);
        let all = vec![employee(7, "Ana"), employee(8, "Bruno")];
        assert_eq!(render_tree(&tree, Some(&all)), "Node 1 [1]\n  - Ana [7]");
    }

    #[test]
    fn test_status_without_session_suggests_login() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let rendered = render_status("http://localhost:8083/api", None, now, Duration::minutes(5));
        assert!(rendered.contains("Session: not logged in"));
        assert!(rendered.contains("folha login"));
    }

    #[test]
    fn test_status_shows_remaining_time() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let tokens = TokenSet {
            login: "admin".into(),
            token: "t".into(),
            refresh_token: "r".into(),
            token_expiration: now + Duration::hours(2),
            refresh_expiration: now + Duration::days(3),
        };
        let rendered = render_status("http://x/api", Some(&tokens), now, Duration::minutes(5));
        assert!(rendered.contains("Session: valid"));
        assert!(rendered.contains("Login:   admin"));
        assert!(rendered.contains("Access:  2h 0m"));
        assert!(rendered.contains("Refresh: 3d 0h"));
    }
}
