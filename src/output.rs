use crate::types::HierarchyNode;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), std::io::Error> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)
}

/// Render rows as a Markdown table, or `empty_note` when there are none.
pub fn render_table<T>(rows: &[T], empty_note: &str) -> String
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        return format!("({})", empty_note);
    }
    Table::new(rows.to_vec()).with(Style::markdown()).to_string()
}

pub fn print_table<T>(title: &str, rows: &[T], empty_note: &str)
where
    T: Tabled + Clone,
{
    println!("{}\n", title);
    println!("{}\n", render_table(rows, empty_note));
}

/// Indented outline of the hierarchy. The `selected` leader is starred.
pub fn render_tree(root: &HierarchyNode, selected: Option<&str>) -> String {
    let mut out = String::new();
    render_node(root, 0, selected, &mut out);
    out
}

fn render_node(node: &HierarchyNode, depth: usize, selected: Option<&str>, out: &mut String) {
    let mark = if depth == 1 && selected == Some(node.name.as_str()) { "* " } else { "" };
    out.push_str(&format!(
        "{}{}{} ({}) [{}]\n",
        "  ".repeat(depth),
        mark,
        node.name,
        node.role,
        node.id
    ));
    for child in &node.children {
        render_node(child, depth + 1, selected, out);
    }
}
