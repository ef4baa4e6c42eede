use crate::types::{HierarchyNode, OperationRecord};
use crate::util::slug;
use std::collections::HashSet;

pub const ROOT_NAME: &str = "Paulo Amaral";
pub const ROOT_ROLE: &str = "Gestor de Operações";
pub const ROOT_ID: &str = "root";
pub const LEADER_ROLE: &str = "Supervisor Regional";
pub const OPERATION_ROLE: &str = "Operação";

/// Group records into root → leaders → operations.
///
/// Leaders appear in first-seen order; each leader's operations keep the
/// record set's relative order.
pub fn build_hierarchy(records: &[OperationRecord]) -> HierarchyNode {
    let mut seen: HashSet<&str> = HashSet::new();
    let leaders: Vec<&str> = records
        .iter()
        .map(|r| r.leader.as_str())
        .filter(|l| !l.is_empty() && seen.insert(*l))
        .collect();

    let children = leaders
        .into_iter()
        .map(|leader| HierarchyNode {
            name: leader.to_string(),
            role: LEADER_ROLE.to_string(),
            id: slug(leader),
            children: records
                .iter()
                .filter(|r| r.leader == leader)
                .map(|r| HierarchyNode {
                    name: r.operation_name.clone(),
                    role: OPERATION_ROLE.to_string(),
                    id: r.operation_id.clone(),
                    children: Vec::new(),
                })
                .collect(),
        })
        .collect();

    HierarchyNode {
        name: ROOT_NAME.to_string(),
        role: ROOT_ROLE.to_string(),
        id: ROOT_ID.to_string(),
        children,
    }
}
