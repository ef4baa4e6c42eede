use crate::types::{FilterCriteria, OperationRecord};

impl FilterCriteria {
    /// All set constraints must hold. Unset ones always match.
    pub fn matches(&self, r: &OperationRecord) -> bool {
        if let Some(leader) = &self.leader_name {
            if &r.leader != leader {
                return false;
            }
        }
        if self.year.is_some_and(|y| y != r.year) {
            return false;
        }
        if self.month.is_some_and(|m| m != r.month) {
            return false;
        }
        if let Some(needle) = self.search_text.as_deref() {
            if !r.operation_name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

/// Keep the records matching `criteria`, in their original order.
pub fn apply_filter(records: &[OperationRecord], criteria: &FilterCriteria) -> Vec<OperationRecord> {
    records.iter().filter(|r| criteria.matches(r)).cloned().collect()
}
