//! Dashboard state: the current record set, filter criteria and leader
//! selection.
//!
//! Each piece is replaced wholesale. The record set is shared behind an
//! `Arc` and never mutated; hierarchy, filtered view, totals and monthly
//! series are derived from it on demand.

use crate::error::{AppError, AppResult, SchemaError};
use crate::fetch::TextSource;
use crate::filter::apply_filter;
use crate::hierarchy::build_hierarchy;
use crate::loader::parse_csv;
use crate::reports::{monthly_series, summarize};
use crate::types::{FilterCriteria, HierarchyNode, MonthlyBucket, OperationRecord, Totals};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct Dashboard {
    records: Arc<Vec<OperationRecord>>,
    criteria: FilterCriteria,
    selected_leader: Option<String>,
}

impl Dashboard {
    pub fn new(records: Vec<OperationRecord>) -> Self {
        Dashboard {
            records: Arc::new(records),
            criteria: FilterCriteria::default(),
            selected_leader: None,
        }
    }

    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn selected_leader(&self) -> Option<&str> {
        self.selected_leader.as_deref()
    }

    /// Swap in a new record set. Selection is cleared.
    pub fn replace_records(&mut self, records: Vec<OperationRecord>) {
        info!(rows = records.len(), "record set replaced");
        self.records = Arc::new(records);
        self.selected_leader = None;
    }

    /// Parse `text` and replace the record set. On error nothing changes.
    pub fn import_text(&mut self, text: &str) -> Result<usize, SchemaError> {
        let records = parse_csv(text)?;
        let n = records.len();
        self.replace_records(records);
        Ok(n)
    }

    /// Fetch `url` through `source`, then parse and replace. A failed fetch
    /// or parse leaves the current state untouched.
    pub fn connect(&mut self, source: &dyn TextSource, url: &str) -> AppResult<usize> {
        let text = source.fetch_text(url).map_err(|e| {
            warn!(url, error = %e, "fetch failed, keeping current data");
            e
        })?;
        Ok(self.import_text(&text)?)
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        debug!(?criteria, "filter criteria replaced");
        self.criteria = criteria;
    }

    /// Reset year, month, search and leader criteria. The selection stays.
    pub fn clear_criteria(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    /// Select `leader`, or clear the selection if it is already selected.
    /// Unknown leaders clear the selection.
    pub fn toggle_leader(&mut self, leader: &str) {
        self.selected_leader = if self.selected_leader.as_deref() == Some(leader) {
            None
        } else if self.records.iter().any(|r| r.leader == leader) {
            Some(leader.to_string())
        } else {
            None
        };
    }

    pub fn clear_selection(&mut self) {
        self.selected_leader = None;
    }

    /// Select the leader owning an operation, matched by operation id and
    /// then by name.
    pub fn pick_operation(&mut self, key: &str) -> AppResult<String> {
        let leader = self
            .records
            .iter()
            .find(|r| r.operation_id == key)
            .or_else(|| self.records.iter().find(|r| r.operation_name == key))
            .map(|r| r.leader.clone())
            .ok_or_else(|| AppError::UnknownOperation(key.to_string()))?;
        self.selected_leader = Some(leader.clone());
        Ok(leader)
    }

    /// Criteria actually applied: the selection, when present, overrides
    /// `leader_name`.
    pub fn effective_criteria(&self) -> FilterCriteria {
        let mut c = self.criteria.clone();
        if let Some(leader) = &self.selected_leader {
            c.leader_name = Some(leader.clone());
        }
        c
    }

    pub fn hierarchy(&self) -> HierarchyNode {
        build_hierarchy(&self.records)
    }

    pub fn filtered(&self) -> Vec<OperationRecord> {
        apply_filter(&self.records, &self.effective_criteria())
    }

    pub fn totals(&self) -> Totals {
        summarize(&self.filtered())
    }

    pub fn monthly(&self) -> Vec<MonthlyBucket> {
        monthly_series(&self.filtered())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::loader::sample_records;

    const CSV: &str = "lider,operacao,faturamento,maodeobra,equipamentos,ano,mes\n\
                       A,One,100,10,1,2025,9\n\
                       B,Two,200,20,2,2025,9\n\
                       A,Three,300,30,3,2025,8";

    struct FixedSource(Result<String, ()>);

    impl TextSource for FixedSource {
        fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
            self.0.clone().map_err(|_| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(parse_csv(CSV).unwrap())
    }

    #[test]
    fn toggle_selects_then_clears() {
        let mut d = dashboard();
        d.toggle_leader("A");
        assert_eq!(d.selected_leader(), Some("A"));
        assert_eq!(d.filtered().len(), 2);
        assert_eq!(d.totals().revenue_sum, 400.0);
        d.toggle_leader("A");
        assert_eq!(d.selected_leader(), None);
        assert_eq!(d.filtered().len(), 3);
    }

    #[test]
    fn toggle_unknown_leader_clears() {
        let mut d = dashboard();
        d.toggle_leader("A");
        d.toggle_leader("Nobody");
        assert_eq!(d.selected_leader(), None);
    }

    #[test]
    fn pick_operation_selects_its_leader() {
        let mut d = dashboard();
        assert_eq!(d.pick_operation("op-two").unwrap(), "B");
        assert_eq!(d.selected_leader(), Some("B"));
        assert_eq!(d.pick_operation("Three").unwrap(), "A");
        assert!(matches!(d.pick_operation("nope"), Err(AppError::UnknownOperation(_))));
        assert_eq!(d.selected_leader(), Some("A"));
    }

    #[test]
    fn selection_overrides_leader_criterion_and_survives_clear() {
        let mut d = dashboard();
        d.set_criteria(FilterCriteria {
            leader_name: Some("B".into()),
            month: Some(9),
            ..Default::default()
        });
        assert_eq!(d.filtered().len(), 1);
        d.toggle_leader("A");
        assert_eq!(d.effective_criteria().leader_name.as_deref(), Some("A"));
        assert_eq!(d.filtered().len(), 1);
        assert_eq!(d.filtered()[0].operation_name, "One");
        d.clear_criteria();
        assert_eq!(d.selected_leader(), Some("A"));
        assert_eq!(d.filtered().len(), 2);
        assert_eq!(d.monthly().len(), 2);
    }

    #[test]
    fn import_replaces_and_clears_selection() {
        let mut d = Dashboard::new(sample_records());
        d.toggle_leader("Jhonny Carlos");
        let n = d.import_text(CSV).unwrap();
        assert_eq!(n, 3);
        assert_eq!(d.selected_leader(), None);
        assert_eq!(d.hierarchy().children.len(), 2);
    }

    #[test]
    fn failed_import_keeps_previous_state() {
        let mut d = dashboard();
        d.toggle_leader("B");
        assert!(d.import_text("lider,operacao\nX,Y").is_err());
        assert_eq!(d.records().len(), 3);
        assert_eq!(d.selected_leader(), Some("B"));
    }

    #[test]
    fn connect_applies_fetched_text() {
        let mut d = Dashboard::new(sample_records());
        let n = d.connect(&FixedSource(Ok(CSV.to_string())), "http://x/data.csv").unwrap();
        assert_eq!(n, 3);
        assert_eq!(d.records()[0].leader, "A");
    }

    #[test]
    fn failed_fetch_keeps_previous_state() {
        let mut d = dashboard();
        let err = d.connect(&FixedSource(Err(())), "http://x/missing.csv").unwrap_err();
        assert!(matches!(err, AppError::Fetch(FetchError::Status { status: 404, .. })));
        assert_eq!(d.records().len(), 3);
    }

    #[test]
    fn fetched_text_with_bad_schema_keeps_previous_state() {
        let mut d = dashboard();
        let err = d
            .connect(&FixedSource(Ok("foo,bar\n1,2".to_string())), "http://x/bad.csv")
            .unwrap_err();
        assert!(matches!(err, AppError::Schema(SchemaError::MissingColumns { .. })));
        assert_eq!(d.records().len(), 3);
    }
}
