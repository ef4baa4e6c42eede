use crate::types::{
    FilterCriteria, KpiRow, MonthlyBucket, MonthlyRow, OperationRecord, OperationRow, SummaryStats,
    Totals,
};
use crate::util::{format_brl, format_int};
use chrono::Local;
use std::collections::{BTreeMap, HashSet};

/// Sum revenue, labor cost, equipment and staffing over `data`.
pub fn summarize(data: &[OperationRecord]) -> Totals {
    data.iter().fold(Totals::default(), |mut t, r| {
        t.revenue_sum += r.revenue;
        t.labor_cost_sum += r.labor_cost;
        t.equipment_sum += u64::from(r.equipment_count);
        t.staffing_sum += r.staffing();
        t
    })
}

/// Group by `(year, month)` and sum revenue and labor cost per bucket.
///
/// Buckets are ordered by the text key `"{year}-{MM}"`, which is
/// chronological for real dates and still total when year or month is 0.
pub fn monthly_series(data: &[OperationRecord]) -> Vec<MonthlyBucket> {
    let mut map: BTreeMap<String, MonthlyBucket> = BTreeMap::new();
    for r in data {
        let key = format!("{}-{:02}", r.year, r.month);
        let e = map.entry(key).or_insert_with(|| MonthlyBucket {
            year: r.year,
            month: r.month,
            label: format!("{:02}/{}", r.month, r.year),
            revenue_sum: 0.0,
            labor_cost_sum: 0.0,
        });
        e.revenue_sum += r.revenue;
        e.labor_cost_sum += r.labor_cost;
    }
    map.into_values().collect()
}

pub fn operation_rows(data: &[OperationRecord]) -> Vec<OperationRow> {
    data.iter()
        .map(|r| OperationRow {
            operation: r.operation_name.clone(),
            leader: r.leader.clone(),
            revenue: format_brl(r.revenue),
            labor_cost: format_brl(r.labor_cost),
            equipment: r.equipment_count,
            staffing: format!("{} T / {} A", r.technician_count, r.auxiliary_count),
        })
        .collect()
}

pub fn monthly_rows(series: &[MonthlyBucket]) -> Vec<MonthlyRow> {
    series
        .iter()
        .map(|b| MonthlyRow {
            label: b.label.clone(),
            revenue: format_brl(b.revenue_sum),
            labor_cost: format_brl(b.labor_cost_sum),
        })
        .collect()
}

pub fn kpi_rows(totals: &Totals) -> Vec<KpiRow> {
    vec![
        KpiRow {
            label: "Faturamento (total)".to_string(),
            value: format_brl(totals.revenue_sum),
        },
        KpiRow {
            label: "Mão de Obra (total)".to_string(),
            value: format_brl(totals.labor_cost_sum),
        },
        KpiRow {
            label: "Equipamentos (soma)".to_string(),
            value: format_int(totals.equipment_sum),
        },
        KpiRow {
            label: "Equipe (total pessoas)".to_string(),
            value: format_int(totals.staffing_sum),
        },
    ]
}

pub fn generate_summary(
    all: &[OperationRecord],
    filtered: &[OperationRecord],
    criteria: &FilterCriteria,
    selected_leader: Option<&str>,
) -> SummaryStats {
    let leaders: HashSet<&str> = all.iter().map(|r| r.leader.as_str()).collect();
    SummaryStats {
        generated_at: Local::now().to_rfc3339(),
        total_records: all.len(),
        filtered_records: filtered.len(),
        leaders: leaders.len(),
        selected_leader: selected_leader.map(str::to_string),
        criteria: criteria.clone(),
        totals: summarize(filtered),
        monthly: monthly_series(filtered),
    }
}
