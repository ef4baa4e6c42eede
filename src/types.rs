use serde::Serialize;
use tabled::Tabled;

/// One parsed input row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRecord {
    pub leader: String,
    pub operation_name: String,
    pub revenue: f64,
    pub labor_cost: f64,
    pub equipment_count: u32,
    pub year: i32,
    pub month: u32,
    pub technician_count: u32,
    pub auxiliary_count: u32,
    /// `op-` followed by the slug of `operation_name`.
    pub operation_id: String,
}

impl OperationRecord {
    /// Widened so two saturated `u32` cells cannot overflow.
    pub fn staffing(&self) -> u64 {
        u64::from(self.technician_count) + u64::from(self.auxiliary_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    pub name: String,
    pub role: String,
    pub id: String,
    pub children: Vec<HierarchyNode>,
}

/// Optional constraints narrowing the visible record set. `None` means no
/// constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub leader_name: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub search_text: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub revenue_sum: f64,
    pub labor_cost_sum: f64,
    pub equipment_sum: u64,
    pub staffing_sum: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    /// `MM/YYYY`
    pub label: String,
    pub revenue_sum: f64,
    pub labor_cost_sum: f64,
}

// Printable/exportable rows. Money is pre-formatted as currency text.

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct OperationRow {
    #[serde(rename = "Operacao")]
    #[tabled(rename = "Operação")]
    pub operation: String,
    #[serde(rename = "Lider")]
    #[tabled(rename = "Líder")]
    pub leader: String,
    #[serde(rename = "Faturamento")]
    #[tabled(rename = "Faturamento")]
    pub revenue: String,
    #[serde(rename = "MaoDeObra")]
    #[tabled(rename = "Mão de Obra (R$)")]
    pub labor_cost: String,
    #[serde(rename = "Equipamentos")]
    #[tabled(rename = "Equipamentos")]
    pub equipment: u32,
    #[serde(rename = "Equipe")]
    #[tabled(rename = "Equipe (T/A)")]
    pub staffing: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MonthlyRow {
    #[serde(rename = "Mes")]
    #[tabled(rename = "Mês")]
    pub label: String,
    #[serde(rename = "Faturamento")]
    #[tabled(rename = "Faturamento")]
    pub revenue: String,
    #[serde(rename = "MaoDeObra")]
    #[tabled(rename = "Mão de Obra")]
    pub labor_cost: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct KpiRow {
    #[tabled(rename = "Indicador")]
    pub label: String,
    #[tabled(rename = "Valor")]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub generated_at: String,
    pub total_records: usize,
    pub filtered_records: usize,
    pub leaders: usize,
    pub selected_leader: Option<String>,
    pub criteria: FilterCriteria,
    pub totals: Totals,
    pub monthly: Vec<MonthlyBucket>,
}
