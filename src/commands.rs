//! Command implementations shared by the CLI and the interactive menu.

use crate::dashboard::Dashboard;
use crate::error::AppResult;
use crate::fetch::TextSource;
use crate::loader::load_file;
use crate::output::{print_table, render_tree, write_csv, write_json};
use crate::prefs::Prefs;
use crate::reports::{generate_summary, kpi_rows, monthly_rows, operation_rows};
use crate::util::format_int;
use std::path::Path;
use tracing::{info, warn};

fn print_view_header(d: &Dashboard) {
    let criteria = d.effective_criteria();
    let label = criteria.leader_name.as_deref().unwrap_or("Todos os líderes");
    println!("Líder selecionado: {}", label);
    if !criteria.is_empty() {
        let year = criteria.year.map_or("-".to_string(), |y| y.to_string());
        let month = criteria.month.map_or("-".to_string(), |m| m.to_string());
        let search = criteria.search_text.as_deref().unwrap_or("-");
        println!("Filtros: ano {} | mês {} | busca {}", year, month, search);
    }
    println!("{} operações\n", format_int(d.filtered().len()));
}

pub fn show_summary(d: &Dashboard) {
    print_view_header(d);
    let filtered = d.filtered();
    print_table("Indicadores", &kpi_rows(&d.totals()), "sem dados");
    print_table(
        "Tabela de operações",
        &operation_rows(&filtered),
        "Nenhuma operação encontrada com os filtros atuais.",
    );
}

pub fn show_tree(d: &Dashboard) {
    println!("Organograma\n");
    let criteria = d.effective_criteria();
    print!("{}", render_tree(&d.hierarchy(), criteria.leader_name.as_deref()));
    println!();
}

pub fn show_monthly(d: &Dashboard) {
    print_view_header(d);
    print_table(
        "Faturamento e mão de obra mensal",
        &monthly_rows(&d.monthly()),
        "Sem dados mensais para o filtro atual.",
    );
}

/// Write the current view to `out_dir` as CSV and JSON files.
pub fn export(d: &Dashboard, out_dir: &Path) -> AppResult<()> {
    std::fs::create_dir_all(out_dir)?;
    let filtered = d.filtered();

    let operations = out_dir.join("operations.csv");
    write_csv(&operations, &operation_rows(&filtered))?;
    let monthly = out_dir.join("monthly.csv");
    write_csv(&monthly, &monthly_rows(&d.monthly()))?;
    let hierarchy = out_dir.join("hierarchy.json");
    write_json(&hierarchy, &d.hierarchy())?;

    let summary = generate_summary(
        d.records(),
        &filtered,
        &d.effective_criteria(),
        d.selected_leader(),
    );
    let summary_path = out_dir.join("summary.json");
    write_json(&summary_path, &summary)?;

    info!(dir = %out_dir.display(), rows = filtered.len(), "exported reports");
    println!("Outputs saved to {}:", out_dir.display());
    for p in [&operations, &monthly, &hierarchy, &summary_path] {
        println!("  {}", p.display());
    }
    Ok(())
}

/// Fetch `url`, replace the record set and remember the URL.
pub fn connect(
    d: &mut Dashboard,
    source: &dyn TextSource,
    prefs: &Prefs,
    url: &str,
) -> AppResult<usize> {
    let n = d.connect(source, url)?;
    // The data is already applied; failing to remember the URL is not fatal.
    if let Err(e) = prefs.store_url(url) {
        warn!(error = %e, "could not persist CSV URL");
    }
    println!("Conectado! Linhas: {}", format_int(n));
    Ok(n)
}

pub fn import(d: &mut Dashboard, path: &str) -> AppResult<usize> {
    let records = load_file(path)?;
    let n = records.len();
    d.replace_records(records);
    println!("CSV importado: {} linhas", format_int(n));
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::loader::sample_records;

    struct Served(&'static str);

    impl TextSource for Served {
        fn fetch_text(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    const CSV: &str = "lider,operacao,faturamento,maodeobra,equipamentos,ano,mes\nA,One,100,10,1,2025,9\n";

    #[test]
    fn connect_persists_url_only_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Prefs::new(dir.path().join("prefs.json"));
        let mut d = Dashboard::new(sample_records());

        assert!(connect(&mut d, &Served("bad"), &prefs, "https://x/bad.csv").is_err());
        assert_eq!(prefs.last_url().unwrap(), None);
        assert_eq!(d.records().len(), 3);

        assert_eq!(connect(&mut d, &Served(CSV), &prefs, "https://x/good.csv").unwrap(), 1);
        assert_eq!(prefs.last_url().unwrap().as_deref(), Some("https://x/good.csv"));
    }

    #[test]
    fn import_replaces_record_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ops.csv");
        std::fs::write(&path, CSV).unwrap();
        let mut d = Dashboard::new(sample_records());
        assert_eq!(import(&mut d, path.to_str().unwrap()).unwrap(), 1);
        assert_eq!(d.records()[0].operation_name, "One");
    }

    #[test]
    fn export_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut d = Dashboard::new(sample_records());
        d.toggle_leader("Jhonny Carlos");
        export(&d, &out).unwrap();

        for name in ["operations.csv", "monthly.csv", "hierarchy.json", "summary.json"] {
            assert!(out.join(name).exists(), "{} missing", name);
        }
        let summary: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["filtered_records"], 1);
        assert_eq!(summary["total_records"], 3);
        assert_eq!(summary["totals"]["revenue_sum"], 185000.0);
        assert_eq!(summary["criteria"]["leader_name"], "Jhonny Carlos");
    }
}
