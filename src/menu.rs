// Interactive menu shell.
//
// The dashboard lives in `APP_STATE` for the whole session so data is
// loaded once and every menu action works on the same record set.
use crate::commands;
use crate::dashboard::Dashboard;
use crate::fetch::TextSource;
use crate::prefs::Prefs;
use crate::types::FilterCriteria;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { dashboard: None }));

struct AppState {
    dashboard: Option<Dashboard>,
}

fn state() -> MutexGuard<'static, AppState> {
    APP_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Print `prompt` and read one trimmed line. `None` on end of input.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Blank input means "no constraint"; anything unreadable is reported and
/// also treated as unset.
fn parse_optional<T: std::str::FromStr>(label: &str, raw: &str) -> Option<T> {
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            println!("Invalid {}: '{}' (ignored)", label, raw);
            None
        }
    }
}

fn print_menu() {
    println!("Organograma Interativo");
    println!("[1] Importar CSV (arquivo)");
    println!("[2] Conectar CSV (URL)");
    println!("[3] Selecionar/limpar líder");
    println!("[4] Selecionar operação");
    println!("[5] Filtros (ano, mês, busca)");
    println!("[6] Limpar filtros");
    println!("[7] Organograma");
    println!("[8] Tabela de operações");
    println!("[9] Faturamento e mão de obra mensal");
    println!("[0] Sair\n");
}

fn handle_choice(choice: &str, d: &mut Dashboard, source: &dyn TextSource, prefs: &Prefs) {
    match choice {
        "1" => {
            let Some(path) = read_line("Caminho do CSV: ") else { return };
            if let Err(e) = commands::import(d, &path) {
                eprintln!("Falha ao importar CSV: {}\n", e);
            }
        }
        "2" => {
            let Some(url) = read_line("URL do CSV: ") else { return };
            if url.is_empty() {
                println!("Informe a URL do CSV\n");
                return;
            }
            if let Err(e) = commands::connect(d, source, prefs, &url) {
                eprintln!("Não foi possível carregar a URL: {}\n", e);
            }
        }
        "3" => {
            let Some(leader) = read_line("Líder (vazio limpa a seleção): ") else { return };
            if leader.is_empty() {
                d.clear_selection();
            } else {
                d.toggle_leader(&leader);
            }
            println!("Líder selecionado: {}\n", d.selected_leader().unwrap_or("Todos os líderes"));
        }
        "4" => {
            let Some(op) = read_line("Operação (id ou nome): ") else { return };
            match d.pick_operation(&op) {
                Ok(leader) => println!("Líder selecionado: {}\n", leader),
                Err(e) => eprintln!("{}\n", e),
            }
        }
        "5" => {
            let year = read_line("Ano: ").unwrap_or_default();
            let month = read_line("Mês: ").unwrap_or_default();
            let search = read_line("Busca (operação): ").unwrap_or_default();
            let leader_name = d.criteria().leader_name.clone();
            d.set_criteria(FilterCriteria {
                leader_name,
                year: parse_optional("year", &year),
                month: parse_optional("month", &month),
                search_text: Some(search).filter(|s| !s.is_empty()),
            });
            println!();
        }
        "6" => {
            d.clear_criteria();
            println!("Filtros limpos.\n");
        }
        "7" => commands::show_tree(d),
        "8" => commands::show_summary(d),
        "9" => commands::show_monthly(d),
        _ => println!("Invalid choice. Please enter 0-9.\n"),
    }
}

pub fn run(dashboard: Dashboard, source: &dyn TextSource, prefs: &Prefs) {
    state().dashboard = Some(dashboard);
    loop {
        print_menu();
        let Some(choice) = read_line("Enter choice: ") else { break };
        if choice == "0" {
            println!("Exiting the program.");
            break;
        }
        let mut guard = state();
        let Some(d) = guard.dashboard.as_mut() else { break };
        handle_choice(&choice, d, source, prefs);
    }
}
