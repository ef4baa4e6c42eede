//! org-dashboard - organizational hierarchy and operations rollup from CSV.
//!
//! # Commands
//!
//! - `org-dashboard summary` - KPIs and the operations table
//! - `org-dashboard tree` - leader → operation hierarchy
//! - `org-dashboard monthly` - revenue and labor cost per month
//! - `org-dashboard export --out-dir reports` - CSV/JSON exports
//! - `org-dashboard connect <url>` - load a published CSV and remember it
//! - `org-dashboard import <file>` - load a local CSV
//! - `org-dashboard interactive` - menu-driven session
//!
//! ```bash
//! org-dashboard --csv-url "https://docs.google.com/.../export?format=csv" --leader "Jhonny Carlos" summary
//! ```
mod commands;
mod config;
mod dashboard;
mod error;
mod fetch;
mod filter;
mod hierarchy;
mod loader;
mod menu;
mod output;
mod prefs;
mod reports;
mod types;
mod util;

use clap::{Parser, Subcommand};
use colored::Colorize;
use config::{StartupConfig, StartupOptions};
use error::AppResult;
use fetch::HttpSource;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use types::FilterCriteria;

#[derive(Parser)]
#[command(name = "org-dashboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Remote CSV to load at startup
    #[arg(long, global = true, env = "ORG_DASHBOARD_CSV_URL")]
    csv_url: Option<String>,

    /// Local CSV to load at startup (takes precedence over --csv-url)
    #[arg(long, global = true)]
    file: Option<String>,

    /// Where the last connected URL is remembered
    #[arg(long, global = true, env = "ORG_DASHBOARD_PREFS")]
    prefs: Option<String>,

    /// HTTP timeout in seconds (default: none)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Only show operations of this leader
    #[arg(long, global = true)]
    leader: Option<String>,

    /// Only show this year
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Only show this month (1-12)
    #[arg(long, global = true)]
    month: Option<u32>,

    /// Case-insensitive text to look for in operation names
    #[arg(long, global = true)]
    search: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// KPIs and operations table for the current view
    Summary,

    /// Hierarchy of leaders and operations
    Tree,

    /// Monthly revenue and labor cost
    Monthly,

    /// Write operations.csv, monthly.csv, hierarchy.json and summary.json
    Export {
        /// Output directory
        #[arg(short, long, default_value = "reports")]
        out_dir: PathBuf,
    },

    /// Fetch a published CSV and remember its URL
    Connect {
        url: String,
    },

    /// Load a local CSV file
    Import {
        path: String,
    },

    /// Menu-driven session
    Interactive,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> AppResult<()> {
    let cfg = StartupConfig::resolve(StartupOptions {
        file: cli.file,
        csv_url: cli.csv_url,
        prefs_path: cli.prefs,
        timeout_secs: cli.timeout_secs,
        criteria: FilterCriteria {
            leader_name: cli.leader,
            year: cli.year,
            month: cli.month,
            search_text: cli.search,
        },
    });
    let source = HttpSource::new(cfg.timeout)?;
    let mut dashboard = cfg.load_dashboard(&source)?;

    match cli.command {
        Commands::Summary => commands::show_summary(&dashboard),
        Commands::Tree => commands::show_tree(&dashboard),
        Commands::Monthly => commands::show_monthly(&dashboard),
        Commands::Export { out_dir } => commands::export(&dashboard, &out_dir)?,
        Commands::Connect { url } => {
            commands::connect(&mut dashboard, &source, &cfg.prefs, &url)?;
        }
        Commands::Import { path } => {
            commands::import(&mut dashboard, &path)?;
        }
        Commands::Interactive => menu::run(dashboard, &source, &cfg.prefs),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
