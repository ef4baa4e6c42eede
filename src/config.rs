//! Startup configuration, resolved once before the dashboard is built.

use crate::dashboard::Dashboard;
use crate::error::AppResult;
use crate::fetch::TextSource;
use crate::loader::{load_file, sample_records};
use crate::prefs::Prefs;
use crate::types::FilterCriteria;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_PREFS_PATH: &str = ".org_dashboard_prefs.json";

/// Where the initial record set comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(String),
    Url(String),
    Sample,
}

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub source: DataSource,
    pub prefs: Prefs,
    pub timeout: Option<Duration>,
    pub criteria: FilterCriteria,
}

/// Raw option values as given on the command line or environment.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub file: Option<String>,
    pub csv_url: Option<String>,
    pub prefs_path: Option<String>,
    pub timeout_secs: Option<u64>,
    pub criteria: FilterCriteria,
}

impl StartupConfig {
    /// Source precedence: file, explicit URL, persisted URL, bundled sample.
    /// An unreadable prefs file is logged and treated as empty.
    pub fn resolve(opts: StartupOptions) -> Self {
        let prefs = Prefs::new(opts.prefs_path.as_deref().unwrap_or(DEFAULT_PREFS_PATH));
        let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        let source = if let Some(path) = non_blank(opts.file) {
            DataSource::File(path)
        } else if let Some(url) = non_blank(opts.csv_url) {
            DataSource::Url(url)
        } else {
            match prefs.last_url() {
                Ok(Some(url)) => DataSource::Url(url),
                Ok(None) => DataSource::Sample,
                Err(e) => {
                    warn!(path = %prefs.path().display(), error = %e, "ignoring unreadable preferences");
                    DataSource::Sample
                }
            }
        };

        let criteria = FilterCriteria {
            search_text: non_blank(opts.criteria.search_text),
            leader_name: non_blank(opts.criteria.leader_name),
            year: opts.criteria.year,
            month: opts.criteria.month,
        };

        StartupConfig {
            source,
            prefs,
            timeout: opts.timeout_secs.map(Duration::from_secs),
            criteria,
        }
    }

    /// Build the dashboard from the configured source.
    ///
    /// A local file that fails to load is an error. A remote source that
    /// fails falls back to the sample data with a warning.
    pub fn load_dashboard(&self, remote: &dyn TextSource) -> AppResult<Dashboard> {
        let mut dashboard = match &self.source {
            DataSource::File(path) => Dashboard::new(load_file(path)?),
            DataSource::Sample => Dashboard::new(sample_records()),
            DataSource::Url(url) => {
                let mut d = Dashboard::new(sample_records());
                match d.connect(remote, url) {
                    Ok(n) => info!(url = url.as_str(), rows = n, "loaded initial CSV"),
                    Err(e) => warn!(url = url.as_str(), error = %e, "failed to load initial CSV"),
                }
                d
            }
        };
        dashboard.set_criteria(self.criteria.clone());
        Ok(dashboard)
    }
}
