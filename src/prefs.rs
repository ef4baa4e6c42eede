//! Persisted preferences. Holds exactly one value: the last remote URL that
//! was connected successfully.

use crate::error::PrefsError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PrefsFile {
    csv_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Prefs {
    path: PathBuf,
}

impl Prefs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Prefs { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is not an error; it simply holds no URL.
    pub fn last_url(&self) -> Result<Option<String>, PrefsError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: PrefsFile = serde_json::from_str(&raw)?;
        Ok(file.csv_url.filter(|u| !u.trim().is_empty()))
    }

    pub fn store_url(&self, url: &str) -> Result<(), PrefsError> {
        let file = PrefsFile {
            csv_url: Some(url.to_string()),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        debug!(path = %self.path.display(), "stored last CSV URL");
        Ok(())
    }
}
