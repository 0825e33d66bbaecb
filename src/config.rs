//! Startup Configuration Module
//! Optional `vaxdash.json` in the working directory: CSV path, rollup
//! boundary, and the initial date shown in the sidebar.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::data::RollupBoundary;

pub const CONFIG_FILE: &str = "vaxdash.json";
pub const DEFAULT_CSV: &str = "cowin_vaccine_data_statewise.csv";
pub const DEFAULT_DATE: &str = "25/06/2021";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the CoWIN statewise export to load at startup.
    pub csv_path: String,
    /// Date pre-filled in the sidebar.
    pub date: String,
    /// Where the nationwide rollup segment starts.
    pub rollup: RollupBoundary,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: DEFAULT_CSV.to_string(),
            date: DEFAULT_DATE.to_string(),
            rollup: RollupBoundary::default(),
        }
    }
}

impl AppConfig {
    /// Read the config file if present; fall back to defaults on any
    /// problem so a broken config never prevents the app from starting.
    pub fn load_or_default() -> Self {
        match Self::read(Path::new(CONFIG_FILE)) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!("ignoring {}: {:#}", CONFIG_FILE, err);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_none() {
        assert!(AppConfig::read(Path::new("/nonexistent/vaxdash.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"csv_path": "other.csv"}}"#).unwrap();
        file.flush().unwrap();

        let config = AppConfig::read(file.path()).unwrap().unwrap();
        assert_eq!(config.csv_path, "other.csv");
        assert_eq!(config.date, DEFAULT_DATE);
        assert_eq!(config.rollup, RollupBoundary::default());
    }

    #[test]
    fn rollup_modes_round_trip() {
        let offset: AppConfig =
            serde_json::from_str(r#"{"rollup": {"mode": "offset", "value": 120}}"#).unwrap();
        assert_eq!(offset.rollup, RollupBoundary::Offset(120));

        let marker: AppConfig =
            serde_json::from_str(r#"{"rollup": {"mode": "marker", "value": "India"}}"#).unwrap();
        assert_eq!(marker.rollup, RollupBoundary::Marker("India".to_string()));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        file.flush().unwrap();
        assert!(AppConfig::read(file.path()).is_err());
    }
}
