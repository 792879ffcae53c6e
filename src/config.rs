use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Column mapping: logical roles → physical CSV headers
// ---------------------------------------------------------------------------

/// Maps the four logical columns of a limits table to the header names used
/// in the source file.  Header names are compared after whitespace trimming,
/// so `" LIC "` in an exported CSV still matches `"LIC"` here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Test fixture / process variant identifier (Base/FVT).
    pub base: String,
    /// Measured part / feature identifier.
    pub variable: String,
    /// Lower control limit column.
    pub lic: String,
    /// Upper control limit column.
    pub lsc: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            base: "Base".to_string(),
            variable: "Variable".to_string(),
            lic: "LIC".to_string(),
            lsc: "LSC".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Startup configuration.  Read from `limitview.json` next to the binary when
/// present, otherwise defaults are used (data file `limits.csv`, standard
/// column names).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the limits table loaded at startup.
    pub data_path: PathBuf,
    /// Logical-to-physical column mapping.
    pub columns: ColumnConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("limits.csv"),
            columns: ColumnConfig::default(),
        }
    }
}

pub const CONFIG_FILE: &str = "limitview.json";

impl AppConfig {
    /// Load configuration from `path`, or fall back to defaults when the file
    /// does not exist.  A present-but-malformed config file is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_use_standard_column_names() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.columns.base, "Base");
        assert_eq!(cfg.columns.variable, "Variable");
        assert_eq!(cfg.columns.lic, "LIC");
        assert_eq!(cfg.columns.lsc, "LSC");
        assert_eq!(cfg.data_path, PathBuf::from("limits.csv"));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_or_default(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg.columns.lic, "LIC");
    }

    #[test]
    fn partial_config_file_overrides_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limitview.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, r#"{{"columns": {{"base": "FVT"}}}}"#).unwrap();

        let cfg = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(cfg.columns.base, "FVT");
        assert_eq!(cfg.columns.lsc, "LSC");
        assert_eq!(cfg.data_path, PathBuf::from("limits.csv"));
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limitview.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(AppConfig::load_or_default(&path).is_err());
    }
}
