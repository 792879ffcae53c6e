use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{LimitDataset, LimitRecord};
use crate::config::ColumnConfig;

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// Structural problems in a limits file.  These are unrecoverable: the whole
/// load fails, nothing partial is returned.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}' (headers are matched after trimming whitespace)")]
    MissingColumn(String),
    #[error("row {row}: column '{column}' value '{value}' is not a number")]
    NotNumeric {
        row: usize,
        column: String,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a limits table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row + one record per line (primary format)
/// * `.json` – records array: `[{ "Base": "FVT1", "Variable": "p1", ... }, ...]`
pub fn load_file(path: &Path, columns: &ColumnConfig) -> Result<LimitDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path, columns),
        "json" => load_json(path, columns),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one limit record per line.
/// Header names are trimmed before matching so exports with stray spaces
/// (`"LIC "`) still resolve.  Columns not mapped by the [`ColumnConfig`] are
/// carried along as untyped extra text.
fn load_csv(path: &Path, columns: &ColumnConfig) -> Result<LimitDataset> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let roles = ColumnIndices::resolve(&headers, columns)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let base = record.get(roles.base).unwrap_or("").trim().to_string();
        let variable = record.get(roles.variable).unwrap_or("").trim().to_string();
        let lic = parse_limit(record.get(roles.lic).unwrap_or(""), row_no, &columns.lic)?;
        let lsc = parse_limit(record.get(roles.lsc).unwrap_or(""), row_no, &columns.lsc)?;

        let mut extra = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if roles.is_mapped(col_idx) {
                continue;
            }
            if let Some(name) = headers.get(col_idx) {
                extra.insert(name.clone(), value.to_string());
            }
        }

        records.push(LimitRecord {
            base,
            variable,
            lic,
            lsc,
            extra,
        });
    }

    Ok(LimitDataset::from_records(records))
}

/// Resolved positions of the four logical columns within the header row.
struct ColumnIndices {
    base: usize,
    variable: usize,
    lic: usize,
    lsc: usize,
}

impl ColumnIndices {
    fn resolve(headers: &[String], columns: &ColumnConfig) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
        };
        Ok(ColumnIndices {
            base: find(&columns.base)?,
            variable: find(&columns.variable)?,
            lic: find(&columns.lic)?,
            lsc: find(&columns.lsc)?,
        })
    }

    fn is_mapped(&self, idx: usize) -> bool {
        idx == self.base || idx == self.variable || idx == self.lic || idx == self.lsc
    }
}

fn parse_limit(s: &str, row: usize, column: &str) -> Result<f64> {
    s.trim().parse::<f64>().map_err(|_| {
        SchemaError::NotNumeric {
            row,
            column: column.to_string(),
            value: s.to_string(),
        }
        .into()
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Base": "FVT1", "Variable": "p1", "LIC": 10.0, "LSC": 20.0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path, columns: &ColumnConfig) -> Result<LimitDataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON {}", path.display()))?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (row_no, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {row_no} is not a JSON object"))?;

        // Trim object keys the same way CSV headers are trimmed.
        let field = |name: &str| {
            obj.iter()
                .find(|(k, _)| k.trim() == name)
                .map(|(_, v)| v)
                .ok_or(SchemaError::MissingColumn(name.to_string()))
        };

        let base = json_to_text(field(&columns.base)?);
        let variable = json_to_text(field(&columns.variable)?);
        let lic = json_to_limit(field(&columns.lic)?, row_no, &columns.lic)?;
        let lsc = json_to_limit(field(&columns.lsc)?, row_no, &columns.lsc)?;

        let mapped = [&columns.base, &columns.variable, &columns.lic, &columns.lsc];
        let mut extra = BTreeMap::new();
        for (key, val) in obj {
            let trimmed = key.trim();
            if mapped.iter().any(|m| m.as_str() == trimmed) {
                continue;
            }
            extra.insert(trimmed.to_string(), json_to_text(val));
        }

        records.push(LimitRecord {
            base,
            variable,
            lic,
            lsc,
            extra,
        });
    }

    Ok(LimitDataset::from_records(records))
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn json_to_limit(val: &JsonValue, row: usize, column: &str) -> Result<f64> {
    match val {
        JsonValue::Number(n) => n
            .as_f64()
            .with_context(|| format!("Row {row}: '{column}' out of f64 range")),
        other => Err(SchemaError::NotNumeric {
            row,
            column: column.to_string(),
            value: other.to_string(),
        }
        .into()),
    }
}
