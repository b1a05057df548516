//! Wire format of the visualization query endpoint.
//!
//! The body is a JSONP-style call:
//! `/*O_o*/\ngoogle.visualization.Query.setResponse({...});`
//! The JSON inside carries `table.cols[].label` and `table.rows[].c[].v`.

use career_core::model::{Cell, RawTable};
use serde::Deserialize;
use serde_json::Value;

use crate::source::SourceError;

pub const GVIZ_PREFIX: &str = "/*O_o*/\ngoogle.visualization.Query.setResponse(";
pub const GVIZ_SUFFIX: &str = ");";

#[derive(Debug, Deserialize)]
struct Response {
    table: Table,
}

#[derive(Debug, Deserialize)]
struct Table {
    cols: Vec<Option<Column>>,
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Column {
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(default)]
    c: Option<Vec<Option<CellValue>>>,
}

#[derive(Debug, Deserialize)]
struct CellValue {
    #[serde(default)]
    v: Value,
}

/// Strip the response framing, leaving the JSON payload.
///
/// # Errors
///
/// Returns `SourceError::Framing` when the prefix or suffix is absent.
pub fn strip_framing(body: &str) -> Result<&str, SourceError> {
    body.strip_prefix(GVIZ_PREFIX)
        .and_then(|rest| rest.trim_end().strip_suffix(GVIZ_SUFFIX))
        .ok_or(SourceError::Framing)
}

/// Decode a full response body into a raw table.
///
/// # Errors
///
/// Returns `SourceError::Framing` for a missing wrapper and
/// `SourceError::MalformedPayload` when the JSON or its table is invalid.
pub fn decode(body: &str) -> Result<RawTable, SourceError> {
    let payload = strip_framing(body)?;
    let response: Response = serde_json::from_str(payload)?;

    let headers = response
        .table
        .cols
        .into_iter()
        .map(|col| col.and_then(|c| c.label).unwrap_or_default())
        .collect();
    let rows = response
        .table
        .rows
        .into_iter()
        .map(|row| {
            row.c
                .unwrap_or_default()
                .into_iter()
                .map(|cell| cell.and_then(|c| render(c.v)))
                .collect()
        })
        .collect();

    Ok(RawTable::new(headers, rows))
}

/// Stringify a cell value the way the sheet's own scripts would: integral
/// numbers without a fractional part, exponent form outside `[1e-6, 1e21)`,
/// null as missing.
fn render(value: Value) -> Cell {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) => render_float(f),
            (None, None) => n.to_string(),
        }),
        other => Some(other.to_string()),
    }
}

fn render_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_owned();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    // `{:e}` already yields the shortest mantissa; only the sign of a
    // positive exponent differs ("1e21" vs "1e+21").
    let formatted = format!("{f:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}
