//! Record normalizer: raw SIDRA payload → typed observations.
//!
//! The SIDRA values endpoint returns a JSON array of objects sharing one key
//! set; the first object carries the human-readable column labels and the
//! rest carry positional row values. This module turns that shape into a
//! sequence of [`Observation`] with numeric coercion and region enrichment.
//! It is a pure function of its inputs.

use crate::error::CoreError;
use crate::lookup::RegionTable;
use crate::models::Observation;
use serde_json::Value;

/// One element of the raw payload: an ordered field-code→value mapping.
/// Requires `serde_json`'s `preserve_order` feature, since the positional
/// order of values is what lines rows up with the header.
pub type RawRecord = serde_json::Map<String, Value>;

/// Names the columns of the table in use and whether its values are
/// percentages. Injected so fixtures and other SIDRA tables can swap labels.
#[derive(Debug, Clone)]
pub struct TableLayout {
    pub unit_column: String,
    pub year_column: String,
    pub value_column: String,
    /// Optional demographic dimension; absent in some source tables.
    pub breakdown_column: Option<String>,
    /// When true, `rate = raw_value / 100` is derived on each observation.
    pub values_are_percent: bool,
}

impl Default for TableLayout {
    /// Layout of SIDRA table 10056 (literacy rate by federative unit).
    fn default() -> Self {
        Self {
            unit_column: "Unidade da Federação".into(),
            year_column: "Ano".into(),
            value_column: "Valor".into(),
            breakdown_column: Some("Sexo".into()),
            values_are_percent: true,
        }
    }
}

/// Convert the raw payload into enriched observations.
///
/// Per-row value coercion failure is non-fatal: the row is kept with
/// `raw_value = None`. Shape problems (empty header, row arity mismatch,
/// missing required column) fail the whole call with [`CoreError::Schema`].
pub fn normalize(
    payload: &[RawRecord],
    layout: &TableLayout,
    regions: &RegionTable,
) -> Result<Vec<Observation>, CoreError> {
    let header = payload
        .first()
        .ok_or_else(|| CoreError::Schema("empty payload: no header row".into()))?;
    let labels: Vec<String> = header.values().map(cell_string).collect();
    if labels.is_empty() {
        return Err(CoreError::Schema("header row has no columns".into()));
    }

    let unit_idx = column_index(&labels, &layout.unit_column)?;
    let year_idx = column_index(&labels, &layout.year_column)?;
    let value_idx = column_index(&labels, &layout.value_column)?;
    let breakdown_idx = match &layout.breakdown_column {
        // The breakdown dimension is optional in the source tables; a layout
        // may name it even when the table in use lacks it.
        Some(label) => labels.iter().position(|l| l == label),
        None => None,
    };

    let mut out = Vec::with_capacity(payload.len().saturating_sub(1));
    for (row_no, record) in payload.iter().enumerate().skip(1) {
        let cells: Vec<&Value> = record.values().collect();
        if cells.len() != labels.len() {
            return Err(CoreError::Schema(format!(
                "row {} has {} fields, header has {}",
                row_no,
                cells.len(),
                labels.len()
            )));
        }

        let unit = cell_string(cells[unit_idx]);
        let year = cell_string(cells[year_idx]);
        let raw_value = coerce_numeric(cells[value_idx]);
        let breakdown = breakdown_idx.map(|i| cell_string(cells[i]));
        let region = regions.region_of(&unit);
        if region.is_none() {
            log::warn!("unit {unit:?} not in region table; excluded from region aggregates");
        }
        let rate = if layout.values_are_percent {
            raw_value.map(|v| v / 100.0)
        } else {
            None
        };

        out.push(Observation {
            unit,
            year,
            breakdown,
            raw_value,
            region,
            rate,
        });
    }
    Ok(out)
}

fn column_index(labels: &[String], wanted: &str) -> Result<usize, CoreError> {
    labels
        .iter()
        .position(|l| l == wanted)
        .ok_or_else(|| CoreError::Schema(format!("required column {:?} not found", wanted)))
}

/// Render a header/row cell as text. SIDRA serves everything as strings, but
/// numbers are accepted too.
fn cell_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a value cell to `f64`. SIDRA uses tokens like `"..."` and `"-"`
/// for suppressed or missing values; those become `None`, never an error.
fn coerce_numeric(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
