//! View parameter resolver: maps the user-selected parameter tuple to a
//! concrete, fully-determined view description.
//!
//! The historical implementation branched on string flags; here the closed
//! sets {unit, region} × {bar, heatmap, geo} are enums, so dispatch is
//! exhaustive and checked by the compiler.

use crate::models::{ChartKind, Grouping};
use serde::Serialize;

/// Which dataset a view draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DatasetRef {
    /// Unit-level observations of the selected year.
    Units,
    /// Per-region aggregates of the selected year.
    RegionAggregates,
}

/// Which centroid table a geographic view needs. Always matches the
/// grouping's categorical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CentroidSource {
    UnitCentroids,
    RegionCentroids,
}

/// Category sort order. Only one order is used today, but keeping it in the
/// spec makes the directive explicit to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    /// Value descending; ties broken by category name ascending.
    ValueDescending,
}

/// Display-format directive for values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueFormat {
    /// Values are fractions of 1 rendered as percentages.
    pub percent: bool,
    pub decimals: u8,
}

impl ValueFormat {
    pub const PERCENT_2: ValueFormat = ValueFormat {
        percent: true,
        decimals: 2,
    };

    /// Render a value per this directive, e.g. `0.8` → `"80.00%"`.
    pub fn render(&self, value: f64) -> String {
        if self.percent {
            format!("{:.*}%", self.decimals as usize, value * 100.0)
        } else {
            format!("{:.*}", self.decimals as usize, value)
        }
    }
}

/// Resolved parameters describing which data and axis/format choices a chart
/// should use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSpec {
    pub year: String,
    pub grouping: Grouping,
    pub kind: ChartKind,
    pub dataset: DatasetRef,
    /// Field of the categorical axis.
    pub category_field: &'static str,
    /// Field carrying the plotted value.
    pub value_field: &'static str,
    pub sort: SortOrder,
    pub format: ValueFormat,
    /// Present only for the geographic chart kind.
    pub centroids: Option<CentroidSource>,
}

/// Map the parameter tuple to a view description. Pure and deterministic:
/// identical tuples always yield identical specs.
pub fn resolve(year: &str, grouping: Grouping, kind: ChartKind) -> ViewSpec {
    let (dataset, category_field, value_field) = match grouping {
        Grouping::Unit => (DatasetRef::Units, "unit", "rate"),
        Grouping::Region => (DatasetRef::RegionAggregates, "region", "mean_rate"),
    };
    let centroids = match kind {
        ChartKind::Geo => Some(match grouping {
            Grouping::Unit => CentroidSource::UnitCentroids,
            Grouping::Region => CentroidSource::RegionCentroids,
        }),
        ChartKind::Bar | ChartKind::Heatmap => None,
    };
    ViewSpec {
        year: year.to_string(),
        grouping,
        kind,
        dataset,
        category_field,
        value_field,
        sort: SortOrder::ValueDescending,
        format: ValueFormat::PERCENT_2,
        centroids,
    }
}
