//! Chart spec builder: assembles a declarative, renderer-agnostic chart
//! description from a resolved view and a year selection.
//!
//! This module only describes charts; drawing is delegated to a plotting
//! adapter (see [`crate::viz`] for the bundled plotters one).

use crate::lookup::CentroidTable;
use crate::models::{ChartKind, YearSelection};
use crate::view::{CentroidSource, DatasetRef, ValueFormat, ViewSpec};
use serde::Serialize;
use std::collections::BTreeMap;

/// One category of the resolved dataset with its plotted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
}

/// A declarative chart description ready for drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartSpec {
    Bar(BarChart),
    Heatmap(HeatmapChart),
    Geo(GeoChart),
}

/// Vertical bar chart: one bar per category, continuous color by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub category_label: String,
    pub value_label: String,
    pub format: ValueFormat,
    /// Sorted per the view spec (value descending, ties by category).
    pub bars: Vec<BarDatum>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub category: String,
    pub value: f64,
    /// Hover text: category plus formatted percentage.
    pub hover: String,
}

/// Single-column matrix: one cell per category, value encoded by color and
/// overlaid as formatted text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    pub title: String,
    pub column_label: String,
    pub format: ValueFormat,
    /// Order matches the view spec sort, top to bottom.
    pub cells: Vec<HeatCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatCell {
    pub category: String,
    pub value: f64,
    /// Formatted value overlaid on the cell.
    pub text: String,
}

/// Geographic scatter: one point per located category; size and color both
/// encode the value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoChart {
    pub title: String,
    pub format: ValueFormat,
    pub points: Vec<GeoPoint>,
    /// Categories absent from the centroid table. Kept apart so they stay
    /// visually distinguishable from real data; they are never plotted at
    /// (0, 0).
    pub unlocated: Vec<CategoryValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub category: String,
    pub value: f64,
    pub lat: f64,
    pub lon: f64,
    pub hover: String,
}

/// Extract the categorical series the view asks for, sorted per its sort
/// directive.
///
/// For the unit-level dataset, rows sharing a unit (demographic breakdown
/// rows) collapse to the mean of their non-null rates; units with only null
/// rates are left out, matching how every aggregate treats nulls.
pub fn category_series(view: &ViewSpec, selection: &YearSelection) -> Vec<CategoryValue> {
    let mut series: Vec<CategoryValue> = match view.dataset {
        DatasetRef::Units => {
            let mut per_unit: BTreeMap<String, Vec<f64>> = BTreeMap::new();
            for obs in &selection.units {
                if let Some(rate) = obs.rate {
                    per_unit.entry(obs.unit.clone()).or_default().push(rate);
                }
            }
            per_unit
                .into_iter()
                .map(|(label, rates)| CategoryValue {
                    label,
                    value: rates.iter().sum::<f64>() / rates.len() as f64,
                })
                .collect()
        }
        DatasetRef::RegionAggregates => selection
            .regions
            .iter()
            .map(|agg| CategoryValue {
                label: agg.region.name().to_string(),
                value: agg.mean_rate,
            })
            .collect(),
    };
    // Value descending, ties by category ascending.
    series.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
    series
}

/// Assemble the chart spec for a resolved view.
///
/// The centroid tables are only consulted for the geographic kind; the one
/// matching the view's grouping is chosen.
pub fn build_chart(
    view: &ViewSpec,
    selection: &YearSelection,
    unit_centroids: &CentroidTable,
    region_centroids: &CentroidTable,
) -> ChartSpec {
    let series = category_series(view, selection);
    let title = format!(
        "Taxa de alfabetização por {} - Ano {}",
        axis_noun(view),
        view.year
    );

    match view.kind {
        ChartKind::Bar => ChartSpec::Bar(BarChart {
            title,
            category_label: axis_label(view),
            value_label: "Taxa de alfabetização (%)".into(),
            format: view.format,
            bars: series
                .into_iter()
                .map(|c| BarDatum {
                    hover: format!("{}: {}", c.label, view.format.render(c.value)),
                    category: c.label,
                    value: c.value,
                })
                .collect(),
        }),
        ChartKind::Heatmap => ChartSpec::Heatmap(HeatmapChart {
            title,
            column_label: axis_label(view),
            format: view.format,
            cells: series
                .into_iter()
                .map(|c| HeatCell {
                    text: view.format.render(c.value),
                    category: c.label,
                    value: c.value,
                })
                .collect(),
        }),
        ChartKind::Geo => {
            let centroids = match view.centroids {
                Some(CentroidSource::RegionCentroids) => region_centroids,
                // Resolver guarantees `centroids` is set for geo; default to
                // the unit table to stay total.
                Some(CentroidSource::UnitCentroids) | None => unit_centroids,
            };
            let mut points = Vec::new();
            let mut unlocated = Vec::new();
            for c in series {
                match centroids.centroid_of(&c.label) {
                    Some((lat, lon)) => points.push(GeoPoint {
                        hover: format!("{}: {}", c.label, view.format.render(c.value)),
                        category: c.label,
                        value: c.value,
                        lat,
                        lon,
                    }),
                    None => unlocated.push(c),
                }
            }
            ChartSpec::Geo(GeoChart {
                title,
                format: view.format,
                points,
                unlocated,
            })
        }
    }
}

fn axis_noun(view: &ViewSpec) -> &'static str {
    match view.dataset {
        DatasetRef::Units => "Unidade da Federação",
        DatasetRef::RegionAggregates => "Região",
    }
}

fn axis_label(view: &ViewSpec) -> String {
    match view.dataset {
        DatasetRef::Units => "Estado (UF)".into(),
        DatasetRef::RegionAggregates => "Região".into(),
    }
}
