//! Aggregator: pure summary computations over the enriched observation set.
//!
//! Every function here is a pure function of (observations, parameters).
//! Null rates are excluded from both numerator and denominator of every
//! mean; an all-null scope is an [`CoreError::UndefinedAggregate`], never a
//! sentinel zero or NaN.

use crate::error::CoreError;
use crate::models::{Extremum, Observation, Region, RegionAggregate, YearSelection};
use std::collections::BTreeMap;

/// Distinct years present in the dataset, ascending. Lexicographic and
/// numeric order coincide for SIDRA periods.
pub fn distinct_years(points: &[Observation]) -> Vec<String> {
    let mut years: Vec<String> = points.iter().map(|p| p.year.clone()).collect();
    years.sort();
    years.dedup();
    years
}

/// Filter the dataset to one year and derive the per-year snapshot.
///
/// Errors with [`CoreError::EmptyYear`] when no observation matches (the
/// caller must pick a year from [`distinct_years`]) and with
/// [`CoreError::UndefinedAggregate`] when every rate in the year is null,
/// since no headline value can be derived.
pub fn select_year(points: &[Observation], year: &str) -> Result<YearSelection, CoreError> {
    let units: Vec<Observation> = points.iter().filter(|p| p.year == year).cloned().collect();
    if units.is_empty() {
        return Err(CoreError::EmptyYear(year.to_string()));
    }

    let national_mean = mean_rate(&units)
        .ok_or_else(|| CoreError::UndefinedAggregate(format!("all rates null for year {year}")))?;
    // mean_rate succeeded, so at least one non-null rate exists and the
    // extrema are defined.
    let (max, min) = extrema(&units)
        .ok_or_else(|| CoreError::UndefinedAggregate(format!("no rated units in year {year}")))?;
    let regions = region_aggregates(&units, year);

    Ok(YearSelection {
        year: year.to_string(),
        units,
        regions,
        national_mean,
        max,
        min,
    })
}

/// Arithmetic mean over the non-null rates of the given observations.
/// `None` when no non-null rate is in scope.
pub fn mean_rate(points: &[Observation]) -> Option<f64> {
    let rates: Vec<f64> = points.iter().filter_map(|p| p.rate).collect();
    mean_of(&rates)
}

fn mean_of(vals: &[f64]) -> Option<f64> {
    if vals.is_empty() {
        None
    } else {
        Some(vals.iter().sum::<f64>() / vals.len() as f64)
    }
}

/// Max and min rate among the given observations, each paired with the
/// owning unit's name. Ties are broken by first occurrence in the sequence's
/// original order, so the result never depends on the traversal order of an
/// unordered structure.
pub fn extrema(points: &[Observation]) -> Option<(Extremum, Extremum)> {
    let mut max: Option<Extremum> = None;
    let mut min: Option<Extremum> = None;
    for p in points {
        let Some(rate) = p.rate else { continue };
        match &max {
            Some(m) if rate <= m.value => {}
            _ => {
                max = Some(Extremum {
                    value: rate,
                    label: p.unit.clone(),
                })
            }
        }
        match &min {
            Some(m) if rate >= m.value => {}
            _ => {
                min = Some(Extremum {
                    value: rate,
                    label: p.unit.clone(),
                })
            }
        }
    }
    max.zip(min)
}

/// Per-region mean rates for observations of one year. Observations with a
/// null region (unrecognized unit) or null rate never enter an aggregate;
/// regions with no rated member are omitted rather than reported as zero.
pub fn region_aggregates(points: &[Observation], year: &str) -> Vec<RegionAggregate> {
    let mut groups: BTreeMap<Region, Vec<f64>> = BTreeMap::new();
    for p in points.iter().filter(|p| p.year == year) {
        if let (Some(region), Some(rate)) = (p.region, p.rate) {
            groups.entry(region).or_default().push(rate);
        }
    }
    groups
        .into_iter()
        .filter_map(|(region, rates)| {
            mean_of(&rates).map(|mean_rate| RegionAggregate {
                region,
                year: year.to_string(),
                mean_rate,
            })
        })
        .collect()
}

/// Share of `value` within `group_total`. A zero total is surfaced as
/// [`CoreError::UndefinedAggregate`] (division-by-zero semantics), never as
/// infinity.
pub fn percentage_share(value: f64, group_total: f64) -> Result<f64, CoreError> {
    if group_total == 0.0 {
        return Err(CoreError::UndefinedAggregate(
            "percentage share of a zero group total".into(),
        ));
    }
    Ok(value / group_total)
}

/// Aggregation scope for mean/variation queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// All unit-level observations.
    National,
    /// One federative unit by name.
    Unit(String),
    /// One macro-region.
    Region(Region),
}

impl Scope {
    fn contains(&self, p: &Observation) -> bool {
        match self {
            Scope::National => true,
            Scope::Unit(name) => p.unit == *name,
            Scope::Region(region) => p.region == Some(*region),
        }
    }
}

/// Mean rate of a scope within one year.
pub fn scope_mean(points: &[Observation], scope: &Scope, year: &str) -> Result<f64, CoreError> {
    let in_scope: Vec<Observation> = points
        .iter()
        .filter(|p| p.year == year && scope.contains(p))
        .cloned()
        .collect();
    mean_rate(&in_scope).ok_or_else(|| {
        CoreError::UndefinedAggregate(format!("no rated observations for {scope:?} in {year}"))
    })
}

/// Relative variation of a scope's mean between two years, in percent:
/// `(mean(year_b) - mean(year_a)) / mean(year_a) * 100`.
///
/// A zero base-year mean is an [`CoreError::UndefinedAggregate`], never a
/// division-by-zero crash or infinity.
pub fn year_over_year(
    points: &[Observation],
    scope: &Scope,
    year_a: &str,
    year_b: &str,
) -> Result<f64, CoreError> {
    let base = scope_mean(points, scope, year_a)?;
    let target = scope_mean(points, scope, year_b)?;
    if base == 0.0 {
        return Err(CoreError::UndefinedAggregate(format!(
            "zero base mean for {scope:?} in {year_a}"
        )));
    }
    Ok((target - base) / base * 100.0)
}

/// The year pair actually used for a year-over-year comparison.
///
/// The `fallback` flag makes the documented earliest-year substitution
/// visible to the caller instead of silently shifting the pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonPair {
    /// Base year (denominator of the variation).
    pub base: String,
    /// Target year (numerator).
    pub target: String,
    /// True when the selected year was the earliest known year and the two
    /// most recent years were substituted.
    pub fallback: bool,
}

/// Pick the comparison pair for a selected year against the ordered known
/// year sequence (as produced by [`distinct_years`]).
///
/// Normally compares the selected year against its predecessor. When the
/// selected year is the earliest known year, the two most recent known
/// years are used instead, flagged via [`ComparisonPair::fallback`].
/// Returns `None` when the selected year is unknown or fewer than two years
/// exist.
pub fn comparison_pair(years: &[String], selected: &str) -> Option<ComparisonPair> {
    if years.len() < 2 {
        return None;
    }
    let idx = years.iter().position(|y| y == selected)?;
    if idx == 0 {
        let target = years.last()?.clone();
        let base = years.get(years.len() - 2)?.clone();
        Some(ComparisonPair {
            base,
            target,
            fallback: true,
        })
    } else {
        Some(ComparisonPair {
            base: years[idx - 1].clone(),
            target: selected.to_string(),
            fallback: false,
        })
    }
}
