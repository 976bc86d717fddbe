use serde::{Deserialize, Serialize};
use std::fmt;

/// The five Brazilian macro-regions. The unit→region lookup is total over
/// the 27 federative units, so a closed enum is the right shape here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Norte,
    Nordeste,
    CentroOeste,
    Sudeste,
    Sul,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Norte,
        Region::Nordeste,
        Region::CentroOeste,
        Region::Sudeste,
        Region::Sul,
    ];

    /// Display name as it appears in IBGE publications.
    pub fn name(&self) -> &'static str {
        match self {
            Region::Norte => "Norte",
            Region::Nordeste => "Nordeste",
            Region::CentroOeste => "Centro-Oeste",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tidy structure used by this crate (one row = one enriched observation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    /// Administrative unit (federative unit) name.
    pub unit: String,
    /// Reporting period. Kept as a string: lexicographic and numeric order
    /// coincide for this domain, and SIDRA serves periods as strings.
    pub year: String,
    /// Optional demographic breakdown (e.g. sex category). Preserved by the
    /// normalizer, ignored by the aggregator.
    pub breakdown: Option<String>,
    /// Source value; `None` when the source supplied a non-numeric token.
    pub raw_value: Option<f64>,
    /// Derived via the unit→region lookup; `None` for unrecognized units.
    /// Such rows stay in the unit-level dataset but never enter a region
    /// aggregate.
    pub region: Option<Region>,
    /// `raw_value / 100` when the source table encodes a percentage.
    pub rate: Option<f64>,
}

/// Grouping level selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grouping {
    /// One category per federative unit.
    Unit,
    /// One category per macro-region.
    Region,
}

/// Chart style selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    Heatmap,
    Geo,
}

/// Mean rate for one (region, year) pair. Recomputed per selection and never
/// persisted across selections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionAggregate {
    pub region: Region,
    pub year: String,
    /// Arithmetic mean of the non-null rates of member observations.
    pub mean_rate: f64,
}

/// A rate extremum paired with the owning unit's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Extremum {
    pub value: f64,
    pub label: String,
}

/// Snapshot of the dataset filtered to a single year, plus the derived
/// values every view needs. Created on each year-parameter change and fully
/// superseded by the next selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearSelection {
    pub year: String,
    /// Unit-level observations for the year, in normalized order.
    pub units: Vec<Observation>,
    /// One aggregate per region with at least one non-null member rate.
    pub regions: Vec<RegionAggregate>,
    /// National mean over all non-null unit rates.
    pub national_mean: f64,
    pub max: Extremum,
    pub min: Extremum,
}
