//! Dashboard facade: the single entry point a UI layer drives.
//!
//! Owns the enriched observation set for the process lifetime together with
//! the injected lookup tables. Every parameter change runs the same
//! synchronous pipeline (select year → resolve view → build chart); nothing
//! here mutates shared state, so repeated calls with identical arguments
//! yield identical output.

use crate::chart::{self, ChartSpec};
use crate::error::CoreError;
use crate::lookup::CentroidTable;
use crate::models::{ChartKind, Extremum, Grouping, Observation};
use crate::stats;
use crate::view;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Headline values for a year, as shown above the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub national_mean: f64,
    pub max: Extremum,
    pub min: Extremum,
}

pub struct Dashboard {
    observations: Vec<Observation>,
    unit_centroids: CentroidTable,
    region_centroids: CentroidTable,
}

impl Dashboard {
    /// Build a dashboard over an already-normalized dataset with the
    /// production centroid tables.
    pub fn new(observations: Vec<Observation>) -> Self {
        Self::with_centroids(
            observations,
            CentroidTable::brazil_units(),
            CentroidTable::brazil_regions(),
        )
    }

    /// Same, with injected centroid tables (fixtures).
    pub fn with_centroids(
        observations: Vec<Observation>,
        unit_centroids: CentroidTable,
        region_centroids: CentroidTable,
    ) -> Self {
        Self {
            observations,
            unit_centroids,
            region_centroids,
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Ordered year sequence for populating a year selector.
    pub fn distinct_years(&self) -> Vec<String> {
        stats::distinct_years(&self.observations)
    }

    /// Run the full pipeline for one parameter tuple. Callable repeatedly
    /// and in any order; the only contract is that `year` comes from
    /// [`Dashboard::distinct_years`].
    pub fn on_parameter_change(
        &self,
        year: &str,
        grouping: Grouping,
        kind: ChartKind,
    ) -> Result<ChartSpec, CoreError> {
        let selection = stats::select_year(&self.observations, year)?;
        let view = view::resolve(year, grouping, kind);
        Ok(chart::build_chart(
            &view,
            &selection,
            &self.unit_centroids,
            &self.region_centroids,
        ))
    }

    /// National mean plus labeled extrema for one year.
    pub fn headline_indicators(&self, year: &str) -> Result<Headline, CoreError> {
        let selection = stats::select_year(&self.observations, year)?;
        Ok(Headline {
            national_mean: selection.national_mean,
            max: selection.max,
            min: selection.min,
        })
    }
}

/// Last-write-wins ordering for overlapping parameter-change events.
///
/// Hosts that allow a new parameter change while a recomputation is still in
/// flight number each request via [`RecomputeGate::accept`] and route the
/// finished output through [`RecomputeGate::publish`]; an output whose
/// request has been superseded is discarded. Ordering is keyed by the
/// request sequence number, not by completion time.
#[derive(Debug, Default)]
pub struct RecomputeGate {
    accepted: AtomicU64,
    published: AtomicU64,
}

impl RecomputeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request and get its sequence number.
    pub fn accept(&self) -> u64 {
        self.accepted.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Offer a finished recomputation. Returns the output only when it is
    /// still authoritative: no newer request accepted since, and no output
    /// with a newer sequence number already published.
    pub fn publish<T>(&self, seq: u64, output: T) -> Option<T> {
        if self.accepted.load(Ordering::SeqCst) > seq {
            return None;
        }
        let mut current = self.published.load(Ordering::SeqCst);
        loop {
            if current >= seq {
                return None;
            }
            match self
                .published
                .compare_exchange(current, seq, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return Some(output),
                Err(observed) => current = observed,
            }
        }
    }
}
