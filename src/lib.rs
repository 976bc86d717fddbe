//! sidra-rs
//!
//! A lightweight Rust library for retrieving, normalizing, aggregating, and
//! charting literacy-rate data from the IBGE SIDRA API. Pairs with the
//! `sidra` CLI.
//!
//! ### Features
//! - Fetch the raw SIDRA values payload and normalize it into typed
//!   observations (numeric coercion, unit→region enrichment, rate derivation)
//! - Per-year aggregates: national mean, per-region means, labeled extrema,
//!   percentage shares, year-over-year variation
//! - Deterministic chart specs for (year, grouping, chart kind) tuples
//! - Save the tidy dataset as CSV or JSON; render chart specs to SVG/PNG
//!
//! ### Example
//! ```no_run
//! use sidra_rs::{Client, Dashboard, ChartKind, Grouping};
//! use sidra_rs::normalize::{self, TableLayout};
//! use sidra_rs::lookup::RegionTable;
//!
//! let payload = Client::default().fetch_literacy_table()?;
//! let obs = normalize::normalize(&payload, &TableLayout::default(), &RegionTable::brazil())?;
//! let dash = Dashboard::new(obs);
//! let years = dash.distinct_years();
//! let spec = dash.on_parameter_change(&years[0], Grouping::Unit, ChartKind::Bar)?;
//! println!("{}", serde_json::to_string_pretty(&spec)?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod lookup;
pub mod models;
pub mod normalize;
pub mod stats;
pub mod storage;
pub mod view;
pub mod viz;

pub use api::Client;
pub use chart::ChartSpec;
pub use dashboard::{Dashboard, Headline, RecomputeGate};
pub use error::CoreError;
pub use models::{ChartKind, Grouping, Observation, Region};
