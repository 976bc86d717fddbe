//! Error types for the core pipeline.
//!
//! All core operations return these as explicit `Result` values; nothing in
//! the pipeline panics on bad data. Per-row numeric coercion failure is *not*
//! an error (it becomes a `None` value on the observation), so the variants
//! here only cover conditions the caller must react to.

use thiserror::Error;

/// Failure modes of the normalization/aggregation pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The raw payload shape is malformed: empty header, a data row whose
    /// field count differs from the header's, or a required column missing.
    /// Fatal to the whole normalization call.
    #[error("malformed table: {0}")]
    Schema(String),

    /// The requested year has no observations. The valid years are exactly
    /// what [`crate::stats::distinct_years`] yields, so this indicates a
    /// caller contract violation rather than bad data.
    #[error("no observations for year {0}")]
    EmptyYear(String),

    /// A mean, share, or variation is mathematically undefined (empty or
    /// all-null scope, zero denominator). Surfaced as its own variant so the
    /// UI layer can render "no data" instead of a misleading zero or NaN.
    #[error("aggregate undefined: {0}")]
    UndefinedAggregate(String),
}
