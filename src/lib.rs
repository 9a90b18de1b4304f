//! # mixdist
//!
//! A mixed-type distance engine for tabular data.
//!
//! mixdist compares rows whose columns are numeric, boolean or categorical
//! using the Gower dissimilarity, and selects representative or neighbouring
//! rows for ceteris-paribus explanation plots.
//!
//! ## Quick Start
//!
//! ```rust
//! use mixdist::prelude::*;
//!
//! let table = Table::new(
//!     vec![
//!         ColumnSpec::numeric("age"),
//!         ColumnSpec::categorical("civil_status"),
//!         ColumnSpec::numeric("salary"),
//!     ],
//!     vec![
//!         vec![21.into(), "MARRIED".into(), 3000.0.into()],
//!         vec![21.into(), "SINGLE".into(), 1200.0.into()],
//!         vec![19.into(), "SINGLE".into(), 32000.0.into()],
//!     ],
//! )
//! .unwrap();
//!
//! // One distance per row, in row order
//! let query = table.row(0).unwrap();
//! let distances = gower_distances(&table, &query).unwrap();
//! assert_eq!(distances.len(), 3);
//!
//! // The two rows closest to the query
//! let neighbours = select_neighbours::<()>(&table, &query, None, &NeighbourConfig::with_n(2)).unwrap();
//! assert_eq!(neighbours.indices[0], 0);
//!
//! // A seeded random sample
//! let sample = select_sample::<()>(&table, None, &SampleConfig::with_n(2)).unwrap();
//! assert_eq!(sample.len(), 2);
//! ```
//!
//! ## Crate Structure
//!
//! mixdist is composed of several crates:
//!
//! - [`mixdist-core`](https://docs.rs/mixdist-core) - Typed tables, normalization, range computation
//! - [`mixdist-similarity`](https://docs.rs/mixdist-similarity) - Gower and Euclidean distances, selection, explanations
//!
//! ## Features
//!
//! - **Explicit Column Kinds**: Numeric, boolean and categorical, fixed when the table is built
//! - **Range Widening**: Queries outside the observed spread widen the column range
//! - **Bounded Distances**: Every Gower distance lies in [0, 1]
//! - **Degraded Selection**: Asking for too many rows returns all of them, flagged
//! - **Parallel Scoring**: One-vs-many distances are computed with rayon

// Re-export core types
pub use mixdist_core::{
    compute_ranges, compute_table_ranges, normalize, normalize_values,
    Cell, ColumnKind, ColumnSpec, Normalize, NormalizedRow, NormalizedTable,
    Observation, RangeVector, Table, Value,
    Error, Result,
};

// Re-export similarity
pub use mixdist_similarity::{
    euclidean_distances, explain_gower,
    gower_distance, gower_distances, gower_partials, pairwise_gower,
    select_neighbours, select_sample,
    ColumnContribution, DistanceStrategy, GowerExplanation, MetricKind,
    NeighbourConfig, SampleConfig, Selection,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        compute_ranges, normalize,
        gower_distance, gower_distances, pairwise_gower, euclidean_distances,
        select_neighbours, select_sample, explain_gower,
        ColumnKind, ColumnSpec, Observation, Table, Value,
        DistanceStrategy, NeighbourConfig, SampleConfig, Selection,
        Error, Result,
    };
}
