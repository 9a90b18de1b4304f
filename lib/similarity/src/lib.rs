//! # mixdist Similarity
//!
//! Gower distance and row selection for mixed-type tabular data.
//!
//! This crate compares rows of a [`Table`](mixdist_core::Table) whose columns
//! are numeric, boolean or categorical, and uses those comparisons to pick
//! rows for ceteris-paribus style explanation plots.
//!
//! ## Features
//!
//! - **Gower Distance**: Range-scaled numeric differences and categorical mismatches, averaged into [0, 1]
//! - **Distance Strategy**: Gower, Euclidean, or a caller-supplied one-vs-many metric
//! - **Neighbour Selection**: The `n` rows closest to a query, with aligned labels
//! - **Sampling**: Seeded random subsets without replacement
//! - **Explainability**: Per-column breakdown of a distance
//!
//! ## Example
//!
//! ```rust
//! use mixdist_core::{ColumnSpec, Table};
//! use mixdist_similarity::{gower_distances, select_neighbours, NeighbourConfig};
//!
//! let table = Table::new(
//!     vec![
//!         ColumnSpec::numeric("age"),
//!         ColumnSpec::categorical("gender"),
//!         ColumnSpec::boolean("children"),
//!     ],
//!     vec![
//!         vec![21.into(), "M".into(), true.into()],
//!         vec![30.into(), "F".into(), false.into()],
//!         vec![22.into(), "M".into(), true.into()],
//!     ],
//! )
//! .unwrap();
//!
//! let query = table.row(0).unwrap();
//! let distances = gower_distances(&table, &query).unwrap();
//! assert_eq!(distances[0], 0.0);
//!
//! let labels = vec![1.0, 0.0, 1.0];
//! let neighbours = select_neighbours(&table, &query, Some(labels.as_slice()), &NeighbourConfig::with_n(2)).unwrap();
//! assert_eq!(neighbours.indices, vec![0, 2]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Table    │────>│  Normalize  │────>│   Ranges    │
//! │  (columns)  │     │ (f64/token) │     │ (max - min) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌──────┴──────┐
//!                     │   Select    │<────│    Gower    │
//!                     │ (n nearest) │     │  (partials) │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod distance;
pub mod explain;
pub mod gower;
pub mod select;
pub mod strategy;

// Re-export main types for convenience
pub use distance::{euclidean_distances, l2_distance};
pub use explain::{explain_gower, ColumnContribution, GowerExplanation};
pub use gower::{gower_distance, gower_distances, gower_partials, pairwise_gower};
pub use select::{select_neighbours, select_sample, NeighbourConfig, SampleConfig, Selection};
pub use strategy::{DistanceFn, DistanceStrategy, MetricKind};
