//! # mixdist Core
//!
//! Core data model for the mixdist distance engine.
//!
//! This crate provides the typed table and the preprocessing steps that every
//! distance computation starts from:
//!
//! - [`Table`] - Ordered, typed columns (numeric, boolean, categorical) and their rows
//! - [`Observation`] - A single row with a column kind per position
//! - [`normalize`] - Uniform float/token representation of rows
//! - [`compute_ranges`] - Per-column `max - min` used to scale numeric differences
//!
//! ## Example
//!
//! ```rust
//! use mixdist_core::{compute_ranges, normalize, ColumnSpec, Table};
//!
//! let table = Table::new(
//!     vec![ColumnSpec::numeric("age"), ColumnSpec::categorical("gender")],
//!     vec![
//!         vec![21.into(), "M".into()],
//!         vec![30.into(), "F".into()],
//!     ],
//! )
//! .unwrap();
//!
//! let reference = normalize(&table).unwrap();
//! let query = normalize(&table.row(0).unwrap()).unwrap();
//! let ranges = compute_ranges(&reference.rows, &query, table.kinds()).unwrap();
//! assert_eq!(ranges.as_slice(), &[9.0, 0.0]);
//! ```

pub mod error;
pub mod normalize;
pub mod range;
pub mod table;
pub mod value;

pub use error::{Error, Result};
pub use normalize::{normalize, normalize_values, Cell, Normalize, NormalizedRow, NormalizedTable};
pub use range::{compute_ranges, compute_table_ranges, RangeVector};
pub use table::{ColumnSpec, Observation, Table};
pub use value::{ColumnKind, Value};
