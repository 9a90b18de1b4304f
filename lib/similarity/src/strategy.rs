//! Distance strategy used by neighbour selection

use crate::distance::euclidean_distances;
use crate::gower::gower_distances;
use mixdist_core::{Error, Observation, Result, Table};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// One-vs-many distance function: one distance per row of the table, in row order
pub type DistanceFn = dyn Fn(&Table, &Observation) -> Result<Vec<f64>> + Send + Sync;

/// Built-in metrics that can be named in configuration
///
/// Both variants deserialize from their lowercase names. Only `"gower"`
/// resolves through [`FromStr`]; Euclidean is picked with
/// [`DistanceStrategy::Euclidean`] or through serde.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Gower,
    Euclidean,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Gower => "gower",
            MetricKind::Euclidean => "euclidean",
        }
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gower" => Ok(MetricKind::Gower),
            other => Err(Error::UnknownMetric(other.to_string())),
        }
    }
}

/// How distances from a query to the dataset rows are computed
#[derive(Clone, Default)]
pub enum DistanceStrategy {
    /// Mixed-type Gower distance
    #[default]
    Gower,
    /// L2 distance over numeric and boolean columns
    Euclidean,
    /// Caller-supplied one-vs-many metric
    Custom(Arc<DistanceFn>),
}

impl DistanceStrategy {
    /// Resolve a metric alias
    ///
    /// `"gower"` is the only alias. Any other name fails with
    /// `UnknownMetric`; other metrics are passed as a variant or a closure.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(name.parse::<MetricKind>()?.into())
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Table, &Observation) -> Result<Vec<f64>> + Send + Sync + 'static,
    {
        DistanceStrategy::Custom(Arc::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            DistanceStrategy::Gower => "gower",
            DistanceStrategy::Euclidean => "euclidean",
            DistanceStrategy::Custom(_) => "custom",
        }
    }

    /// Distances from `query` to every row of `dataset`
    ///
    /// Fails with `ShapeMismatch` when a custom metric returns the wrong
    /// number of distances.
    pub fn distances(&self, dataset: &Table, query: &Observation) -> Result<Vec<f64>> {
        let distances = match self {
            DistanceStrategy::Gower => gower_distances(dataset, query)?,
            DistanceStrategy::Euclidean => euclidean_distances(dataset, query)?,
            DistanceStrategy::Custom(f) => f(dataset, query)?,
        };
        if distances.len() != dataset.n_rows() {
            return Err(Error::ShapeMismatch {
                expected: dataset.n_rows(),
                actual: distances.len(),
            });
        }
        Ok(distances)
    }
}

impl From<MetricKind> for DistanceStrategy {
    fn from(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Gower => DistanceStrategy::Gower,
            MetricKind::Euclidean => DistanceStrategy::Euclidean,
        }
    }
}

impl FromStr for DistanceStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Debug for DistanceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceStrategy::Custom(_) => f.write_str("Custom(..)"),
            other => f.write_str(other.name()),
        }
    }
}
