//! Sample and neighbour selection
//!
//! Both operations pick a subset of rows from a table, carrying an optional
//! label array along with the same row indices. Asking for more rows than are
//! available is not an error: the whole table comes back and the
//! [`Selection`] is marked as degraded.

use crate::strategy::DistanceStrategy;
use mixdist_core::{Error, Observation, Result, Table};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for [`select_sample`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleConfig {
    /// Number of rows to draw
    #[serde(default = "default_sample_size")]
    pub n: usize,
    /// RNG seed; the same seed draws the same rows
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_sample_size() -> usize {
    15
}

fn default_seed() -> u64 {
    42
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            n: default_sample_size(),
            seed: default_seed(),
        }
    }
}

impl SampleConfig {
    pub fn with_n(n: usize) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }
}

/// Configuration for [`select_neighbours`]
#[derive(Debug, Clone)]
pub struct NeighbourConfig {
    /// Number of neighbours to return
    pub n: usize,
    /// Distance used to rank rows
    pub strategy: DistanceStrategy,
    /// Columns the distance is computed on; all columns when `None`
    pub columns: Option<Vec<String>>,
}

impl Default for NeighbourConfig {
    fn default() -> Self {
        Self {
            n: 20,
            strategy: DistanceStrategy::Gower,
            columns: None,
        }
    }
}

impl NeighbourConfig {
    pub fn with_n(n: usize) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }

    pub fn strategy(mut self, strategy: DistanceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}

/// Rows picked from a table, with their aligned labels
#[derive(Debug, Clone)]
pub struct Selection<L> {
    /// Selected rows, same columns as the input
    pub data: Table,
    /// Labels re-indexed like `data`, when labels were given
    pub labels: Option<Vec<L>>,
    /// Positions of the selected rows in the input table
    pub indices: Vec<usize>,
    /// Distance of each selected row to the query (neighbour selection only)
    pub distances: Option<Vec<f64>>,
    /// Rows asked for
    pub requested: usize,
    /// Rows the input table had
    pub available: usize,
    /// True when `requested > available` and the whole table was returned
    pub degraded: bool,
}

impl<L> Selection<L> {
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Split into the row subset and the label subset
    pub fn into_parts(self) -> (Table, Option<Vec<L>>) {
        (self.data, self.labels)
    }
}

/// Draw `config.n` rows uniformly at random without replacement
///
/// When `config.n` exceeds the number of rows, every row is returned in its
/// original order and the selection is marked degraded.
pub fn select_sample<L: Clone>(
    data: &Table,
    labels: Option<&[L]>,
    config: &SampleConfig,
) -> Result<Selection<L>> {
    check_labels(data, labels)?;
    let available = data.n_rows();
    let degraded = clamp_warn("select_sample", config.n, available);

    let indices = if degraded {
        (0..available).collect()
    } else {
        let mut rng = StdRng::seed_from_u64(config.seed);
        rand::seq::index::sample(&mut rng, available, config.n).into_vec()
    };

    build(data, labels, indices, None, config.n, degraded)
}

/// Return the `config.n` rows closest to `observation`
///
/// Rows are ranked by ascending distance under `config.strategy`; ties keep
/// their original row order. When `config.n` exceeds the number of rows,
/// every row is returned in that same ranked order and the selection is
/// marked degraded.
pub fn select_neighbours<L: Clone>(
    data: &Table,
    observation: &Observation,
    labels: Option<&[L]>,
    config: &NeighbourConfig,
) -> Result<Selection<L>> {
    check_labels(data, labels)?;
    if observation.len() != data.n_columns() {
        return Err(Error::ShapeMismatch {
            expected: data.n_columns(),
            actual: observation.len(),
        });
    }
    let available = data.n_rows();
    let degraded = clamp_warn("select_neighbours", config.n, available);

    debug!(
        strategy = config.strategy.name(),
        columns = ?config.columns,
        "ranking neighbours"
    );
    let distances = match &config.columns {
        Some(names) => {
            let positions = data.resolve_columns(names)?;
            config
                .strategy
                .distances(&data.project(&positions)?, &observation.project(&positions)?)?
        }
        None => config.strategy.distances(data, observation)?,
    };

    let mut order: Vec<usize> = (0..available).collect();
    order.sort_by_key(|&i| OrderedFloat(distances[i]));
    order.truncate(config.n.min(available));

    let picked = order.iter().map(|&i| distances[i]).collect();
    build(data, labels, order, Some(picked), config.n, degraded)
}

fn check_labels<L>(data: &Table, labels: Option<&[L]>) -> Result<()> {
    match labels {
        Some(labels) if labels.len() != data.n_rows() => Err(Error::LabelMismatch {
            rows: data.n_rows(),
            labels: labels.len(),
        }),
        _ => Ok(()),
    }
}

/// Returns true, after logging, when the request has to be degraded
fn clamp_warn(operation: &'static str, requested: usize, available: usize) -> bool {
    if requested > available {
        warn!(
            operation,
            requested,
            available,
            "requested more rows than the data holds, returning all rows"
        );
        true
    } else {
        false
    }
}

fn build<L: Clone>(
    data: &Table,
    labels: Option<&[L]>,
    indices: Vec<usize>,
    distances: Option<Vec<f64>>,
    requested: usize,
    degraded: bool,
) -> Result<Selection<L>> {
    let subset = data.take(&indices)?;
    let labels = labels.map(|labels| indices.iter().map(|&i| labels[i].clone()).collect());
    Ok(Selection {
        data: subset,
        labels,
        indices,
        distances,
        requested,
        available: data.n_rows(),
        degraded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixdist_core::Value;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Records the level and message of every event seen on this thread
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<(Level, String)>>>);

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{:?}", value);
            }
        }
    }

    impl<S: Subscriber> Layer<S> for Captured {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.0
                .lock()
                .unwrap()
                .push((*event.metadata().level(), visitor.0));
        }
    }

    fn with_captured<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry().with(captured.clone());
        let out = tracing::subscriber::with_default(subscriber, f);
        let events = captured.0.lock().unwrap().clone();
        (out, events)
    }

    fn warnings(events: &[(Level, String)]) -> Vec<&str> {
        events
            .iter()
            .filter(|(level, _)| *level == Level::WARN)
            .map(|(_, message)| message.as_str())
            .collect()
    }

    fn x() -> Table {
        Table::numeric(vec![
            vec![1.0, 0.0, 1.0],
            vec![2.0, 0.0, 2.0],
            vec![10.0, 2.0, 10.0],
            vec![1.0, 0.0, 2.0],
        ])
        .unwrap()
    }

    fn y() -> Vec<f64> {
        vec![11.0, 12.1, 13.2, 10.5]
    }

    #[test]
    fn test_select_sample_shape() {
        let x = x();
        let sample = select_sample::<f64>(&x, None, &SampleConfig::with_n(2)).unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.data.n_columns(), 3);
        assert!(!sample.degraded);
        assert!(sample.labels.is_none());
    }

    #[test]
    fn test_select_sample_rows_come_from_data() {
        let x = x();
        let sample = select_sample::<f64>(&x, None, &SampleConfig::with_n(1)).unwrap();
        assert!(x.rows().contains(&sample.data.rows()[0]));
    }

    #[test]
    fn test_select_sample_keeps_labels_aligned() {
        let x = x();
        let y = y();
        let sample = select_sample(&x, Some(y.as_slice()), &SampleConfig::with_n(1)).unwrap();
        let labels = sample.labels.unwrap();
        let pos = y.iter().position(|v| *v == labels[0]).unwrap();
        assert_eq!(sample.data.rows()[0], x.rows()[pos]);
    }

    #[test]
    fn test_select_sample_without_replacement() {
        let x = x();
        let sample = select_sample::<f64>(&x, None, &SampleConfig::with_n(4)).unwrap();
        let mut indices = sample.indices.clone();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(!sample.degraded);
    }

    #[test]
    fn test_select_sample_is_seeded() {
        let x = x();
        let config = SampleConfig { n: 2, seed: 7 };
        let a = select_sample::<f64>(&x, None, &config).unwrap();
        let b = select_sample::<f64>(&x, None, &config).unwrap();
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_select_sample_degrades() {
        let x = x();
        let sample = select_sample::<f64>(&x, None, &SampleConfig::with_n(300)).unwrap();
        assert_eq!(sample.len(), x.n_rows());
        assert_eq!(sample.indices, vec![0, 1, 2, 3]);
        assert!(sample.degraded);
        assert_eq!(sample.requested, 300);
        assert_eq!(sample.available, 4);
    }

    #[test]
    fn test_select_sample_degrade_warns() {
        let x = x();
        let (sample, events) =
            with_captured(|| select_sample::<f64>(&x, None, &SampleConfig::with_n(300)));
        assert!(sample.unwrap().degraded);
        let warned = warnings(&events);
        assert_eq!(warned.len(), 1);
        assert!(warned[0].contains("requested more rows"), "got {}", warned[0]);

        let (_, events) = with_captured(|| select_sample::<f64>(&x, None, &SampleConfig::with_n(2)));
        assert!(warnings(&events).is_empty());
    }

    #[test]
    fn test_select_sample_label_mismatch() {
        let x = x();
        let y = vec![1.0, 2.0];
        assert_eq!(
            select_sample(&x, Some(y.as_slice()), &SampleConfig::with_n(1)).unwrap_err(),
            Error::LabelMismatch { rows: 4, labels: 2 }
        );
    }

    #[test]
    fn test_sample_config_serde_defaults() {
        let config: SampleConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SampleConfig::default());
        assert_eq!(config.n, 15);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_neighbour_of_member_is_itself() {
        let x = x();
        let query = x.row(0).unwrap();
        for strategy in [DistanceStrategy::Euclidean, DistanceStrategy::Gower] {
            let config = NeighbourConfig::with_n(1).strategy(strategy);
            let neighbours = select_neighbours::<f64>(&x, &query, None, &config).unwrap();
            assert_eq!(neighbours.data.rows()[0], x.rows()[0]);
            assert_eq!(neighbours.distances.unwrap()[0], 0.0);
        }
    }

    #[test]
    fn test_neighbours_shape() {
        let x = x();
        let query = Observation::numeric(&[4.0, 3.0, 2.0]);
        for strategy in [DistanceStrategy::Euclidean, DistanceStrategy::Gower] {
            let config = NeighbourConfig::with_n(3).strategy(strategy);
            let neighbours = select_neighbours::<f64>(&x, &query, None, &config).unwrap();
            assert_eq!(neighbours.len(), 3);
            assert_eq!(neighbours.data.n_columns(), 3);
        }
    }

    #[test]
    fn test_neighbours_sorted_ascending() {
        let x = x();
        let query = Observation::numeric(&[4.0, 3.0, 2.0]);
        let config = NeighbourConfig::with_n(4).strategy(DistanceStrategy::Euclidean);
        let neighbours = select_neighbours::<f64>(&x, &query, None, &config).unwrap();
        // sqrt(13) < sqrt(18) < sqrt(19) < sqrt(101)
        assert_eq!(neighbours.indices, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_neighbours_keep_labels_aligned() {
        let x = x();
        let y = y();
        let query = Observation::numeric(&[4.0, 3.0, 2.0]);
        let neighbours = select_neighbours(&x, &query, Some(y.as_slice()), &NeighbourConfig::with_n(3)).unwrap();
        let (data, labels) = neighbours.into_parts();
        let labels = labels.unwrap();
        let pos = y.iter().position(|v| *v == labels[1]).unwrap();
        assert_eq!(data.rows()[1], x.rows()[pos]);
    }

    #[test]
    fn test_neighbours_ties_keep_row_order() {
        let x = Table::numeric(vec![vec![2.0], vec![0.0], vec![2.0], vec![1.0]]).unwrap();
        let query = Observation::numeric(&[1.0]);
        let config = NeighbourConfig::with_n(4).strategy(DistanceStrategy::Euclidean);
        let neighbours = select_neighbours::<f64>(&x, &query, None, &config).unwrap();
        assert_eq!(neighbours.indices, vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_neighbours_degrade_sorted() {
        let x = x();
        let query = Observation::numeric(&[4.0, 3.0, 2.0]);
        let config = NeighbourConfig::with_n(300).strategy(DistanceStrategy::Euclidean);
        let neighbours = select_neighbours::<f64>(&x, &query, None, &config).unwrap();
        assert_eq!(neighbours.len(), x.n_rows());
        assert!(neighbours.degraded);
        assert_eq!(neighbours.indices, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_neighbours_degrade_warns() {
        let x = x();
        let query = Observation::numeric(&[4.0, 3.0, 2.0]);
        let config = NeighbourConfig::with_n(300).strategy(DistanceStrategy::Euclidean);
        let (neighbours, events) =
            with_captured(|| select_neighbours::<f64>(&x, &query, None, &config));
        assert!(neighbours.unwrap().degraded);
        assert_eq!(warnings(&events).len(), 1);
    }

    #[test]
    fn test_neighbours_on_selected_columns() {
        let x = x();
        let query = Observation::numeric(&[10.0, 0.0, 1.0]);
        let config = NeighbourConfig::with_n(1)
            .strategy(DistanceStrategy::Euclidean)
            .columns(["0"]);
        let neighbours = select_neighbours::<f64>(&x, &query, None, &config).unwrap();
        assert_eq!(neighbours.indices, vec![2]);
        // Full rows come back, not the projection
        assert_eq!(neighbours.data.n_columns(), 3);
    }

    #[test]
    fn test_neighbours_unknown_column() {
        let x = x();
        let query = Observation::numeric(&[4.0, 3.0, 2.0]);
        let config = NeighbourConfig::with_n(1).columns(["salary"]);
        assert_eq!(
            select_neighbours::<f64>(&x, &query, None, &config).unwrap_err(),
            Error::ColumnNotFound("salary".to_string())
        );
    }

    #[test]
    fn test_neighbours_shape_mismatch() {
        let x = x();
        let query = Observation::numeric(&[4.0, 3.0]);
        assert_eq!(
            select_neighbours::<f64>(&x, &query, None, &NeighbourConfig::default()).unwrap_err(),
            Error::ShapeMismatch { expected: 3, actual: 2 }
        );
    }

    #[test]
    fn test_neighbours_custom_metric() {
        let x = x();
        let query = Observation::numeric(&[4.0, 3.0, 2.0]);
        // Rank by the last column only, largest first
        let strategy = DistanceStrategy::custom(|table, _query| {
            Ok(table
                .rows()
                .iter()
                .map(|row| match row[2] {
                    Value::Number(v) => -v,
                    _ => 0.0,
                })
                .collect())
        });
        let config = NeighbourConfig::with_n(1).strategy(strategy);
        let neighbours = select_neighbours::<f64>(&x, &query, None, &config).unwrap();
        assert_eq!(neighbours.indices, vec![2]);
    }
}
