//! Per-column dissimilarity functions
//!
//! Building blocks of the Gower metric. Every function returns a partial
//! dissimilarity in [0.0, 1.0] where 0.0 means identical.
//! Also holds the Euclidean metric used as the alternative to Gower.

use mixdist_core::{normalize, normalize_values, Cell, Error, Observation, Result, Table};

/// Ranges at or below this are treated as "no spread"
pub const ZERO_RANGE_TOLERANCE: f64 = 1e-8;

/// Range-scaled numeric dissimilarity
///
/// # Arguments
/// * `a` - First numeric value
/// * `b` - Second numeric value
/// * `range` - Column range (`max - min`)
///
/// # Returns
/// `|a - b| / range` clipped to 1.0, or 0.0 when the column has no spread
///
/// The no-spread check uses the absolute [`ZERO_RANGE_TOLERANCE`], not one
/// scaled to the values. A column whose real spread is at or below `1e-8`
/// (e.g. measured in very small units) is treated as constant and adds 0.0;
/// rescale such columns before building the table.
#[inline]
pub fn number_dissimilarity(a: f64, b: f64, range: f64) -> f64 {
    if range.abs() <= ZERO_RANGE_TOLERANCE {
        return 0.0;
    }
    ((a - b).abs() / range).min(1.0)
}

/// Dissimilarity of two 0/1 flags
#[inline]
pub fn boolean_dissimilarity(a: f64, b: f64) -> f64 {
    (a - b).abs().min(1.0)
}

/// Categorical mismatch indicator
///
/// # Returns
/// 0.0 if both tokens are equal, 1.0 otherwise
#[inline]
pub fn categorical_dissimilarity(a: &str, b: &str) -> f64 {
    if a == b { 0.0 } else { 1.0 }
}

/// Euclidean distance from `query` to every row of `dataset`, in row order
///
/// Numeric and boolean columns only; a categorical column is an error.
pub fn euclidean_distances(dataset: &Table, query: &Observation) -> Result<Vec<f64>> {
    for column in dataset.columns() {
        if !column.kind.is_numeric_like() {
            return Err(Error::UnsupportedColumn {
                column: column.name.clone(),
                metric: "euclidean",
            });
        }
    }

    let reference = normalize(dataset)?;
    let query = numeric_cells(&normalize_values(query.values(), dataset.kinds())?.cells);

    Ok(reference
        .rows
        .iter()
        .map(|row| l2_distance(&numeric_cells(&row.cells), &query))
        .collect())
}

fn numeric_cells(cells: &[Cell]) -> Vec<f64> {
    cells.iter().filter_map(Cell::as_f64).collect()
}

/// L2 distance with two accumulators for better pipelining
#[inline]
pub fn l2_distance(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }

    let mut sum1 = 0.0;
    let mut sum2 = 0.0;
    let mut chunks_a = a.chunks_exact(2);
    let mut chunks_b = b.chunks_exact(2);

    for (x, y) in (&mut chunks_a).zip(&mut chunks_b) {
        let d0 = x[0] - y[0];
        let d1 = x[1] - y[1];
        sum1 += d0 * d0;
        sum2 += d1 * d1;
    }

    for (x, y) in chunks_a.remainder().iter().zip(chunks_b.remainder()) {
        let d = x - y;
        sum1 += d * d;
    }

    (sum1 + sum2).sqrt()
}
