//! Gower distance for mixed-type rows
//!
//! The distance between two rows is the mean of per-column partial
//! dissimilarities:
//!
//! - numeric: `|a - b| / range`, clipped to 1, and 0 when the range is zero
//! - boolean: `|a - b|` on the 0/1 encoding
//! - categorical: 0 when equal, 1 otherwise
//!
//! Every column carries the same weight, including zero-range ones, so the
//! result always lies in [0.0, 1.0].

use crate::distance::{boolean_dissimilarity, categorical_dissimilarity, number_dissimilarity};
use mixdist_core::{
    compute_ranges, compute_table_ranges, normalize, normalize_values, Cell, ColumnKind, Error,
    NormalizedRow, Observation, RangeVector, Result, Table,
};
use rayon::prelude::*;

/// Per-column partial dissimilarities between two normalized rows
pub fn gower_partials(
    a: &NormalizedRow,
    b: &NormalizedRow,
    ranges: &RangeVector,
    kinds: &[ColumnKind],
) -> Result<Vec<f64>> {
    let width = kinds.len();
    for actual in [a.len(), b.len(), ranges.len()] {
        if actual != width {
            return Err(Error::ShapeMismatch {
                expected: width,
                actual,
            });
        }
    }

    a.cells
        .iter()
        .zip(&b.cells)
        .zip(kinds)
        .enumerate()
        .map(|(col, ((x, y), kind))| partial(x, y, ranges[col], *kind, col))
        .collect()
}

fn partial(x: &Cell, y: &Cell, range: f64, kind: ColumnKind, col: usize) -> Result<f64> {
    match (kind, x, y) {
        (ColumnKind::Numeric, Cell::Numeric(x), Cell::Numeric(y)) => {
            Ok(number_dissimilarity(*x, *y, range))
        }
        (ColumnKind::Boolean, Cell::Numeric(x), Cell::Numeric(y)) => {
            Ok(boolean_dissimilarity(*x, *y))
        }
        (ColumnKind::Categorical, Cell::Categorical(x), Cell::Categorical(y)) => {
            Ok(categorical_dissimilarity(x, y))
        }
        (_, Cell::Categorical(s), _) | (_, _, Cell::Categorical(s)) => Err(Error::KindMismatch {
            column: col.to_string(),
            kind,
            value: s.clone(),
        }),
        (_, Cell::Numeric(v), _) => Err(Error::KindMismatch {
            column: col.to_string(),
            kind,
            value: v.to_string(),
        }),
    }
}

/// Gower distance between two normalized rows under a shared range vector
pub fn gower_distance(
    a: &NormalizedRow,
    b: &NormalizedRow,
    ranges: &RangeVector,
    kinds: &[ColumnKind],
) -> Result<f64> {
    let partials = gower_partials(a, b, ranges, kinds)?;
    Ok(mean(&partials))
}

#[inline]
pub(crate) fn mean(partials: &[f64]) -> f64 {
    if partials.is_empty() {
        return 0.0;
    }
    partials.iter().sum::<f64>() / partials.len() as f64
}

/// Gower distance from `query` to every row of `dataset`, in row order
///
/// The query is normalized against the dataset's column kinds, and the
/// ranges are computed over the dataset widened by the query.
pub fn gower_distances(dataset: &Table, query: &Observation) -> Result<Vec<f64>> {
    let reference = normalize(dataset)?;
    let query = normalize_values(query.values(), dataset.kinds())?;
    let ranges = compute_ranges(&reference.rows, &query, &reference.kinds)?;

    reference
        .rows
        .par_iter()
        .map(|row| gower_distance(row, &query, &ranges, &reference.kinds))
        .collect()
}

/// All-pairs Gower distance matrix of `dataset`
///
/// Uses ranges over the dataset alone. The matrix is symmetric with a zero
/// diagonal.
pub fn pairwise_gower(dataset: &Table) -> Result<Vec<Vec<f64>>> {
    let reference = normalize(dataset)?;
    let ranges = compute_table_ranges(&reference.rows, &reference.kinds)?;
    let n = reference.rows.len();

    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .map(|j| {
                    gower_distance(&reference.rows[i], &reference.rows[j], &ranges, &reference.kinds)
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect::<Result<_>>()?;

    let mut matrix = vec![vec![0.0; n]; n];
    for (i, row) in upper.into_iter().enumerate() {
        for (offset, d) in row.into_iter().enumerate() {
            let j = i + 1 + offset;
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }
    Ok(matrix)
}
