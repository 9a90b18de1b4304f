//! Per-column ranges used to scale numeric differences
//!
//! For numeric columns the range is `max - min` over the reference rows and
//! the query value, so a query outside the reference spread widens the range.
//! Boolean and categorical columns get a `0.0` placeholder.

use crate::normalize::{Cell, NormalizedRow};
use crate::{ColumnKind, Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One range per column, in column order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct RangeVector {
    data: Vec<f64>,
}

impl RangeVector {
    #[inline]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }
}

impl Index<usize> for RangeVector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.data[i]
    }
}

/// Running min/max of one numeric column
#[derive(Debug, Clone, Copy)]
struct Spread {
    min: f64,
    max: f64,
}

impl Spread {
    const EMPTY: Spread = Spread {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    #[inline]
    fn push(&mut self, x: f64) {
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    #[inline]
    fn width(self) -> f64 {
        if self.max >= self.min {
            self.max - self.min
        } else {
            0.0
        }
    }
}

/// Compute ranges over the reference rows widened by the query row
pub fn compute_ranges(
    reference: &[NormalizedRow],
    query: &NormalizedRow,
    kinds: &[ColumnKind],
) -> Result<RangeVector> {
    check_width(query, kinds)?;
    let mut spreads = reference_spreads(reference, kinds)?;
    for (col, kind) in kinds.iter().enumerate() {
        if kind.is_numeric_like() {
            spreads[col].push(numeric_cell(&query.cells[col], col, *kind)?);
        }
    }
    Ok(finish(spreads, kinds))
}

/// Compute ranges over the reference rows alone
pub fn compute_table_ranges(reference: &[NormalizedRow], kinds: &[ColumnKind]) -> Result<RangeVector> {
    let spreads = reference_spreads(reference, kinds)?;
    Ok(finish(spreads, kinds))
}

fn reference_spreads(reference: &[NormalizedRow], kinds: &[ColumnKind]) -> Result<Vec<Spread>> {
    let mut spreads = vec![Spread::EMPTY; kinds.len()];
    for row in reference {
        check_width(row, kinds)?;
        for (col, kind) in kinds.iter().enumerate() {
            if kind.is_numeric_like() {
                spreads[col].push(numeric_cell(&row.cells[col], col, *kind)?);
            }
        }
    }
    Ok(spreads)
}

fn finish(spreads: Vec<Spread>, kinds: &[ColumnKind]) -> RangeVector {
    let data = spreads
        .into_iter()
        .zip(kinds)
        .map(|(spread, kind)| match kind {
            ColumnKind::Numeric => spread.width(),
            ColumnKind::Boolean | ColumnKind::Categorical => 0.0,
        })
        .collect();
    let ranges = RangeVector::new(data);
    tracing::trace!(ranges = ?ranges.as_slice(), "computed column ranges");
    ranges
}

#[inline]
fn check_width(row: &NormalizedRow, kinds: &[ColumnKind]) -> Result<()> {
    if row.len() != kinds.len() {
        return Err(Error::ShapeMismatch {
            expected: kinds.len(),
            actual: row.len(),
        });
    }
    Ok(())
}

#[inline]
fn numeric_cell(cell: &Cell, col: usize, kind: ColumnKind) -> Result<f64> {
    match cell {
        Cell::Numeric(x) => Ok(*x),
        Cell::Categorical(s) => Err(Error::KindMismatch {
            column: col.to_string(),
            kind,
            value: s.clone(),
        }),
    }
}
