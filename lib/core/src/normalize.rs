//! Column normalization
//!
//! Converts typed rows into a uniform representation where every cell is
//! either a float (numeric and boolean columns) or a discrete token
//! (categorical columns). Column order and count are preserved.

use crate::{ColumnKind, Error, Observation, Result, Table, Value};
use serde::{Deserialize, Serialize};

/// A normalized cell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Numeric(f64),
    Categorical(String),
}

impl Cell {
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Numeric(x) => Some(*x),
            Cell::Categorical(_) => None,
        }
    }

    #[inline]
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Cell::Numeric(_) => None,
            Cell::Categorical(s) => Some(s),
        }
    }
}

/// A single normalized row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NormalizedRow {
    pub cells: Vec<Cell>,
}

impl NormalizedRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }
}

/// A normalized table: column kinds plus normalized rows
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub kinds: Vec<ColumnKind>,
    pub rows: Vec<NormalizedRow>,
}

impl NormalizedTable {
    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.kinds.len())
    }
}

/// Anything that can be brought into normalized form
pub trait Normalize {
    type Output;

    fn normalize(&self) -> Result<Self::Output>;
}

impl Normalize for Table {
    type Output = NormalizedTable;

    fn normalize(&self) -> Result<NormalizedTable> {
        let names: Vec<&str> = self.column_names().collect();
        let rows = self
            .rows()
            .iter()
            .map(|row| normalize_named(row, self.kinds(), &names))
            .collect::<Result<Vec<_>>>()?;
        Ok(NormalizedTable {
            kinds: self.kinds().to_vec(),
            rows,
        })
    }
}

impl Normalize for Observation {
    type Output = NormalizedRow;

    fn normalize(&self) -> Result<NormalizedRow> {
        normalize_values(self.values(), self.kinds())
    }
}

/// Normalize a table or a single observation
pub fn normalize<T: Normalize + ?Sized>(input: &T) -> Result<T::Output> {
    input.normalize()
}

/// Normalize a bare row against kinds taken from elsewhere, usually the
/// reference table the row will be compared with.
pub fn normalize_values(values: &[Value], kinds: &[ColumnKind]) -> Result<NormalizedRow> {
    if values.len() != kinds.len() {
        return Err(Error::ShapeMismatch {
            expected: kinds.len(),
            actual: values.len(),
        });
    }
    let cells = values
        .iter()
        .zip(kinds)
        .enumerate()
        .map(|(i, (value, kind))| coerce(value, *kind, &i.to_string()))
        .collect::<Result<Vec<_>>>()?;
    Ok(NormalizedRow::new(cells))
}

fn normalize_named(values: &[Value], kinds: &[ColumnKind], names: &[&str]) -> Result<NormalizedRow> {
    let cells = values
        .iter()
        .zip(kinds)
        .zip(names)
        .map(|((value, kind), name)| coerce(value, *kind, name))
        .collect::<Result<Vec<_>>>()?;
    Ok(NormalizedRow::new(cells))
}

/// Coerce one raw value into the cell form of its column kind
pub(crate) fn coerce(value: &Value, kind: ColumnKind, column: &str) -> Result<Cell> {
    match (kind, value) {
        (ColumnKind::Numeric | ColumnKind::Boolean, Value::Number(x)) => Ok(Cell::Numeric(*x)),
        (ColumnKind::Numeric | ColumnKind::Boolean, Value::Bool(b)) => {
            Ok(Cell::Numeric(if *b { 1.0 } else { 0.0 }))
        }
        (ColumnKind::Numeric | ColumnKind::Boolean, Value::Category(s)) => Err(Error::KindMismatch {
            column: column.to_string(),
            kind,
            value: s.clone(),
        }),
        (ColumnKind::Categorical, Value::Category(s)) => Ok(Cell::Categorical(s.clone())),
        (ColumnKind::Categorical, other) => Ok(Cell::Categorical(other.to_string())),
    }
}
