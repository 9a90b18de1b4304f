use crate::normalize::coerce;
use crate::{ColumnKind, Error, Result, Value};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Name and declared kind of a single column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Numeric)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Boolean)
    }

    pub fn categorical(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Categorical)
    }
}

/// An ordered set of typed columns and the rows that fill them
///
/// Every row holds exactly one value per column, and every value is
/// acceptable for its column kind. Both are checked on construction.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<ColumnSpec>,
    kinds: Vec<ColumnKind>,
    index: AHashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<ColumnSpec>, rows: Vec<Vec<Value>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::EmptySchema);
        }

        let mut index = AHashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if index.insert(column.name.clone(), i).is_some() {
                return Err(Error::DuplicateColumn(column.name.clone()));
            }
        }

        for row in &rows {
            if row.len() != columns.len() {
                return Err(Error::ShapeMismatch {
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
            for (value, column) in row.iter().zip(&columns) {
                coerce(value, column.kind, &column.name)?;
            }
        }

        let kinds = columns.iter().map(|c| c.kind).collect();
        Ok(Self {
            columns,
            kinds,
            index,
            rows,
        })
    }

    /// All-numeric table with positional column names `"0"`, `"1"`, ...
    pub fn numeric(rows: Vec<Vec<f64>>) -> Result<Self> {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let names = (0..width).map(|i| i.to_string()).collect();
        Self::numeric_with_names(names, rows)
    }

    /// All-numeric table with caller-supplied column names
    pub fn numeric_with_names(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let columns = names.into_iter().map(ColumnSpec::numeric).collect();
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(Value::Number).collect())
            .collect();
        Self::new(columns, rows)
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Extract a row as an observation carrying this table's column kinds
    pub fn row(&self, index: usize) -> Result<Observation> {
        let values = self.rows.get(index).ok_or(Error::RowOutOfBounds {
            index,
            len: self.rows.len(),
        })?;
        Ok(Observation {
            values: values.clone(),
            kinds: self.kinds.clone(),
        })
    }

    /// New table holding the given rows, in the given order
    pub fn take(&self, indices: &[usize]) -> Result<Table> {
        let mut rows = Vec::with_capacity(indices.len());
        for &i in indices {
            let row = self.rows.get(i).ok_or(Error::RowOutOfBounds {
                index: i,
                len: self.rows.len(),
            })?;
            rows.push(row.clone());
        }
        Ok(Table {
            columns: self.columns.clone(),
            kinds: self.kinds.clone(),
            index: self.index.clone(),
            rows,
        })
    }

    /// Resolve column names to positions, failing on the first unknown name
    pub fn resolve_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|n| {
                let n = n.as_ref();
                self.column_index(n)
                    .ok_or_else(|| Error::ColumnNotFound(n.to_string()))
            })
            .collect()
    }

    /// New table restricted to the given column positions
    pub fn project(&self, positions: &[usize]) -> Result<Table> {
        let columns: Vec<ColumnSpec> = positions
            .iter()
            .map(|&p| {
                self.columns.get(p).cloned().ok_or(Error::ShapeMismatch {
                    expected: self.columns.len(),
                    actual: p + 1,
                })
            })
            .collect::<Result<_>>()?;
        let rows = self
            .rows
            .iter()
            .map(|row| positions.iter().map(|&p| row[p].clone()).collect())
            .collect();
        Table::new(columns, rows)
    }

    /// New table restricted to the named columns
    pub fn select_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let positions = self.resolve_columns(names)?;
        self.project(&positions)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns && self.rows == other.rows
    }
}

/// A single row of values with a column kind per position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawObservation")]
pub struct Observation {
    values: Vec<Value>,
    kinds: Vec<ColumnKind>,
}

/// Unchecked wire form of [`Observation`]
#[derive(Deserialize)]
struct RawObservation {
    values: Vec<Value>,
    kinds: Vec<ColumnKind>,
}

impl TryFrom<RawObservation> for Observation {
    type Error = Error;

    fn try_from(raw: RawObservation) -> Result<Self> {
        Observation::with_kinds(raw.values, raw.kinds)
    }
}

impl Observation {
    /// Pair a bare row with explicit column kinds
    pub fn with_kinds(values: Vec<Value>, kinds: Vec<ColumnKind>) -> Result<Self> {
        if values.len() != kinds.len() {
            return Err(Error::ShapeMismatch {
                expected: kinds.len(),
                actual: values.len(),
            });
        }
        Ok(Self { values, kinds })
    }

    /// Build an observation whose kinds are guessed from the value types.
    ///
    /// Compatibility path for rows that arrive without a schema. Prefer
    /// [`Table::row`] or [`Observation::with_kinds`].
    pub fn infer(values: Vec<Value>) -> Self {
        let kinds = values.iter().map(ColumnKind::sniff).collect();
        Self { values, kinds }
    }

    pub fn from_json(values: &[serde_json::Value]) -> Self {
        Self::infer(values.iter().map(Value::from).collect())
    }

    pub fn numeric(values: &[f64]) -> Self {
        Self {
            values: values.iter().copied().map(Value::Number).collect(),
            kinds: vec![ColumnKind::Numeric; values.len()],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    /// Observation restricted to the given positions
    pub fn project(&self, positions: &[usize]) -> Result<Observation> {
        let mut values = Vec::with_capacity(positions.len());
        let mut kinds = Vec::with_capacity(positions.len());
        for &p in positions {
            let (value, kind) = self
                .values
                .get(p)
                .zip(self.kinds.get(p))
                .ok_or(Error::ShapeMismatch {
                    expected: p + 1,
                    actual: self.values.len().min(self.kinds.len()),
                })?;
            values.push(value.clone());
            kinds.push(*kind);
        }
        Ok(Observation { values, kinds })
    }
}
