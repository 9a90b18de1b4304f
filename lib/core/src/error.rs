use crate::ColumnKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Shape mismatch: expected {expected} columns, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Column '{column}' is {kind:?} but got value {value}")]
    KindMismatch {
        column: String,
        kind: ColumnKind,
        value: String,
    },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Table must declare at least one column")]
    EmptySchema,

    #[error("Row {index} out of bounds for table with {len} rows")]
    RowOutOfBounds { index: usize, len: usize },

    #[error("Labels do not align with data: {rows} rows, {labels} labels")]
    LabelMismatch { rows: usize, labels: usize },

    #[error("Unknown distance metric: '{0}' (expected 'gower' or 'euclidean')")]
    UnknownMetric(String),

    #[error("Column '{column}' is categorical and cannot be used with {metric} distance")]
    UnsupportedColumn { column: String, metric: &'static str },
}
