//! Error types raised by the engine.
//!
//! Each operation returns the narrowest error it can produce. `Error`
//! aggregates all of them for callers that only need to report a failure.

use thiserror::Error;

use crate::schema::{Channel, Type};
use crate::value::ValueKind;

/// A column definition that violates the range-presence rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A `ColorInvl` column is missing one or more of its six bounds.
    #[error(
        "Column: if type=\"ColorInvl\", fields \"r_min\", \"r_max\", \"g_min\", \"g_max\", \
         \"b_min\", \"b_max\" must be also provided"
    )]
    MissingRange,

    /// A channel's lower bound is greater than its upper bound.
    #[error("{channel}_min must be less or equal than {channel}_max")]
    RangeOutOfOrder { channel: Channel },

    /// A column that is not `ColorInvl` carries a bound.
    #[error(
        "Column: if type=\"{column_type}\", fields \"r_min\", \"r_max\", \"g_min\", \"g_max\", \
         \"b_min\", \"b_max\" must not be provided"
    )]
    UnexpectedRange { column_type: Type },
}

/// A value that does not satisfy a column's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{expected} expected but {kind} value '{value}' found")]
pub struct TypeMismatch {
    /// Human-readable description of the column type.
    pub expected: String,
    /// Runtime kind of the offending value.
    pub kind: ValueKind,
    /// Textual rendering of the offending value.
    pub value: String,
}

/// Failure to insert a row into a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Row length must be the same as number of columns")]
    LengthMismatch { expected: usize, found: usize },

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),
}

/// Failure to overwrite a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellUpdateError {
    #[error("Row #{row_id} does not exist")]
    RowNotFound { row_id: u64 },

    #[error("Column #{column_id} does not exist")]
    ColumnNotFound { column_id: usize },

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),
}

/// Two tables whose schemas cannot be compared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DifferenceError {
    #[error("Table difference: tables have different column counts")]
    IncompatibleColumnCount { left: usize, right: usize },

    #[error("Table difference: tables have different column types")]
    IncompatibleColumnTypes { position: usize },
}

/// A wire value that cannot be turned into a cell value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Unsupported value kind: {0}")]
    Unsupported(&'static str),

    #[error("Integer out of range: {0}")]
    IntegerOutOfRange(String),

    #[error("Invalid decimal: '{0}'")]
    InvalidDecimal(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Any error the engine can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),

    #[error(transparent)]
    Row(#[from] RowError),

    #[error(transparent)]
    CellUpdate(#[from] CellUpdateError),

    #[error(transparent)]
    Difference(#[from] DifferenceError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
