use thiserror::Error;

use tabula_core::{CellUpdateError, DifferenceError, RowError};

use crate::response::Status;

/// A request that could not be carried out.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Cannot find database '{database}'")]
    DatabaseNotFound { database: String },

    #[error("Database '{database}' already exists")]
    DatabaseExists { database: String },

    #[error("Database '{database}' doesn't contain table #{table_id}")]
    TableNotFound { database: String, table_id: u64 },

    #[error("Table #{table_id} in database '{database}' doesn't contain row #{row_id}")]
    RowNotFound {
        database: String,
        table_id: u64,
        row_id: u64,
    },

    #[error("Table #{table_id} in database '{database}' doesn't contain column #{column_id}")]
    ColumnNotFound {
        database: String,
        table_id: u64,
        column_id: usize,
    },

    #[error(transparent)]
    Engine(#[from] tabula_core::Error),

    #[error("Malformed request: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Failed to encode response: {0}")]
    Encode(serde_json::Error),
}

impl RequestError {
    pub fn status(&self) -> Status {
        match self {
            RequestError::DatabaseNotFound { .. }
            | RequestError::TableNotFound { .. }
            | RequestError::RowNotFound { .. }
            | RequestError::ColumnNotFound { .. } => Status::NotFound,
            RequestError::DatabaseExists { .. } => Status::Conflict,
            RequestError::Engine(tabula_core::Error::Schema(_))
            | RequestError::Engine(tabula_core::Error::Decode(_))
            | RequestError::Malformed(_) => Status::Unprocessable,
            RequestError::Engine(_) => Status::BadRequest,
            RequestError::Encode(_) => Status::Internal,
        }
    }
}

impl From<RowError> for RequestError {
    fn from(e: RowError) -> Self {
        RequestError::Engine(e.into())
    }
}

impl From<DifferenceError> for RequestError {
    fn from(e: DifferenceError) -> Self {
        RequestError::Engine(e.into())
    }
}

impl From<CellUpdateError> for RequestError {
    fn from(e: CellUpdateError) -> Self {
        RequestError::Engine(e.into())
    }
}
