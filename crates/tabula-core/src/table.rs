use std::collections::BTreeMap;

use serde::Serialize;

use crate::difference::TableDifference;
use crate::error::{CellUpdateError, DifferenceError, RowError};
use crate::row::Row;
use crate::schema::Column;
use crate::value::Value;

/// A table with a fixed column list and a growing set of rows.
///
/// Serializes as `{id, name, columns}`; rows are listed separately.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    id: u64,
    name: String,
    columns: Vec<Column>,
    #[serde(skip)]
    rows: BTreeMap<u64, Row>,
    #[serde(skip)]
    next_row_id: u64,
}

impl Table {
    pub fn new(id: u64, name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            id,
            name: name.into(),
            columns,
            rows: BTreeMap::new(),
            next_row_id: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, id: u64) -> Option<&Row> {
        self.rows.get(&id)
    }

    /// Rows in ascending id order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Validates every cell, then stores the row under the next unused id.
    ///
    /// Nothing is stored if any cell is rejected.
    pub fn add_row(&mut self, cells: Vec<Value>) -> Result<&Row, RowError> {
        if cells.len() != self.columns.len() {
            return Err(RowError::LengthMismatch {
                expected: self.columns.len(),
                found: cells.len(),
            });
        }

        let cells = self
            .columns
            .iter()
            .zip(cells)
            .map(|(column, value)| column.admit(value))
            .collect::<Result<Vec<_>, _>>()?;

        let id = self.next_row_id;
        self.next_row_id += 1;

        tracing::debug!("Table #{} ({}): added row #{}", self.id, self.name, id);
        Ok(self.rows.entry(id).or_insert(Row::new(id, cells)))
    }

    /// Removes a row. Removing an absent id is a no-op.
    pub fn remove_row(&mut self, id: u64) -> Option<Row> {
        let removed = self.rows.remove(&id);
        if removed.is_some() {
            tracing::debug!("Table #{} ({}): removed row #{}", self.id, self.name, id);
        }
        removed
    }

    /// Overwrites one cell after validating it against its column.
    ///
    /// On any error the row keeps its previous contents.
    pub fn update_cell(
        &mut self,
        row_id: u64,
        column_id: usize,
        value: Value,
    ) -> Result<&Row, CellUpdateError> {
        let row = self
            .rows
            .get_mut(&row_id)
            .ok_or(CellUpdateError::RowNotFound { row_id })?;
        let column = self
            .columns
            .get(column_id)
            .ok_or(CellUpdateError::ColumnNotFound { column_id })?;

        let value = column.admit(value)?;
        row.set_cell(column_id, value);

        tracing::debug!(
            "Table #{} ({}): updated row #{} column #{}",
            self.id,
            self.name,
            row_id,
            column_id
        );
        Ok(row)
    }

    /// Whether some row holds exactly these cells.
    pub fn contains_row(&self, cells: &[Value]) -> bool {
        self.rows.values().any(|row| row.cells() == cells)
    }

    /// Rows of `self` that have no identical row in `other`.
    pub fn difference<'a>(&'a self, other: &'a Table) -> Result<TableDifference<'a>, DifferenceError> {
        TableDifference::between(self, other)
    }
}
