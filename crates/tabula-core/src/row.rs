use serde::Serialize;

use crate::value::Value;

/// A table row: an id that is never reused within its table, and one cell
/// per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    id: u64,
    cells: Vec<Value>,
}

impl Row {
    pub(crate) fn new(id: u64, cells: Vec<Value>) -> Self {
        Self { id, cells }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cells(&self) -> &[Value] {
        &self.cells
    }

    /// Replaces one cell. The caller has already validated `value` against
    /// the column at `index`.
    pub(crate) fn set_cell(&mut self, index: usize, value: Value) {
        self.cells[index] = value;
    }
}
