//! Difference of two tables with compatible schemas.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::DifferenceError;
use crate::row::Row;
use crate::schema::Column;
use crate::table::Table;
use crate::value::Value;

/// Rows of `left_table` for which `right_table` has no row with identical
/// cells. Borrows both tables; nothing here is stored.
#[derive(Debug, Clone, Serialize)]
pub struct TableDifference<'a> {
    pub left_table: &'a Table,
    pub right_table: &'a Table,
    pub columns: Vec<Column>,
    pub rows: BTreeMap<u64, &'a Row>,
}

impl<'a> TableDifference<'a> {
    pub fn between(left: &'a Table, right: &'a Table) -> Result<Self, DifferenceError> {
        if left.column_count() != right.column_count() {
            return Err(DifferenceError::IncompatibleColumnCount {
                left: left.column_count(),
                right: right.column_count(),
            });
        }

        let pairs = left.columns().iter().zip(right.columns());

        if let Some(position) = pairs
            .clone()
            .position(|(l, r)| l.type_signature() != r.type_signature())
        {
            return Err(DifferenceError::IncompatibleColumnTypes { position });
        }

        let columns = pairs
            .map(|(l, r)| {
                if l.name() == r.name() {
                    l.renamed(l.name())
                } else {
                    l.renamed(format!("'{}' / '{}'", l.name(), r.name()))
                }
            })
            .collect();

        // Set filter: a left row is dropped as soon as any right row matches.
        let present: HashSet<&[Value]> = right.rows().map(Row::cells).collect();
        let rows: BTreeMap<u64, &Row> = left
            .rows()
            .filter(|row| !present.contains(row.cells()))
            .map(|row| (row.id(), row))
            .collect();

        tracing::debug!(
            "Difference of table #{} and table #{}: {} row(s)",
            left.id(),
            right.id(),
            rows.len()
        );

        Ok(Self {
            left_table: left,
            right_table: right,
            columns,
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
