use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::Column;
use crate::table::Table;

/// A named collection of tables.
#[derive(Debug, Clone, Serialize)]
pub struct Database {
    name: String,
    tables: BTreeMap<u64, Table>,
    #[serde(skip)]
    next_table_id: u64,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: BTreeMap::new(),
            next_table_id: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a table under the next unused id. Any column list is accepted,
    /// including an empty one.
    pub fn add_table(&mut self, name: impl Into<String>, columns: Vec<Column>) -> &Table {
        let id = self.next_table_id;
        self.next_table_id += 1;

        let table = Table::new(id, name, columns);
        tracing::debug!(
            "Database '{}': created table #{} ({}) with {} column(s)",
            self.name,
            id,
            table.name(),
            table.column_count()
        );
        self.tables.entry(id).or_insert(table)
    }

    /// Removes a table. Removing an absent id is a no-op.
    pub fn remove_table(&mut self, id: u64) -> Option<Table> {
        let removed = self.tables.remove(&id);
        if removed.is_some() {
            tracing::debug!("Database '{}': removed table #{}", self.name, id);
        }
        removed
    }

    pub fn table(&self, id: u64) -> Option<&Table> {
        self.tables.get(&id)
    }

    pub fn table_mut(&mut self, id: u64) -> Option<&mut Table> {
        self.tables.get_mut(&id)
    }

    /// Tables in ascending id order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Type;

    #[test]
    fn test_add_table_allocates_ids() {
        let mut db = Database::new("shop");
        assert_eq!(db.add_table("a", vec![]).id(), 0);
        assert_eq!(db.add_table("b", vec![]).id(), 1);
        assert_eq!(db.table_count(), 2);
    }

    #[test]
    fn test_table_ids_are_never_reused() {
        let mut db = Database::new("shop");
        db.add_table("a", vec![]);
        db.add_table("b", vec![]);
        assert!(db.remove_table(1).is_some());
        assert_eq!(db.add_table("c", vec![]).id(), 2);

        let ids: Vec<u64> = db.tables().map(Table::id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_remove_absent_table_is_noop() {
        let mut db = Database::new("shop");
        db.add_table("a", vec![]);
        assert!(db.remove_table(7).is_none());
        assert_eq!(db.table_count(), 1);
    }

    #[test]
    fn test_table_mut() {
        let mut db = Database::new("shop");
        let columns = vec![Column::new("n", Type::Integer, None).unwrap()];
        db.add_table("nums", columns);

        let table = db.table_mut(0).unwrap();
        table.add_row(vec![5.into()]).unwrap();
        assert_eq!(db.table(0).unwrap().row_count(), 1);
    }

    #[test]
    fn test_serialize() {
        let mut db = Database::new("shop");
        db.add_table("empty", vec![]);
        let json = serde_json::to_value(&db).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "shop",
                "tables": {"0": {"id": 0, "name": "empty", "columns": []}}
            })
        );
    }
}
