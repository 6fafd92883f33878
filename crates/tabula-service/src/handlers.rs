use std::collections::BTreeMap;

use tabula_core::{CellUpdateError, Column, Database, Row, Store, Table, TableDifference, Value};

use crate::error::RequestError;

type Result<T> = std::result::Result<T, RequestError>;

// Resolve a database by name
fn database<'a>(store: &'a Store, name: &str) -> Result<&'a Database> {
    store.database(name).ok_or_else(|| RequestError::DatabaseNotFound {
        database: name.to_string(),
    })
}

fn database_mut<'a>(store: &'a mut Store, name: &str) -> Result<&'a mut Database> {
    store.database_mut(name).ok_or_else(|| RequestError::DatabaseNotFound {
        database: name.to_string(),
    })
}

// Resolve a table within a database
fn table<'a>(store: &'a Store, db: &str, table_id: u64) -> Result<&'a Table> {
    database(store, db)?
        .table(table_id)
        .ok_or_else(|| RequestError::TableNotFound {
            database: db.to_string(),
            table_id,
        })
}

fn table_mut<'a>(store: &'a mut Store, db: &str, table_id: u64) -> Result<&'a mut Table> {
    database_mut(store, db)?
        .table_mut(table_id)
        .ok_or_else(|| RequestError::TableNotFound {
            database: db.to_string(),
            table_id,
        })
}

fn row_not_found(db: &str, table_id: u64, row_id: u64) -> RequestError {
    RequestError::RowNotFound {
        database: db.to_string(),
        table_id,
        row_id,
    }
}

pub fn list_databases(store: &Store) -> Vec<String> {
    store.database_names().map(str::to_string).collect()
}

pub fn get_database<'a>(store: &'a Store, name: &str) -> Result<&'a Database> {
    database(store, name)
}

pub fn create_database<'a>(store: &'a mut Store, name: &str) -> Result<&'a Database> {
    store
        .create_database(name)
        .ok_or_else(|| RequestError::DatabaseExists {
            database: name.to_string(),
        })
}

pub fn delete_database(store: &mut Store, name: &str) -> Result<()> {
    database(store, name)?;
    store.remove_database(name);
    Ok(())
}

pub fn get_table<'a>(store: &'a Store, db: &str, table_id: u64) -> Result<&'a Table> {
    table(store, db, table_id)
}

pub fn create_table<'a>(
    store: &'a mut Store,
    db: &str,
    name: &str,
    columns: Vec<Column>,
) -> Result<&'a Table> {
    Ok(database_mut(store, db)?.add_table(name, columns))
}

pub fn delete_table(store: &mut Store, db: &str, table_id: u64) -> Result<()> {
    table(store, db, table_id)?;
    database_mut(store, db)?.remove_table(table_id);
    Ok(())
}

pub fn get_rows<'a>(store: &'a Store, db: &str, table_id: u64) -> Result<BTreeMap<u64, &'a Row>> {
    let table = table(store, db, table_id)?;
    Ok(table.rows().map(|row| (row.id(), row)).collect())
}

pub fn get_row<'a>(store: &'a Store, db: &str, table_id: u64, row_id: u64) -> Result<&'a Row> {
    table(store, db, table_id)?
        .row(row_id)
        .ok_or_else(|| row_not_found(db, table_id, row_id))
}

pub fn add_row<'a>(
    store: &'a mut Store,
    db: &str,
    table_id: u64,
    cells: Vec<Value>,
) -> Result<&'a Row> {
    Ok(table_mut(store, db, table_id)?.add_row(cells)?)
}

pub fn delete_row(store: &mut Store, db: &str, table_id: u64, row_id: u64) -> Result<()> {
    get_row(store, db, table_id, row_id)?;
    table_mut(store, db, table_id)?.remove_row(row_id);
    Ok(())
}

pub fn update_cell<'a>(
    store: &'a mut Store,
    db: &str,
    table_id: u64,
    row_id: u64,
    column_id: usize,
    value: Value,
) -> Result<&'a Row> {
    table_mut(store, db, table_id)?
        .update_cell(row_id, column_id, value)
        .map_err(|e| match e {
            CellUpdateError::RowNotFound { row_id } => row_not_found(db, table_id, row_id),
            CellUpdateError::ColumnNotFound { column_id } => RequestError::ColumnNotFound {
                database: db.to_string(),
                table_id,
                column_id,
            },
            e => e.into(),
        })
}

pub fn difference<'a>(
    store: &'a Store,
    db: &str,
    left_table_id: u64,
    right_table_id: u64,
) -> Result<TableDifference<'a>> {
    let left = table(store, db, left_table_id)?;
    let right = table(store, db, right_table_id)?;
    Ok(left.difference(right)?)
}
