use serde::Deserialize;

use tabula_core::{Column, Value};

/// A single request, one JSON object per line.
///
/// Requests are externally tagged by operation name, e.g.
/// `{"create_database": {"name": "shop"}}` or `"list_databases"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Request {
    ListDatabases,
    GetDatabase {
        database: String,
    },
    CreateDatabase {
        name: String,
    },
    DeleteDatabase {
        database: String,
    },
    GetTable {
        database: String,
        table_id: u64,
    },
    CreateTable {
        database: String,
        name: String,
        columns: Vec<Column>,
    },
    DeleteTable {
        database: String,
        table_id: u64,
    },
    GetRows {
        database: String,
        table_id: u64,
    },
    GetRow {
        database: String,
        table_id: u64,
        row_id: u64,
    },
    AddRow {
        database: String,
        table_id: u64,
        cells: Vec<Value>,
    },
    DeleteRow {
        database: String,
        table_id: u64,
        row_id: u64,
    },
    UpdateCell {
        database: String,
        table_id: u64,
        row_id: u64,
        column_id: usize,
        value: Value,
    },
    Difference {
        database: String,
        left_table_id: u64,
        right_table_id: u64,
    },
}

impl Request {
    /// Operation name, as used for the external tag.
    pub fn operation(&self) -> &'static str {
        match self {
            Request::ListDatabases => "list_databases",
            Request::GetDatabase { .. } => "get_database",
            Request::CreateDatabase { .. } => "create_database",
            Request::DeleteDatabase { .. } => "delete_database",
            Request::GetTable { .. } => "get_table",
            Request::CreateTable { .. } => "create_table",
            Request::DeleteTable { .. } => "delete_table",
            Request::GetRows { .. } => "get_rows",
            Request::GetRow { .. } => "get_row",
            Request::AddRow { .. } => "add_row",
            Request::DeleteRow { .. } => "delete_row",
            Request::UpdateCell { .. } => "update_cell",
            Request::Difference { .. } => "difference",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_request() {
        let request: Request = serde_json::from_str(r#""list_databases""#).unwrap();
        assert!(matches!(request, Request::ListDatabases));
    }

    #[test]
    fn test_parse_create_table() {
        let request: Request = serde_json::from_str(
            r#"{"create_table": {"database": "shop", "name": "items", "columns": [
                {"name": "id", "type": "Integer"},
                {"name": "tint", "type": "ColorInvl", "r_min": 0, "r_max": 10,
                 "g_min": 0, "g_max": 10, "b_min": 0, "b_max": 10}
            ]}}"#,
        )
        .unwrap();

        match request {
            Request::CreateTable { database, name, columns } => {
                assert_eq!(database, "shop");
                assert_eq!(name, "items");
                assert_eq!(columns.len(), 2);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_parse_add_row_keeps_value_kinds() {
        let request: Request = serde_json::from_str(
            r#"{"add_row": {"database": "d", "table_id": 0, "cells": [1, 2.50, "x", {"r": 1, "g": 2, "b": 3}]}}"#,
        )
        .unwrap();

        let Request::AddRow { cells, .. } = request else {
            panic!("expected add_row");
        };
        assert_eq!(cells[0], Value::Integer(1));
        assert_eq!(cells[1], Value::Real("2.5".parse().unwrap()));
        assert_eq!(cells[2], Value::from("x"));
        assert_eq!(cells[3], Value::Color(tabula_core::Color::new(1, 2, 3)));
    }

    #[test]
    fn test_invalid_column_is_rejected_at_parse() {
        let err = serde_json::from_str::<Request>(
            r#"{"create_table": {"database": "d", "name": "t", "columns": [{"name": "c", "type": "ColorInvl"}]}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be also provided"));
    }

    #[test]
    fn test_unknown_operation() {
        assert!(serde_json::from_str::<Request>(r#"{"drop_everything": {}}"#).is_err());
    }
}
