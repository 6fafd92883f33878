use std::sync::Arc;

use parking_lot::Mutex;
use tabula_core::Store;

use crate::error::RequestError;
use crate::handlers;
use crate::request::Request;
use crate::response::{Response, Status};

/// Request dispatcher over a shared store.
///
/// Every request holds the store lock for its whole duration, so requests
/// are applied one at a time. Clones share the same store.
#[derive(Clone, Default)]
pub struct Service {
    store: Arc<Mutex<Store>>,
}

impl Service {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Parse one JSON request and handle it.
    pub fn handle_json(&self, text: &str) -> Response {
        match serde_json::from_str::<Request>(text) {
            Ok(request) => self.handle(request),
            Err(e) => {
                let error = RequestError::from(e);
                tracing::warn!("Rejected malformed request: {}", error);
                Response::failure(&error)
            }
        }
    }

    pub fn handle(&self, request: Request) -> Response {
        let operation = request.operation();
        match self.dispatch(request) {
            Ok(response) => {
                tracing::debug!("{} -> {}", operation, response.status.code());
                response
            }
            Err(e) => {
                let response = Response::failure(&e);
                tracing::warn!("{} -> {}: {}", operation, response.status.code(), e);
                response
            }
        }
    }

    fn dispatch(&self, request: Request) -> Result<Response, RequestError> {
        let mut store = self.store.lock();
        let store = &mut *store;

        match request {
            Request::ListDatabases => {
                Response::success(Status::Ok, &handlers::list_databases(store))
            }
            Request::GetDatabase { database } => {
                Response::success(Status::Ok, handlers::get_database(store, &database)?)
            }
            Request::CreateDatabase { name } => {
                Response::success(Status::Created, handlers::create_database(store, &name)?)
            }
            Request::DeleteDatabase { database } => {
                handlers::delete_database(store, &database)?;
                Ok(Response::no_content())
            }
            Request::GetTable { database, table_id } => {
                Response::success(Status::Ok, handlers::get_table(store, &database, table_id)?)
            }
            Request::CreateTable { database, name, columns } => Response::success(
                Status::Created,
                handlers::create_table(store, &database, &name, columns)?,
            ),
            Request::DeleteTable { database, table_id } => {
                handlers::delete_table(store, &database, table_id)?;
                Ok(Response::no_content())
            }
            Request::GetRows { database, table_id } => {
                Response::success(Status::Ok, &handlers::get_rows(store, &database, table_id)?)
            }
            Request::GetRow { database, table_id, row_id } => Response::success(
                Status::Ok,
                handlers::get_row(store, &database, table_id, row_id)?,
            ),
            Request::AddRow { database, table_id, cells } => Response::success(
                Status::Created,
                handlers::add_row(store, &database, table_id, cells)?,
            ),
            Request::DeleteRow { database, table_id, row_id } => {
                handlers::delete_row(store, &database, table_id, row_id)?;
                Ok(Response::no_content())
            }
            Request::UpdateCell {
                database,
                table_id,
                row_id,
                column_id,
                value,
            } => Response::success(
                Status::Ok,
                handlers::update_cell(store, &database, table_id, row_id, column_id, value)?,
            ),
            Request::Difference {
                database,
                left_table_id,
                right_table_id,
            } => Response::success(
                Status::Ok,
                &handlers::difference(store, &database, left_table_id, right_table_id)?,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(service: &Service, request: serde_json::Value) -> Response {
        service.handle_json(&request.to_string())
    }

    fn setup() -> Service {
        let service = Service::new();
        run(&service, json!({"create_database": {"name": "shop"}}));
        run(
            &service,
            json!({"create_table": {"database": "shop", "name": "items", "columns": [
                {"name": "n", "type": "Integer"},
                {"name": "s", "type": "String"}
            ]}}),
        );
        service
    }

    #[test]
    fn test_create_and_list_databases() {
        let service = Service::new();
        let response = run(&service, json!({"create_database": {"name": "a"}}));
        assert_eq!(response.status, Status::Created);
        assert_eq!(response.body, Some(json!({"name": "a", "tables": {}})));

        let response = run(&service, json!({"create_database": {"name": "a"}}));
        assert_eq!(response.status, Status::Conflict);
        assert_eq!(response.detail.as_deref(), Some("Database 'a' already exists"));

        let first = run(&service, json!("list_databases"));
        let second = run(&service, json!("list_databases"));
        assert_eq!(first.body, Some(json!(["a"])));
        assert_eq!(first.body, second.body);
    }

    #[test]
    fn test_row_lifecycle() {
        let service = setup();
        let response = run(
            &service,
            json!({"add_row": {"database": "shop", "table_id": 0, "cells": [1, "a"]}}),
        );
        assert_eq!(response.status, Status::Created);
        assert_eq!(response.body, Some(json!({"id": 0, "cells": [1, "a"]})));

        let response = run(
            &service,
            json!({"update_cell": {"database": "shop", "table_id": 0, "row_id": 0, "column_id": 1, "value": "b"}}),
        );
        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.body, Some(json!({"id": 0, "cells": [1, "b"]})));

        let response = run(
            &service,
            json!({"delete_row": {"database": "shop", "table_id": 0, "row_id": 0}}),
        );
        assert_eq!(response.status, Status::NoContent);
        assert!(response.body.is_none());

        let response = run(
            &service,
            json!({"get_row": {"database": "shop", "table_id": 0, "row_id": 0}}),
        );
        assert_eq!(response.status, Status::NotFound);
    }

    #[test]
    fn test_validation_failures() {
        let service = setup();
        let response = run(
            &service,
            json!({"add_row": {"database": "shop", "table_id": 0, "cells": ["x", "a"]}}),
        );
        assert_eq!(response.status, Status::BadRequest);
        assert_eq!(
            response.detail.as_deref(),
            Some("Integer expected but String value 'x' found")
        );

        let response = run(
            &service,
            json!({"create_table": {"database": "shop", "name": "bad", "columns": [
                {"name": "c", "type": "Integer", "r_min": 1}
            ]}}),
        );
        assert_eq!(response.status, Status::Unprocessable);

        let response = service.handle_json("{not json");
        assert_eq!(response.status, Status::Unprocessable);

        let response = run(
            &service,
            json!({"add_row": {"database": "shop", "table_id": 0, "cells": [true, "a"]}}),
        );
        assert_eq!(response.status, Status::Unprocessable);
    }

    #[test]
    fn test_difference() {
        let service = setup();
        run(
            &service,
            json!({"create_table": {"database": "shop", "name": "other", "columns": [
                {"name": "n", "type": "Integer"},
                {"name": "label", "type": "String"}
            ]}}),
        );
        for cells in [json!([1, "a"]), json!([2, "b"])] {
            run(
                &service,
                json!({"add_row": {"database": "shop", "table_id": 0, "cells": cells}}),
            );
        }
        run(
            &service,
            json!({"add_row": {"database": "shop", "table_id": 1, "cells": [1, "a"]}}),
        );

        let response = run(
            &service,
            json!({"difference": {"database": "shop", "left_table_id": 0, "right_table_id": 1}}),
        );
        assert_eq!(response.status, Status::Ok);
        let body = response.body.unwrap();
        assert_eq!(body["rows"], json!({"1": {"id": 1, "cells": [2, "b"]}}));
        assert_eq!(body["columns"][1]["name"], "'s' / 'label'");
        assert_eq!(body["right_table"]["id"], 1);

        run(
            &service,
            json!({"create_table": {"database": "shop", "name": "reals", "columns": [
                {"name": "n", "type": "Real"},
                {"name": "s", "type": "String"}
            ]}}),
        );
        let response = run(
            &service,
            json!({"difference": {"database": "shop", "left_table_id": 0, "right_table_id": 2}}),
        );
        assert_eq!(response.status, Status::BadRequest);
        assert_eq!(
            response.detail.as_deref(),
            Some("Table difference: tables have different column types")
        );
    }

    #[test]
    fn test_copied_real_row_matches_in_difference() {
        let service = Service::new();
        run(&service, json!({"create_database": {"name": "lab"}}));
        for name in ["left", "right"] {
            run(
                &service,
                json!({"create_table": {"database": "lab", "name": name, "columns": [
                    {"name": "x", "type": "Real"}
                ]}}),
            );
        }
        let response = service.handle_json(
            r#"{"add_row": {"database": "lab", "table_id": 0, "cells": [1.0]}}"#,
        );
        assert_eq!(response.status, Status::Created);

        let fetched = run(
            &service,
            json!({"get_row": {"database": "lab", "table_id": 0, "row_id": 0}}),
        );
        let cells = fetched.body.unwrap()["cells"].clone();
        assert_eq!(cells.to_string(), "[1.0]");

        run(
            &service,
            json!({"add_row": {"database": "lab", "table_id": 1, "cells": cells}}),
        );
        let response = run(
            &service,
            json!({"difference": {"database": "lab", "left_table_id": 0, "right_table_id": 1}}),
        );
        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.body.unwrap()["rows"], json!({}));
    }

    #[test]
    fn test_clones_share_store() {
        let service = Service::new();
        let other = service.clone();
        run(&service, json!({"create_database": {"name": "shared"}}));
        let response = run(&other, json!({"get_database": {"database": "shared"}}));
        assert_eq!(response.status, Status::Ok);
    }

    #[test]
    fn test_delete_database() {
        let service = setup();
        let response = run(&service, json!({"delete_database": {"database": "shop"}}));
        assert_eq!(response.status, Status::NoContent);

        let response = run(&service, json!({"delete_database": {"database": "shop"}}));
        assert_eq!(response.status, Status::NotFound);
        assert_eq!(response.detail.as_deref(), Some("Cannot find database 'shop'"));
    }
}
