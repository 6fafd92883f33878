//! In-memory, schema-typed tabular data engine.
//!
//! Databases own tables, tables own a fixed list of typed columns and a
//! growing set of rows. Every cell is checked against its column at write
//! time. The engine does no locking: callers that share a `Store` across
//! threads must serialize access themselves.

pub mod database;
pub mod difference;
pub mod error;
pub mod row;
pub mod schema;
pub mod store;
pub mod table;
pub mod value;

pub use database::*;
pub use difference::*;
pub use error::*;
pub use row::*;
pub use schema::*;
pub use store::*;
pub use table::*;
pub use value::*;
