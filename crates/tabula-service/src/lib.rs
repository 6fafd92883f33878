//! Request layer for the tabula engine.
//!
//! Resolves database names and table/row/column ids, reports lookups that
//! fail, and maps engine errors to response statuses.

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod service;

pub use error::RequestError;
pub use request::Request;
pub use response::{Response, Status};
pub use service::Service;
