use serde::{Serialize, Serializer};

use crate::error::RequestError;

/// Outcome class of a request, reported as an HTTP-style status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    NoContent,
    BadRequest,
    NotFound,
    Conflict,
    Unprocessable,
    Internal,
}

impl Status {
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::NoContent => 204,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::Conflict => 409,
            Status::Unprocessable => 422,
            Status::Internal => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code() < 400
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

/// One response line: a status plus either a body or an error detail.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Response {
    /// Create a successful response carrying `body`.
    pub fn success<T: Serialize>(status: Status, body: &T) -> Result<Self, RequestError> {
        let body = serde_json::to_value(body).map_err(RequestError::Encode)?;
        Ok(Self {
            status,
            body: Some(body),
            detail: None,
        })
    }

    /// Create a successful response without a body.
    pub fn no_content() -> Self {
        Self {
            status: Status::NoContent,
            body: None,
            detail: None,
        }
    }

    /// Create a failed response from a request error.
    pub fn failure(error: &RequestError) -> Self {
        Self {
            status: error.status(),
            body: None,
            detail: Some(error.to_string()),
        }
    }
}
