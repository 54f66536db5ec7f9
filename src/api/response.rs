//! Outgoing responses.

use http::StatusCode;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// `Location` header: the URI of a created or recreated resource.
    pub location: Option<String>,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            location: None,
            body: Some(body),
        }
    }

    pub fn created(location: String) -> Self {
        Self {
            status: StatusCode::CREATED,
            location: Some(location),
            body: None,
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            location: None,
            body: None,
        }
    }

    /// An error response with body `{"error": message}`.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            location: None,
            body: Some(json!({ "error": message.into() })),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// The serialized body, empty when there is none.
    pub fn body_text(&self) -> String {
        self.body.as_ref().map(Value::to_string).unwrap_or_default()
    }

    /// The body as JSON, `null` when there is none.
    pub fn json(&self) -> Value {
        self.body.clone().unwrap_or(Value::Null)
    }
}
