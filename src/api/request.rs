//! Incoming requests and content-type parsing.

use http::Method;

/// One request against the resource API, as handed over by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Raw `Content-Type` header value.
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            content_type: None,
            body: String::new(),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            ..Self::get(path)
        }
    }

    pub fn post(path: impl Into<String>, content_type: &str, body: impl Into<String>) -> Self {
        Self::with_body(Method::POST, path, content_type, body)
    }

    pub fn put(path: impl Into<String>, content_type: &str, body: impl Into<String>) -> Self {
        Self::with_body(Method::PUT, path, content_type, body)
    }

    fn with_body(
        method: Method,
        path: impl Into<String>,
        content_type: &str,
        body: impl Into<String>,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            content_type: Some(content_type.to_string()),
            body: body.into(),
        }
    }
}

/// A parsed `Content-Type` header: `application/json; type=strangeperson`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub media_type: String,
    /// The `type` parameter, naming the resource type of the body.
    pub resource_type: Option<String>,
}

impl ContentType {
    pub fn parse(header: &str) -> Self {
        let mut parts = header.split(';');
        let media_type = parts.next().unwrap_or_default().trim().to_ascii_lowercase();

        let resource_type = parts
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("type"))
            .map(|(_, value)| value.trim().trim_matches('"').to_string())
            .filter(|value| !value.is_empty());

        Self {
            media_type,
            resource_type,
        }
    }

    pub fn is_json(&self) -> bool {
        self.media_type == "application/json"
    }
}
