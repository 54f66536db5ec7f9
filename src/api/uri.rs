//! Resource URIs: `{api_prefix}{endpoint}/` and `{api_prefix}{endpoint}/{id}/`.

use crate::document::DocumentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourcePath<'a> {
    Collection { endpoint: &'a str },
    Detail { endpoint: &'a str, id: DocumentId },
}

impl<'a> ResourcePath<'a> {
    /// Parses a request path. The trailing slash is optional and a query string
    /// is ignored. Returns `None` for anything outside `prefix` or with an id
    /// that is not written in canonical decimal form.
    pub fn parse(prefix: &str, path: &'a str) -> Option<Self> {
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        let rest = path.strip_prefix(prefix)?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = rest.split('/');
        let endpoint = segments.next().filter(|name| !name.is_empty())?;
        let parsed = match segments.next() {
            None => ResourcePath::Collection { endpoint },
            Some(id) => ResourcePath::Detail {
                endpoint,
                id: parse_id(id)?,
            },
        };
        match segments.next() {
            None => Some(parsed),
            Some(_) => None,
        }
    }

    pub fn endpoint(&self) -> &'a str {
        match self {
            ResourcePath::Collection { endpoint } | ResourcePath::Detail { endpoint, .. } => endpoint,
        }
    }
}

/// `+1` and `01` parse as integers but do not name a resource.
fn parse_id(segment: &str) -> Option<DocumentId> {
    let id: DocumentId = segment.parse().ok()?;
    (id.to_string() == segment).then_some(id)
}

pub fn collection_uri(prefix: &str, endpoint: &str) -> String {
    format!("{prefix}{endpoint}/")
}

pub fn resource_uri(prefix: &str, endpoint: &str, id: DocumentId) -> String {
    format!("{prefix}{endpoint}/{id}/")
}
