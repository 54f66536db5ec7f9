//! # Resource API
//!
//! [`ResourceApi::handle`] turns an [`ApiRequest`] into an [`ApiResponse`]. It
//! routes by path to the endpoint's [`DocumentClient`] and speaks the HTTP
//! contract of the resource layer:
//!
//! | Request | Success | Failure |
//! |---|---|---|
//! | `POST {prefix}{endpoint}/` | 201 + `Location` | 400 |
//! | `GET {prefix}{endpoint}/` | 200 `{"objects": [...]}` | |
//! | `GET {prefix}{endpoint}/{id}/` | 200 | 404 |
//! | `PUT {prefix}{endpoint}/{id}/` same type | 204 | 400, 404 |
//! | `PUT {prefix}{endpoint}/{id}/` new type | 201 + `Location` = same URI | 400, 404 |
//! | `DELETE {prefix}{endpoint}/{id}/` | 204 | 404 |
//!
//! Writes are resolved and validated here first, so reference fields can be
//! checked against other endpoints. The endpoint actor then repeats resolution
//! and validation against the stored state and applies the write atomically.

pub mod error;
pub mod references;
pub mod request;
pub mod response;
pub mod uri;

pub use error::ApiError;
pub use http::{Method, StatusCode};
pub use request::{ApiRequest, ContentType};
pub use response::ApiResponse;
pub use uri::ResourcePath;

use crate::clients::DocumentClient;
use crate::config::ApiConfig;
use crate::document::{Document, DocumentError, DocumentId, DocumentWrite};
use crate::resolver::{Resolution, TypeResolver, DISCRIMINATOR};
use crate::schema::{Endpoint, SchemaRegistry};
use crate::validator::Validator;
use references::ReferenceSite;
use resource_actor::ActorClient;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Key of the URI entry in every serialized resource.
pub const RESOURCE_URI: &str = "resource_uri";

pub struct ResourceApi {
    config: ApiConfig,
    registry: Arc<SchemaRegistry>,
    clients: HashMap<String, DocumentClient>,
}

impl ResourceApi {
    pub fn new(
        config: ApiConfig,
        registry: Arc<SchemaRegistry>,
        clients: HashMap<String, DocumentClient>,
    ) -> Self {
        Self {
            config,
            registry,
            clients,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn resource_uri(&self, endpoint: &str, id: DocumentId) -> String {
        uri::resource_uri(&self.config.api_prefix, endpoint, id)
    }

    pub fn collection_uri(&self, endpoint: &str) -> String {
        uri::collection_uri(&self.config.api_prefix, endpoint)
    }

    /// Handles one request. Every failure is rendered as an error response.
    pub async fn handle(&self, request: ApiRequest) -> ApiResponse {
        info!(method = %request.method, path = %request.path, "Request");
        match self.dispatch(&request).await {
            Ok(response) => {
                debug!(status = response.status_code(), "Response");
                response
            }
            Err(e) => {
                warn!(method = %request.method, path = %request.path, status = e.status().as_u16(), error = %e, "Request failed");
                e.into_response()
            }
        }
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = ResourcePath::parse(&self.config.api_prefix, &request.path)
            .ok_or_else(|| ApiError::NotFound(format!("No resource at '{}'", request.path)))?;
        let (endpoint, client) = self.route(path.endpoint())?;

        let method = &request.method;
        match path {
            ResourcePath::Collection { .. } if method == Method::GET => self.list(endpoint, client).await,
            ResourcePath::Collection { .. } if method == Method::POST => {
                self.create(endpoint, client, request).await
            }
            ResourcePath::Detail { id, .. } if method == Method::GET => self.read(endpoint, client, id).await,
            ResourcePath::Detail { id, .. } if method == Method::PUT => {
                self.replace(endpoint, client, id, request).await
            }
            ResourcePath::Detail { id, .. } if method == Method::DELETE => {
                client.delete(id).await?;
                info!(endpoint = %endpoint.name, %id, "Deleted");
                Ok(ApiResponse::no_content())
            }
            _ => Err(ApiError::MethodNotAllowed {
                method: method.clone(),
                path: request.path.clone(),
            }),
        }
    }

    fn route(&self, name: &str) -> Result<(&Endpoint, &DocumentClient), ApiError> {
        let not_found = || ApiError::NotFound(format!("Unknown endpoint '{name}'"));
        let endpoint = self.registry.endpoint(name).ok_or_else(not_found)?;
        let client = self.clients.get(name).ok_or_else(not_found)?;
        Ok((endpoint, client))
    }

    async fn list(&self, endpoint: &Endpoint, client: &DocumentClient) -> Result<ApiResponse, ApiError> {
        let documents = client.list().await?;
        let mut objects = Vec::with_capacity(documents.len());
        for document in &documents {
            objects.push(self.dehydrate(&endpoint.name, document).await?);
        }
        Ok(ApiResponse::ok(json!({ "objects": objects })))
    }

    async fn read(
        &self,
        endpoint: &Endpoint,
        client: &DocumentClient,
        id: DocumentId,
    ) -> Result<ApiResponse, ApiError> {
        let document = fetch(client, id).await?;
        Ok(ApiResponse::ok(self.dehydrate(&endpoint.name, &document).await?))
    }

    async fn create(
        &self,
        endpoint: &Endpoint,
        client: &DocumentClient,
        request: &ApiRequest,
    ) -> Result<ApiResponse, ApiError> {
        let write = parse_write(request)?;
        let resource_type = self.prepare(endpoint, &write, None).await?;

        let id = client
            .create_document(DocumentWrite::typed(resource_type, write.payload))
            .await?;
        let location = self.resource_uri(&endpoint.name, id);
        info!(endpoint = %endpoint.name, %id, %location, "Created");
        Ok(ApiResponse::created(location))
    }

    async fn replace(
        &self,
        endpoint: &Endpoint,
        client: &DocumentClient,
        id: DocumentId,
        request: &ApiRequest,
    ) -> Result<ApiResponse, ApiError> {
        let write = parse_write(request)?;
        let stored = fetch(client, id).await?;
        let resource_type = self
            .prepare(endpoint, &write, Some(&stored.resource_type))
            .await?;

        let updated = client
            .replace_document(id, DocumentWrite::typed(resource_type, write.payload))
            .await?;
        if updated.is_replaced() {
            let location = self.resource_uri(&endpoint.name, id);
            info!(endpoint = %endpoint.name, %id, %location, "Recreated with new type");
            Ok(ApiResponse::created(location))
        } else {
            Ok(ApiResponse::no_content())
        }
    }

    /// Resolves and validates a write, then checks its references. Returns the
    /// resolved type, which is sent on to the actor as the declared type.
    async fn prepare(
        &self,
        endpoint: &Endpoint,
        write: &DocumentWrite,
        existing: Option<&str>,
    ) -> Result<String, ApiError> {
        let Resolution { schema, .. } = TypeResolver::new(&self.registry)
            .resolve(endpoint, write.declared_type.as_deref(), &write.payload, existing)
            .map_err(DocumentError::from)?;
        let fields = Validator::new(&self.registry)
            .validate(schema, &write.payload)
            .map_err(DocumentError::from)?;

        for site in references::collect(&self.registry, schema, &fields) {
            if self.lookup(&site).await?.is_none() {
                return Err(ApiError::ReferenceNotFound {
                    field: site.field,
                    uri: site.uri,
                });
            }
        }
        Ok(schema.resource_type().to_string())
    }

    /// The document a reference points at, if it exists and has the right type.
    async fn lookup(&self, site: &ReferenceSite) -> Result<Option<(String, Document)>, ApiError> {
        let Some(ResourcePath::Detail { endpoint, id }) =
            ResourcePath::parse(&self.config.api_prefix, &site.uri)
        else {
            return Ok(None);
        };
        let Some(client) = self.clients.get(endpoint) else {
            return Ok(None);
        };
        let found = client
            .get(id)
            .await?
            .filter(|document| self.registry.is_a(&document.resource_type, &site.target));
        Ok(found.map(|document| (endpoint.to_string(), document)))
    }

    /// Serializes a document with its references expanded one level deep.
    ///
    /// Each reference URI is replaced by the serialized target, whose own
    /// references stay URIs, or by `null` if the target is gone.
    async fn dehydrate(&self, endpoint: &str, document: &Document) -> Result<Value, ApiError> {
        let schema = self.registry.schema(&document.resource_type).ok_or_else(|| {
            ApiError::Internal(format!("Stored document has unknown type '{}'", document.resource_type))
        })?;

        let mut resolved = HashMap::new();
        for site in references::collect(&self.registry, schema, &document.fields) {
            if resolved.contains_key(&site.uri) {
                continue;
            }
            if let Some((target_endpoint, target)) = self.lookup(&site).await? {
                let value = self.serialize(&target_endpoint, &target, target.fields.clone());
                resolved.insert(site.uri, value);
            }
        }
        let fields = references::expand(&self.registry, schema, &document.fields, &resolved);
        Ok(self.serialize(endpoint, document, fields))
    }

    /// `fields` plus the document's `resource_type` and `resource_uri`.
    fn serialize(&self, endpoint: &str, document: &Document, mut fields: Map<String, Value>) -> Value {
        fields.insert(DISCRIMINATOR.to_string(), json!(document.resource_type));
        fields.insert(
            RESOURCE_URI.to_string(),
            json!(self.resource_uri(endpoint, document.id)),
        );
        Value::Object(fields)
    }
}

async fn fetch(client: &DocumentClient, id: DocumentId) -> Result<Document, ApiError> {
    client
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No resource with id {id}")))
}

/// Reads the content type and body of a POST or PUT.
///
/// A missing content type is taken as JSON; an empty body as `{}`.
fn parse_write(request: &ApiRequest) -> Result<DocumentWrite, ApiError> {
    let content_type = match request.content_type.as_deref() {
        Some(header) => ContentType::parse(header),
        None => ContentType::parse("application/json"),
    };
    if !content_type.is_json() {
        return Err(ApiError::UnsupportedMediaType(content_type.media_type));
    }

    let payload = if request.body.trim().is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_str(&request.body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?
    };
    Ok(DocumentWrite {
        declared_type: content_type.resource_type,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::documents::default_registry;
    use resource_actor::mock::MockClient;
    use resource_actor::FrameworkError;

    fn person(id: u32, name: &str) -> Document {
        let fields = json!({"name": name, "optional": null}).as_object().cloned().unwrap();
        Document {
            id: DocumentId(id),
            resource_type: "person".into(),
            fields,
        }
    }

    fn api_with(endpoint: &str, mock: &MockClient<Document>) -> ResourceApi {
        let clients = HashMap::from([(endpoint.to_string(), DocumentClient::new(mock.client()))]);
        ResourceApi::new(ApiConfig::default(), Arc::new(default_registry().unwrap()), clients)
    }

    #[test]
    fn test_parse_write() {
        let write = parse_write(&ApiRequest::post(
            "/api/v1/person/",
            "application/json; type=strangeperson",
            "",
        ))
        .unwrap();
        assert_eq!(write.declared_type.as_deref(), Some("strangeperson"));
        assert_eq!(write.payload, json!({}));

        let err = parse_write(&ApiRequest::post("/api/v1/person/", "application/json", "{nope")).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = parse_write(&ApiRequest::post("/api/v1/person/", "text/plain", "{}")).unwrap_err();
        assert_eq!(err, ApiError::UnsupportedMediaType("text/plain".into()));
    }

    #[tokio::test]
    async fn test_rejected_write_never_reaches_the_actor() {
        let mock = MockClient::<Document>::new();
        let api = api_with("person", &mock);

        let response = api
            .handle(ApiRequest::post("/api/v1/person/", "application/json", r#"{"name": []}"#))
            .await;
        assert_eq!(response.status_code(), 400);
        assert!(response.body_text().contains("only accepts string values"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_sends_resolved_type() {
        let mut mock = MockClient::<Document>::new();
        mock.expect_create().return_ok(DocumentId(5));
        let api = api_with("person", &mock);

        let response = api
            .handle(ApiRequest::post("/api/v1/person/", "application/json", r#"{"name": "P"}"#))
            .await;
        assert_eq!(response.status_code(), 201);
        assert_eq!(response.location.as_deref(), Some("/api/v1/person/5/"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_detail_carries_type_and_uri() {
        let mut mock = MockClient::<Document>::new();
        mock.expect_get(DocumentId(1)).return_ok(Some(person(1, "Person 1")));
        mock.expect_get(DocumentId(2)).return_ok(None);
        let api = api_with("person", &mock);

        let response = api.handle(ApiRequest::get("/api/v1/person/1/")).await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(
            response.json(),
            json!({
                "name": "Person 1",
                "optional": null,
                "resource_type": "person",
                "resource_uri": "/api/v1/person/1/"
            })
        );

        let response = api.handle(ApiRequest::get("/api/v1/person/2/")).await;
        assert_eq!(response.status_code(), 404);
        mock.verify();
    }

    #[tokio::test]
    async fn test_actor_failure_is_internal_error() {
        let mut mock = MockClient::<Document>::new();
        mock.expect_list().return_err(FrameworkError::ActorClosed);
        let api = api_with("person", &mock);

        let response = api.handle(ApiRequest::get("/api/v1/person/")).await;
        assert_eq!(response.status_code(), 500);
        mock.verify();
    }

    #[tokio::test]
    async fn test_routing_errors() {
        let mock = MockClient::<Document>::new();
        let api = api_with("person", &mock);

        let cases = [
            (ApiRequest::get("/api/v1/robot/"), 404),
            (ApiRequest::get("/elsewhere/"), 404),
            // Registered endpoint without a running actor.
            (ApiRequest::get("/api/v1/customer/"), 404),
            (ApiRequest::get("/api/v1/person/01/"), 404),
            (ApiRequest::put("/api/v1/person/", "application/json", "{}"), 405),
            (ApiRequest::delete("/api/v1/person/"), 405),
            (ApiRequest::post("/api/v1/person/1/", "application/json", "{}"), 405),
            (ApiRequest::post("/api/v1/person/", "application/xml", "<a/>"), 415),
        ];
        for (request, status) in cases {
            let path = request.path.clone();
            let response = api.handle(request).await;
            assert_eq!(response.status_code(), status, "{path}");
            assert!(response.json()["error"].is_string());
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_unrouted_method_names_itself() {
        let mock = MockClient::<Document>::new();
        let api = api_with("person", &mock);

        let request = ApiRequest {
            method: Method::PATCH,
            ..ApiRequest::get("/api/v1/person/1/")
        };
        let response = api.handle(request).await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.json()["error"],
            "Method PATCH is not allowed on '/api/v1/person/1/'"
        );
        mock.verify();
    }
}
