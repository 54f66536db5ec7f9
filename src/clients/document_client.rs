//! # Document Client
//!
//! Wraps a `ResourceClient<Document>` and turns framework errors back into
//! [`DocumentError`]s, so callers can tell a rejected payload from a broken actor.
use crate::document::{Document, DocumentError, DocumentId, DocumentWrite};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient, Updated};
use tracing::{debug, instrument};

/// Client for interacting with one endpoint's Document actor.
#[derive(Clone)]
pub struct DocumentClient {
    inner: ResourceClient<Document>,
}

impl DocumentClient {
    pub fn new(inner: ResourceClient<Document>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Document> for DocumentClient {
    type Error = DocumentError;

    fn inner(&self) -> &ResourceClient<Document> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<DocumentError>() {
            Ok(entity_error) => entity_error,
            Err(FrameworkError::NotFound(id)) => DocumentError::NotFound(id),
            Err(other) => DocumentError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl DocumentClient {
    #[instrument(skip(self))]
    pub async fn create_document(&self, write: DocumentWrite) -> Result<DocumentId, DocumentError> {
        debug!("Sending request");
        self.inner.create(write).await.map_err(Self::map_error)
    }

    /// Fully replaces a document. The result says whether it was modified in place
    /// or recreated with a new type.
    #[instrument(skip(self))]
    pub async fn replace_document(
        &self,
        id: DocumentId,
        write: DocumentWrite,
    ) -> Result<Updated<Document>, DocumentError> {
        debug!("Sending request");
        self.inner.update(id, write).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::ValidationError;
    use resource_actor::mock::{create_mock_client, expect_update, MockClient};
    use serde_json::json;

    fn person(id: u32, name: &str) -> Document {
        let mut fields = crate::validator::Fields::new();
        fields.insert("name".into(), json!(name));
        fields.insert("optional".into(), json!(null));
        Document {
            id: DocumentId(id),
            resource_type: "person".into(),
            fields,
        }
    }

    #[tokio::test]
    async fn test_entity_errors_come_back_typed() {
        let mut mock = MockClient::<Document>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(DocumentError::Validation(
                ValidationError::MissingField { field: "name".into() },
            ))));
        let client = DocumentClient::new(mock.client());

        let err = client
            .create_document(DocumentWrite::new(json!({})))
            .await
            .unwrap_err();
        assert!(err.is_rejection());
        assert!(err.to_string().contains("field has no data"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_framework_errors_are_mapped() {
        let mut mock = MockClient::<Document>::new();
        mock.expect_delete(DocumentId(9))
            .return_err(FrameworkError::NotFound("9".into()));
        mock.expect_get(DocumentId(1))
            .return_err(FrameworkError::ActorClosed);
        mock.expect_list().return_ok(vec![person(1, "A"), person(2, "B")]);
        let client = DocumentClient::new(mock.client());

        assert_eq!(
            client.delete(DocumentId(9)).await.unwrap_err(),
            DocumentError::NotFound("9".into())
        );
        assert!(matches!(
            client.get(DocumentId(1)).await,
            Err(DocumentError::ActorCommunicationError(_))
        ));
        assert_eq!(client.list().await.unwrap().len(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn test_replace_forwards_declared_type() {
        let (generic, mut receiver) = create_mock_client::<Document>(10);
        let client = DocumentClient::new(generic);

        let task = tokio::spawn(async move {
            client
                .replace_document(
                    DocumentId(3),
                    DocumentWrite::typed("strangeperson", json!({"name": "A", "strange": "s"})),
                )
                .await
        });

        let (id, write, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, DocumentId(3));
        assert_eq!(write.declared_type.as_deref(), Some("strangeperson"));
        responder.send(Ok(Updated::Replaced(person(3, "A")))).unwrap();

        let updated = task.await.unwrap().unwrap();
        assert!(updated.is_replaced());
    }
}
