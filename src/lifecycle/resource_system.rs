use crate::api::ResourceApi;
use crate::config::ApiConfig;
use crate::document::{self, CollectionContext};
use crate::schema::documents::default_registry;
use crate::schema::{SchemaError, SchemaRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running resource layer: the API and the actor tasks behind it.
pub struct ResourceSystem {
    pub api: ResourceApi,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl ResourceSystem {
    /// Spawns an actor for every endpoint of `registry`.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: ApiConfig, registry: SchemaRegistry) -> Self {
        let registry = Arc::new(registry);
        let mut clients = HashMap::new();
        let mut handles = Vec::new();

        for endpoint in registry.endpoints() {
            let (actor, client) = document::new(config.channel_buffer);
            let context = CollectionContext {
                registry: Arc::clone(&registry),
                endpoint: endpoint.clone(),
            };
            handles.push(tokio::spawn(actor.run(context)));
            clients.insert(endpoint.name.clone(), client);
        }
        info!(endpoints = handles.len(), prefix = %config.api_prefix, "Resource system started");

        Self {
            api: ResourceApi::new(config, registry, clients),
            handles,
        }
    }

    /// Starts the system with the built-in document types.
    pub fn with_defaults(config: ApiConfig) -> Result<Self, SchemaError> {
        Ok(Self::new(config, default_registry()?))
    }

    /// Gracefully shuts down every actor.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Dropping the API drops every client, which closes the actor channels.
        drop(self.api);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiRequest;

    #[tokio::test]
    async fn test_every_endpoint_is_served() {
        let system = ResourceSystem::with_defaults(ApiConfig::default()).unwrap();

        let names: Vec<String> = system
            .api
            .registry()
            .endpoints()
            .iter()
            .map(|endpoint| endpoint.name.clone())
            .collect();
        assert_eq!(names.len(), 6);
        for name in names {
            let uri = system.api.collection_uri(&name);
            let response = system.api.handle(ApiRequest::get(uri)).await;
            assert_eq!(response.status_code(), 200, "{name}");
        }

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let config = ApiConfig {
            api_prefix: "/v2/".into(),
            channel_buffer: 1,
        };
        let system = ResourceSystem::with_defaults(config).unwrap();

        let response = system
            .api
            .handle(ApiRequest::post("/v2/person/", "application/json", r#"{"name": "P"}"#))
            .await;
        assert_eq!(response.location.as_deref(), Some("/v2/person/1/"));
        assert_eq!(
            system.api.handle(ApiRequest::get("/api/v1/person/1/")).await.status_code(),
            404
        );

        system.shutdown().await.unwrap();
    }
}
