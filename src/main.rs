//! Demo: runs a person through its whole lifecycle, including a type change.
//!
//! Takes an optional path to a TOML config file.

use doc_resource::api::{ApiRequest, ApiResponse};
use doc_resource::config::ApiConfig;
use doc_resource::lifecycle::ResourceSystem;
use resource_actor::tracing::setup_tracing;
use tracing::{info, Instrument};

const JSON: &str = "application/json";

fn expect(step: &str, response: &ApiResponse, status: u16) -> Result<(), String> {
    if response.status_code() == status {
        Ok(())
    } else {
        Err(format!(
            "{step}: expected {status}, got {} {}",
            response.status_code(),
            response.body_text()
        ))
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => ApiConfig::load(&path).map_err(|e| e.to_string())?,
        None => ApiConfig::default(),
    };
    info!(prefix = %config.api_prefix, "Starting resource system");

    let system = ResourceSystem::with_defaults(config).map_err(|e| e.to_string())?;
    let api = &system.api;
    let people = api.collection_uri("person");

    let span = tracing::info_span!("person_lifecycle");
    async {
        let created = api
            .handle(ApiRequest::post(&people, JSON, r#"{"name": "Person 1"}"#))
            .await;
        expect("create", &created, 201)?;
        let location = created.location.unwrap_or_default();
        info!(%location, "Person created");

        let read = api.handle(ApiRequest::get(&location)).await;
        expect("read", &read, 200)?;
        info!(body = %read.body_text(), "Person read");

        let rejected = api.handle(ApiRequest::put(&location, JSON, r#"{"name": []}"#)).await;
        expect("invalid update", &rejected, 400)?;
        info!(body = %rejected.body_text(), "Invalid update rejected");

        let updated = api
            .handle(ApiRequest::put(&location, JSON, r#"{"name": "Person 1z"}"#))
            .await;
        expect("update", &updated, 204)?;

        let morphed = api
            .handle(ApiRequest::put(
                &location,
                "application/json; type=strangeperson",
                r#"{"name": "Person 1z", "strange": "Foobar"}"#,
            ))
            .await;
        expect("type change", &morphed, 201)?;
        info!(location = ?morphed.location, "Person recreated as strangeperson");

        let listed = api.handle(ApiRequest::get(&people)).await;
        expect("list", &listed, 200)?;
        info!(body = %listed.body_text(), "Collection");

        expect("delete", &api.handle(ApiRequest::delete(&location)).await, 204)?;
        expect("read after delete", &api.handle(ApiRequest::get(&location)).await, 404)?;
        info!("Person deleted");
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await
}
