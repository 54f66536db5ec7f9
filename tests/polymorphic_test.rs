use doc_resource::api::{ApiRequest, ApiResponse, ResourceApi};
use doc_resource::config::ApiConfig;
use doc_resource::lifecycle::ResourceSystem;
use serde_json::Value;

const PEOPLE: &str = "/api/v1/person/";

fn typed(resource_type: &str) -> String {
    format!("application/json; type={resource_type}")
}

async fn post_as(api: &ResourceApi, resource_type: &str, body: &str) -> ApiResponse {
    api.handle(ApiRequest::post(PEOPLE, &typed(resource_type), body)).await
}

async fn put_as(api: &ResourceApi, uri: &str, resource_type: &str, body: &str) -> ApiResponse {
    api.handle(ApiRequest::put(uri, &typed(resource_type), body)).await
}

async fn get(api: &ResourceApi, uri: &str) -> Value {
    let response = api.handle(ApiRequest::get(uri)).await;
    assert_eq!(response.status_code(), 200, "{}", response.body_text());
    response.json()
}

fn assert_missing_field(response: &ApiResponse) {
    assert_eq!(response.status_code(), 400);
    assert!(response.body_text().contains("field has no data"), "{}", response.body_text());
}

/// Asserts a 201 pointing back at `uri`: the resource was recreated in place.
fn assert_recreated_at(response: &ApiResponse, uri: &str) {
    assert_eq!(response.status_code(), 201, "{}", response.body_text());
    assert_eq!(response.location.as_deref(), Some(uri));
}

#[tokio::test]
async fn test_polymorphic_collection() {
    let system = ResourceSystem::with_defaults(ApiConfig::default()).unwrap();
    let api = &system.api;

    assert_eq!(post_as(api, "person", r#"{"name": "Person 1"}"#).await.status_code(), 201);
    // The extra field is dropped for a plain person.
    assert_eq!(
        post_as(api, "person", r#"{"name": "Person 1z", "strange": "Foobar"}"#)
            .await
            .status_code(),
        201
    );
    assert_eq!(
        post_as(api, "strangeperson", r#"{"name": "Person 2", "strange": "Foobar"}"#)
            .await
            .status_code(),
        201
    );
    assert_missing_field(&post_as(api, "strangeperson", r#"{"strange": "Foobar"}"#).await);
    assert_missing_field(&post_as(api, "strangeperson", r#"{"name": "Person 2"}"#).await);

    let listed = get(api, PEOPLE).await;
    let objects = listed["objects"].as_array().unwrap();
    assert_eq!(objects.len(), 3);
    assert_eq!(objects[0]["name"], "Person 1");
    assert_eq!(objects[0]["resource_type"], "person");
    assert_eq!(objects[1]["name"], "Person 1z");
    assert_eq!(objects[1]["resource_type"], "person");
    assert!(objects[1].get("strange").is_none());
    assert_eq!(objects[2]["name"], "Person 2");
    assert_eq!(objects[2]["strange"], "Foobar");
    assert_eq!(objects[2]["resource_type"], "strangeperson");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_type_changes_keep_the_uri() {
    let system = ResourceSystem::with_defaults(ApiConfig::default()).unwrap();
    let api = &system.api;

    post_as(api, "person", r#"{"name": "Person 1"}"#).await;
    post_as(api, "strangeperson", r#"{"name": "Person 2", "strange": "Foobar"}"#).await;
    let listed = get(api, PEOPLE).await;
    let person1 = listed["objects"][0]["resource_uri"].as_str().unwrap().to_string();
    let person2 = listed["objects"][1]["resource_uri"].as_str().unwrap().to_string();

    let response = put_as(api, &person1, "person", r#"{"name": "Person 1a"}"#).await;
    assert_eq!(response.status_code(), 204);
    assert_eq!(get(api, &person1).await["name"], "Person 1a");

    // type -> subtype: the subtype's required fields apply at once.
    assert_missing_field(&put_as(api, &person1, "strangeperson", r#"{"strange": "something"}"#).await);
    assert_missing_field(&put_as(api, &person1, "strangeperson", r#"{"name": "Person 1a"}"#).await);
    assert_eq!(get(api, &person1).await["resource_type"], "person");

    let response = put_as(
        api,
        &person1,
        "strangeperson",
        r#"{"name": "Person 1a", "strange": "something"}"#,
    )
    .await;
    assert_recreated_at(&response, &person1);
    let body = get(api, &person1).await;
    assert_eq!(body["name"], "Person 1a");
    assert_eq!(body["strange"], "something");
    assert_eq!(body["resource_type"], "strangeperson");

    let response = put_as(
        api,
        &person2,
        "strangeperson",
        r#"{"name": "Person 2a", "strange": "FoobarXXX"}"#,
    )
    .await;
    assert_eq!(response.status_code(), 204);
    let body = get(api, &person2).await;
    assert_eq!(body["name"], "Person 2a");
    assert_eq!(body["strange"], "FoobarXXX");

    // subtype -> type
    let response = put_as(api, &person1, "person", r#"{"name": "Person 1c"}"#).await;
    assert_recreated_at(&response, &person1);
    let body = get(api, &person1).await;
    assert_eq!(body["name"], "Person 1c");
    assert_eq!(body["resource_type"], "person");
    assert!(body.get("strange").is_none());

    // The subtype's field is ignored by the base type.
    let response = put_as(api, &person2, "person", r#"{"name": "Person 2c", "strange": "something"}"#).await;
    assert_recreated_at(&response, &person2);
    let body = get(api, &person2).await;
    assert_eq!(body["name"], "Person 2c");
    assert_eq!(body["resource_type"], "person");

    // Recreated resources keep their place in the collection.
    let listed = get(api, PEOPLE).await;
    assert_eq!(listed["objects"][0]["resource_uri"], person1.as_str());
    assert_eq!(listed["objects"][1]["resource_uri"], person2.as_str());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_discriminator_sources() {
    let system = ResourceSystem::with_defaults(ApiConfig::default()).unwrap();
    let api = &system.api;

    // Body discriminator when the content type names none.
    let response = api
        .handle(ApiRequest::post(
            PEOPLE,
            "application/json",
            r#"{"resource_type": "strangeperson", "name": "B", "strange": "s"}"#,
        ))
        .await;
    assert_eq!(response.status_code(), 201);
    let uri = response.location.unwrap();
    assert_eq!(get(api, &uri).await["resource_type"], "strangeperson");

    // The content type wins over the body.
    let response = api
        .handle(ApiRequest::post(
            PEOPLE,
            &typed("strangeperson"),
            r#"{"resource_type": "person", "name": "C"}"#,
        ))
        .await;
    assert_missing_field(&response);

    // Without either, a PUT keeps the stored type.
    let response = api
        .handle(ApiRequest::put(&uri, "application/json", r#"{"name": "B2"}"#))
        .await;
    assert_missing_field(&response);
    let response = api
        .handle(ApiRequest::put(&uri, "application/json", r#"{"name": "B2", "strange": "t"}"#))
        .await;
    assert_eq!(response.status_code(), 204);
    assert_eq!(get(api, &uri).await["resource_type"], "strangeperson");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_foreign_and_unknown_types_are_rejected() {
    let system = ResourceSystem::with_defaults(ApiConfig::default()).unwrap();
    let api = &system.api;

    let response = post_as(api, "robot", r#"{"name": "R"}"#).await;
    assert_eq!(response.status_code(), 400);
    assert!(response.body_text().contains("Unknown resource type 'robot'"));

    for resource_type in ["customer", "embeddedperson"] {
        let response = post_as(api, resource_type, r#"{"name": "R"}"#).await;
        assert_eq!(response.status_code(), 400);
        assert!(response.body_text().contains("is not served by the 'person' endpoint"));
    }

    let response = api
        .handle(ApiRequest::post(PEOPLE, "application/json", r#"{"resource_type": 7, "name": "R"}"#))
        .await;
    assert_eq!(response.status_code(), 400);
    assert!(response.body_text().contains("only accepts string values"));

    assert_eq!(get(api, PEOPLE).await["objects"].as_array().unwrap().len(), 0);

    system.shutdown().await.unwrap();
}
