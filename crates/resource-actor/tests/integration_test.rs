use async_trait::async_trait;
use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceActor, ResourceClient, Revision};

// --- Test Entity ---

/// A labelled shape. Changing the kind replaces the shape instead of editing it.
#[derive(Clone, Debug, PartialEq)]
struct Shape {
    id: u32,
    kind: String,
    label: String,
    generation: u32,
}

#[derive(Debug)]
struct ShapeWrite {
    kind: String,
    label: String,
}

#[derive(Debug, thiserror::Error)]
enum ShapeError {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("{0}")]
    Other(String),
}

impl From<String> for ShapeError {
    fn from(msg: String) -> Self {
        ShapeError::Other(msg)
    }
}

#[async_trait]
impl ActorEntity for Shape {
    type Id = u32;
    type Create = ShapeWrite;
    type Update = ShapeWrite;
    type Context = ();
    type Error = ShapeError;

    fn from_create_params(id: u32, params: ShapeWrite, _ctx: &()) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(ShapeError::EmptyLabel);
        }
        Ok(Self {
            id,
            kind: params.kind,
            label: params.label,
            generation: 0,
        })
    }

    async fn on_update(
        &mut self,
        update: ShapeWrite,
        _ctx: &Self::Context,
    ) -> Result<Revision<Self>, Self::Error> {
        if update.label.is_empty() {
            return Err(ShapeError::EmptyLabel);
        }
        if update.kind != self.kind {
            return Ok(Revision::Replaced(Self {
                id: self.id,
                kind: update.kind,
                label: update.label,
                generation: self.generation + 1,
            }));
        }
        self.label = update.label;
        Ok(Revision::Modified)
    }
}

struct ShapeClient {
    inner: ResourceClient<Shape>,
}

#[async_trait]
impl ActorClient<Shape> for ShapeClient {
    type Error = ShapeError;

    fn inner(&self) -> &ResourceClient<Shape> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ShapeError::Other(e.to_string())
    }
}

fn write(kind: &str, label: &str) -> ShapeWrite {
    ShapeWrite {
        kind: kind.to_string(),
        label: label.to_string(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Shape>::new(10);
    tokio::spawn(actor.run(()));

    let id: u32 = client.create(write("circle", "a")).await.unwrap();
    assert_eq!(id, 1); // First ID should be 1

    // Same kind: modified in place
    let updated = client.update(id, write("circle", "b")).await.unwrap();
    assert!(!updated.is_replaced());
    assert_eq!(updated.into_inner().label, "b");

    // New kind: replaced under the same id
    let replaced = client.update(id, write("square", "c")).await.unwrap();
    assert!(replaced.is_replaced());
    let shape = client.get(id).await.unwrap().unwrap();
    assert_eq!(shape.kind, "square");
    assert_eq!(shape.generation, 1);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.delete(id).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_failed_update_leaves_entity_untouched() {
    let (actor, client) = ResourceActor::<Shape>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(write("circle", "keep")).await.unwrap();
    let err = client.update(id, write("square", "")).await.unwrap_err();
    assert!(matches!(
        err.downcast_entity::<ShapeError>(),
        Ok(ShapeError::EmptyLabel)
    ));

    let shape = client.get(id).await.unwrap().unwrap();
    assert_eq!(shape.kind, "circle");
    assert_eq!(shape.label, "keep");
}

#[tokio::test]
async fn test_list_keeps_creation_order_across_replacement() {
    let (actor, client) = ResourceActor::<Shape>::new(10);
    tokio::spawn(actor.run(()));
    let shapes = ShapeClient {
        inner: client.clone(),
    };

    let first = client.create(write("circle", "1")).await.unwrap();
    // A rejected create does not consume an id
    assert!(client.create(write("circle", "")).await.is_err());
    let second = client.create(write("circle", "2")).await.unwrap();
    let third = client.create(write("circle", "3")).await.unwrap();
    assert_eq!((first, second, third), (1, 2, 3));

    client.update(first, write("square", "1x")).await.unwrap();
    shapes.delete(second).await.unwrap();

    let listed = shapes.list().await.unwrap();
    let labels: Vec<&str> = listed.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["1x", "3"]);
}

#[tokio::test]
async fn test_update_of_missing_entity_is_not_found() {
    let (actor, client) = ResourceActor::<Shape>::new(10);
    tokio::spawn(actor.run(()));

    let result = client.update(42, write("circle", "x")).await;
    assert!(matches!(result, Err(FrameworkError::NotFound(id)) if id == "42"));
}
