//! # Schemas
//!
//! A [`TypeSchema`] is the explicit field table for one document type: its
//! discriminator (`resource_type`), its ordered [`FieldSpec`]s and an optional
//! parent. Schemas live in a [`SchemaRegistry`] next to the [`Endpoint`]s that serve
//! them; the registry is the only place a discriminator string is turned into
//! a schema.
//!
//! Derived types inherit their parent's fields, parent fields first:
//!
//! ```rust
//! use doc_resource::schema::{FieldKind, FieldSpec, SchemaRegistry, TypeSchema};
//!
//! let registry = SchemaRegistry::builder()
//!     .register(TypeSchema::new("person").field(FieldSpec::required("name", FieldKind::String)))
//!     .register(
//!         TypeSchema::new("strangeperson")
//!             .extends("person")
//!             .field(FieldSpec::required("strange", FieldKind::String)),
//!     )
//!     .endpoint("person", "person")
//!     .build()
//!     .unwrap();
//!
//! let strange = registry.schema("strangeperson").unwrap();
//! let names: Vec<&str> = strange.fields().iter().map(|f| f.name.as_str()).collect();
//! assert_eq!(names, ["name", "strange"]);
//! assert!(registry.is_a("strangeperson", "person"));
//! ```

pub mod documents;
pub mod error;
pub mod field;

pub use error::SchemaError;
pub use field::{FieldKind, FieldSpec};

use std::collections::HashMap;

/// Field table of one document type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSchema {
    resource_type: String,
    parent: Option<String>,
    fields: Vec<FieldSpec>,
    embedded: bool,
}

impl TypeSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            parent: None,
            fields: Vec::new(),
            embedded: false,
        }
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Marks the type as embedded only: it can be nested inside other
    /// documents but never stored or referenced on its own.
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// All fields, inherited ones first, once the schema is registered.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|spec| spec.required)
    }
}

/// A named collection of stored resources.
///
/// An endpoint accepts its base type and every type derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    pub base_type: String,
}

/// Resolved schemas and endpoints.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    types: HashMap<String, TypeSchema>,
    endpoints: Vec<Endpoint>,
}

impl SchemaRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn schema(&self, resource_type: &str) -> Option<&TypeSchema> {
        self.types.get(resource_type)
    }

    pub fn endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|endpoint| endpoint.name == name)
    }

    /// Endpoints in registration order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// True if `resource_type` is `ancestor` or derives from it.
    pub fn is_a(&self, resource_type: &str, ancestor: &str) -> bool {
        let mut current = self.types.get(resource_type);
        while let Some(schema) = current {
            if schema.resource_type == ancestor {
                return true;
            }
            current = schema.parent().and_then(|parent| self.types.get(parent));
        }
        false
    }

    /// True if documents of `resource_type` may be stored in `endpoint`.
    pub fn serves(&self, endpoint: &Endpoint, resource_type: &str) -> bool {
        self.schema(resource_type)
            .is_some_and(|schema| !schema.is_embedded())
            && self.is_a(resource_type, &endpoint.base_type)
    }
}

/// Collects schemas and endpoints, then checks them as a whole in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: Vec<TypeSchema>,
    endpoints: Vec<Endpoint>,
}

impl RegistryBuilder {
    pub fn register(mut self, schema: TypeSchema) -> Self {
        self.types.push(schema);
        self
    }

    pub fn endpoint(mut self, name: impl Into<String>, base_type: impl Into<String>) -> Self {
        self.endpoints.push(Endpoint {
            name: name.into(),
            base_type: base_type.into(),
        });
        self
    }

    pub fn build(self) -> Result<SchemaRegistry, SchemaError> {
        let mut types: HashMap<String, TypeSchema> = HashMap::new();

        for mut schema in self.types {
            if types.contains_key(&schema.resource_type) {
                return Err(SchemaError::DuplicateType(schema.resource_type));
            }
            let mut fields = match schema.parent() {
                Some(parent) => types
                    .get(parent)
                    .map(|parent| parent.fields.clone())
                    .ok_or_else(|| SchemaError::UnknownParent {
                        child: schema.resource_type.clone(),
                        parent: parent.to_string(),
                    })?,
                None => Vec::new(),
            };
            for spec in std::mem::take(&mut schema.fields) {
                if fields.iter().any(|existing| existing.name == spec.name) {
                    return Err(SchemaError::DuplicateField {
                        resource_type: schema.resource_type,
                        field: spec.name,
                    });
                }
                fields.push(spec);
            }
            schema.fields = fields;
            types.insert(schema.resource_type.clone(), schema);
        }

        for schema in types.values() {
            for spec in &schema.fields {
                check_target(&types, schema, spec, &spec.kind)?;
            }
        }

        let mut endpoints: Vec<Endpoint> = Vec::with_capacity(self.endpoints.len());
        for endpoint in self.endpoints {
            if endpoints.iter().any(|existing| existing.name == endpoint.name) {
                return Err(SchemaError::DuplicateEndpoint(endpoint.name));
            }
            if !types
                .get(&endpoint.base_type)
                .is_some_and(|schema| !schema.is_embedded())
            {
                return Err(SchemaError::InvalidEndpoint {
                    endpoint: endpoint.name,
                    base_type: endpoint.base_type,
                });
            }
            endpoints.push(endpoint);
        }

        Ok(SchemaRegistry { types, endpoints })
    }
}

fn check_target(
    types: &HashMap<String, TypeSchema>,
    schema: &TypeSchema,
    spec: &FieldSpec,
    kind: &FieldKind,
) -> Result<(), SchemaError> {
    let (target, wants_embedded) = match kind {
        FieldKind::List(item) => return check_target(types, schema, spec, item),
        FieldKind::Embedded(target) => (target, true),
        FieldKind::Reference(target) => (target, false),
        FieldKind::String | FieldKind::Integer | FieldKind::Dict => return Ok(()),
    };
    let Some(found) = types.get(target) else {
        return Err(SchemaError::UnknownTarget {
            resource_type: schema.resource_type.clone(),
            field: spec.name.clone(),
            target: target.clone(),
        });
    };
    match (wants_embedded, found.is_embedded()) {
        (true, false) => Err(SchemaError::NotEmbeddable {
            resource_type: schema.resource_type.clone(),
            field: spec.name.clone(),
            target: target.clone(),
        }),
        (false, true) => Err(SchemaError::NotReferenceable {
            resource_type: schema.resource_type.clone(),
            field: spec.name.clone(),
            target: target.clone(),
        }),
        _ => Ok(()),
    }
}
