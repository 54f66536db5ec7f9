//! # Validator
//!
//! Checks a submitted JSON payload against a [`TypeSchema`] and returns the
//! normalized field mapping that gets stored.
//!
//! Rules, in the order they are applied to each object:
//!
//! 1. **Presence**: every required field must be present and non-null
//!    ([`ValidationError::MissingField`]). All required fields are checked before
//!    any value is inspected.
//! 2. **Shape**: each supplied value must match its [`FieldKind`]. Dict fields
//!    report [`ValidationError::EmptyMapping`] and [`ValidationError::NotAMapping`];
//!    everything else reports [`ValidationError::TypeMismatch`]. Embedded documents
//!    go through both steps again with their own schema.
//!
//! Fields the schema does not declare are dropped. The output holds every declared
//! field in schema order, absent optional fields as `null`.

pub mod error;

pub use error::ValidationError;

use crate::schema::{FieldKind, SchemaRegistry, TypeSchema};
use serde_json::{Map, Value};

/// Normalized field values of a document, keyed by field name.
pub type Fields = Map<String, Value>;

/// Stateless checker bound to the registry that resolves embedded types.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    pub fn validate(&self, schema: &TypeSchema, payload: &Value) -> Result<Fields, ValidationError> {
        let object = payload.as_object().ok_or(ValidationError::NotAnObject)?;
        self.validate_object(schema, object, "")
    }

    fn validate_object(
        &self,
        schema: &TypeSchema,
        object: &Map<String, Value>,
        prefix: &str,
    ) -> Result<Fields, ValidationError> {
        for spec in schema.required_fields() {
            if is_absent(object.get(&spec.name)) {
                return Err(ValidationError::MissingField {
                    field: join(prefix, &spec.name),
                });
            }
        }

        let mut fields = Fields::new();
        for spec in schema.fields() {
            let value = match object.get(&spec.name) {
                Some(value) if !value.is_null() => {
                    self.check(&spec.kind, value, &join(prefix, &spec.name))?
                }
                _ => Value::Null,
            };
            fields.insert(spec.name.clone(), value);
        }
        Ok(fields)
    }

    fn check(&self, kind: &FieldKind, value: &Value, path: &str) -> Result<Value, ValidationError> {
        let mismatch = || ValidationError::TypeMismatch {
            field: path.to_string(),
            label: kind.label(),
            accepts: kind.accepts(),
        };

        match kind {
            FieldKind::String | FieldKind::Reference(_) => {
                if value.is_string() {
                    Ok(value.clone())
                } else {
                    Err(mismatch())
                }
            }
            FieldKind::Integer => {
                if value.is_i64() || value.is_u64() {
                    Ok(value.clone())
                } else {
                    Err(mismatch())
                }
            }
            FieldKind::List(item) => {
                let items = value.as_array().ok_or_else(mismatch)?;
                items
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| self.check(item, entry, &format!("{path}.{index}")))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            FieldKind::Dict => match value.as_object() {
                Some(map) if map.is_empty() => Err(ValidationError::EmptyMapping {
                    field: path.to_string(),
                }),
                Some(_) => Ok(value.clone()),
                None => Err(ValidationError::NotAMapping {
                    field: path.to_string(),
                }),
            },
            FieldKind::Embedded(resource_type) => {
                let schema = self.registry.schema(resource_type).ok_or_else(|| {
                    ValidationError::UnknownEmbeddedType {
                        field: path.to_string(),
                        resource_type: resource_type.clone(),
                    }
                })?;
                let object = value.as_object().ok_or_else(mismatch)?;
                self.validate_object(schema, object, path).map(Value::Object)
            }
        }
    }
}

fn is_absent(value: Option<&Value>) -> bool {
    value.map_or(true, Value::is_null)
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
