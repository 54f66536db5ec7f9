//! Reference fields: finding them in normalized fields and expanding them on read.
//!
//! References are walked through lists and embedded documents, so a reference
//! nested at `embedded.items.2.owner` is found like a top-level one.

use crate::schema::{FieldKind, SchemaRegistry, TypeSchema};
use crate::validator::Fields;
use serde_json::Value;
use std::collections::HashMap;

/// One reference value inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSite {
    /// Dotted path of the field holding the URI.
    pub field: String,
    pub uri: String,
    /// The type the referenced resource must be (or derive from).
    pub target: String,
}

pub fn collect(registry: &SchemaRegistry, schema: &TypeSchema, fields: &Fields) -> Vec<ReferenceSite> {
    let mut sites = Vec::new();
    collect_object(registry, schema, fields, "", &mut sites);
    sites
}

fn collect_object(
    registry: &SchemaRegistry,
    schema: &TypeSchema,
    fields: &Fields,
    prefix: &str,
    sites: &mut Vec<ReferenceSite>,
) {
    for spec in schema.fields() {
        if let Some(value) = fields.get(&spec.name) {
            collect_value(registry, &spec.kind, value, &join(prefix, &spec.name), sites);
        }
    }
}

fn collect_value(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    value: &Value,
    path: &str,
    sites: &mut Vec<ReferenceSite>,
) {
    match (kind, value) {
        (FieldKind::Reference(target), Value::String(uri)) => sites.push(ReferenceSite {
            field: path.to_string(),
            uri: uri.clone(),
            target: target.clone(),
        }),
        (FieldKind::List(item), Value::Array(items)) => {
            for (index, value) in items.iter().enumerate() {
                collect_value(registry, item, value, &join(path, &index.to_string()), sites);
            }
        }
        (FieldKind::Embedded(resource_type), Value::Object(object)) => {
            if let Some(schema) = registry.schema(resource_type) {
                collect_object(registry, schema, object, path, sites);
            }
        }
        _ => {}
    }
}

/// Replaces every reference URI with its entry in `resolved`.
///
/// URIs missing from `resolved` become `null`.
pub fn expand(
    registry: &SchemaRegistry,
    schema: &TypeSchema,
    fields: &Fields,
    resolved: &HashMap<String, Value>,
) -> Fields {
    fields
        .iter()
        .map(|(name, value)| {
            let expanded = match schema.fields().iter().find(|spec| &spec.name == name) {
                Some(spec) => expand_value(registry, &spec.kind, value, resolved),
                None => value.clone(),
            };
            (name.clone(), expanded)
        })
        .collect()
}

fn expand_value(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    value: &Value,
    resolved: &HashMap<String, Value>,
) -> Value {
    match (kind, value) {
        (FieldKind::Reference(_), Value::String(uri)) => resolved.get(uri).cloned().unwrap_or(Value::Null),
        (FieldKind::List(item), Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|value| expand_value(registry, item, value, resolved))
                .collect(),
        ),
        (FieldKind::Embedded(resource_type), Value::Object(object)) => match registry.schema(resource_type) {
            Some(schema) => Value::Object(expand(registry, schema, object, resolved)),
            None => value.clone(),
        },
        _ => value.clone(),
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
