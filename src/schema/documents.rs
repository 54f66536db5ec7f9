//! The document types served out of the box, one endpoint per stored type.

use super::{FieldKind, FieldSpec, SchemaError, SchemaRegistry, TypeSchema};

/// Registry with the built-in document types and endpoints.
///
/// | Endpoint | Types |
/// |---|---|
/// | `person` | `person`, `strangeperson` |
/// | `customer` | `customer` (references a person) |
/// | `embededdocumentfieldtest` | embeds an `embeddedperson` |
/// | `dictfieldtest` | required dictionary |
/// | `listfieldtest` | integer and string lists |
/// | `embeddedlistfieldtest` | list of `embeddedperson` |
pub fn default_registry() -> Result<SchemaRegistry, SchemaError> {
    SchemaRegistry::builder()
        .register(
            TypeSchema::new("person")
                .field(FieldSpec::required("name", FieldKind::String))
                .field(FieldSpec::optional("optional", FieldKind::String)),
        )
        .register(
            TypeSchema::new("strangeperson")
                .extends("person")
                .field(FieldSpec::required("strange", FieldKind::String)),
        )
        .register(
            TypeSchema::new("embeddedperson")
                .embedded()
                .field(FieldSpec::required("name", FieldKind::String))
                .field(FieldSpec::optional("optional", FieldKind::String)),
        )
        .register(
            TypeSchema::new("customer")
                .field(FieldSpec::required("person", FieldKind::reference("person"))),
        )
        .register(
            TypeSchema::new("embededdocumentfieldtest")
                .field(FieldSpec::required("customer", FieldKind::embedded("embeddedperson"))),
        )
        .register(
            TypeSchema::new("dictfieldtest").field(FieldSpec::required("dictionary", FieldKind::Dict)),
        )
        .register(
            TypeSchema::new("listfieldtest")
                .field(FieldSpec::optional("intlist", FieldKind::list(FieldKind::Integer)))
                .field(FieldSpec::optional("stringlist", FieldKind::list(FieldKind::String))),
        )
        .register(
            TypeSchema::new("embeddedlistfieldtest").field(FieldSpec::optional(
                "embeddedlist",
                FieldKind::list(FieldKind::embedded("embeddedperson")),
            )),
        )
        .endpoint("person", "person")
        .endpoint("customer", "customer")
        .endpoint("embededdocumentfieldtest", "embededdocumentfieldtest")
        .endpoint("dictfieldtest", "dictfieldtest")
        .endpoint("listfieldtest", "listfieldtest")
        .endpoint("embeddedlistfieldtest", "embeddedlistfieldtest")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_builds() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.endpoints().len(), 6);
        assert!(registry.schema("embeddedperson").unwrap().is_embedded());
        assert!(registry.endpoint("embeddedperson").is_none());
    }
}
