//! Field declarations: the kind of value a field holds and whether it is required.

/// The expected kind of a field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    /// An ordered sequence whose items all have the inner kind.
    List(Box<FieldKind>),
    /// A mapping of string keys to values of any kind.
    Dict,
    /// A nested object validated against the named embedded type.
    Embedded(String),
    /// A resource URI pointing at a stored resource of the named type
    /// (or a type derived from it).
    Reference(String),
}

impl FieldKind {
    pub fn list(item: FieldKind) -> Self {
        FieldKind::List(Box::new(item))
    }

    pub fn embedded(resource_type: impl Into<String>) -> Self {
        FieldKind::Embedded(resource_type.into())
    }

    pub fn reference(resource_type: impl Into<String>) -> Self {
        FieldKind::Reference(resource_type.into())
    }

    /// Field class name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::String => "StringField",
            FieldKind::Integer => "IntField",
            FieldKind::List(_) => "ListField",
            FieldKind::Dict => "DictField",
            FieldKind::Embedded(_) => "EmbeddedDocumentField",
            FieldKind::Reference(_) => "ReferenceField",
        }
    }

    /// Human name of the values this kind accepts.
    pub fn accepts(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::List(_) => "list",
            FieldKind::Dict => "dictionary",
            FieldKind::Embedded(_) => "embedded document",
            FieldKind::Reference(_) => "resource URI",
        }
    }
}

/// One declared field of a [`TypeSchema`](super::TypeSchema).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }
}
