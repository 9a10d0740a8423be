//! Inferred data model. No serde_json::Value here.
//!
//! A [`TypeTag`] is what the deducer assigns to one JSON value; a
//! [`FieldDescriptor`] is one field of one generated class; a [`ClassSchema`]
//! is the ordered field list of a generated class.
use std::fmt;

use indexmap::IndexSet;
use serde::{Serialize, Serializer};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Int,
    Double,
    Bool,
    String,
    DateTime,
    Dynamic,
    /// Untyped string-keyed map (empty JSON objects).
    Map,
    List(Box<TypeTag>),
    /// Reference to another generated class by name.
    Class(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// First JSON key observed for this field.
    pub source_key: String,
    pub field_name: String,
    #[serde(rename = "type")]
    pub ty: TypeTag,
    /// Other keys that normalize to `field_name`, in first-seen order.
    /// Never contains `source_key`.
    pub aliases: IndexSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassSchema {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TypeTag {
    pub fn list_of(item: TypeTag) -> Self {
        TypeTag::List(Box::new(item))
    }

    /// Field widening: identical tags are kept, `int ⊔ double = double`,
    /// everything else collapses to `dynamic`.
    pub fn merge(&self, other: &TypeTag) -> TypeTag {
        if self == other {
            return self.clone();
        }
        match (self, other) {
            (TypeTag::Int, TypeTag::Double) | (TypeTag::Double, TypeTag::Int) => TypeTag::Double,
            _ => TypeTag::Dynamic,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Int => f.write_str("int"),
            TypeTag::Double => f.write_str("double"),
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::String => f.write_str("string"),
            TypeTag::DateTime => f.write_str("dateTime"),
            TypeTag::Dynamic => f.write_str("dynamic"),
            TypeTag::Map => f.write_str("map"),
            TypeTag::List(item) => write!(f, "list<{item}>"),
            TypeTag::Class(name) => f.write_str(name),
        }
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FieldDescriptor {
    pub fn new(source_key: impl Into<String>, field_name: impl Into<String>, ty: TypeTag) -> Self {
        Self {
            source_key: source_key.into(),
            field_name: field_name.into(),
            ty,
            aliases: IndexSet::new(),
        }
    }

    /// Another observation of this field under `key`: record the alias and
    /// widen the type.
    pub fn observe(&mut self, key: &str, ty: &TypeTag) {
        self.add_alias(key);
        self.ty = self.ty.merge(ty);
    }

    /// Fold a second descriptor for the same field into this one.
    pub fn absorb(&mut self, other: &FieldDescriptor) {
        self.add_alias(&other.source_key);
        for alias in &other.aliases {
            self.add_alias(alias);
        }
        self.ty = self.ty.merge(&other.ty);
    }

    /// Every JSON key this field reads from, in lookup order: aliases first,
    /// then the source key.
    pub fn lookup_keys(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.source_key.as_str()))
    }

    fn add_alias(&mut self, key: &str) {
        if key != self.source_key && !self.aliases.contains(key) {
            self.aliases.insert(key.to_string());
        }
    }
}

impl ClassSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fields: Vec::new() }
    }

    pub fn field(&self, field_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.field_name == field_name)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
