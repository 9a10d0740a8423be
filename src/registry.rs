//! Run-scoped mapping from generated class name to its field list.
//!
//! One registry per generation run: [`crate::inference::Inference`] owns it
//! while the document is walked and hands it out once the walk is complete.
//! Nothing is shared between runs.
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::ir::{ClassSchema, FieldDescriptor};

/// Working copy of a class's fields, keyed by field name.
pub type FieldMap = IndexMap<String, FieldDescriptor>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaRegistry {
    classes: IndexMap<String, ClassSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ClassSchema> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Classes in registration order (enclosing class before the classes
    /// discovered inside it).
    pub fn classes(&self) -> impl Iterator<Item = &ClassSchema> {
        self.classes.values()
    }

    /// Register `name` with no fields unless it already exists.
    pub fn ensure_class(&mut self, name: &str) -> &ClassSchema {
        self.classes.entry(name.to_string()).or_insert_with(|| {
            debug!(class = name, "registered class");
            ClassSchema::new(name)
        })
    }

    /// Deep copy of the current fields of `name`, creating the class if
    /// needed. Mutating the copy never touches the registry.
    pub fn checkout(&mut self, name: &str) -> FieldMap {
        self.ensure_class(name)
            .fields
            .iter()
            .map(|f| (f.field_name.clone(), f.clone()))
            .collect()
    }

    /// Pull into `working` whatever a nested merge committed to `name` while
    /// `working` was checked out. Known fields are widened; fields only the
    /// nested merge saw are appended, so they land before any key the outer
    /// object has not reached yet.
    pub fn refresh(&self, name: &str, working: &mut FieldMap) {
        let Some(schema) = self.classes.get(name) else {
            return;
        };
        for current in &schema.fields {
            match working.get_mut(&current.field_name) {
                Some(field) => field.absorb(current),
                None => {
                    debug!(class = name, field = current.field_name.as_str(), "picked up nested field");
                    working.insert(current.field_name.clone(), current.clone());
                }
            }
        }
    }

    /// Write a working copy back as the field list of `name`, unified with
    /// anything a nested merge into the same class committed meanwhile.
    pub fn commit(&mut self, name: &str, mut working: FieldMap) {
        self.refresh(name, &mut working);
        self.classes
            .entry(name.to_string())
            .or_insert_with(|| ClassSchema::new(name))
            .fields = working.into_values().collect();
    }
}
