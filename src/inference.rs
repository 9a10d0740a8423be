//! Schema inference: walk one JSON document, deduce a [`TypeTag`] for every
//! value and merge every object into a named class of a [`SchemaRegistry`].
//!
//! Deduction and merging are mutually recursive: deducing the type of a
//! non-empty object merges its fields into the class named after its key,
//! which deduces the types of those fields, and so on. The walk is
//! depth-first, synchronous and total over well-formed JSON.
pub mod arr;
pub mod num;
pub mod obj;
pub mod str;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::ir::TypeTag;
use crate::registry::SchemaRegistry;

pub use arr::deduce_list;
pub use obj::merge_object_into_class;

// ------------------------------ Deduce ------------------------------------ //

/// Type of one JSON value observed under `key`.
///
/// Scalars depend on the value only. `key` names the class generated for a
/// non-empty object (and is passed unchanged to array elements).
pub fn deduce_type(registry: &mut SchemaRegistry, key: &str, value: &Value) -> TypeTag {
    match value {
        Value::Null => TypeTag::Dynamic,
        Value::Bool(_) => TypeTag::Bool,
        Value::Number(n) => num::classify(n),
        Value::String(s) if str::looks_like_date_time(s) => TypeTag::DateTime,
        Value::String(_) => TypeTag::String,
        Value::Array(items) => deduce_list(registry, key, items),
        // no placeholder classes for `{}`
        Value::Object(map) if map.is_empty() => TypeTag::Map,
        Value::Object(map) => {
            let class_name = str::pascal(key);
            merge_object_into_class(registry, &class_name, map);
            TypeTag::Class(class_name)
        }
    }
}

// ------------------------------- Result ----------------------------------- //

/// A finished run: the populated registry plus what the emitters need to
/// know about the root.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub root: String,
    pub root_is_array: bool,
    pub classes: SchemaRegistry,
}

impl Generation {
    pub fn registry(&self) -> &SchemaRegistry {
        &self.classes
    }
}

// ------------------------------ Front API --------------------------------- //

/// One generation run. Each run owns its registry; start a new `Inference`
/// per document.
#[derive(Debug, Default)]
pub struct Inference {
    registry: SchemaRegistry,
}

impl Inference {
    pub fn new() -> Self {
        Self { registry: SchemaRegistry::new() }
    }

    /// Walk `document` with `root` as the root class name.
    ///
    /// An object becomes the root class. For an array only the first element
    /// is sampled; an empty array gives a root class with no fields. Anything
    /// else (scalars, arrays of non-objects) also gives an empty root class.
    pub fn observe_document(mut self, document: &Value, root: &str) -> Generation {
        let (sample, root_is_array) = match document {
            Value::Array(items) => (items.first(), true),
            other => (Some(other), false),
        };

        match sample {
            Some(Value::Object(map)) => merge_object_into_class(&mut self.registry, root, map),
            Some(other) => {
                warn!(root, sample = %kind_of(other), "root sample is not an object; emitting an empty root class");
                self.registry.ensure_class(root);
            }
            None => {
                self.registry.ensure_class(root);
            }
        }

        debug!(root, root_is_array, classes = self.registry.len(), "inference complete");
        Generation { root: root.to_string(), root_is_array, classes: self.registry }
    }
}

/// Convenience: fresh run over one document.
pub fn infer_document(document: &Value, root: &str) -> Generation {
    Inference::new().observe_document(document, root)
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn deduce(v: Value) -> TypeTag {
        deduce_type(&mut SchemaRegistry::new(), "value", &v)
    }

    #[test_case(json!(null), TypeTag::Dynamic ; "null")]
    #[test_case(json!(3), TypeTag::Int ; "integer")]
    #[test_case(json!(3.25), TypeTag::Double ; "float")]
    #[test_case(json!(false), TypeTag::Bool ; "boolean")]
    #[test_case(json!("hello"), TypeTag::String ; "text")]
    #[test_case(json!("2023-06-01T08:15:00.000Z"), TypeTag::DateTime ; "date time")]
    fn scalars(v: Value, expected: TypeTag) {
        assert_eq!(deduce(v), expected);
    }

    #[test]
    fn date_time_detection_ignores_the_key() {
        let v = json!("2023-06-01T08:15:00Z");
        for key in ["createdAt", "name", "x"] {
            assert_eq!(deduce_type(&mut SchemaRegistry::new(), key, &v), TypeTag::DateTime);
        }
    }

    #[test]
    fn scalars_register_nothing() {
        let mut registry = SchemaRegistry::new();
        for v in [json!(1), json!("a"), json!(null), json!(true), json!([1, 2])] {
            deduce_type(&mut registry, "value", &v);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn empty_object_is_a_map_not_a_class() {
        let g = infer_document(&json!({"x": {}}), "Root");
        assert_eq!(g.classes.get("Root").unwrap().field("x").unwrap().ty, TypeTag::Map);
        assert!(!g.classes.contains("X"));
        assert_eq!(g.classes.len(), 1);
    }

    #[test]
    fn nested_object_becomes_its_own_class() {
        let g = infer_document(&json!({"rating": {"rate": 3.9, "count": 120}}), "Product");
        let names: Vec<_> = g.classes.classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Product", "Rating"]);

        let product = g.classes.get("Product").unwrap();
        assert_eq!(product.fields.len(), 1);
        assert_eq!(product.fields[0].ty, TypeTag::Class("Rating".into()));

        let rating = g.classes.get("Rating").unwrap();
        assert_eq!(rating.field("rate").unwrap().ty, TypeTag::Double);
        assert_eq!(rating.field("count").unwrap().ty, TypeTag::Int);
    }

    #[test]
    fn root_array_samples_the_first_element_only() {
        let g = infer_document(&json!([{"id": 1}, {"id": 2, "name": "b"}]), "Product");
        assert!(g.root_is_array);
        let product = g.classes.get("Product").unwrap();
        assert_eq!(product.fields.len(), 1);
        assert_eq!(product.field("id").unwrap().ty, TypeTag::Int);
    }

    #[test]
    fn empty_root_array_gives_an_empty_class() {
        let g = infer_document(&json!([]), "Product");
        assert!(g.root_is_array);
        assert!(g.classes.get("Product").unwrap().fields.is_empty());
    }

    #[test]
    fn scalar_root_gives_an_empty_class() {
        let g = infer_document(&json!(42), "Answer");
        assert!(!g.root_is_array);
        assert!(g.classes.get("Answer").unwrap().fields.is_empty());
    }

    #[test]
    fn list_of_objects_is_named_after_the_field() {
        let g = infer_document(
            &json!({"line_items": [{"sku": "a", "qty": 1}, {"sku": "b", "qty": 2.5}]}),
            "Order",
        );
        let order = g.classes.get("Order").unwrap();
        assert_eq!(
            order.field("lineItems").unwrap().ty,
            TypeTag::list_of(TypeTag::Class("LineItems".into()))
        );
        assert_eq!(g.classes.get("LineItems").unwrap().field("qty").unwrap().ty, TypeTag::Double);
    }

    #[test]
    fn same_class_name_at_different_depths_is_unified() {
        let g = infer_document(
            &json!({
                "owner": {"name": "a"},
                "repo": {"owner": {"name": "b", "id": 7}}
            }),
            "Event",
        );
        let owner = g.classes.get("Owner").unwrap();
        let names: Vec<_> = owner.fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["name", "id"]);
    }

    #[test]
    fn separate_runs_do_not_share_classes() {
        let first = infer_document(&json!({"a": {"x": 1}}), "Root");
        let second = infer_document(&json!({"b": 1}), "Root");
        assert!(first.classes.contains("A"));
        assert!(!second.classes.contains("A"));
        assert_eq!(second.classes.len(), 1);
    }

    #[test]
    fn generation_serializes_for_the_schema_view() {
        let g = infer_document(&json!({"_id": 1, "tags": ["x"]}), "Item");
        let v = serde_json::to_value(&g).unwrap();
        assert_eq!(v["root"], "Item");
        assert_eq!(v["rootIsArray"], false);
        assert_eq!(v["classes"]["Item"]["fields"][0]["sourceKey"], "_id");
        assert_eq!(v["classes"]["Item"]["fields"][0]["fieldName"], "id");
        assert_eq!(v["classes"]["Item"]["fields"][1]["type"], "list<string>");
    }
}
