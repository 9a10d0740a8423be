use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::{deduce_type, str};
use crate::ir::FieldDescriptor;
use crate::registry::SchemaRegistry;

/// Merge the fields of one JSON object into `class_name`.
///
/// Existing fields keep their order and are widened; keys that normalize to
/// an existing field name are recorded as aliases; new fields are appended in
/// the object's key order. Called once per object instance, so repeated
/// shapes converge over the whole walk.
pub fn merge_object_into_class(registry: &mut SchemaRegistry, class_name: &str, obj: &Map<String, Value>) {
    let mut working = registry.checkout(class_name);
    let known = working.len();

    for (key, value) in obj {
        let field_name = str::field_name(key);
        // may register further classes
        let ty = deduce_type(registry, &field_name, value);
        if value.is_object() || value.is_array() {
            // a nested object may have merged into this same class
            registry.refresh(class_name, &mut working);
        }
        trace!(class = class_name, key = key.as_str(), ty = %ty, "observed field");

        match working.get_mut(&field_name) {
            Some(existing) => existing.observe(key, &ty),
            None => {
                working.insert(field_name.clone(), FieldDescriptor::new(key.as_str(), field_name, ty));
            }
        }
    }

    debug!(
        class = class_name,
        fields = working.len(),
        added = working.len() - known,
        "merged object"
    );
    registry.commit(class_name, working);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeTag;
    use serde_json::json;

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn keys_normalizing_to_one_field_become_aliases() {
        let mut registry = SchemaRegistry::new();
        merge_object_into_class(&mut registry, "User", &object(json!({"_id": 1})));
        merge_object_into_class(&mut registry, "User", &object(json!({"id": 2})));

        let user = registry.get("User").unwrap();
        assert_eq!(user.fields.len(), 1);
        let id = &user.fields[0];
        assert_eq!(id.source_key, "_id");
        assert_eq!(id.field_name, "id");
        assert_eq!(id.aliases.iter().collect::<Vec<_>>(), vec!["id"]);
        assert_eq!(id.ty, TypeTag::Int);
    }

    #[test]
    fn aliases_within_one_object() {
        let mut registry = SchemaRegistry::new();
        merge_object_into_class(
            &mut registry,
            "User",
            &object(json!({"user_name": "a", "userName": "b", "UserName": 3})),
        );
        let field = registry.get("User").unwrap().field("userName").unwrap().clone();
        assert_eq!(field.source_key, "user_name");
        assert_eq!(field.aliases.iter().collect::<Vec<_>>(), vec!["userName", "UserName"]);
        assert_eq!(field.ty, TypeTag::Dynamic);
    }

    #[test]
    fn merging_twice_is_idempotent() {
        let sample = object(json!({
            "_id": 1, "id": 2, "price": 9.5, "tags": ["a"], "meta": {"k": true}
        }));
        let mut registry = SchemaRegistry::new();
        merge_object_into_class(&mut registry, "Product", &sample);
        let once = registry.clone();
        merge_object_into_class(&mut registry, "Product", &sample);
        assert_eq!(registry, once);
    }

    #[test]
    fn prior_fields_keep_order_and_new_ones_append() {
        let mut registry = SchemaRegistry::new();
        merge_object_into_class(&mut registry, "Row", &object(json!({"b": 1, "a": 1})));
        merge_object_into_class(&mut registry, "Row", &object(json!({"c": 1, "a": 2.5, "b": 1})));
        let row = registry.get("Row").unwrap();
        let names: Vec<_> = row.fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(row.field("a").unwrap().ty, TypeTag::Double);
    }

    #[test]
    fn nested_key_named_like_the_enclosing_class() {
        let mut registry = SchemaRegistry::new();
        merge_object_into_class(
            &mut registry,
            "Data",
            &object(json!({"id": 1, "data": {"id": 2.5, "extra": "x"}})),
        );
        let data = registry.get("Data").unwrap();
        let names: Vec<_> = data.fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["id", "extra", "data"]);
        assert_eq!(data.field("id").unwrap().ty, TypeTag::Double);
        assert_eq!(data.field("data").unwrap().ty, TypeTag::Class("Data".into()));
    }

    #[test]
    fn nested_fields_keep_first_seen_order() {
        let mut registry = SchemaRegistry::new();
        merge_object_into_class(
            &mut registry,
            "Data",
            &object(json!({"Id": 1, "data": {"id": 2, "extra": 1}, "z": 1})),
        );
        let data = registry.get("Data").unwrap();
        let names: Vec<_> = data.fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["id", "extra", "data", "z"]);
        let id = data.field("id").unwrap();
        assert_eq!(id.source_key, "Id");
        assert_eq!(id.aliases.iter().collect::<Vec<_>>(), vec!["id"]);
    }
}
