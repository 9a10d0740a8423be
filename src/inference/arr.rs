use serde_json::Value;

use super::deduce_type;
use crate::ir::TypeTag;
use crate::registry::SchemaRegistry;

/// `list<T>` where `T` folds every element type left to right with
/// [`TypeTag::merge`]. Folding stops at the first `dynamic`, so later
/// elements are never visited (and never register classes).
pub fn deduce_list(registry: &mut SchemaRegistry, key: &str, items: &[Value]) -> TypeTag {
    let mut candidate: Option<TypeTag> = None;
    for item in items {
        let ty = deduce_type(registry, key, item);
        let merged = match candidate {
            None => ty,
            Some(current) => current.merge(&ty),
        };
        if merged == TypeTag::Dynamic {
            return TypeTag::list_of(TypeTag::Dynamic);
        }
        candidate = Some(merged);
    }
    TypeTag::list_of(candidate.unwrap_or(TypeTag::Dynamic))
}
