use serde_json::Number;

use crate::ir::TypeTag;

/// `int` when the value has no fractional part, `double` otherwise.
///
/// `2.0` counts as an integer, and so does any finite float without a
/// fractional part.
pub fn classify(n: &Number) -> TypeTag {
    if n.is_i64() || n.is_u64() {
        return TypeTag::Int;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => TypeTag::Int,
        _ => TypeTag::Double,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn number(v: serde_json::Value) -> Number {
        match v {
            serde_json::Value::Number(n) => n,
            other => panic!("not a number: {other}"),
        }
    }

    #[test]
    fn integers() {
        assert_eq!(classify(&number(json!(0))), TypeTag::Int);
        assert_eq!(classify(&number(json!(-42))), TypeTag::Int);
        assert_eq!(classify(&number(json!(u64::MAX))), TypeTag::Int);
        assert_eq!(classify(&number(json!(2.0))), TypeTag::Int);
    }

    #[test]
    fn fractions() {
        assert_eq!(classify(&number(json!(2.5))), TypeTag::Double);
        assert_eq!(classify(&number(json!(-0.001))), TypeTag::Double);
    }
}
