//! Resolution of LIMIT/OFFSET nodes to literal integers.
//!
//! The FairCom engine rejects bound parameters inside `TOP`, `SKIP`,
//! `OFFSET` and `FETCH`, so every pagination node must collapse to a
//! literal before it is emitted.

use crate::ast::{BindParam, ClauseValue, Value};
use crate::error::{FaircomError, FaircomResult};
use crate::transpiler::expr::render_literal;

/// Resolve a LIMIT/OFFSET node to its concrete value.
///
/// Representations are tried in order: plain integer, literal node, wrapped
/// node, bound parameter (the original value, unwrapping a single-element
/// sequence, then the effective value), and finally an arbitrary expression
/// rendered with literal binds. Only that last path degrades to `0` instead of
/// failing.
pub fn extract(value: &ClauseValue) -> FaircomResult<u64> {
    match value {
        ClauseValue::Int(n) => non_negative(*n),
        ClauseValue::Literal(v) => value_to_int(v),
        ClauseValue::Wrapped(inner) => extract(inner),
        ClauseValue::Bound(param) => bound_value(param),
        ClauseValue::Expr(expr) => {
            let rendered = render_literal(expr);
            match rendered.trim().parse::<u64>() {
                Ok(n) => Ok(n),
                Err(_) => {
                    tracing::warn!(
                        rendered = %rendered,
                        "pagination expression did not render to an integer, using 0"
                    );
                    Ok(0)
                }
            }
        }
    }
}

/// Resolve an optional node; `None` stays `None`.
pub fn extract_opt(value: Option<&ClauseValue>) -> FaircomResult<Option<u64>> {
    value.map(extract).transpose()
}

fn bound_value(param: &BindParam) -> FaircomResult<u64> {
    match (value_to_int(&param.value), &param.effective) {
        (Ok(n), _) => Ok(n),
        (Err(_), Some(effective)) => value_to_int(effective)
            .map_err(|e| FaircomError::extraction(format!("parameter '{}': {}", param.key, e))),
        (Err(e), None) => Err(FaircomError::extraction(format!(
            "parameter '{}': {}",
            param.key, e
        ))),
    }
}

/// Convert a bound or literal value to a non-negative integer.
pub fn value_to_int(value: &Value) -> FaircomResult<u64> {
    match value {
        Value::Int(n) => non_negative(*n),
        Value::Float(f) => float_to_int(*f),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| FaircomError::extraction(format!("'{}' is not an integer", s))),
        Value::Array(items) if items.len() == 1 => value_to_int(&items[0]),
        other => Err(FaircomError::extraction(format!(
            "{} is not a non-negative integer",
            other
        ))),
    }
}

fn float_to_int(f: f64) -> FaircomResult<u64> {
    // 2^64 is the first value past u64::MAX
    if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f < 18_446_744_073_709_551_616.0 {
        Ok(f as u64)
    } else {
        Err(FaircomError::extraction(format!(
            "{} is not a non-negative integer",
            f
        )))
    }
}

fn non_negative(n: i64) -> FaircomResult<u64> {
    u64::try_from(n).map_err(|_| FaircomError::extraction(format!("{} is negative", n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr};

    #[test]
    fn test_plain_integer_passthrough() {
        assert_eq!(extract(&ClauseValue::Int(0)).unwrap(), 0);
        assert_eq!(extract(&ClauseValue::Int(5)).unwrap(), 5);
        assert_eq!(extract(&ClauseValue::Int(100)).unwrap(), 100);
    }

    #[test]
    fn test_literal_node() {
        let v = ClauseValue::Literal(Value::Int(25));
        assert_eq!(extract(&v).unwrap(), 25);
    }

    #[test]
    fn test_bound_parameter_original_value() {
        for expected in [0i64, 1, 5, 10, 20, 50, 100, 1000] {
            let v = ClauseValue::Bound(BindParam::new("param_1", expected));
            assert_eq!(extract(&v).unwrap(), expected as u64);
        }
    }

    #[test]
    fn test_original_value_wins_over_effective() {
        let param = BindParam::new("param_1", 3).with_effective(30);
        assert_eq!(extract(&ClauseValue::Bound(param)).unwrap(), 3);
    }

    #[test]
    fn test_effective_value_used_when_original_unresolvable() {
        let param = BindParam::new("param_1", Value::Null).with_effective(30);
        assert_eq!(extract(&ClauseValue::Bound(param)).unwrap(), 30);
        let param = BindParam::new("param_1", Value::Null).with_effective("x");
        assert!(extract(&ClauseValue::Bound(param)).is_err());
    }

    #[test]
    fn test_float_values() {
        assert_eq!(value_to_int(&Value::Float(8.0)).unwrap(), 8);
        for bad in [f64::NAN, f64::INFINITY, 1e20, 2.5, -1.0] {
            assert!(
                matches!(value_to_int(&Value::Float(bad)), Err(FaircomError::Extraction(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_single_element_sequence_unwrapped() {
        let param = BindParam::new("param_1", vec![Value::Int(7)]);
        assert_eq!(extract(&ClauseValue::Bound(param)).unwrap(), 7);
    }

    #[test]
    fn test_wrapped_parameter_object() {
        let v = ClauseValue::wrap(BindParam::new("offset", 10));
        assert_eq!(extract(&v).unwrap(), 10);
    }

    #[test]
    fn test_expression_rendered_with_literal_binds() {
        let v = ClauseValue::Expr(Expr::param("lim", 12));
        assert_eq!(extract(&v).unwrap(), 12);
    }

    #[test]
    fn test_unrenderable_expression_defaults_to_zero() {
        let v = ClauseValue::Expr(Expr::col("page_size").binary(BinaryOp::Mul, Expr::lit(2)));
        assert_eq!(extract(&v).unwrap(), 0);
    }

    #[test]
    fn test_explicit_values_that_fail_raise() {
        assert!(extract(&ClauseValue::Int(-1)).is_err());
        assert!(extract(&ClauseValue::Literal(Value::Null)).is_err());
        let param = BindParam::new("lim", "ten");
        assert!(matches!(
            extract(&ClauseValue::Bound(param)),
            Err(FaircomError::Extraction(_))
        ));
    }

    #[test]
    fn test_extract_opt() {
        assert_eq!(extract_opt(None).unwrap(), None);
        assert_eq!(extract_opt(Some(&ClauseValue::Int(4))).unwrap(), Some(4));
    }
}
