//! Comparator dispatch
//!
//! Equality is defined for every pair of operands. Ordering is defined for
//! number/number and string/string only.

use super::operator::Operator;
use crate::adk::error::ConditionError;
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Apply `op` to two operands. `None` is the absent marker and behaves like null.
pub fn compare(op: Operator, a: Option<&Value>, b: Option<&Value>) -> Result<bool, ConditionError> {
    match op {
        Operator::Equal => Ok(operands_equal(a, b)),
        Operator::NotEqual => Ok(!operands_equal(a, b)),
        Operator::GreaterThan => ordering(op, a, b).map(Ordering::is_gt),
        Operator::LessThan => ordering(op, a, b).map(Ordering::is_lt),
        Operator::GreaterThanOrEqual => ordering(op, a, b).map(Ordering::is_ge),
        Operator::LessThanOrEqual => ordering(op, a, b).map(Ordering::is_le),
    }
}

static NULL: Value = Value::Null;

fn operands_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    values_equal(a.unwrap_or(&NULL), b.unwrap_or(&NULL))
}

/// Structural equality with numbers compared by value (`1 == 1.0`)
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => number_ordering(x, y) == Some(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => false,
    }
}

fn ordering(op: Operator, a: Option<&Value>, b: Option<&Value>) -> Result<Ordering, ConditionError> {
    let incomparable = || ConditionError::Incomparable {
        operator: op.symbol().to_string(),
        left: type_name(a),
        right: type_name(b),
    };

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            number_ordering(x, y).ok_or_else(incomparable)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => Ok(x.cmp(y)),
        _ => Err(incomparable()),
    }
}

fn number_ordering(x: &Number, y: &Number) -> Option<Ordering> {
    // Integers compare exactly, anything involving a float goes through f64
    match (as_integer(x), as_integer(y)) {
        (Some(i), Some(j)) => Some(i.cmp(&j)),
        _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Type label used in error messages
pub fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "absent",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "sequence",
        Some(Value::Object(_)) => "mapping",
    }
}
