//! Operand extraction
//!
//! One level of addressing only: a key into a mapping, an index into a
//! sequence, or a key into the first mapping of a sequence.

use super::types::OperandAddress;
use crate::adk::error::ConditionError;
use serde_json::Value;

/// Resolve one operand. `Ok(None)` is the absent marker.
pub fn extract<'a>(
    value: &'a Value,
    addr: &OperandAddress,
) -> Result<Option<&'a Value>, ConditionError> {
    match value {
        Value::Object(map) => Ok(match &addr.key {
            Some(key) => map.get(key),
            None => Some(value),
        }),
        Value::Array(items) => {
            let indexed = addr
                .index
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| items.get(i));
            if let Some(item) = indexed {
                return Ok(Some(item));
            }

            match &addr.key {
                Some(key) => {
                    let first = items
                        .first()
                        .ok_or_else(|| ConditionError::EmptySequence { key: key.clone() })?;
                    Ok(first.as_object().and_then(|m| m.get(key)))
                }
                None => Ok(None),
            }
        }
        // Scalars ignore addressing
        _ => Ok(Some(value)),
    }
}
