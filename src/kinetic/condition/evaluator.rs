//! Condition evaluator

use super::comparator::compare;
use super::extractor::extract;
use super::types::{EvaluationRequest, EvaluationResult};
use crate::adk::error::ConditionError;
use serde_json::Value;

/// Evaluate a request. Never fails: an evaluation that cannot be carried out
/// yields `result: None, output: None`.
pub fn evaluate(request: &EvaluationRequest) -> EvaluationResult {
    match try_evaluate(request) {
        Ok(result) => result,
        Err(e) => {
            log::debug!("Condition could not be evaluated: {}", e);
            EvaluationResult::failed()
        }
    }
}

fn try_evaluate(request: &EvaluationRequest) -> Result<EvaluationResult, ConditionError> {
    let input = &request.input;

    let (value1, value2) = if input.is_array() {
        (extract(input, &request.addr1)?, extract(input, &request.addr2)?)
    } else {
        (
            extract(input, &request.addr1.key_only())?,
            extract(input, &request.addr2.key_only())?,
        )
    };

    let outcome = compare(request.operator, value1, value2)?;

    let output = if request.passthrough {
        input.clone()
    } else {
        let chosen = if outcome {
            &request.yes_value
        } else {
            &request.no_value
        };
        match chosen.as_ref().filter(|v| !v.is_null()) {
            Some(value) => value.clone(),
            None => value1.cloned().unwrap_or(Value::Null),
        }
    };

    Ok(EvaluationResult::success(outcome, output))
}
