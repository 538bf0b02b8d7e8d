// SPDX-License-Identifier: MIT

use crate::adk::block::{Block, BlockOutput};
use crate::adk::error::KineticError;
use crate::kinetic::condition::{evaluate, EvaluationRequest, OperandAddress, Operator};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

pub const CONDITION_BLOCK_ID: Uuid = Uuid::from_u128(0x74346365_854c_4012_ab74_8d1430334c09);
pub const CONDITION_BLOCK_NAME: &str = "condition_test";

// --- Static schema ---

static CONDITION_OUTPUT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "result": {
                "type": ["boolean", "null"],
                "description": "The result of the condition evaluation, null if it could not be evaluated"
            },
            "output": {
                "description": "The output value based on the condition result"
            }
        },
        "required": ["result", "output"]
    })
});

/// Flat input object accepted by the condition block
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConditionInput {
    /// The input object or list for comparison, e.g. {"value": 10} or [{"value": 10}, {"value": 20}]
    pub input_object: Value,
    /// Key for the first value (if input is a mapping or a list of mappings)
    #[serde(default)]
    pub value1_key: Option<String>,
    /// Key for the second value (if input is a mapping or a list of mappings)
    #[serde(default)]
    pub value2_key: Option<String>,
    /// Index for the first value (if input is a list)
    #[serde(default)]
    pub value1_index: Option<i64>,
    /// Index for the second value (if input is a list)
    #[serde(default)]
    pub value2_index: Option<i64>,
    /// Comparison operator
    pub operator: Operator,
    /// Value to output if the condition is true; the first value is used when unset
    #[serde(default)]
    pub yes_value: Option<Value>,
    /// Value to output if the condition is false; the first value is used when unset
    #[serde(default)]
    pub no_value: Option<Value>,
    /// Output the entire input object instead of a derived value
    #[serde(default)]
    pub passthrough: bool,
}

impl From<ConditionInput> for EvaluationRequest {
    fn from(input: ConditionInput) -> Self {
        EvaluationRequest {
            input: input.input_object,
            addr1: OperandAddress {
                key: input.value1_key,
                index: input.value1_index,
            },
            addr2: OperandAddress {
                key: input.value2_key,
                index: input.value2_index,
            },
            operator: input.operator,
            yes_value: input.yes_value,
            no_value: input.no_value,
            passthrough: input.passthrough,
        }
    }
}

/// Conditional branching on a comparison between two values of its input
pub struct ConditionBlock {
    input_schema: Value,
    test_input: Value,
    test_output: Vec<(String, Value)>,
}

impl ConditionBlock {
    pub fn new() -> Result<Self, KineticError> {
        let input_schema = serde_json::to_value(schemars::schema_for!(ConditionInput))?;
        Ok(Self {
            input_schema,
            test_input: json!({
                "input_object": {"value1": 10, "value2": 5},
                "value1_key": "value1",
                "value2_key": "value2",
                "operator": ">",
                "yes_value": "Greater",
                "no_value": "Not greater",
                "passthrough": false
            }),
            test_output: vec![
                ("result".to_string(), json!(true)),
                ("output".to_string(), json!("Greater")),
            ],
        })
    }
}

#[async_trait]
impl Block for ConditionBlock {
    fn id(&self) -> Uuid {
        CONDITION_BLOCK_ID
    }

    fn name(&self) -> &str {
        CONDITION_BLOCK_NAME
    }

    fn description(&self) -> &str {
        "Handles conditional logic based on comparison operators with passthrough functionality"
    }

    fn categories(&self) -> &[&'static str] {
        &["LOGIC"]
    }

    fn input_schema(&self) -> &Value {
        &self.input_schema
    }

    fn output_schema(&self) -> &Value {
        &CONDITION_OUTPUT_SCHEMA
    }

    fn test_input(&self) -> Option<&Value> {
        Some(&self.test_input)
    }

    fn test_output(&self) -> &[(String, Value)] {
        &self.test_output
    }

    async fn execute(&self, input: Value) -> Result<BlockOutput, KineticError> {
        let args: ConditionInput = serde_json::from_value(input)
            .map_err(|e| KineticError::invalid_input(CONDITION_BLOCK_NAME, e.to_string()))?;

        let request = EvaluationRequest::from(args);
        let result = evaluate(&request);
        log::debug!(
            "{} {} -> result={:?}",
            CONDITION_BLOCK_NAME,
            request.operator,
            result.result
        );

        Ok(result.into_channels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> ConditionBlock {
        ConditionBlock::new().unwrap()
    }

    #[tokio::test]
    async fn test_builtin_test_case() {
        let block = block();
        let input = block.test_input().cloned().unwrap();
        let output = block.execute(input).await.unwrap();
        assert_eq!(output, block.test_output());
    }

    #[tokio::test]
    async fn test_list_input_with_indexes() {
        let output = block()
            .execute(json!({
                "input_object": [{"v": 1}, {"v": 2}],
                "value1_index": 0,
                "value2_index": 1,
                "operator": "=="
            }))
            .await
            .unwrap();
        assert_eq!(output[0], ("result".to_string(), json!(false)));
        assert_eq!(output[1], ("output".to_string(), json!({"v": 1})));
    }

    #[tokio::test]
    async fn test_explicit_null_override_is_unset() {
        let output = block()
            .execute(json!({
                "input_object": 4,
                "operator": ">=",
                "yes_value": null
            }))
            .await
            .unwrap();
        assert_eq!(output[0].1, json!(true));
        assert_eq!(output[1].1, json!(4));
    }

    #[tokio::test]
    async fn test_failed_evaluation_emits_nulls() {
        let output = block()
            .execute(json!({
                "input_object": {"a": "x"},
                "value1_key": "a",
                "value2_key": "missing",
                "operator": ">"
            }))
            .await
            .unwrap();
        assert_eq!(output[0], ("result".to_string(), Value::Null));
        assert_eq!(output[1], ("output".to_string(), Value::Null));
    }

    #[tokio::test]
    async fn test_unknown_operator_is_invalid_input() {
        let err = block()
            .execute(json!({"input_object": 1, "operator": "<>"}))
            .await
            .unwrap_err();
        assert!(matches!(err, KineticError::InvalidInput { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid input for block 'condition_test': unknown comparison operator: <>"
        );
    }

    #[tokio::test]
    async fn test_missing_operator_is_invalid_input() {
        let err = block()
            .execute(json!({"input_object": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, KineticError::InvalidInput { .. }));
    }

    #[test]
    fn test_metadata() {
        let block = block();
        assert_eq!(
            block.id().to_string(),
            "74346365-854c-4012-ab74-8d1430334c09"
        );
        assert_eq!(block.categories(), &["LOGIC"]);
        assert!(block.input_schema()["properties"]["operator"].is_object());
        assert!(block.input_schema()["properties"]["passthrough"].is_object());
        assert_eq!(block.output_schema()["required"], json!(["result", "output"]));
    }
}
