// SPDX-License-Identifier: MIT

//! Request and result types for condition evaluation

use super::operator::Operator;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How to pull one operand out of the input value
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OperandAddress {
    /// Key into a mapping (or into the first mapping of a sequence)
    #[serde(default)]
    pub key: Option<String>,
    /// Position in a sequence
    #[serde(default)]
    pub index: Option<i64>,
}

impl OperandAddress {
    /// Address that selects the whole input
    pub fn whole() -> Self {
        Self::default()
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            index: None,
        }
    }

    pub fn index(index: i64) -> Self {
        Self {
            key: None,
            index: Some(index),
        }
    }

    /// Same address with the index dropped
    pub fn key_only(&self) -> Self {
        Self {
            key: self.key.clone(),
            index: None,
        }
    }
}

/// Everything needed for one evaluation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EvaluationRequest {
    pub input: Value,
    #[serde(default)]
    pub addr1: OperandAddress,
    #[serde(default)]
    pub addr2: OperandAddress,
    pub operator: Operator,
    #[serde(default)]
    pub yes_value: Option<Value>,
    #[serde(default)]
    pub no_value: Option<Value>,
    #[serde(default)]
    pub passthrough: bool,
}

impl EvaluationRequest {
    pub fn new(input: Value, operator: Operator) -> Self {
        Self {
            input,
            addr1: OperandAddress::whole(),
            addr2: OperandAddress::whole(),
            operator,
            yes_value: None,
            no_value: None,
            passthrough: false,
        }
    }

    pub fn with_addresses(mut self, addr1: OperandAddress, addr2: OperandAddress) -> Self {
        self.addr1 = addr1;
        self.addr2 = addr2;
        self
    }

    pub fn with_yes_value(mut self, value: Value) -> Self {
        self.yes_value = Some(value);
        self
    }

    pub fn with_no_value(mut self, value: Value) -> Self {
        self.no_value = Some(value);
        self
    }

    pub fn with_passthrough(mut self, passthrough: bool) -> Self {
        self.passthrough = passthrough;
        self
    }
}

/// Outcome of one evaluation.
///
/// `result == None` means the condition could not be evaluated; `output` is
/// then `None` as well.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EvaluationResult {
    pub result: Option<bool>,
    pub output: Option<Value>,
}

impl EvaluationResult {
    pub fn success(result: bool, output: Value) -> Self {
        Self {
            result: Some(result),
            output: Some(output),
        }
    }

    pub fn failed() -> Self {
        Self {
            result: None,
            output: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.result.is_none()
    }

    /// The two output channels in emission order: `result`, then `output`
    pub fn into_channels(self) -> Vec<(String, Value)> {
        vec![
            (
                "result".to_string(),
                self.result.map(Value::Bool).unwrap_or(Value::Null),
            ),
            ("output".to_string(), self.output.unwrap_or(Value::Null)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults_from_json() {
        let req: EvaluationRequest = serde_json::from_value(json!({
            "input": {"a": 1},
            "addr1": {"key": "a"},
            "operator": "=="
        }))
        .unwrap();
        assert_eq!(req.addr1, OperandAddress::key("a"));
        assert_eq!(req.addr2, OperandAddress::whole());
        assert_eq!(req.yes_value, None);
        assert!(!req.passthrough);
    }

    #[test]
    fn test_key_only_drops_index() {
        let addr = OperandAddress {
            key: Some("v".to_string()),
            index: Some(3),
        };
        assert_eq!(addr.key_only(), OperandAddress::key("v"));
    }

    #[test]
    fn test_channels_order() {
        let channels = EvaluationResult::success(true, json!("Greater")).into_channels();
        assert_eq!(channels[0], ("result".to_string(), json!(true)));
        assert_eq!(channels[1], ("output".to_string(), json!("Greater")));

        let channels = EvaluationResult::failed().into_channels();
        assert_eq!(channels[0].1, Value::Null);
        assert_eq!(channels[1].1, Value::Null);
    }

    #[test]
    fn test_result_serializes_result_first() {
        let text = serde_json::to_string(&EvaluationResult::failed()).unwrap();
        assert_eq!(text, r#"{"result":null,"output":null}"#);
    }
}
