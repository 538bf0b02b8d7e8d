// SPDX-License-Identifier: MIT

//! Comparison operators

use crate::adk::error::ConditionError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The six supported comparison operators.
///
/// Serialized as their symbol (`"=="`, `">"`, ...). Deserialization goes
/// through `FromStr`, so unknown labels report `UnknownOperator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String")]
pub enum Operator {
    /// ==
    #[serde(rename = "==")]
    Equal,
    /// !=
    #[serde(rename = "!=")]
    NotEqual,
    /// >
    #[serde(rename = ">")]
    GreaterThan,
    /// <
    #[serde(rename = "<")]
    LessThan,
    /// >=
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    /// <=
    #[serde(rename = "<=")]
    LessThanOrEqual,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThanOrEqual,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThanOrEqual => "<=",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| ConditionError::UnknownOperator(s.to_string()))
    }
}

impl TryFrom<String> for Operator {
    type Error = ConditionError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_display() {
        assert_eq!(format!("{}", Operator::Equal), "==");
        assert_eq!(format!("{}", Operator::NotEqual), "!=");
        assert_eq!(format!("{}", Operator::GreaterThan), ">");
        assert_eq!(format!("{}", Operator::LessThan), "<");
        assert_eq!(format!("{}", Operator::GreaterThanOrEqual), ">=");
        assert_eq!(format!("{}", Operator::LessThanOrEqual), "<=");
    }

    #[test]
    fn test_parse_every_symbol() {
        for op in Operator::ALL {
            assert_eq!(op.symbol().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "=>".parse::<Operator>(),
            Err(ConditionError::UnknownOperator("=>".to_string()))
        );
        // Labels must match exactly
        assert!(" ==".parse::<Operator>().is_err());
        assert!("EQUAL".parse::<Operator>().is_err());
    }

    #[test]
    fn test_serde_uses_symbols() {
        assert_eq!(serde_json::to_value(Operator::GreaterThanOrEqual).unwrap(), json!(">="));
        let op: Operator = serde_json::from_value(json!("!=")).unwrap();
        assert_eq!(op, Operator::NotEqual);
        let err = serde_json::from_value::<Operator>(json!("contains")).unwrap_err();
        assert_eq!(err.to_string(), "unknown comparison operator: contains");
    }
}
