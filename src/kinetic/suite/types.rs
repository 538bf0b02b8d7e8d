// SPDX-License-Identifier: MIT

//! Schema types for suite files
//!
//! A suite is a named list of block inputs, each optionally paired with the
//! channels it is expected to produce.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kinetic::blocks::CONDITION_BLOCK_NAME;

fn default_block() -> String {
    CONDITION_BLOCK_NAME.to_string()
}

/// Top-level suite definition
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SuiteDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Block that executes every case (name or id)
    #[serde(default = "default_block")]
    pub block: String,
    pub cases: Vec<CaseDefinition>,
}

/// One block input inside a suite
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CaseDefinition {
    pub name: String,
    /// Block input object
    pub input: Value,
    /// Expected channels; the case always passes when omitted
    #[serde(default)]
    pub expect: Option<Expectation>,
}

/// Expected `result` and `output` channels
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Expectation {
    #[serde(default)]
    pub result: Option<bool>,
    #[serde(default)]
    pub output: Value,
}

/// Per-case outcome
#[derive(Debug, Serialize, Clone)]
pub struct CaseReport {
    pub name: String,
    pub passed: bool,
    /// Produced channels, absent when the block rejected the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a whole suite run
#[derive(Debug, Serialize, Clone)]
pub struct SuiteReport {
    pub suite: String,
    pub block: String,
    pub passed: usize,
    pub failed: usize,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}
