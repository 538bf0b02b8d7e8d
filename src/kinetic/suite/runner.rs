// SPDX-License-Identifier: MIT

//! Suite execution

use super::types::{CaseDefinition, CaseReport, Expectation, SuiteDefinition, SuiteReport};
use crate::adk::block::{Block, BlockOutput};
use crate::adk::error::KineticError;
use crate::kinetic::condition::values_equal;
use crate::kinetic::registry::BlockRegistry;
use serde_json::{Map, Value};

/// Run every case of a suite against its block.
///
/// Only an unknown block fails the whole run; a case whose input the block
/// rejects is reported as a failed case.
pub async fn run_suite(
    registry: &BlockRegistry,
    suite: &SuiteDefinition,
) -> Result<SuiteReport, KineticError> {
    let block = registry.resolve(&suite.block).await?;
    log::info!(
        "Running suite '{}' ({} cases) on {}",
        suite.name,
        suite.cases.len(),
        block.name()
    );

    let mut cases = Vec::with_capacity(suite.cases.len());
    for case in &suite.cases {
        cases.push(run_case(block.as_ref(), case).await);
    }

    let passed = cases.iter().filter(|c| c.passed).count();
    Ok(SuiteReport {
        suite: suite.name.clone(),
        block: block.name().to_string(),
        passed,
        failed: cases.len() - passed,
        cases,
    })
}

async fn run_case(block: &dyn Block, case: &CaseDefinition) -> CaseReport {
    match block.execute(case.input.clone()).await {
        Ok(channels) => {
            let passed = case
                .expect
                .as_ref()
                .map(|expect| matches_expectation(&channels, expect))
                .unwrap_or(true);
            if !passed {
                log::warn!("Case '{}' did not match its expectation", case.name);
            }
            CaseReport {
                name: case.name.clone(),
                passed,
                channels: Some(channels_to_json(channels)),
                error: None,
            }
        }
        Err(e) => {
            log::warn!("Case '{}' failed: {}", case.name, e);
            CaseReport {
                name: case.name.clone(),
                passed: false,
                channels: None,
                error: Some(e.to_string()),
            }
        }
    }
}

fn matches_expectation(channels: &BlockOutput, expect: &Expectation) -> bool {
    let channel = |name: &str| channels.iter().find(|(n, _)| n == name).map(|(_, v)| v);

    let output_matches = match channel("output") {
        Some(output) => values_equal(output, &expect.output),
        None => expect.output.is_null(),
    };
    channel("result").and_then(Value::as_bool) == expect.result && output_matches
}

/// Channels as a JSON object keyed by channel name
pub fn channels_to_json(channels: BlockOutput) -> Value {
    Value::Object(channels.into_iter().collect::<Map<String, Value>>())
}
