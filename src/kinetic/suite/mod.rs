// SPDX-License-Identifier: MIT

//! Suites: fixture files that run a block over a list of inputs
//!
//! This module provides:
//! - `SuiteDefinition` - the file format
//! - `SuiteLoader` - YAML/JSON parsing
//! - `run_suite` - execution and reporting

mod loader;
mod runner;
mod types;

pub use loader::SuiteLoader;
pub use runner::{channels_to_json, run_suite};
pub use types::{CaseDefinition, CaseReport, Expectation, SuiteDefinition, SuiteReport};
