//! Suite loader - YAML/JSON file loading and parsing

use super::types::SuiteDefinition;
use crate::adk::error::KineticError;
use std::fs;
use std::path::Path;

/// Loads suite definitions from YAML or JSON files
pub struct SuiteLoader;

impl SuiteLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a suite definition from a file; `.json` files are parsed as JSON,
    /// everything else as YAML
    pub fn load_suite<P: AsRef<Path>>(&self, path: P) -> Result<SuiteDefinition, KineticError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::parse_json(&content)
        } else {
            Self::parse_yaml(&content)
        }
    }

    /// Parse a suite definition from a YAML string
    pub fn parse_yaml(content: &str) -> Result<SuiteDefinition, KineticError> {
        let def: SuiteDefinition = serde_yaml::from_str(content)?;
        Ok(def)
    }

    /// Parse a suite definition from a JSON string
    pub fn parse_json(content: &str) -> Result<SuiteDefinition, KineticError> {
        let def: SuiteDefinition = serde_json::from_str(content)?;
        Ok(def)
    }
}

impl Default for SuiteLoader {
    fn default() -> Self {
        Self::new()
    }
}
