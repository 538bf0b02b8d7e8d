use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::error::KineticError;

/// Ordered `(channel, value)` pairs produced by one block execution.
pub type BlockOutput = Vec<(String, Value)>;

/// Trait for blocks that a host orchestrator can execute.
///
/// # Notes
/// - `name()`, `description()` and the schemas return borrowed data; implementations
///   should build them once and store them
/// - `execute()` returns channels in emission order
#[async_trait]
pub trait Block: Send + Sync {
    /// Stable identifier of the block
    fn id(&self) -> Uuid;

    /// Returns the block name (unique within a registry)
    fn name(&self) -> &str;

    /// Returns a human-readable description of what the block does
    fn description(&self) -> &str;

    /// Category tags, e.g. `LOGIC`
    fn categories(&self) -> &[&'static str];

    /// JSON schema for the block's input object
    fn input_schema(&self) -> &Value;

    /// JSON schema describing the output channels
    fn output_schema(&self) -> &Value;

    /// Input used by the block's self-test, if any
    fn test_input(&self) -> Option<&Value> {
        None
    }

    /// Channels expected from `test_input()`
    fn test_output(&self) -> &[(String, Value)] {
        &[]
    }

    /// Execute the block with the given input and return its output channels
    async fn execute(&self, input: Value) -> Result<BlockOutput, KineticError>;
}
