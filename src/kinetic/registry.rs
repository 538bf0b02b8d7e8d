// SPDX-License-Identifier: MIT

use crate::adk::block::{Block, BlockOutput};
use crate::adk::error::KineticError;
use crate::kinetic::blocks::ConditionBlock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Outcome of running a block's built-in test
#[derive(Debug, Clone)]
pub struct SelfTestReport {
    pub block: String,
    pub expected: BlockOutput,
    pub actual: BlockOutput,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

#[derive(Clone)]
pub struct BlockRegistry {
    blocks: Arc<RwLock<HashMap<String, Arc<dyn Block>>>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registry with every built-in block
    pub async fn with_defaults() -> Result<Self, KineticError> {
        let registry = Self::new();
        registry.register(Arc::new(ConditionBlock::new()?)).await;
        Ok(registry)
    }

    pub async fn register(&self, block: Arc<dyn Block>) {
        log::info!("Registered block: {} ({})", block.name(), block.id());
        let mut blocks = self.blocks.write().await;
        blocks.insert(block.name().to_string(), block);
    }

    pub async fn get(&self, name: &str) -> Option<Arc<dyn Block>> {
        let blocks = self.blocks.read().await;
        blocks.get(name).cloned()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Option<Arc<dyn Block>> {
        let blocks = self.blocks.read().await;
        blocks.values().find(|b| b.id() == id).cloned()
    }

    /// Look up by name, falling back to the block id
    pub async fn resolve(&self, name_or_id: &str) -> Result<Arc<dyn Block>, KineticError> {
        if let Some(block) = self.get(name_or_id).await {
            return Ok(block);
        }
        if let Ok(id) = Uuid::parse_str(name_or_id) {
            if let Some(block) = self.get_by_id(id).await {
                return Ok(block);
            }
        }
        Err(KineticError::block_not_found(name_or_id))
    }

    /// All blocks, sorted by name
    pub async fn list(&self) -> Vec<Arc<dyn Block>> {
        let blocks = self.blocks.read().await;
        let mut list: Vec<_> = blocks.values().cloned().collect();
        list.sort_by(|a, b| a.name().cmp(b.name()));
        list
    }

    /// Run a block's built-in test input and compare against its expected output
    pub async fn self_test(&self, name: &str) -> Result<SelfTestReport, KineticError> {
        let block = self.resolve(name).await?;
        let input = block
            .test_input()
            .cloned()
            .ok_or_else(|| KineticError::other(format!("Block '{}' has no test input", name)))?;

        let actual = block.execute(input).await?;
        let report = SelfTestReport {
            block: block.name().to_string(),
            expected: block.test_output().to_vec(),
            actual,
        };
        if !report.passed() {
            log::warn!(
                "Self-test failed for {}: expected {:?}, got {:?}",
                report.block,
                report.expected,
                report.actual
            );
        }
        Ok(report)
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use once_cell::sync::Lazy;

    static MOCK_SCHEMA: Lazy<Value> = Lazy::new(|| {
        json!({
            "type": "object",
            "properties": {}
        })
    });

    /// A mock block for testing
    struct MockBlock {
        id: Uuid,
        name: String,
        description: String,
        test_input: Option<Value>,
        test_output: BlockOutput,
    }

    impl MockBlock {
        fn new(name: &str) -> Self {
            Self {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: format!("Mock block: {}", name),
                test_input: None,
                test_output: vec![],
            }
        }

        fn with_test(mut self, input: Value, expected: Value) -> Self {
            self.test_input = Some(input);
            self.test_output = vec![("echo".to_string(), expected)];
            self
        }
    }

    #[async_trait]
    impl Block for MockBlock {
        fn id(&self) -> Uuid {
            self.id
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            &self.description
        }

        fn categories(&self) -> &[&'static str] {
            &["TEST"]
        }

        fn input_schema(&self) -> &Value {
            &MOCK_SCHEMA
        }

        fn output_schema(&self) -> &Value {
            &MOCK_SCHEMA
        }

        fn test_input(&self) -> Option<&Value> {
            self.test_input.as_ref()
        }

        fn test_output(&self) -> &[(String, Value)] {
            &self.test_output
        }

        async fn execute(&self, input: Value) -> Result<BlockOutput, KineticError> {
            Ok(vec![("echo".to_string(), input)])
        }
    }

    #[tokio::test]
    async fn test_register_and_get_block() {
        let registry = BlockRegistry::new();
        registry.register(Arc::new(MockBlock::new("test_block"))).await;

        let retrieved = registry.get("test_block").await;
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().name(), "test_block");
    }

    #[tokio::test]
    async fn test_get_nonexistent_block() {
        let registry = BlockRegistry::new();
        assert!(registry.get("nonexistent").await.is_none());
        assert!(matches!(
            registry.resolve("nonexistent").await,
            Err(KineticError::BlockNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_by_id() {
        let registry = BlockRegistry::new();
        let block = MockBlock::new("by_id");
        let id = block.id;
        registry.register(Arc::new(block)).await;

        assert_eq!(registry.get_by_id(id).await.unwrap().name(), "by_id");
        assert_eq!(
            registry.resolve(&id.to_string()).await.unwrap().name(),
            "by_id"
        );
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let registry = BlockRegistry::new();
        registry.register(Arc::new(MockBlock::new("b"))).await;
        registry.register(Arc::new(MockBlock::new("c"))).await;
        registry.register(Arc::new(MockBlock::new("a"))).await;

        let names: Vec<String> = registry
            .list()
            .await
            .iter()
            .map(|b| b.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_register_overwrites_existing() {
        let registry = BlockRegistry::new();
        registry.register(Arc::new(MockBlock::new("same_name"))).await;
        registry.register(Arc::new(MockBlock::new("same_name"))).await;

        assert_eq!(registry.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_registry_is_clone() {
        let registry = BlockRegistry::new();
        let cloned = registry.clone();

        // Registering on clone should be visible to original
        cloned.register(Arc::new(MockBlock::new("block2"))).await;
        assert!(registry.get("block2").await.is_some());
    }

    #[tokio::test]
    async fn test_self_test_pass_and_fail() {
        let registry = BlockRegistry::new();
        registry
            .register(Arc::new(MockBlock::new("good").with_test(json!(1), json!(1))))
            .await;
        registry
            .register(Arc::new(MockBlock::new("bad").with_test(json!(1), json!(2))))
            .await;
        registry.register(Arc::new(MockBlock::new("none"))).await;

        assert!(registry.self_test("good").await.unwrap().passed());
        assert!(!registry.self_test("bad").await.unwrap().passed());
        assert!(registry.self_test("none").await.is_err());
    }

    #[tokio::test]
    async fn test_defaults_include_condition_block() {
        let registry = BlockRegistry::with_defaults().await.unwrap();
        assert!(registry.get("condition_test").await.is_some());
        assert!(registry.self_test("condition_test").await.unwrap().passed());
    }
}
