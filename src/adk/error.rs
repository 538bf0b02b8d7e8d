// SPDX-License-Identifier: MIT

//! Typed error handling for kinetic-branch
//!
//! `ConditionError` covers operand resolution, comparison and operator
//! parsing; evaluation folds it into the null/null result. `KineticError`
//! covers everything around it: blocks, the registry, suite loading,
//! configuration and the server.

use thiserror::Error;

/// Top-level error type for kinetic-branch
#[derive(Debug, Error)]
pub enum KineticError {
    /// Configuration errors (malformed env vars, bad flags)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Block not found in the registry
    #[error("Block '{name}' not found")]
    BlockNotFound { name: String },

    /// Block input did not match the block's input schema
    #[error("Invalid input for block '{block}': {message}")]
    InvalidInput { block: String, message: String },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(String),
}

/// Errors raised while resolving operands or comparing them
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    /// Ordering operator applied to operands without a mutual order
    #[error("operator '{operator}' is not defined between {left} and {right}")]
    Incomparable {
        operator: String,
        left: &'static str,
        right: &'static str,
    },

    /// Key lookup on a sequence that has no first element
    #[error("cannot look up key '{key}' on an empty sequence")]
    EmptySequence { key: String },

    /// Operator label outside the six supported tokens
    #[error("unknown comparison operator: {0}")]
    UnknownOperator(String),
}

impl KineticError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a block not found error
    pub fn block_not_found(name: impl Into<String>) -> Self {
        Self::BlockNotFound { name: name.into() }
    }

    /// Create an invalid input error
    pub fn invalid_input(block: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            block: block.into(),
            message: message.into(),
        }
    }

    /// Create from a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
