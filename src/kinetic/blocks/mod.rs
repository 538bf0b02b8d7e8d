// SPDX-License-Identifier: MIT

//! Built-in blocks

pub mod condition;

pub use condition::{ConditionBlock, ConditionInput, CONDITION_BLOCK_ID, CONDITION_BLOCK_NAME};
