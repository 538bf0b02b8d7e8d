// SPDX-License-Identifier: MIT

//! Condition evaluation
//!
//! Extracts two operands from an input value, compares them with one of six
//! operators and selects an output:
//! - `{"value1": 10, "value2": 5}` with keys `value1`/`value2` and `>` → `true`
//! - `[{"v": 1}, {"v": 2}]` with indexes `0`/`1` and `==` → `false`

mod comparator;
mod evaluator;
mod extractor;
mod operator;
mod types;

pub use comparator::{compare, type_name, values_equal};
pub use evaluator::evaluate;
pub use extractor::extract;
pub use operator::Operator;
pub use types::{EvaluationRequest, EvaluationResult, OperandAddress};
