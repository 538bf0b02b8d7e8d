// SPDX-License-Identifier: MIT

//! kinetic-branch: conditional branching blocks for workflow hosts.
//!
//! The core is [`kinetic::condition::evaluate`], which compares two operands
//! pulled out of an input value and selects an output. Around it sit the
//! [`adk::block::Block`] abstraction, a block registry, suite fixtures, a CLI
//! and an HTTP server.

pub mod adk;
pub mod kinetic;
