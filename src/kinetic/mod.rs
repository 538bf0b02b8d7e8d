// SPDX-License-Identifier: MIT

pub mod blocks;
pub mod condition;
pub mod config;
pub mod registry;
pub mod server;
pub mod suite;
