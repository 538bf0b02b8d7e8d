// SPDX-License-Identifier: MIT

//! Building blocks shared by every kinetic component: errors and the block trait.

pub mod block;
pub mod error;
