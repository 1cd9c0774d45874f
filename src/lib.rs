//! call_tree library - call tree reconstruction and exploration
//!
//! Turns the call/return notifications of a traced execution into a flat,
//! pre-order node sequence, and provides the filtering, presentation,
//! interactive navigation and command infrastructure built on top of it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod format;
pub mod instrument;
pub mod navigator;
pub mod output;
pub mod tree;
pub mod tui;
pub mod types;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
pub mod test_utils;
