//! Shared test utilities for execute and integration tests.
//!
//! This module provides common helpers used across command execute tests.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::commands::Execute;
use crate::config::Config;
use crate::fixtures;
use crate::instrument::Replay;
use crate::tree::TreeBuilder;
use crate::types::Node;

/// Create a temporary file containing the given content.
///
/// Used to write trace streams and configuration files for tests.
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Build the unfiltered tree of an in-memory stream.
pub fn build(stream: &str) -> Vec<Node> {
    TreeBuilder::new()
        .run(Replay::from_string(stream))
        .expect("Stream should replay")
}

/// Execute a command with the default configuration.
pub fn execute_cmd<C: Execute>(cmd: C) -> Result<C::Output, Box<dyn std::error::Error>> {
    cmd.execute(&Config::default())
}

// =============================================================================
// Fixture-based helpers
// =============================================================================

/// Temp file holding the complete checkout trace.
///
/// Use for: show, browse, check
pub fn checkout_trace() -> NamedTempFile {
    create_temp_file(fixtures::CHECKOUT)
}

/// Temp file holding the truncated trace.
///
/// Use for: check, show
pub fn truncated_trace() -> NamedTempFile {
    create_temp_file(fixtures::TRUNCATED)
}
