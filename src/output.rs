//! Output formatting for command results.
//!
//! Supports multiple output formats: table (human-readable), JSON, and toon.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tree format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Token-efficient toon format
    Toon,
}

/// Trait for types that can be formatted for output
pub trait Outputable: Serialize {
    /// Format as human-readable text
    fn to_table(&self) -> String;

    /// Format according to the specified output format
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
            OutputFormat::Toon => {
                let json_value = serde_json::to_value(self).unwrap_or_default();
                toon::encode(&json_value, None)
            }
        }
    }
}

/// Format an optional duration in seconds the way node lines do.
pub fn format_seconds(seconds: Option<f64>) -> String {
    use crate::format::{Formatter, PlainFormatter};
    match seconds {
        Some(s) => PlainFormatter::new().duration(s),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        count: usize,
    }

    impl Outputable for Sample {
        fn to_table(&self) -> String {
            format!("{}: {}", self.name, self.count)
        }
    }

    #[rstest]
    fn test_table_delegates_to_to_table() {
        let sample = Sample { name: "calls", count: 3 };
        assert_eq!(sample.format(OutputFormat::Table), "calls: 3");
    }

    #[rstest]
    fn test_json_is_pretty() {
        let sample = Sample { name: "calls", count: 3 };
        assert_eq!(
            sample.format(OutputFormat::Json),
            "{\n  \"name\": \"calls\",\n  \"count\": 3\n}"
        );
    }

    #[rstest]
    fn test_toon_contains_fields() {
        let sample = Sample { name: "calls", count: 3 };
        let output = sample.format(OutputFormat::Toon);
        assert!(output.contains("name: calls"));
        assert!(output.contains("count: 3"));
    }

    #[rstest]
    #[case(None, "-")]
    #[case(Some(0.25), "250.00ms")]
    fn test_format_seconds(#[case] seconds: Option<f64>, #[case] expected: &str) {
        assert_eq!(format_seconds(seconds), expected);
    }
}
