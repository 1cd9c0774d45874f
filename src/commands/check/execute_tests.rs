//! Execute tests for check command.

#[cfg(test)]
mod tests {
    use super::super::CheckCmd;
    use rstest::{fixture, rstest};

    crate::trace_fixture! {
        fixture_name: trace_file,
        stream: crate::fixtures::CHECKOUT,
    }

    crate::trace_fixture! {
        fixture_name: truncated_file,
        stream: crate::fixtures::TRUNCATED,
    }

    crate::execute_test! {
        test_name: test_check_complete_trace,
        fixture: trace_file,
        cmd: CheckCmd {
            file: trace_file.path().to_path_buf(),
            strict: true,
        },
        assertions: |result| {
            assert!(result.well_formed);
            assert_eq!(result.summary.nodes, 7);
            assert_eq!(result.summary.calls, 5);
            assert_eq!(result.summary.leaves, 3);
            assert_eq!(result.summary.max_depth, 2);
            assert_eq!(result.summary.total_time, Some(1.5));
        },
    }

    crate::execute_test! {
        test_name: test_check_truncated_trace,
        fixture: truncated_file,
        cmd: CheckCmd {
            file: truncated_file.path().to_path_buf(),
            strict: false,
        },
        assertions: |result| {
            assert!(!result.well_formed);
            assert_eq!(result.summary.nodes, 2);
            assert_eq!(result.summary.total_time, None);
            assert_eq!(
                result.summary.problem.as_deref(),
                Some("Node 0 ('log') is at depth 1, expected 0")
            );
        },
    }

    crate::execute_error_test! {
        test_name: test_check_strict_rejects_truncated_trace,
        fixture: truncated_file,
        cmd: CheckCmd {
            file: truncated_file.path().to_path_buf(),
            strict: true,
        },
        message_contains: "is incomplete",
    }

    // Configured filters do not apply to check
    #[rstest]
    fn test_check_ignores_configured_filter(trace_file: tempfile::NamedTempFile) {
        use crate::commands::Execute;
        let config: crate::config::Config =
            serde_json::from_str(r#"{"filter": {"exclude": [{"type": "name", "value": "total"}]}}"#).unwrap();
        let cmd = CheckCmd {
            file: trace_file.path().to_path_buf(),
            strict: false,
        };
        let result = cmd.execute(&config).unwrap();
        assert_eq!(result.summary.nodes, 7);
    }
}
