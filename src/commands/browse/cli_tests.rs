//! CLI parsing tests for browse command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;
    use std::path::PathBuf;

    crate::cli_required_arg_test! {
        command: "browse",
        test_name: test_browse_requires_file,
        required_arg: "--file",
    }

    crate::cli_defaults_test! {
        command: "browse",
        variant: Browse,
        required_args: ["--file", "trace.jsonl"],
        defaults: {
            file: PathBuf::from("trace.jsonl"),
            filter.include_pattern: Vec::<String>::new(),
            filter.drop_filtered: false,
        },
    }

    crate::cli_option_test! {
        command: "browse",
        variant: Browse,
        test_name: test_browse_exclude_pattern,
        args: ["-f", "trace.jsonl", "--exclude-pattern", "^Logger#", "--drop-filtered"],
        field: filter.exclude_pattern,
        expected: vec!["^Logger#".to_string()],
    }

    crate::cli_error_test! {
        command: "browse",
        test_name: test_browse_rejects_max_depth,
        args: ["--file", "trace.jsonl", "--max-depth", "1"],
    }
}
