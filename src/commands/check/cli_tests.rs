//! CLI parsing tests for check command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;
    use std::path::PathBuf;

    crate::cli_required_arg_test! {
        command: "check",
        test_name: test_check_requires_file,
        required_arg: "--file",
    }

    crate::cli_defaults_test! {
        command: "check",
        variant: Check,
        required_args: ["--file", "trace.jsonl"],
        defaults: {
            file: PathBuf::from("trace.jsonl"),
            strict: false,
        },
    }

    crate::cli_option_test! {
        command: "check",
        variant: Check,
        test_name: test_check_strict,
        args: ["--file", "trace.jsonl", "--strict"],
        field: strict,
        expected: true,
    }

    // check reports the raw recording, so filter flags are not accepted
    crate::cli_error_test! {
        command: "check",
        test_name: test_check_rejects_filter_flags,
        args: ["--file", "trace.jsonl", "--exclude", "log"],
    }
}
