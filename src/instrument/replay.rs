//! Replay of a recorded notification stream.
//!
//! The stream is JSON lines: one notification object per line, tagged with
//! `"event": "call"` or `"event": "return"`. Blank lines and lines starting
//! with `#` are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::{Instrumentation, NotificationSink};
use crate::types::Notification;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Failed to open trace stream '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("Failed to read trace stream at line {line}: {message}")]
    ReadFailed { line: usize, message: String },

    #[error("Invalid notification at line {line}: {message}")]
    InvalidLine { line: usize, message: String },
}

/// A recorded stream read line by line.
pub struct Replay<R> {
    reader: R,
    source: String,
}

impl Replay<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, StreamError> {
        let file = File::open(path).map_err(|e| StreamError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            reader: BufReader::new(file),
            source: path.display().to_string(),
        })
    }
}

impl Replay<Cursor<String>> {
    pub fn from_string(content: impl Into<String>) -> Self {
        Self {
            reader: Cursor::new(content.into()),
            source: "<memory>".to_string(),
        }
    }
}

impl<R: BufRead> Replay<R> {
    pub fn from_reader(reader: R, source: impl Into<String>) -> Self {
        Self {
            reader,
            source: source.into(),
        }
    }

    /// Where the stream comes from, for messages.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Parse one line; `None` for lines that carry no notification.
pub(crate) fn parse_line(line: &str, number: usize) -> Result<Option<Notification>, StreamError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| StreamError::InvalidLine {
            line: number,
            message: e.to_string(),
        })
}

impl<R: BufRead> Instrumentation for Replay<R> {
    type Error = StreamError;

    fn run(self, sink: &mut dyn NotificationSink) -> Result<(), StreamError> {
        debug!(source = %self.source, "replaying trace stream");
        let mut delivered = 0usize;
        for (index, line) in self.reader.lines().enumerate() {
            let number = index + 1;
            let line = line.map_err(|e| StreamError::ReadFailed {
                line: number,
                message: e.to_string(),
            })?;
            if let Some(notification) = parse_line(&line, number)? {
                sink.notify(notification);
                delivered += 1;
            }
        }
        debug!(delivered, "trace stream exhausted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const STREAM: &str = r#"
# recorded by hand
{"event":"call","name":"a"}
{"event":"return","name":"a","value":{"type":"nil"}}
"#;

    #[rstest]
    fn test_skips_blank_and_comment_lines() {
        let mut recorded: Vec<Notification> = Vec::new();
        Replay::from_string(STREAM).run(&mut recorded).unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].name(), "a");
    }

    #[rstest]
    fn test_invalid_line_reports_line_number() {
        let content = "{\"event\":\"call\",\"name\":\"a\"}\nnot json\n";
        let mut recorded: Vec<Notification> = Vec::new();
        let err = Replay::from_string(content).run(&mut recorded).unwrap_err();
        match err {
            StreamError::InvalidLine { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected InvalidLine, got {:?}", other),
        }
        assert_eq!(recorded.len(), 1);
    }

    #[rstest]
    fn test_unknown_event_is_invalid() {
        let result = parse_line(r#"{"event":"raise","name":"a"}"#, 7);
        assert!(matches!(result, Err(StreamError::InvalidLine { line: 7, .. })));
    }

    #[rstest]
    fn test_open_missing_file() {
        let result = Replay::open(Path::new("/nonexistent/trace.jsonl"));
        assert!(matches!(result, Err(StreamError::OpenFailed { .. })));
    }

    #[rstest]
    fn test_open_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(STREAM.as_bytes()).unwrap();
        file.flush().unwrap();

        let replay = Replay::open(file.path()).unwrap();
        assert!(replay.source().ends_with(file.path().file_name().unwrap().to_str().unwrap()));
        let mut recorded: Vec<Notification> = Vec::new();
        replay.run(&mut recorded).unwrap();
        assert_eq!(recorded.len(), 2);
    }
}
