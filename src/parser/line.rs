use crate::error::IngestError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Raw bytes of one source, exactly as read. Consumed once by the decoder.
#[derive(Debug, Clone)]
pub struct RawLog {
    pub source: String,
    pub bytes: Vec<u8>,
}

impl RawLog {
    pub fn new(source: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            bytes,
        }
    }

    /// Read a whole file. The handle is dropped before this returns, on
    /// success and on error alike.
    pub fn read(path: &Path) -> Result<Self, IngestError> {
        let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(Self::new(path.display().to_string(), bytes))
    }
}

/// One cleaned line of text with its 1-based position in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    pub line_number: usize,
    pub text: String,
}

impl LogLine {
    pub fn new(text: impl Into<String>, line_number: usize) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }

    /// Same position, new text. Used by the per-line transforms.
    #[must_use]
    pub fn with_text(&self, text: String) -> Self {
        Self {
            line_number: self.line_number,
            text,
        }
    }

    /// Number lines 1..=n in order, for callers that start from plain strings.
    pub fn from_texts<I, S>(texts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(idx, text)| Self::new(text, idx + 1))
            .collect()
    }
}

impl AsRef<str> for LogLine {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// One logical event: a timestamped head line plus its continuation lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub start_line: usize,
    pub line_count: usize,
    pub text: String,
}

impl LogEntry {
    pub fn new(first: &LogLine) -> Self {
        Self {
            start_line: first.line_number,
            line_count: 1,
            text: first.text.clone(),
        }
    }

    pub fn append(&mut self, line: &LogLine) {
        self.text.push('\n');
        self.text.push_str(&line.text);
        self.line_count += 1;
    }

    pub const fn is_multiline(&self) -> bool {
        self.line_count > 1
    }
}

impl AsRef<str> for LogEntry {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
