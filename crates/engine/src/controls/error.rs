use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("missing '=' separator")]
    MissingSeparator,
    #[error("action name is empty")]
    EmptyAction,
    #[error("unknown key symbol '{symbol}'")]
    UnknownKey { symbol: String },
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// A controls line that could not be turned into a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub file: Option<PathBuf>,
    /// 1-based.
    pub line: usize,
    pub text: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, line: usize, text: &str) -> Self {
        Self {
            kind,
            file: None,
            line,
            text: text.to_string(),
        }
    }

    pub(crate) fn in_file(mut self, path: &Path) -> Self {
        self.file = Some(path.to_path_buf());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(path) => write!(
                f,
                "{} (file={}, line={}, text={:?})",
                self.kind,
                path.display(),
                self.line,
                self.text
            ),
            None => write!(
                f,
                "{} (line={}, text={:?})",
                self.kind, self.line, self.text
            ),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Error)]
pub enum ControlsError {
    #[error("malformed controls: {0}")]
    Parse(#[from] ParseError),
    #[error("no key is bound to action '{action}'")]
    UnknownAction { action: String },
    #[error("action name {action:?} cannot be written as an `action=Key` line")]
    UnsavableAction { action: String },
    #[error("failed to access controls file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ControlsError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
