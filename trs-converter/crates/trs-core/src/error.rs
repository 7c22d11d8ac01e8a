//! Structural parse errors.

use thiserror::Error;

/// A key that cannot be turned into a path inside the state tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyPathError {
    #[error("key `{key}` has an empty field name")]
    EmptyField { key: String },
    #[error("key `{key}` descends through `{segment}`, which already holds a value")]
    PathConflict { key: String, segment: String },
}

/// A line of a `.trs` document that does not fit the format.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line {line}: `{text}` appears before any [section] header")]
    NoSection { line: usize, text: String },
    #[error("line {line}: expected `key=value`, found `{text}`")]
    MissingAssignment { line: usize, text: String },
    #[error("line {line}: {source}")]
    Key {
        line: usize,
        #[source]
        source: KeyPathError,
    },
}

impl ParseError {
    /// 1-based line number of the offending line.
    pub fn line(&self) -> usize {
        match self {
            ParseError::NoSection { line, .. }
            | ParseError::MissingAssignment { line, .. }
            | ParseError::Key { line, .. } => *line,
        }
    }
}
