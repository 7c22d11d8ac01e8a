//! Typed lookups into the parsed state.
//!
//! Every required field goes through these helpers so a missing or
//! mistyped value surfaces as a [`TraceError`] naming the section.

use thiserror::Error;
use trs_core::{State, Value};

/// Field holding the number of indexed records in a trace section.
pub const SIZE_FIELD: &str = "size";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    #[error("section [{section}] is missing")]
    MissingSection { section: String },
    #[error("[{section}] has no field `{field}`")]
    MissingField { section: String, field: String },
    #[error("[{section}] has no record {index}")]
    MissingRecord { section: String, index: usize },
    #[error("[{section}] field `{field}` must be {expected}, found {found}")]
    InvalidField {
        section: String,
        field: String,
        expected: &'static str,
        found: String,
    },
    #[error("[{section}] has size 0, no frequency axis can be derived")]
    EmptyTrace { section: String },
}

/// Top-level section `name`.
pub fn section<'a>(state: &'a State, name: &str) -> Result<&'a State, TraceError> {
    state.node(name).ok_or_else(|| TraceError::MissingSection {
        section: name.to_string(),
    })
}

fn field<'a>(node: &'a State, section: &str, field: &str) -> Result<&'a Value, TraceError> {
    node.get(field).ok_or_else(|| TraceError::MissingField {
        section: section.to_string(),
        field: field.to_string(),
    })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Scalar(s) => format!("{} `{}`", s.kind(), s),
        Value::Node(_) => "a nested group".to_string(),
    }
}

/// Numeric field of `node`; integers are accepted as floats.
pub fn get_f64(node: &State, section: &str, name: &str) -> Result<f64, TraceError> {
    let value = field(node, section, name)?;
    value
        .as_scalar()
        .and_then(|s| s.as_f64())
        .ok_or_else(|| TraceError::InvalidField {
            section: section.to_string(),
            field: name.to_string(),
            expected: "a number",
            found: describe(value),
        })
}

/// The `size` field of a trace section as a sample count.
pub fn get_size(node: &State, section: &str) -> Result<usize, TraceError> {
    let value = field(node, section, SIZE_FIELD)?;
    value
        .as_scalar()
        .and_then(|s| s.as_i64())
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| TraceError::InvalidField {
            section: section.to_string(),
            field: SIZE_FIELD.to_string(),
            expected: "a non-negative integer",
            found: describe(value),
        })
}

/// Record `index` (1-based) of a trace section.
pub fn record<'a>(node: &'a State, section: &str, index: usize) -> Result<&'a State, TraceError> {
    node.node(&index.to_string())
        .ok_or_else(|| TraceError::MissingRecord {
            section: section.to_string(),
            index,
        })
}

/// Numeric field `name` of record `index`, reported as `index/name`.
pub fn record_f64(record: &State, section: &str, index: usize, name: &str) -> Result<f64, TraceError> {
    get_f64(record, section, name).map_err(|e| match e {
        TraceError::MissingField { section, field } => TraceError::MissingField {
            section,
            field: format!("{}/{}", index, field),
        },
        TraceError::InvalidField {
            section,
            field,
            expected,
            found,
        } => TraceError::InvalidField {
            section,
            field: format!("{}/{}", index, field),
            expected,
            found,
        },
        other => other,
    })
}
