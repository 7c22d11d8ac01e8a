//! Key-path parser: URL-escaped `.trs` keys → nested field paths.
//!
//! A key such as `m_arrMarker%5B2%5D.m_f64Freq` names the field
//! `m_f64Freq` inside level `2` inside level `m_arrMarker`. Four escaped
//! tokens delimit levels and are interchangeable:
//!
//! | Token   | Decoded |
//! |---------|---------|
//! | `%5B`   | `[`     |
//! | `%5D.`  | `].`    |
//! | `%5D`   | `]`     |
//! | `-%3E`  | `->`    |
//!
//! `%20` decodes to a space inside a field name and never delimits.
//! A single trailing delimiter (`a%5Bb%5D`) is dropped.

use std::fmt;

use crate::error::KeyPathError;
use crate::value::{Scalar, State};

// `%5D.` must be tried before `%5D`.
const DELIMITERS: [&str; 4] = ["%5D.", "%5B", "%5D", "-%3E"];
const ESCAPED_SPACE: &str = "%20";

/// A decoded key: the nesting levels followed by the leaf field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    parents: Vec<String>,
    leaf: String,
}

impl KeyPath {
    /// Decode an escaped key into its segments.
    pub fn parse(key: &str) -> Result<Self, KeyPathError> {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut rest = key;

        'scan: while let Some(ch) = rest.chars().next() {
            for delim in DELIMITERS {
                if let Some(tail) = rest.strip_prefix(delim) {
                    segments.push(std::mem::take(&mut current));
                    rest = tail;
                    continue 'scan;
                }
            }
            if let Some(tail) = rest.strip_prefix(ESCAPED_SPACE) {
                current.push(' ');
                rest = tail;
                continue;
            }
            current.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
        segments.push(current);

        // a trailing delimiter leaves exactly one empty segment behind
        if segments.len() > 1 && segments.last().is_some_and(String::is_empty) {
            segments.pop();
        }

        let leaf = match segments.pop() {
            Some(leaf) if !leaf.is_empty() => leaf,
            _ => {
                return Err(KeyPathError::EmptyField {
                    key: key.to_string(),
                })
            }
        };

        Ok(KeyPath {
            parents: segments,
            leaf,
        })
    }

    /// Nesting levels above the leaf, outermost first.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    /// Assign `value` at this path below `container`, creating levels as
    /// needed. An existing value at the leaf is overwritten.
    pub fn insert_into(&self, container: &mut State, value: Scalar) -> Result<(), KeyPathError> {
        let mut current = container;
        for segment in &self.parents {
            current = current
                .child_mut(segment)
                .ok_or_else(|| KeyPathError::PathConflict {
                    key: self.to_string(),
                    segment: segment.clone(),
                })?;
        }
        current.insert(self.leaf.clone(), value);
        Ok(())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.parents {
            write!(f, "{}/", p)?;
        }
        write!(f, "{}", self.leaf)
    }
}

/// Decode `key` and insert `value` at the resulting path in `container`.
pub fn insert(key: &str, container: &mut State, value: Scalar) -> Result<(), KeyPathError> {
    KeyPath::parse(key)?.insert_into(container, value)
}
