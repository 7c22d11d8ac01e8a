//! The nested state tree built from a `.trs` document.
//!
//! ```text
//! Value ─┬─ Scalar ─┬─ Bool
//!        │          ├─ Int
//!        │          ├─ Float
//!        │          └─ Str
//!        └─ Node ──── State { name → Value, ... }
//! ```

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A leaf value after auto-cast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(#[serde(serialize_with = "float_or_text")] f64),
    Str(String),
}

// JSON has no NaN or infinity; those are written as `"NaN"`, `"inf"`, `"-inf"`.
fn float_or_text<S: Serializer>(x: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if x.is_finite() {
        serializer.serialize_f64(*x)
    } else {
        serializer.serialize_str(&format!("{:?}", x))
    }
}

impl Scalar {
    /// Numeric view of the scalar; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Short type name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "boolean",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{:?}", x),
            Scalar::Str(s) => write!(f, "{}", s),
        }
    }
}

/// A node of the state tree: either a leaf scalar or a nested mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    Node(State),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&State> {
        match self {
            Value::Node(n) => Some(n),
            Value::Scalar(_) => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<State> for Value {
    fn from(n: State) -> Self {
        Value::Node(n)
    }
}

/// Insertion-ordered mapping from field name to [`Value`].
///
/// The first insertion of a name fixes its position; later writes to the
/// same name replace the value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct State(IndexMap<String, Value>);

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Nested mapping stored under `key`, if any.
    pub fn node(&self, key: &str) -> Option<&State> {
        self.get(key).and_then(Value::as_node)
    }

    /// Scalar stored under `key`, if any.
    pub fn scalar(&self, key: &str) -> Option<&Scalar> {
        self.get(key).and_then(Value::as_scalar)
    }

    /// Insert or overwrite `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Nested mapping under `key`, created empty when absent.
    ///
    /// Returns `None` when `key` already holds a scalar.
    pub fn child_mut(&mut self, key: &str) -> Option<&mut State> {
        match self
            .0
            .entry(key.to_string())
            .or_insert_with(|| Value::Node(State::new()))
        {
            Value::Node(node) => Some(node),
            Value::Scalar(_) => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Depth of the deepest leaf below this node (a node of scalars is 1).
    pub fn depth(&self) -> usize {
        self.0
            .values()
            .map(|v| match v {
                Value::Scalar(_) => 1,
                Value::Node(n) => 1 + n.depth(),
            })
            .max()
            .unwrap_or(0)
    }
}
