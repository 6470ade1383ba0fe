//! Validation error type
//!
//! A validation run reports at most one error: the first failure found.
//! Object and array layers wrap the inner error on the way out, so the
//! message reads outermost-first (`Field "items": Array item 2: Expected number`)
//! and the structured path mirrors it (`items[2]`).

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// One step of the location of a failed value inside the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object field name
    Field(String),
    /// Array element index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// The single failure produced by a `parse` call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    path: Vec<PathSegment>,
}

impl ValidationError {
    /// Create an error at the root of the input
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Human-readable message, including any field/index context
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Location of the failed value, outermost segment first
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Location rendered as `user.tags[2]`; empty for root failures
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow_schema::{v, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = v::object().field("tags", v::array(v::string()));
    /// let err = schema.parse(&json!({ "tags": ["a", 1] })).unwrap_err();
    /// assert_eq!(err.path_string(), "tags[1]");
    /// ```
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .enumerate()
            .fold(String::new(), |mut out, (i, segment)| {
                if i > 0 && matches!(segment, PathSegment::Field(_)) {
                    out.push('.');
                }
                out.push_str(&segment.to_string());
                out
            })
    }

    /// Wrap with the context of an enclosing object field
    pub(crate) fn in_field(self, name: &str) -> Self {
        self.wrap(
            format!("Field \"{}\"", name),
            PathSegment::Field(name.to_string()),
        )
    }

    /// Wrap with the context of an enclosing array element
    pub(crate) fn at_index(self, index: usize) -> Self {
        self.wrap(format!("Array item {}", index), PathSegment::Index(index))
    }

    fn wrap(mut self, context: String, segment: PathSegment) -> Self {
        self.message = format!("{}: {}", context, self.message);
        self.path.insert(0, segment);
        self
    }

    /// JSON body for client-error responses: `{"error": "<message>"}`
    pub fn to_json(&self) -> Value {
        serde_json::json!({ "error": self.message })
    }
}
