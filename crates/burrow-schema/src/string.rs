//! String schema and its refinements
//!
//! Each refinement wraps the node it is called on: the parent runs first
//! (type check plus every earlier refinement), then the new check sees the
//! already-validated string. Declaration order is evaluation order.

use regex::Regex;
use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};
use crate::schema::{Schema, SchemaLike};

/// Validates JSON strings; build with [`v::string`](crate::v::string)
#[derive(Clone, Debug)]
pub struct StringSchema {
    inner: Schema,
}

impl StringSchema {
    pub(crate) fn new() -> Self {
        Self {
            inner: Schema::from_fn(|input| match input {
                Some(Value::String(s)) => Ok(Some(Value::String(s.clone()))),
                _ => Err(ValidationError::new("Expected string")),
            }),
        }
    }

    /// Chain a check onto this node, returning a new node
    fn refine<F>(&self, check: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        let parent = self.inner.clone();
        Self {
            inner: Schema::from_fn(move |input| {
                let value = parent.parse_opt(input)?;
                if let Some(Value::String(s)) = &value {
                    check(s).map_err(ValidationError::new)?;
                }
                Ok(value)
            }),
        }
    }

    /// Require at least `n` characters
    pub fn min(&self, n: usize) -> Self {
        self.refine(move |s| {
            if char_len(s) < n {
                Err(format!("String too short (min: {})", n))
            } else {
                Ok(())
            }
        })
    }

    /// Allow at most `n` characters
    pub fn max(&self, n: usize) -> Self {
        self.refine(move |s| {
            if char_len(s) > n {
                Err(format!("String too long (max: {})", n))
            } else {
                Ok(())
            }
        })
    }

    /// Require exactly `n` characters
    pub fn length(&self, n: usize) -> Self {
        self.refine(move |s| {
            if char_len(s) != n {
                Err(format!("String length must be {}", n))
            } else {
                Ok(())
            }
        })
    }

    /// Require a match of `pattern` somewhere in the string
    ///
    /// Anchor the pattern (`^...$`) to match the whole value.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow_schema::{v, SchemaLike};
    /// use regex::Regex;
    /// use serde_json::json;
    ///
    /// let code = v::string().regex(Regex::new(r"^[A-Z]{3}$").unwrap());
    /// assert!(code.parse(&json!("ABC")).is_ok());
    /// assert!(code.parse(&json!("ABCD")).is_err());
    /// ```
    pub fn regex(&self, pattern: Regex) -> Self {
        self.refine(move |s| {
            if pattern.is_match(s) {
                Ok(())
            } else {
                Err("String does not match pattern".to_string())
            }
        })
    }

    /// Require the given prefix
    pub fn starts_with(&self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.refine(move |s| {
            if s.starts_with(prefix.as_str()) {
                Ok(())
            } else {
                Err(format!("String must start with \"{}\"", prefix))
            }
        })
    }

    /// Require the given suffix
    pub fn ends_with(&self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.refine(move |s| {
            if s.ends_with(suffix.as_str()) {
                Ok(())
            } else {
                Err(format!("String must end with \"{}\"", suffix))
            }
        })
    }
}

// Lengths count Unicode scalar values, not bytes
fn char_len(s: &str) -> usize {
    s.chars().count()
}

impl SchemaLike for StringSchema {
    fn parse_opt(&self, input: Option<&Value>) -> ValidationResult<Option<Value>> {
        self.inner.parse_opt(input)
    }

    fn to_schema(&self) -> Schema {
        self.inner.clone()
    }
}

impl From<StringSchema> for Schema {
    fn from(schema: StringSchema) -> Self {
        schema.inner
    }
}
