//! Schema factories
//!
//! The entry point for building schemas:
//!
//! ```
//! use burrow_schema::{v, SchemaLike};
//! use serde_json::json;
//!
//! let role = v::enum_of(["admin", "member"]);
//! let tags = v::array(v::string().max(16)).optional();
//!
//! assert!(role.parse(&json!("admin")).is_ok());
//! assert!(tags.parse_opt(None).unwrap().is_none());
//! ```

use serde_json::Value;

use crate::error::ValidationError;
use crate::number::NumberSchema;
use crate::object::ObjectSchema;
use crate::schema::{Schema, SchemaLike};
use crate::string::StringSchema;

/// Any JSON string
pub fn string() -> StringSchema {
    StringSchema::new()
}

/// Any JSON number
pub fn number() -> NumberSchema {
    NumberSchema::new()
}

/// `true` or `false`
pub fn boolean() -> Schema {
    Schema::from_fn(|input| match input {
        Some(Value::Bool(b)) => Ok(Some(Value::Bool(*b))),
        _ => Err(ValidationError::new("Expected boolean")),
    })
}

/// Exactly `value`
///
/// # Examples
///
/// ```
/// use burrow_schema::{v, SchemaLike};
/// use serde_json::json;
///
/// let admin = v::literal("admin");
/// assert_eq!(admin.parse(&json!("admin")).unwrap(), json!("admin"));
/// assert_eq!(
///     admin.parse(&json!("user")).unwrap_err().message(),
///     "Expected literal admin"
/// );
/// ```
pub fn literal(value: impl Into<Value>) -> Schema {
    let expected = value.into();
    let message = format!("Expected literal {}", display_plain(&expected));
    Schema::from_fn(move |input| match input {
        Some(value) if same_literal(value, &expected) => Ok(Some(value.clone())),
        _ => Err(ValidationError::new(message.clone())),
    })
}

// Numbers compare by value, so `1` and `1.0` are the same literal.
fn same_literal(input: &Value, expected: &Value) -> bool {
    match (input, expected) {
        (Value::Number(a), Value::Number(b)) => {
            a == b || ((a.is_f64() || b.is_f64()) && a.as_f64() == b.as_f64())
        }
        _ => input == expected,
    }
}

/// One of a fixed set of strings
pub fn enum_of<I, S>(values: I) -> Schema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = values.into_iter().map(Into::into).collect();
    let message = format!("Expected one of: {}", allowed.join(", "));
    Schema::from_fn(move |input| match input {
        Some(Value::String(s)) if allowed.contains(s) => Ok(Some(Value::String(s.clone()))),
        _ => Err(ValidationError::new(message.clone())),
    })
}

/// A JSON array whose every element satisfies `element`
///
/// Elements are checked in index order; the first failure aborts with
/// `Array item <i>: ...` and later elements are not looked at.
pub fn array(element: impl SchemaLike) -> Schema {
    let element = element.to_schema();
    Schema::from_fn(move |input| {
        let items = match input {
            Some(Value::Array(items)) => items,
            _ => return Err(ValidationError::new("Expected array")),
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                element
                    .parse_opt(Some(item))
                    .map(|value| value.unwrap_or(Value::Null))
                    .map_err(|e| e.at_index(i))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|items| Some(Value::Array(items)))
    })
}

/// An object with no declared fields yet; add them with [`ObjectSchema::field`]
pub fn object() -> ObjectSchema {
    ObjectSchema::new()
}

/// An object declared from `(name, schema)` pairs, in iteration order
pub fn object_from<I, K>(shape: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, Schema)>,
    K: Into<String>,
{
    shape.into_iter().collect()
}

/// Accepts anything, including undefined
pub fn any() -> Schema {
    Schema::from_fn(|input| Ok(input.cloned()))
}

/// Accepts anything, including undefined
pub fn unknown() -> Schema {
    any()
}

// Strings print bare, everything else as JSON
fn display_plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
