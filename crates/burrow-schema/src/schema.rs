//! Schema node and universal modifiers
//!
//! A schema is an immutable value holding a validation closure. Combinators never
//! touch the node they are called on: they capture a clone of it (a cheap `Arc`
//! bump) inside a new closure, so earlier nodes stay valid and reusable and any
//! node can be shared across threads.
//!
//! Inputs are `Option<&Value>`: `None` is *undefined* (an absent field),
//! distinct from `Some(&Value::Null)`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{ValidationError, ValidationResult};

type Validator = dyn Fn(Option<&Value>) -> ValidationResult<Option<Value>> + Send + Sync;

/// Type-erased schema node
///
/// Every specialised node (`StringSchema`, `NumberSchema`, `ObjectSchema`)
/// converts into this via [`SchemaLike::to_schema`] or `From`.
#[derive(Clone)]
pub struct Schema {
    validator: Arc<Validator>,
}

impl Schema {
    /// Build a schema from a raw validation function
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow_schema::{Schema, SchemaLike, ValidationError};
    /// use serde_json::{json, Value};
    ///
    /// let even = Schema::from_fn(|input| match input.and_then(Value::as_i64) {
    ///     Some(n) if n % 2 == 0 => Ok(input.cloned()),
    ///     _ => Err(ValidationError::new("Expected even integer")),
    /// });
    ///
    /// assert_eq!(even.parse(&json!(4)).unwrap(), json!(4));
    /// assert!(even.parse(&json!(3)).is_err());
    /// ```
    pub fn from_fn<F>(validator: F) -> Self
    where
        F: Fn(Option<&Value>) -> ValidationResult<Option<Value>> + Send + Sync + 'static,
    {
        Self {
            validator: Arc::new(validator),
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema").finish_non_exhaustive()
    }
}

/// Behaviour shared by every schema node
///
/// Implementors provide [`parse_opt`](SchemaLike::parse_opt) and
/// [`to_schema`](SchemaLike::to_schema); parsing helpers and the universal
/// modifiers (`optional`, `nullable`, `default`) come for free.
pub trait SchemaLike: Send + Sync {
    /// Validate a possibly-undefined input
    fn parse_opt(&self, input: Option<&Value>) -> ValidationResult<Option<Value>>;

    /// Erase into a shareable [`Schema`]
    fn to_schema(&self) -> Schema;

    /// Validate a present input, returning the validated value
    fn parse(&self, input: &Value) -> ValidationResult<Value> {
        self.parse_opt(Some(input))
            .map(|value| value.unwrap_or(Value::Null))
    }

    /// Validate, then deserialize the validated value into `T`
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow_schema::{v, SchemaLike};
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct NewUser {
    ///     name: String,
    ///     age: f64,
    /// }
    ///
    /// let schema = v::object()
    ///     .field("name", v::string().min(3))
    ///     .field("age", v::number().min(18.0));
    ///
    /// let user: NewUser = schema.parse_as(&json!({ "name": "Joan", "age": 30 })).unwrap();
    /// assert_eq!(user.name, "Joan");
    /// assert_eq!(user.age, 30.0);
    /// ```
    fn parse_as<T>(&self, input: &Value) -> ValidationResult<T>
    where
        T: DeserializeOwned,
        Self: Sized,
    {
        let value = self.parse(input)?;
        serde_json::from_value(value)
            .map_err(|e| ValidationError::new(format!("Invalid shape: {}", e)))
    }

    /// Let undefined pass through unchanged
    fn optional(&self) -> Schema
    where
        Self: Sized,
    {
        let inner = self.to_schema();
        Schema::from_fn(move |input| match input {
            None => Ok(None),
            Some(_) => inner.parse_opt(input),
        })
    }

    /// Let null pass through unchanged
    fn nullable(&self) -> Schema
    where
        Self: Sized,
    {
        let inner = self.to_schema();
        Schema::from_fn(move |input| match input {
            Some(Value::Null) => Ok(Some(Value::Null)),
            _ => inner.parse_opt(input),
        })
    }

    /// Substitute `value` for undefined input
    ///
    /// The substitute is returned as-is and is not run through the schema.
    fn default(&self, value: impl Into<Value>) -> Schema
    where
        Self: Sized,
    {
        let inner = self.to_schema();
        let fallback = value.into();
        Schema::from_fn(move |input| match input {
            None => Ok(Some(fallback.clone())),
            Some(_) => inner.parse_opt(input),
        })
    }
}

impl SchemaLike for Schema {
    fn parse_opt(&self, input: Option<&Value>) -> ValidationResult<Option<Value>> {
        (self.validator)(input)
    }

    fn to_schema(&self) -> Schema {
        self.clone()
    }
}
