//! Number schema and its bounds

use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};
use crate::schema::{Schema, SchemaLike};

/// Validates JSON numbers; build with [`v::number`](crate::v::number)
///
/// The validated value keeps its original representation (`30` stays an
/// integer), bounds compare as `f64`.
#[derive(Clone, Debug)]
pub struct NumberSchema {
    inner: Schema,
}

impl NumberSchema {
    pub(crate) fn new() -> Self {
        Self {
            inner: Schema::from_fn(|input| match input {
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(f) if f.is_nan() => Err(ValidationError::new("Expected valid number")),
                    _ => Ok(Some(Value::Number(n.clone()))),
                },
                _ => Err(ValidationError::new("Expected number")),
            }),
        }
    }

    fn refine<F>(&self, check: F) -> Self
    where
        F: Fn(f64) -> Result<(), String> + Send + Sync + 'static,
    {
        let parent = self.inner.clone();
        Self {
            inner: Schema::from_fn(move |input| {
                let value = parent.parse_opt(input)?;
                if let Some(n) = value.as_ref().and_then(Value::as_f64) {
                    check(n).map_err(ValidationError::new)?;
                }
                Ok(value)
            }),
        }
    }

    /// Require `value >= n`
    pub fn min(&self, n: f64) -> Self {
        self.refine(move |value| {
            if value < n {
                Err(format!("Number too small (min: {})", n))
            } else {
                Ok(())
            }
        })
    }

    /// Require `value <= n`
    pub fn max(&self, n: f64) -> Self {
        self.refine(move |value| {
            if value > n {
                Err(format!("Number too large (max: {})", n))
            } else {
                Ok(())
            }
        })
    }
}

impl SchemaLike for NumberSchema {
    fn parse_opt(&self, input: Option<&Value>) -> ValidationResult<Option<Value>> {
        self.inner.parse_opt(input)
    }

    fn to_schema(&self) -> Schema {
        self.inner.clone()
    }
}

impl From<NumberSchema> for Schema {
    fn from(schema: NumberSchema) -> Self {
        schema.inner
    }
}
