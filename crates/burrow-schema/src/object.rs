//! Object schema
//!
//! Fields are validated in declaration order and the first failure aborts the
//! run. The output holds declared fields only: undeclared input keys are
//! dropped, and fields whose validated value is undefined are left out.

use serde_json::{Map, Value};

use crate::error::{ValidationError, ValidationResult};
use crate::schema::{Schema, SchemaLike};

/// Validates JSON objects field by field; build with [`v::object`](crate::v::object)
#[derive(Clone, Debug)]
pub struct ObjectSchema {
    fields: Vec<(String, Schema)>,
}

impl ObjectSchema {
    pub(crate) fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Return a new schema with `name` appended to the declared fields
    ///
    /// Declaring the same name twice keeps both entries; the later one
    /// overwrites the earlier one's output.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow_schema::{v, SchemaLike};
    /// use serde_json::json;
    ///
    /// let user = v::object()
    ///     .field("name", v::string())
    ///     .field("nickname", v::string().optional());
    ///
    /// let parsed = user.parse(&json!({ "name": "Ada", "admin": true })).unwrap();
    /// assert_eq!(parsed, json!({ "name": "Ada" }));
    /// ```
    pub fn field(&self, name: impl Into<String>, schema: impl SchemaLike) -> Self {
        let mut fields = self.fields.clone();
        fields.push((name.into(), schema.to_schema()));
        Self { fields }
    }

    fn validate(&self, input: Option<&Value>) -> ValidationResult<Option<Value>> {
        let object = match input {
            Some(Value::Object(object)) => object,
            _ => return Err(ValidationError::new("Expected object")),
        };

        self.fields
            .iter()
            .try_fold(Map::new(), |mut out, (name, schema)| {
                let validated = schema
                    .parse_opt(object.get(name))
                    .map_err(|e| e.in_field(name))?;
                if let Some(value) = validated {
                    out.insert(name.clone(), value);
                }
                Ok(out)
            })
            .map(|out| Some(Value::Object(out)))
    }
}

impl<K: Into<String>> FromIterator<(K, Schema)> for ObjectSchema {
    fn from_iter<I: IntoIterator<Item = (K, Schema)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        }
    }
}

impl SchemaLike for ObjectSchema {
    fn parse_opt(&self, input: Option<&Value>) -> ValidationResult<Option<Value>> {
        self.validate(input)
    }

    fn to_schema(&self) -> Schema {
        let this = self.clone();
        Schema::from_fn(move |input| this.validate(input))
    }
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        schema.to_schema()
    }
}
