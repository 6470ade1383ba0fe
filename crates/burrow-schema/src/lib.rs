//! # burrow-schema
//!
//! Composable validators for untrusted JSON input (request bodies, query
//! strings, path parameters, headers).
//!
//! - **Immutable nodes**: every combinator returns a new schema; the one it
//!   was called on stays valid and can be reused or shared across threads
//! - **Declaration order is evaluation order**: `v::string().min(3).regex(p)`
//!   checks the type, then the length, then the pattern
//! - **Fail-fast**: a run stops at the first failure and reports exactly one
//!   [`ValidationError`], prefixed with field/index context by each enclosing
//!   object or array
//!
//! ## Example
//!
//! ```
//! use burrow_schema::{v, SchemaLike};
//! use regex::Regex;
//! use serde_json::json;
//!
//! let new_user = v::object()
//!     .field("name", v::string().min(3))
//!     .field("email", v::string().regex(Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()))
//!     .field("age", v::number().min(18.0));
//!
//! let err = new_user
//!     .parse(&json!({ "name": "Jo", "email": "bad", "age": 10 }))
//!     .unwrap_err();
//! assert_eq!(err.message(), "Field \"name\": String too short (min: 3)");
//! ```

pub mod error;
mod number;
mod object;
mod schema;
mod string;
pub mod v;

pub use error::{PathSegment, ValidationError, ValidationResult};
pub use number::NumberSchema;
pub use object::ObjectSchema;
pub use schema::{Schema, SchemaLike};
pub use string::StringSchema;
