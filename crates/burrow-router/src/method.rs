//! HTTP method tokens
//!
//! Closed set of verbs a route file can declare through its trailing filename
//! token (`index.get.rs`, `users.post.rs`). Anything outside the set is not a
//! route file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// HTTP method declared by a route file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
    /// Matches every verb not claimed by a sibling route at the same path
    All,
}

/// Every recognised method, in token-table order
pub const ALL_METHODS: [HttpMethod; 8] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Put,
    HttpMethod::Patch,
    HttpMethod::Delete,
    HttpMethod::Options,
    HttpMethod::Head,
    HttpMethod::All,
];

impl HttpMethod {
    /// Lowercase filename token (`"get"`, `"all"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::All => "all",
        }
    }
}

/// Token that names no known method
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method token `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    /// Parses a filename token; tokens are case-sensitive (`GET` is not a method)
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow_router::HttpMethod;
    ///
    /// assert_eq!("delete".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
    /// assert!("GET".parse::<HttpMethod>().is_err());
    /// assert!("utils".parse::<HttpMethod>().is_err());
    /// ```
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        ALL_METHODS
            .into_iter()
            .find(|method| method.as_str() == token)
            .ok_or_else(|| UnknownMethod(token.to_string()))
    }
}

impl fmt::Display for HttpMethod {
    /// Uppercase verb, as printed in route tables
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}
