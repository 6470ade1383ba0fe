//! Per-request context handed to route handlers
//!
//! Params, query and headers arrive as JSON objects of strings; the body as
//! parsed JSON, a form object, plain text, or undefined when empty. Declared
//! schemas replace each part with its validated value before the handler
//! sees it.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, Method};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::response::ErrorResponse;

#[derive(Debug, Clone)]
pub struct RouteContext {
    pub method: Method,
    /// Request path as received, prefix included
    pub path: String,
    pub params: Value,
    pub query: Value,
    /// Header names are lowercase
    pub headers: Value,
    /// `None` when the request had no body
    pub body: Option<Value>,
}

impl RouteContext {
    /// Builds a raw (not yet validated) context from request parts
    ///
    /// Fails only when the body claims to be JSON and is not.
    pub fn from_parts(
        method: Method,
        path: impl Into<String>,
        params: HashMap<String, String>,
        query: HashMap<String, String>,
        headers: &HeaderMap,
        body: &Bytes,
    ) -> Result<Self, ErrorResponse> {
        let body = parse_body(headers, body)?;

        Ok(Self {
            method,
            path: path.into(),
            params: string_map(params),
            query: string_map(query),
            headers: header_map(headers),
            body,
        })
    }

    /// Deserialize the body; a missing body deserializes from `null`
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, ErrorResponse> {
        let body = self.body.clone().unwrap_or(Value::Null);
        Ok(serde_json::from_value(body)?)
    }

    pub fn params_as<T: DeserializeOwned>(&self) -> Result<T, ErrorResponse> {
        Ok(serde_json::from_value(self.params.clone())?)
    }

    pub fn query_as<T: DeserializeOwned>(&self) -> Result<T, ErrorResponse> {
        Ok(serde_json::from_value(self.query.clone())?)
    }

    /// Single path parameter as a string
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }

    /// Single header value (name is matched lowercase)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name.to_ascii_lowercase())
            .and_then(Value::as_str)
    }
}

fn string_map(map: HashMap<String, String>) -> Value {
    Value::Object(
        map.into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect(),
    )
}

/// Repeated headers are joined with `, `
fn header_map(headers: &HeaderMap) -> Value {
    let mut out = Map::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match out.get_mut(name.as_str()) {
            Some(Value::String(existing)) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            _ => {
                out.insert(name.as_str().to_string(), Value::String(value));
            }
        }
    }
    Value::Object(out)
}

fn parse_body(headers: &HeaderMap, body: &Bytes) -> Result<Option<Value>, ErrorResponse> {
    if body.is_empty() {
        return Ok(None);
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") {
        return serde_json::from_slice(body)
            .map(Some)
            .map_err(|e| ErrorResponse::bad_request(format!("Invalid JSON body: {}", e)));
    }

    if content_type.contains("application/x-www-form-urlencoded") {
        return Ok(Some(parse_form(&String::from_utf8_lossy(body))));
    }

    Ok(Some(Value::String(
        String::from_utf8_lossy(body).into_owned(),
    )))
}

fn parse_form(form_str: &str) -> Value {
    let fields = form_str
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let value = parts.next().unwrap_or("");
            Some((decode_form_component(key), Value::String(decode_form_component(value))))
        });

    Value::Object(fields.collect())
}

fn decode_form_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(raw)
}
