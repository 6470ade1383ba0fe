//! Route definitions and the module registry
//!
//! A route file on disk names *where* a route lives; the matching
//! [`RouteDefinition`] registered in [`RouteModules`] says *what* it does.

use axum::response::{IntoResponse, Response};
use burrow_schema::{Schema, SchemaLike, ValidationResult};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::context::RouteContext;

/// Type-erased async route handler
pub type HandlerFn =
    Arc<dyn Fn(RouteContext) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// Schemas applied to the inbound request before the handler runs
///
/// Each slot is optional; an empty slot leaves that part of the request
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct RouteSchema {
    pub body: Option<Schema>,
    pub query: Option<Schema>,
    pub params: Option<Schema>,
    pub headers: Option<Schema>,
}

impl RouteSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, schema: impl SchemaLike) -> Self {
        self.body = Some(schema.to_schema());
        self
    }

    pub fn query(mut self, schema: impl SchemaLike) -> Self {
        self.query = Some(schema.to_schema());
        self
    }

    pub fn params(mut self, schema: impl SchemaLike) -> Self {
        self.params = Some(schema.to_schema());
        self
    }

    pub fn headers(mut self, schema: impl SchemaLike) -> Self {
        self.headers = Some(schema.to_schema());
        self
    }

    /// Validate body, query, params, then headers; stops at the first failure
    pub fn validate(&self, mut ctx: RouteContext) -> ValidationResult<RouteContext> {
        if let Some(schema) = &self.body {
            ctx.body = schema.parse_opt(ctx.body.as_ref())?;
        }
        if let Some(schema) = &self.query {
            ctx.query = schema.parse(&ctx.query)?;
        }
        if let Some(schema) = &self.params {
            ctx.params = schema.parse(&ctx.params)?;
        }
        if let Some(schema) = &self.headers {
            ctx.headers = schema.parse(&ctx.headers)?;
        }
        Ok(ctx)
    }
}

/// What a route file exports: a handler, optional schemas, optional metadata
#[derive(Clone)]
pub struct RouteDefinition {
    handler: HandlerFn,
    schema: RouteSchema,
    meta: HashMap<String, Value>,
}

impl RouteDefinition {
    /// # Examples
    ///
    /// ```
    /// use burrow::{RouteContext, RouteDefinition, RouteSchema};
    /// use burrow::schema::v;
    /// use axum::Json;
    /// use serde_json::json;
    ///
    /// let route = RouteDefinition::new(|ctx: RouteContext| async move {
    ///     Json(json!({ "id": ctx.params["id"] }))
    /// })
    /// .with_schema(RouteSchema::new().params(v::object().field("id", v::string())))
    /// .with_meta("summary", "Fetch one user");
    ///
    /// assert_eq!(route.meta("summary"), Some(&json!("Fetch one user")));
    /// ```
    pub fn new<H, Fut, R>(handler: H) -> Self
    where
        H: Fn(RouteContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        let handler: HandlerFn = Arc::new(move |ctx| {
            let fut = handler(ctx);
            Box::pin(async move { fut.await.into_response() })
        });

        Self {
            handler,
            schema: RouteSchema::default(),
            meta: HashMap::new(),
        }
    }

    pub fn with_schema(mut self, schema: RouteSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn schema(&self) -> &RouteSchema {
        &self.schema
    }

    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    /// Run the handler on an already validated context
    pub async fn call(&self, ctx: RouteContext) -> Response {
        (self.handler)(ctx).await
    }
}

impl std::fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("schema", &self.schema)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Route definitions keyed by their file's path relative to the route root
///
/// Keys use `/` separators and keep the file name as on disk:
/// `users/[id]/index.get.rs`.
#[derive(Debug, Clone, Default)]
pub struct RouteModules {
    modules: HashMap<String, Arc<RouteDefinition>>,
}

impl RouteModules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, relative: impl Into<String>, definition: RouteDefinition) -> Self {
        self.insert(relative, definition);
        self
    }

    /// Register `definition`, replacing any earlier one under the same key
    pub fn insert(&mut self, relative: impl Into<String>, definition: RouteDefinition) {
        self.modules.insert(relative.into(), Arc::new(definition));
    }

    pub fn get(&self, relative: &str) -> Option<Arc<RouteDefinition>> {
        self.modules.get(relative).cloned()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
