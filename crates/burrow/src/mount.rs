//! Mounting scanned routes onto an axum router
//!
//! Every route file found under `options.dir` is looked up in the
//! [`RouteModules`] registry by its relative path and registered at
//! `options.prefix + route_path`. Requests run through the definition's
//! schemas first; a validation failure answers 400 without calling the
//! handler.

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodFilter, MethodRouter};
use axum::Router;
use burrow_router::{HttpMethod, RouteFile, ScanError, Scanner};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::RoutingOptions;
use crate::context::RouteContext;
use crate::definition::{RouteDefinition, RouteModules};
use crate::response::ErrorResponse;

#[derive(Debug, Error)]
pub enum MountError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("{method} {path} is declared by both {first} and {second}")]
    Duplicate {
        method: HttpMethod,
        path: String,
        first: String,
        second: String,
    },

    #[error("{path} conflicts with {existing}: same shape, different parameter names")]
    Conflict { path: String, existing: String },

    #[error("route prefix `{0}` must be empty or start with `/` and not end with `/`")]
    InvalidPrefix(String),
}

/// A route that made it onto the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedRoute {
    pub method: HttpMethod,
    pub path: String,
    pub relative: String,
}

/// Scan `options.dir` and register every route found on `router`
///
/// Route files without a registered definition are skipped with a warning.
/// Two files resolving to the same method and path are an error, as are two
/// paths that differ only in parameter names.
pub fn mount<S>(
    router: Router<S>,
    options: &RoutingOptions,
    modules: &RouteModules,
) -> Result<Router<S>, MountError>
where
    S: Clone + Send + Sync + 'static,
{
    mount_with_table(router, options, modules).map(|(router, _)| router)
}

/// [`mount`], also returning what was registered, in scan order
pub fn mount_with_table<S>(
    router: Router<S>,
    options: &RoutingOptions,
    modules: &RouteModules,
) -> Result<(Router<S>, Vec<MountedRoute>), MountError>
where
    S: Clone + Send + Sync + 'static,
{
    check_prefix(&options.prefix)?;

    let scanner = Scanner::local(options.scan_options());
    let files = scanner.scan(&options.dir)?;
    debug!("Scanned {} route files under {}", files.len(), options.dir.display());

    let mut table = RouteTable::default();
    let mut used = HashSet::new();

    for file in files {
        let Some(definition) = modules.get(&file.relative) else {
            warn!(
                "Route {} has no registered definition, skipping",
                file.source.display()
            );
            continue;
        };
        used.insert(file.relative.clone());
        table.add(&options.prefix, file, definition)?;
    }

    for key in modules.keys().filter(|key| !used.contains(*key)) {
        warn!("Registered route module {} matches no route file", key);
    }

    Ok(table.into_router(router))
}

fn check_prefix(prefix: &str) -> Result<(), MountError> {
    if prefix.is_empty() || (prefix.starts_with('/') && !prefix.ends_with('/')) {
        Ok(())
    } else {
        Err(MountError::InvalidPrefix(prefix.to_string()))
    }
}

/// Routes grouped per path, in first-seen order
#[derive(Default)]
struct RouteTable {
    paths: Vec<PathEntry>,
    index: HashMap<String, usize>,
    shapes: HashMap<String, String>,
    mounted: Vec<MountedRoute>,
}

struct PathEntry {
    path: String,
    handlers: Vec<(HttpMethod, String, Arc<RouteDefinition>)>,
}

impl RouteTable {
    fn add(
        &mut self,
        prefix: &str,
        file: RouteFile,
        definition: Arc<RouteDefinition>,
    ) -> Result<(), MountError> {
        let path = format!("{}{}", prefix, file.route_path);

        let shape = route_shape(&path);
        match self.shapes.get(&shape) {
            Some(existing) if *existing != path => {
                return Err(MountError::Conflict {
                    path,
                    existing: existing.clone(),
                });
            }
            Some(_) => {}
            None => {
                self.shapes.insert(shape, path.clone());
            }
        }

        let slot = match self.index.get(&path) {
            Some(&slot) => slot,
            None => {
                self.paths.push(PathEntry {
                    path: path.clone(),
                    handlers: Vec::new(),
                });
                self.index.insert(path.clone(), self.paths.len() - 1);
                self.paths.len() - 1
            }
        };

        let entry = &mut self.paths[slot];
        if let Some((_, first, _)) = entry.handlers.iter().find(|(m, _, _)| *m == file.method) {
            return Err(MountError::Duplicate {
                method: file.method,
                path,
                first: first.clone(),
                second: file.relative,
            });
        }

        self.mounted.push(MountedRoute {
            method: file.method,
            path,
            relative: file.relative.clone(),
        });
        entry.handlers.push((file.method, file.relative, definition));
        Ok(())
    }

    fn into_router<S>(self, mut router: Router<S>) -> (Router<S>, Vec<MountedRoute>)
    where
        S: Clone + Send + Sync + 'static,
    {
        for entry in self.paths {
            let mut method_router = MethodRouter::new();
            for (method, _, definition) in entry.handlers {
                method_router = register(method_router, method, definition);
            }
            router = router.route(&entry.path, method_router);
        }

        for route in &self.mounted {
            info!("Mounted {:<7} {} ({})", route.method.to_string(), route.path, route.relative);
        }

        (router, self.mounted)
    }
}

/// `:name` segments collapse to `:`, so `/users/:id` and `/users/:name` match
fn route_shape(path: &str) -> String {
    path.split('/')
        .map(|segment| if segment.starts_with(':') { ":" } else { segment })
        .collect::<Vec<_>>()
        .join("/")
}

fn method_filter(method: HttpMethod) -> Option<MethodFilter> {
    match method {
        HttpMethod::Get => Some(MethodFilter::GET),
        HttpMethod::Post => Some(MethodFilter::POST),
        HttpMethod::Put => Some(MethodFilter::PUT),
        HttpMethod::Patch => Some(MethodFilter::PATCH),
        HttpMethod::Delete => Some(MethodFilter::DELETE),
        HttpMethod::Options => Some(MethodFilter::OPTIONS),
        HttpMethod::Head => Some(MethodFilter::HEAD),
        HttpMethod::All => None,
    }
}

fn register<S>(
    method_router: MethodRouter<S>,
    method: HttpMethod,
    definition: Arc<RouteDefinition>,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    let handler = move |method: Method,
                        uri: Uri,
                        params: Result<Path<HashMap<String, String>>, PathRejection>,
                        Query(query): Query<HashMap<String, String>>,
                        headers: HeaderMap,
                        body: Bytes| {
        let definition = definition.clone();
        async move {
            // Static paths carry no params; undecodable ones are the client's fault.
            let params = match params {
                Ok(Path(params)) => params,
                Err(PathRejection::MissingPathParams(_)) => HashMap::new(),
                Err(rejection) => return rejection.into_response(),
            };
            let ctx = match RouteContext::from_parts(
                method,
                uri.path(),
                params,
                query,
                &headers,
                &body,
            ) {
                Ok(ctx) => ctx,
                Err(err) => return err.into_response(),
            };
            dispatch(&definition, ctx).await
        }
    };

    match method_filter(method) {
        Some(filter) => method_router.on(filter, handler),
        None => method_router.fallback(handler),
    }
}

/// Validate, then hand over to the route's handler
pub async fn dispatch(definition: &RouteDefinition, ctx: RouteContext) -> Response {
    match definition.schema().validate(ctx) {
        Ok(ctx) => definition.call(ctx).await,
        Err(err) => {
            debug!("Validation failed: {}", err);
            ErrorResponse::from(err).into_response()
        }
    }
}
