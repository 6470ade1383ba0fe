//! # burrow
//!
//! File-system routing for axum, with request validation.
//!
//! Route files are discovered by [`burrow_router`]; each one is paired with a
//! [`RouteDefinition`] registered under the same relative path in a
//! [`RouteModules`] registry. Declared schemas (from [`burrow_schema`]) run
//! against body, query, params and headers before the handler; the first
//! failure answers `400 {"error": "..."}`.
//!
//! ```no_run
//! use axum::Router;
//! use burrow::{mount, Config, RouteDefinition, RouteModules};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load_default()?;
//! let modules = RouteModules::new()
//!     .with("index.get.rs", RouteDefinition::new(|_| async { "hello" }));
//!
//! let app = mount(Router::new(), &config.routing, &modules)?;
//! let listener = tokio::net::TcpListener::bind(config.server.addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod definition;
pub mod mount;
pub mod response;

pub use burrow_router as router;
pub use burrow_schema as schema;

pub use config::{Config, RoutingOptions, ServerConfig};
pub use context::RouteContext;
pub use definition::{HandlerFn, RouteDefinition, RouteModules, RouteSchema};
pub use mount::{dispatch, mount, mount_with_table, MountError, MountedRoute};
pub use response::ErrorResponse;
