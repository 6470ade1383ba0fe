//! Route modules compiled from `../routes`
//!
//! The route tree is read twice: the scanner walks it at startup to find
//! paths and methods, and the files are compiled in here so each one's
//! `definition()` can be registered under the same relative path.

use burrow::RouteModules;

#[path = "../routes/index.get.rs"]
mod index_get;

#[path = "../routes/health.all.rs"]
mod health_all;

#[path = "../routes/(admin)/dashboard.get.rs"]
mod admin_dashboard_get;

#[path = "../routes/users/index.post.rs"]
mod users_index_post;

#[path = "../routes/users/[id]/index.get.rs"]
mod users_id_index_get;

#[path = "../routes/users/[id]/index.delete.rs"]
mod users_id_index_delete;

/// Every compiled route, keyed by its path relative to the route root
pub fn modules() -> RouteModules {
    RouteModules::new()
        .with("index.get.rs", index_get::definition())
        .with("health.all.rs", health_all::definition())
        .with("(admin)/dashboard.get.rs", admin_dashboard_get::definition())
        .with("users/index.post.rs", users_index_post::definition())
        .with("users/[id]/index.get.rs", users_id_index_get::definition())
        .with("users/[id]/index.delete.rs", users_id_index_delete::definition())
}
