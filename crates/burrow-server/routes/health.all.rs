use axum::Json;
use burrow::{RouteContext, RouteDefinition};
use serde_json::json;

/// Answers every method not claimed by a sibling route
pub fn definition() -> RouteDefinition {
    RouteDefinition::new(|ctx: RouteContext| async move {
        Json(json!({ "status": "ok", "method": ctx.method.as_str() }))
    })
    .with_meta("summary", "Liveness probe")
}
