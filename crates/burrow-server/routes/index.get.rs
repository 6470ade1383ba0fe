use axum::Json;
use burrow::RouteDefinition;
use serde_json::json;

pub fn definition() -> RouteDefinition {
    RouteDefinition::new(|_| async {
        Json(json!({
            "name": "burrow",
            "message": "File-system routes with validated requests"
        }))
    })
}
