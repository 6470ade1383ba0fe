use axum::http::StatusCode;
use axum::Json;
use burrow::schema::v;
use burrow::{ErrorResponse, RouteContext, RouteDefinition, RouteSchema};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

#[derive(Debug, Serialize, Deserialize)]
struct NewUser {
    name: String,
    email: String,
    age: f64,
}

pub fn definition() -> RouteDefinition {
    RouteDefinition::new(|ctx: RouteContext| async move {
        let user: NewUser = ctx.body_as()?;
        Ok::<_, ErrorResponse>((StatusCode::CREATED, Json(json!({ "created": user }))))
    })
    .with_schema(
        RouteSchema::new().body(
            v::object()
                .field("name", v::string().min(3))
                .field("email", v::string().regex(EMAIL_REGEX.clone()))
                .field("age", v::number().min(18.0)),
        ),
    )
}
