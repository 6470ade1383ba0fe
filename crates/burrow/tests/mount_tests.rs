//! Integration tests for burrow
//!
//! Each test writes a route tree to a temp dir, registers definitions for
//! it and drives the mounted router with `oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router};
use burrow::schema::{v, SchemaLike};
use burrow::*;
use pretty_assertions::assert_eq;
use regex::Regex;
use rstest::rstest;
use serde_json::{json, Value};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn tree(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
    }
    dir
}

const DEMO_FILES: &[&str] = &[
    "index.get.rs",
    "users/index.post.rs",
    "users/[id]/index.get.rs",
    "users/[id]/index.delete.rs",
    "(admin)/dashboard.get.rs",
    "health.all.rs",
];

fn demo_modules() -> RouteModules {
    let email = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    let id_params = || v::object().field("id", v::string());

    RouteModules::new()
        .with(
            "index.get.rs",
            RouteDefinition::new(|_| async { Json(json!({ "message": "Welcome" })) }),
        )
        .with(
            "users/index.post.rs",
            RouteDefinition::new(|ctx: RouteContext| async move {
                (StatusCode::CREATED, Json(json!({ "created": ctx.body })))
            })
            .with_schema(
                RouteSchema::new().body(
                    v::object()
                        .field("name", v::string().min(3))
                        .field("email", v::string().regex(email))
                        .field("age", v::number().min(18.0)),
                ),
            ),
        )
        .with(
            "users/[id]/index.get.rs",
            RouteDefinition::new(|ctx: RouteContext| async move {
                Json(json!({ "id": ctx.params["id"] }))
            })
            .with_schema(RouteSchema::new().params(id_params())),
        )
        .with(
            "users/[id]/index.delete.rs",
            RouteDefinition::new(|ctx: RouteContext| async move {
                Json(json!({ "deleted": ctx.params["id"] }))
            })
            .with_schema(RouteSchema::new().params(id_params())),
        )
        .with(
            "(admin)/dashboard.get.rs",
            RouteDefinition::new(|_| async { Json(json!({ "dashboard": true })) }),
        )
        .with(
            "health.all.rs",
            RouteDefinition::new(|ctx: RouteContext| async move {
                Json(json!({ "status": "ok", "method": ctx.method.as_str() }))
            }),
        )
}

fn demo_app(dir: &TempDir, prefix: &str) -> Router {
    let options = RoutingOptions::new(dir.path()).with_prefix(prefix);
    mount(Router::<()>::new(), &options, &demo_modules()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_mount_table_follows_scan_order() {
    let dir = tree(DEMO_FILES);
    let options = RoutingOptions::new(dir.path()).with_prefix("/api");
    let (_, table) = mount_with_table(Router::<()>::new(), &options, &demo_modules()).unwrap();

    let table: Vec<(String, String)> = table
        .into_iter()
        .map(|route| (route.method.to_string(), route.path))
        .collect();

    assert_eq!(
        table,
        vec![
            ("GET".to_string(), "/api/dashboard".to_string()),
            ("ALL".to_string(), "/api/health".to_string()),
            ("GET".to_string(), "/api/".to_string()),
            ("DELETE".to_string(), "/api/users/:id".to_string()),
            ("GET".to_string(), "/api/users/:id".to_string()),
            ("POST".to_string(), "/api/users".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_root_route_without_prefix() {
    let dir = tree(DEMO_FILES);
    let (status, body) = send(demo_app(&dir, ""), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Welcome" }));
}

#[tokio::test]
async fn test_group_directory_adds_no_segment() {
    let dir = tree(DEMO_FILES);
    let (status, body) = send(demo_app(&dir, "/api"), get("/api/dashboard")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "dashboard": true }));
}

#[rstest]
#[case("GET")]
#[case("POST")]
#[case("PUT")]
#[case("PATCH")]
#[case("DELETE")]
#[tokio::test]
async fn test_all_matches_every_method(#[case] method: &str) {
    let dir = tree(DEMO_FILES);
    let request = Request::builder()
        .method(method)
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(demo_app(&dir, "/api"), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "method": method }));
}

#[tokio::test]
async fn test_specific_method_wins_over_all() {
    let dir = tree(&["ping.get.rs", "ping.all.rs"]);
    let modules = RouteModules::new()
        .with("ping.get.rs", RouteDefinition::new(|_| async { "get" }))
        .with("ping.all.rs", RouteDefinition::new(|_| async { "all" }));
    let app = mount(Router::<()>::new(), &RoutingOptions::new(dir.path()), &modules).unwrap();

    let response = app.clone().oneshot(get("/ping")).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"get");

    let request = Request::builder()
        .method("PUT")
        .uri("/ping")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"all");
}

#[tokio::test]
async fn test_unregistered_method_is_rejected() {
    let dir = tree(DEMO_FILES);
    let request = Request::builder()
        .method("PUT")
        .uri("/api/users")
        .body(Body::empty())
        .unwrap();
    let response = demo_app(&dir, "/api").oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_missing_definition_is_skipped() {
    let dir = tree(&["index.get.rs", "orphan.get.rs"]);
    let modules = RouteModules::new().with("index.get.rs", RouteDefinition::new(|_| async { "ok" }));
    let (app, table) = mount_with_table(Router::<()>::new(), &RoutingOptions::new(dir.path()), &modules).unwrap();

    assert_eq!(table.len(), 1);
    let response = app.oneshot(get("/orphan")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_route_is_an_error() {
    let dir = tree(&["users.get.rs", "users/index.get.rs"]);
    let modules = RouteModules::new()
        .with("users.get.rs", RouteDefinition::new(|_| async { "a" }))
        .with("users/index.get.rs", RouteDefinition::new(|_| async { "b" }));

    let err = mount(Router::<()>::new(), &RoutingOptions::new(dir.path()), &modules).unwrap_err();
    match err {
        MountError::Duplicate { path, first, second, .. } => {
            assert_eq!(path, "/users");
            assert_eq!(first, "users/index.get.rs");
            assert_eq!(second, "users.get.rs");
        }
        other => panic!("expected duplicate, got {:?}", other),
    }
}

#[tokio::test]
async fn test_conflicting_parameter_names_are_an_error() {
    let dir = tree(&["users/[id]/index.get.rs", "users/[name]/index.post.rs"]);
    let modules = RouteModules::new()
        .with("users/[id]/index.get.rs", RouteDefinition::new(|_| async { "a" }))
        .with("users/[name]/index.post.rs", RouteDefinition::new(|_| async { "b" }));

    let err = mount(Router::<()>::new(), &RoutingOptions::new(dir.path()), &modules).unwrap_err();
    assert!(matches!(err, MountError::Conflict { .. }), "{:?}", err);
}

#[tokio::test]
async fn test_missing_route_dir_is_an_error() {
    let dir = TempDir::new().unwrap();
    let options = RoutingOptions::new(dir.path().join("missing"));

    let err = mount(Router::<()>::new(), &options, &RouteModules::new()).unwrap_err();
    assert!(matches!(err, MountError::Scan(_)), "{:?}", err);
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_valid_body_reaches_handler() {
    let dir = tree(DEMO_FILES);
    let request = post_json(
        "/api/users",
        json!({ "name": "Joan", "email": "joan@example.com", "age": 30, "admin": true }),
    );
    let (status, body) = send(demo_app(&dir, "/api"), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "created": { "name": "Joan", "email": "joan@example.com", "age": 30 } })
    );
}

#[rstest]
#[case(json!({ "name": "Jo", "email": "bad", "age": 10 }), "Field \"name\": String too short (min: 3)")]
#[case(json!({ "name": "Joan", "email": "bad", "age": 10 }), "Field \"email\": String does not match pattern")]
#[case(json!({ "name": "Joan", "email": "j@x.io", "age": 10 }), "Field \"age\": Number too small (min: 18)")]
#[case(json!({ "name": "Joan", "email": "j@x.io" }), "Field \"age\": Expected number")]
#[case(json!([1, 2]), "Expected object")]
#[tokio::test]
async fn test_invalid_body_is_rejected(#[case] payload: Value, #[case] message: &str) {
    let dir = tree(DEMO_FILES);
    let (status, body) = send(demo_app(&dir, "/api"), post_json("/api/users", payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": message }));
}

#[tokio::test]
async fn test_missing_body_is_rejected() {
    let dir = tree(DEMO_FILES);
    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(demo_app(&dir, "/api"), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Expected object" }));
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let dir = tree(DEMO_FILES);
    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(demo_app(&dir, "/api"), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_form_body_is_validated() {
    let dir = tree(&["signup.post.rs"]);
    let modules = RouteModules::new().with(
        "signup.post.rs",
        RouteDefinition::new(|ctx: RouteContext| async move { Json(json!({ "body": ctx.body })) })
            .with_schema(RouteSchema::new().body(v::object().field("name", v::string().min(3)))),
    );
    let app = mount(Router::<()>::new(), &RoutingOptions::new(dir.path()), &modules).unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/signup")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("name=Joan+Doe&extra=1"))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "body": { "name": "Joan Doe" } }));
}

#[tokio::test]
async fn test_params_are_validated_and_passed() {
    let dir = tree(DEMO_FILES);
    let (status, body) = send(demo_app(&dir, "/api"), get("/api/users/42")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "42" }));

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/users/7")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(demo_app(&dir, "/api"), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deleted": "7" }));
}

#[tokio::test]
async fn test_undecodable_param_is_rejected_before_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let dir = tree(&["items/[id]/index.get.rs"]);
    let modules = RouteModules::new().with(
        "items/[id]/index.get.rs",
        RouteDefinition::new(move |ctx: RouteContext| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!(ctx.params))
            }
        }),
    );
    let app = mount(Router::<()>::new(), &RoutingOptions::new(dir.path()), &modules).unwrap();

    // %FF is not UTF-8 once decoded
    let response = app.clone().oneshot(get("/items/%FF")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let (status, body) = send(app, get("/items/abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "abc" }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_query_and_headers_are_validated() {
    let dir = tree(&["search.get.rs"]);
    let modules = RouteModules::new().with(
        "search.get.rs",
        RouteDefinition::new(|ctx: RouteContext| async move {
            Json(json!({ "query": ctx.query, "headers": ctx.headers }))
        })
        .with_schema(
            RouteSchema::new()
                .query(v::object().field("q", v::string().min(1)).field("page", v::string().default("1")))
                .headers(v::object().field("x-api-key", v::string().length(4))),
        ),
    );
    let app = mount(Router::<()>::new(), &RoutingOptions::new(dir.path()), &modules).unwrap();

    let request = Request::builder()
        .uri("/search?q=rust")
        .header("X-Api-Key", "abcd")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "query": { "q": "rust", "page": "1" }, "headers": { "x-api-key": "abcd" } })
    );

    // query is checked before headers
    let (status, body) = send(app, get("/search")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Field \"q\": Expected string" }));
}

#[tokio::test]
async fn test_handler_not_called_on_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let dir = tree(&["items.post.rs"]);
    let modules = RouteModules::new().with(
        "items.post.rs",
        RouteDefinition::new(move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                StatusCode::NO_CONTENT
            }
        })
        .with_schema(RouteSchema::new().body(v::object().field("qty", v::number().min(1.0)))),
    );
    let app = mount(Router::<()>::new(), &RoutingOptions::new(dir.path()), &modules).unwrap();

    let (status, _) = send(app.clone(), post_json("/items", json!({ "qty": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let (status, _) = send(app, post_json("/items", json!({ "qty": 2 }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_handler_errors_use_their_own_response() {
    let dir = tree(&["boom.get.rs"]);
    let modules = RouteModules::new().with(
        "boom.get.rs",
        RouteDefinition::new(|_| async {
            Err::<Json<Value>, _>(ErrorResponse::internal("database unavailable"))
        }),
    );
    let app = mount(Router::<()>::new(), &RoutingOptions::new(dir.path()), &modules).unwrap();
    let (status, body) = send(app, get("/boom")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "database unavailable" }));
}

#[tokio::test]
async fn test_typed_body_access() {
    #[derive(serde::Deserialize)]
    struct NewItem {
        name: String,
        qty: f64,
    }

    let dir = tree(&["items.post.rs"]);
    let modules = RouteModules::new().with(
        "items.post.rs",
        RouteDefinition::new(|ctx: RouteContext| async move {
            let item: NewItem = ctx.body_as()?;
            Ok::<_, ErrorResponse>(format!("{} x{}", item.name, item.qty).into_response())
        })
        .with_schema(
            RouteSchema::new().body(
                v::object()
                    .field("name", v::string())
                    .field("qty", v::number().default(1)),
            ),
        ),
    );
    let app = mount(Router::<()>::new(), &RoutingOptions::new(dir.path()), &modules).unwrap();

    let response = app.oneshot(post_json("/items", json!({ "name": "bolt" }))).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"bolt x1");
}
