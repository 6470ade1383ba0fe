mod routes;

use anyhow::Context;
use axum::Router;
use burrow::{mount_with_table, Config};
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = Config::load(root.join("burrow.toml")).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}, using defaults", e);
        Config::default()
    });
    let options = config.routing.clone().relative_to(root);

    info!("Scanning routes in {}", options.dir.display());

    let (app, table) = mount_with_table(Router::<()>::new(), &options, &routes::modules())
        .context("Failed to mount routes")?;

    println!("Available routes:");
    for route in &table {
        println!("  {:<7} {}", route.method.to_string(), route.path);
    }

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    println!("Server running at http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
