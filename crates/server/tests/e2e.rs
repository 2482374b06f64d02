use std::net::SocketAddr;

use configs::AppConfig;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, startup};

struct TestApp {
    base_url: String,
    storage_path: String,
}

fn config(storage_path: &str, api_base_url: &str) -> anyhow::Result<AppConfig> {
    let mut cfg = configs::load_from_str(&format!(
        "[api]\nbase_url = \"{api_base_url}\"\nrequest_timeout_secs = 2\n[storage]\npath = \"{storage_path}\"\n"
    ))?;
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

async fn start_server(storage_path: String, api_base_url: &str) -> anyhow::Result<TestApp> {
    let cfg = config(&storage_path, api_base_url)?;
    let state = startup::build_state(&cfg).await?;
    let app = routes::build_router(state, CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url: format!("http://{}", addr), storage_path })
}

/// A catalog upstream serving a fixed product list.
async fn start_catalog() -> anyhow::Result<String> {
    let router = axum::Router::new().route(
        "/products",
        axum::routing::get(|| async {
            axum::Json(json!([
                {"id":"1","title":"Camiseta","image_url":"https://cdn/1.png","price":49.9},
                {"id":"2","title":"Caneca","image_url":"https://cdn/2.png","price":12.5}
            ]))
        }),
    );
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{}", addr))
}

fn temp_storage() -> String {
    std::env::temp_dir()
        .join(format!("storefront_e2e_{}", Uuid::new_v4()))
        .join("storage.json")
        .to_string_lossy()
        .into_owned()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(temp_storage(), "http://127.0.0.1:9").await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert!(res.status().is_success());
    assert_eq!(res.json::<Value>().await?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn e2e_products_pass_through() -> anyhow::Result<()> {
    let catalog = start_catalog().await?;
    let app = start_server(temp_storage(), &catalog).await?;
    let body: Value = reqwest::get(format!("{}/products", app.base_url)).await?.json().await?;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[1]["title"], "Caneca");
    Ok(())
}

#[tokio::test]
async fn e2e_unreachable_catalog_lists_nothing() -> anyhow::Result<()> {
    let app = start_server(temp_storage(), "http://127.0.0.1:9").await?;
    let res = reqwest::get(format!("{}/products", app.base_url)).await?;
    assert!(res.status().is_success());
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_cart_survives_restart() -> anyhow::Result<()> {
    let storage_path = temp_storage();
    let app = start_server(storage_path.clone(), "http://127.0.0.1:9").await?;
    let client = reqwest::Client::new();
    let item = json!({"id":"A","title":"Camiseta","image_url":"a.png","price":10.0});

    client.post(format!("{}/cart/items", app.base_url)).json(&item).send().await?;
    client.post(format!("{}/cart/items", app.base_url)).json(&item).send().await?;
    let after_inc: Value = client
        .post(format!("{}/cart/items/A/increment", app.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(after_inc[0]["quantity"], 3);

    // absent id is a no-op
    let unchanged: Value = client
        .post(format!("{}/cart/items/missing/decrement", app.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(unchanged, after_inc);

    // a second server over the same storage file sees the same cart
    let restarted = start_server(app.storage_path.clone(), "http://127.0.0.1:9").await?;
    let cart: Value = reqwest::get(format!("{}/cart", restarted.base_url)).await?.json().await?;
    assert_eq!(cart, json!([{"id":"A","title":"Camiseta","image_url":"a.png","price":10.0,"quantity":3}]));

    if let Some(dir) = std::path::Path::new(&storage_path).parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
    Ok(())
}
