use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};
use service::{
    products::ApiClient,
    runtime,
    storage::JsonFileStorage,
    CartContext, ProductLister,
};

/// Initialize logging via shared common utils; `LOG_FORMAT=json` selects structured output
fn init_logging() {
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => init_logging_json(),
        _ => init_logging_default(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Wire storage, cart context, and catalog client from configuration.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    runtime::ensure_storage_dir(&cfg.storage.path).await?;
    let storage = JsonFileStorage::new(&cfg.storage.path).await?;
    info!(path = %cfg.storage.path, keys = storage.len().await, "storage opened");

    let cart = Arc::new(CartContext::new());
    cart.mount(storage, cfg.storage.cart_key.clone()).await?;

    let client = ApiClient::from_config(&cfg.api)?;
    let lister = ProductLister::with_path(Arc::new(client), cfg.api.products_path.clone());
    Ok(AppState { cart, lister })
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown requested");
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_and_validate()?;
    let state = build_state(&cfg).await?;
    let cart = Arc::clone(&state.cart);

    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, api = %cfg.api.base_url, storage = %cfg.storage.path, "starting storefront server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    cart.unmount();
    Ok(())
}
