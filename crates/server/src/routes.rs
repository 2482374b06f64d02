use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use models::{LineItem, Product};
use service::{CartContext, ProductLister};

use crate::errors::ApiError;

/// Shared handler state: the cart provider and the catalog lister.
#[derive(Clone)]
pub struct AppState {
    pub cart: Arc<CartContext>,
    pub lister: ProductLister,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.lister.list().await)
}

async fn get_cart(State(state): State<AppState>) -> Result<Json<Vec<LineItem>>, ApiError> {
    let cart = state.cart.use_cart()?;
    Ok(Json(cart.products().await))
}

async fn add_item(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<Json<Vec<LineItem>>, ApiError> {
    let cart = state.cart.use_cart()?;
    cart.add_to_cart(product).await?;
    Ok(Json(cart.products().await))
}

async fn increment_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LineItem>>, ApiError> {
    let cart = state.cart.use_cart()?;
    cart.increment(&id).await?;
    Ok(Json(cart.products().await))
}

async fn decrement_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LineItem>>, ApiError> {
    let cart = state.cart.use_cart()?;
    cart.decrement(&id).await?;
    Ok(Json(cart.products().await))
}

/// Build the application router: health, catalog, and cart routes.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products))
        .route("/cart", get(get_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id/increment", post(increment_item))
        .route("/cart/items/:id/decrement", post(decrement_item))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
