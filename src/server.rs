use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::info;

use crate::store::ProductStore;

/// Shared handler state: the single store instance behind a lock.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<ProductStore>>,
}

/// Query parameters for `GET /products`
#[derive(Debug, Deserialize)]
struct ListParams {
    /// Cap on the number of records returned; non-numeric values are
    /// ignored and the full list is returned.
    limit: Option<String>,
}

/// Build the API router over a shared store.
pub fn router(store: Arc<RwLock<ProductStore>>) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:pid", get(get_product))
        .with_state(AppState { store })
}

fn load_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Error loading products" })),
    )
        .into_response()
}

fn product_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Product not found" })),
    )
        .into_response()
}

/// `GET /products` - reload from disk, return all records or the first
/// `limit` of them.
async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let mut store = state.store.write().await;
    if !store.load().await.is_loaded() {
        return load_failed();
    }

    let products = store.all();
    let limited = match params.limit.as_deref().and_then(|raw| raw.parse::<usize>().ok()) {
        Some(n) => &products[..n.min(products.len())],
        None => products,
    };
    Json(limited).into_response()
}

/// `GET /products/:pid` - reload from disk, then look up one record.
async fn get_product(State(state): State<AppState>, Path(pid): Path<String>) -> Response {
    let mut store = state.store.write().await;
    if !store.load().await.is_loaded() {
        return load_failed();
    }

    // A pid that does not parse as an id can never match a record.
    match pid.parse::<u64>().ok().and_then(|id| store.get(id)) {
        Some(product) => Json(product).into_response(),
        None => product_not_found(),
    }
}

/// HTTP front end for the product store.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    store: Arc<RwLock<ProductStore>>,
}

impl Server {
    /// Bind the listener and take ownership of the store.
    pub async fn bind(addr: &str, store: ProductStore) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server bound to {}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            store: Arc::new(RwLock::new(store)),
        })
    }

    /// Get local listening address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve requests until the process is stopped.
    pub async fn run(self) -> std::io::Result<()> {
        info!("Server started, listening on {}", self.local_addr);
        axum::serve(self.listener, router(self.store)).await
    }
}
