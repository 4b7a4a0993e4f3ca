//! Consumer-facing proxy for the product service.
//!
//! Each route builds a request with [`ProductClient`], runs it through a
//! blocking [`Transport`] on tokio's blocking pool, and lets the client's
//! `parse_*` methods decide between the decoded body and a [`ConsumerError`].

pub mod config;
pub mod error;
pub mod transport;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use product_core::{HttpRequest, HttpResponse, Product, ProductClient, ProductForm};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::ConsumerConfig;
pub use error::ConsumerError;
pub use transport::{Transport, TransportError, UreqTransport};

#[derive(Clone)]
pub struct Upstream {
    client: ProductClient,
    transport: Arc<dyn Transport>,
}

impl Upstream {
    pub fn new(client: ProductClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ConsumerError> {
        let transport = Arc::clone(&self.transport);
        let response = tokio::task::spawn_blocking(move || transport.execute(request)).await??;
        Ok(response)
    }
}

/// Router forwarding to `product_api_url` over ureq.
pub fn app(product_api_url: &str) -> Router {
    app_with(Upstream::new(
        ProductClient::new(product_api_url),
        Arc::new(UreqTransport::new()),
    ))
}

pub fn app_with(upstream: Upstream) -> Router {
    Router::new()
        .route("/findAllProducts", get(find_all_products))
        .route("/findProduct/{id}", get(find_product))
        .route("/storeProducts", post(store_product))
        .route("/deleteProduct/{id}", delete(delete_product))
        .layer(TraceLayer::new_for_http())
        .with_state(upstream)
}

pub async fn run(listener: TcpListener, product_api_url: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(product_api_url)).await
}

async fn find_all_products(
    State(up): State<Upstream>,
) -> Result<Json<Vec<Product>>, ConsumerError> {
    let response = up.send(up.client.build_list_products()).await?;
    Ok(Json(up.client.parse_list_products(response)?))
}

async fn find_product(
    State(up): State<Upstream>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, ConsumerError> {
    let response = up.send(up.client.build_get_product(id)).await?;
    Ok(Json(up.client.parse_get_product(response)?))
}

async fn store_product(
    State(up): State<Upstream>,
    Json(form): Json<ProductForm>,
) -> Result<Json<Product>, ConsumerError> {
    let request = up.client.build_create_product(&form)?;
    let response = up.send(request).await?;
    let product = up.client.parse_create_product(response)?;
    tracing::info!(id = product.id, "product stored upstream");
    Ok(Json(product))
}

async fn delete_product(
    State(up): State<Upstream>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, ConsumerError> {
    let response = up.send(up.client.build_delete_product(id)).await?;
    let product = up.client.parse_delete_product(response)?;
    tracing::info!(id, "product deleted upstream");
    Ok(Json(product))
}
