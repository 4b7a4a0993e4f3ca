//! Product resource service.
//!
//! Exposes list/get/create/delete over JSON under `/api/products`, backed by
//! a [`ProductRepository`]. Validation happens on create only.

pub mod config;
pub mod error;
pub mod model;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ServiceError;
pub use model::{NewProduct, Product, ProductForm};
pub use store::{InMemoryProductRepository, ProductRepository, SharedRepository, StoreError};

/// Router backed by a fresh in-memory repository.
pub fn app() -> Router {
    app_with(Arc::new(InMemoryProductRepository::new()))
}

pub fn app_with(repo: SharedRepository) -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).delete(delete_product),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(repo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(
    State(repo): State<SharedRepository>,
) -> Result<Json<Vec<Product>>, ServiceError> {
    Ok(Json(repo.find_all().await?))
}

async fn get_product(
    State(repo): State<SharedRepository>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, ServiceError> {
    repo.find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ServiceError::NotFound(id))
}

async fn create_product(
    State(repo): State<SharedRepository>,
    Json(form): Json<ProductForm>,
) -> Result<impl IntoResponse, ServiceError> {
    let new = form.validate().inspect_err(|e| {
        tracing::warn!(reason = %e, "rejected product form");
    })?;
    let product = repo.save(new).await?;
    tracing::info!(id = product.id, title = %product.title, "product created");

    let location = format!("/api/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

async fn delete_product(
    State(repo): State<SharedRepository>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, ServiceError> {
    let product = repo.find_by_id(id).await?.ok_or(ServiceError::NotFound(id))?;
    repo.delete(&product).await?;
    tracing::info!(id, "product deleted");
    Ok(Json(product))
}
