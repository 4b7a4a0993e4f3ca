//! Storage collaborator for product records.
//!
//! Handlers only see [`ProductRepository`]; the in-memory implementation is
//! what the binary and the tests run against.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::model::{NewProduct, Product};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;
    async fn find_by_id(&self, id: u64) -> Result<Option<Product>, StoreError>;
    /// Persists the product and returns it with its assigned id.
    async fn save(&self, product: NewProduct) -> Result<Product, StoreError>;
    async fn delete(&self, product: &Product) -> Result<(), StoreError>;
}

pub type SharedRepository = Arc<dyn ProductRepository>;

#[derive(Default)]
struct Inner {
    last_id: u64,
    products: BTreeMap<u64, Product>,
}

/// Ids start at 1 and are never reused, even after a delete.
#[derive(Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<Inner>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.products.get(&id).cloned())
    }

    async fn save(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let product = product.into_product(inner.last_id);
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        self.inner.write().await.products.remove(&product.id);
        Ok(())
    }
}
