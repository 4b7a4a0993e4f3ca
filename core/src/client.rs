//! Stateless HTTP request builder and response parser for the product API.
//!
//! `ProductClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the caller executes the round-trip.

use crate::error::{ApiError, PRODUCT_NOT_FOUND, SOMETHING_WENT_WRONG};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Product, ProductForm};

/// Synchronous, stateless client for the product API.
///
/// `base_url` points at the API root, e.g. `http://localhost:8081/api`.
#[derive(Debug, Clone)]
pub struct ProductClient {
    base_url: String,
}

impl ProductClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_products(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/products", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_product(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/products/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_product(&self, form: &ProductForm) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(form).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/products", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_product(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/products/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// Unlike the other operations, every 4xx becomes `NotFound` and every
    /// other failure becomes `Internal`, both with fixed messages.
    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        if response.is_success() {
            return decode(&response);
        }
        if response.is_client_error() {
            return Err(ApiError::NotFound(PRODUCT_NOT_FOUND.to_string()));
        }
        Err(ApiError::Internal(SOMETHING_WENT_WRONG.to_string()))
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// The server answers a delete with the removed product.
    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response)?;
        decode(&response)
    }
}

/// 2xx passes, 4xx keeps the upstream status and reason, anything else is
/// an internal failure.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.is_client_error() {
        return Err(ApiError::Rejected {
            status: response.status,
            reason: response.reason(),
        });
    }
    Err(ApiError::Internal(format!(
        "upstream responded with {} {}",
        response.status,
        response.reason()
    )))
}

fn decode<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
