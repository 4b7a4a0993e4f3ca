//! Product DTOs as seen by API consumers.
//!
//! These mirror the resource server's schema but are defined independently;
//! the integration tests catch drift between the two crates.

use serde::{Deserialize, Deserializer, Serialize};

/// A product returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating a product. Forwarded as-is; the server validates it.
///
/// A `null` title or price reads as empty/zero, same as on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductForm {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
