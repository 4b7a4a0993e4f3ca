//! Product records and the create-form that precedes them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ServiceError;

/// A stored product. `id` is assigned by the repository on save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Unvalidated create payload.
///
/// Missing or `null` `title` and `price` fall back to their defaults so that
/// they are rejected by [`ProductForm::validate`] with a 400 rather than by
/// the JSON extractor.
#[derive(Clone, Debug, Deserialize)]
pub struct ProductForm {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A form that passed validation and is ready to be persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
}

impl NewProduct {
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
        }
    }
}

impl ProductForm {
    /// Title is checked before price.
    pub fn validate(self) -> Result<NewProduct, ServiceError> {
        if self.title.trim().is_empty() {
            return Err(ServiceError::InvalidArgument(
                "Product title is required".to_string(),
            ));
        }
        if self.price.is_nan() || self.price <= 0.0 {
            return Err(ServiceError::InvalidArgument(
                "Product price must be greater than zero".to_string(),
            ));
        }
        Ok(NewProduct {
            title: self.title,
            price: self.price,
            description: self.description,
        })
    }
}
