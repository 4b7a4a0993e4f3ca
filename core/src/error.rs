//! Error types for the product API client.
//!
//! `NotFound` and `Rejected` are both upstream 4xx answers: get-by-id folds
//! every 4xx into `NotFound`, the other operations keep the upstream status
//! in `Rejected`.

use thiserror::Error;

/// Message used when get-by-id receives any 4xx.
pub const PRODUCT_NOT_FOUND: &str = "the product does not exist";

/// Message used when get-by-id receives anything that is neither 2xx nor 4xx.
pub const SOMETHING_WENT_WRONG: &str = "something went wrong";

/// Errors returned by `ProductClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// Upstream answered with a 4xx; `reason` is its reason phrase.
    #[error("upstream rejected request with {status}: {reason}")]
    Rejected { status: u16, reason: String },

    /// Upstream answered with a status outside 2xx and 4xx.
    #[error("{0}")]
    Internal(String),

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
