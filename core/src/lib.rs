//! Synchronous API client core for the product service.
//!
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The status translation rules
//! that API consumers rely on live in [`ProductClient`]'s `parse_*` methods.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use crate::client::ProductClient;
pub use crate::error::ApiError;
pub use crate::http::{HttpMethod, HttpRequest, HttpResponse};
pub use crate::types::{Product, ProductForm};
