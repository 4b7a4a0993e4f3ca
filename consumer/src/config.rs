use std::env;

#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    pub host: String,
    pub port: u16,
    /// API root of the product service, e.g. `http://localhost:8081/api`.
    pub product_api_url: String,
}

impl ConsumerConfig {
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_PRODUCT_API_URL: &'static str = "http://localhost:8081/api";

    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(Self::DEFAULT_PORT),
            product_api_url: env::var("PRODUCT_API_URL")
                .unwrap_or_else(|_| Self::DEFAULT_PRODUCT_API_URL.to_string()),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
