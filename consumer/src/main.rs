use product_consumer::ConsumerConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ConsumerConfig::from_env();
    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!(
        upstream = %config.product_api_url,
        "listening on {}",
        listener.local_addr()?
    );
    product_consumer::run(listener, &config.product_api_url).await
}
