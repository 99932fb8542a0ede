use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let omit_create_id = std::env::var("MOCK_OMIT_CREATE_ID").is_ok_and(|v| v == "1");
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, omit_create_id, "listening");
    let store = mock_server::seeded_store(mock_server::MockOptions { omit_create_id });
    mock_server::run_with(listener, store).await
}
