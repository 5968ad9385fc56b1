use notes_api::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log setup
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Fetch env variables
    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });

    if let Err(e) = notes_api::run(config).await {
        tracing::error!("Server error: {e}");
        panic!("server error: {e}");
    }
}
