use book_manager::config::Config;
use book_manager::database::establish_pool;
use book_manager::http::{AppState, HttpServer, HttpServerConfig};
use book_manager::services::{DefaultAuthorService, DefaultBookService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let pool = establish_pool(config.database_url(), config.database_max_connections()).await?;

    let state = AppState::new(
        DefaultAuthorService::new(pool.clone()),
        DefaultBookService::new(pool),
    );
    let server_config = HttpServerConfig::new(config.server_port());
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
