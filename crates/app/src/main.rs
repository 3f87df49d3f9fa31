mod error;
mod products;
mod router;
mod telemetry;

use std::net::SocketAddr;

use catalog_storage::CatalogStore;
use catalog_util::{load_env_file, AppConfig};
use metrics::gauge;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_file = load_env_file();
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(&config)?;
    if let Some(path) = env_file {
        info!(stage = "app", path = %path.display(), "loaded environment file");
    }
    let metrics = telemetry::init_metrics()?;

    let catalog = CatalogStore::seeded();
    gauge!("catalog_products").set(catalog.len() as f64);

    let state = router::AppState::new(metrics, catalog.clone());

    let addr: SocketAddr = config.bind_addr;
    info!(
        stage = "app",
        %addr,
        env = %config.environment.as_str(),
        products = catalog.len(),
        "starting HTTP server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router::app_router(state))
        .await
        .map_err(|err| err.into())
}
