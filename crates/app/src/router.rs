use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use catalog_storage::CatalogStore;

use crate::{products, telemetry};

#[derive(Clone)]
pub struct AppState {
    metrics: PrometheusHandle,
    catalog: CatalogStore,
}

impl AppState {
    pub fn new(metrics: PrometheusHandle, catalog: CatalogStore) -> Self {
        Self { metrics, catalog }
    }

    pub fn metrics(&self) -> &PrometheusHandle {
        &self.metrics
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .route("/products", get(products::list).post(products::create))
        .route("/products/:id", get(products::show))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = telemetry::render_metrics(state.metrics());
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
