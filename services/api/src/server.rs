use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryDatasetStore, InMemoryPlanningRepository, InMemorySessionStore,
    InMemoryUserStore,
};
use crate::routes::{with_service_routes, ApiContext};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use muster::config::AppConfig;
use muster::error::AppError;
use muster::planning::PlanningService;
use muster::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryPlanningRepository::default());
    let context = ApiContext {
        planning: Arc::new(PlanningService::new(repository)),
        datasets: Arc::new(InMemoryDatasetStore::default()),
        users: Arc::new(InMemoryUserStore::default()),
        sessions: Arc::new(InMemorySessionStore::default()),
    };

    let app = with_service_routes(context)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "personnel readiness service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
