use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryElectionNotifier, InMemoryElectionRepository};
use crate::routes::with_election_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use module_election::config::AppConfig;
use module_election::error::AppError;
use module_election::telemetry;
use module_election::workflows::election::ElectionService;
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

    let catalog = Arc::new(load_catalog(&config.catalog)?);
    let modules = catalog.len();
    let repository = Arc::new(InMemoryElectionRepository::default());
    let notifier = Arc::new(InMemoryElectionNotifier::default());
    let election_service = Arc::new(ElectionService::new(catalog, repository, notifier));

    let app = with_election_routes(election_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, modules, "module election service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
