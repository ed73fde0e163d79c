use crate::cli::ServeArgs;
use crate::infra::{load_seed, AppState, InMemoryDesignStore, InMemoryProfileSource};
use crate::routes::with_design_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use storefront_designer::config::AppConfig;
use storefront_designer::design::DesignService;
use storefront_designer::error::AppError;
use storefront_designer::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(seed) = args.seed.take() {
        config.fixtures.seed_file = Some(seed);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = InMemoryDesignStore::default();
    let profiles = InMemoryProfileSource::default();
    if let Some(path) = config.fixtures.seed_file.as_deref() {
        load_seed(path)?.apply(&store, &profiles);
    }

    let design_service = Arc::new(DesignService::new(Arc::new(store), Arc::new(profiles)));

    let app = with_design_routes(design_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "store design service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
