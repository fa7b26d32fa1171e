use crate::cli::ServeArgs;
use crate::infra::{load_dataset, AppState, LogNotificationSender};
use crate::routes::with_credit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lendo_credit::config::AppConfig;
use lendo_credit::error::AppError;
use lendo_credit::telemetry;
use lendo_credit::workflows::credit::CreditAssessmentService;
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
    if let Some(dataset) = args.dataset.take() {
        config.credit.dataset_path = dataset;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let dataset = Arc::new(load_dataset(&config.credit.dataset_path)?);
    let notifier = Arc::new(LogNotificationSender);
    let credit_service = Arc::new(CreditAssessmentService::new(
        dataset,
        notifier,
        config.credit.rulebook.clone(),
    ));

    let app = with_credit_routes(credit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        rulebook = %config.credit.rulebook.version,
        "credit decision service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
