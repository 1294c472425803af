use calculator_service::journal::TracingJournal;
use calculator_service::{build_router, AppState, SERVICE_NAME};
use service_kit::{init_logging, serve, ServiceConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load(SERVICE_NAME)?;
    let _log_guard = init_logging(&config)?;

    let journal = Arc::new(TracingJournal::new(config.service_name.clone()));
    let app = build_router(AppState::new(journal));

    serve(app, &config).await?;
    Ok(())
}
