use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod engine;
mod error;
mod handlers;
mod metrics;
mod models;
mod parser;
mod service;
mod translator;

use config::Config;
use engine::ProcessEngine;
use handlers::{cors_layer, router, AppState};
use service::SolveService;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> std::io::Result<()> {
    let engine = ProcessEngine::new(
        config.solver_path.clone(),
        config.work_dir.clone(),
        config.timeout,
    );
    let state = AppState {
        solver_path: engine.executable().display().to_string(),
        service: Arc::new(SolveService::new(Arc::new(engine))),
    };

    let app = router(state, cors_layer(config.cors_allow_origin.clone()));

    info!(
        solver = %config.solver_path.display(),
        work_dir = %config.work_dir.display(),
        timeout_secs = config.timeout.as_secs(),
        "Linked solver engine"
    );
    info!("Cube solver API listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await
}
