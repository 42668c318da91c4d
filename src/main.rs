use std::process::ExitCode;

use ai_llm_service::telemetry;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine in containers; a broken one is not.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("failed to load .env: {e}");
            return ExitCode::FAILURE;
        }
    }

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", None))
        .with(telemetry::layer())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "starting pr-review-bot");

    match api::start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "pr-review-bot exited with error");
            ExitCode::FAILURE
        }
    }
}
