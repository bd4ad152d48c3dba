//! qrsheet binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qrsheet_cli::Config;
use qrsheet_models::RunMode;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("info".parse().unwrap())
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let mode = match std::env::args().nth(1) {
        Some(arg) if arg.eq_ignore_ascii_case("resume") => RunMode::Resume,
        _ => RunMode::Fresh,
    };

    let config = Config::from_env();
    info!(
        source = ?config.source,
        link = ?config.link_mode,
        checkpoint = %config.checkpoint_path.display(),
        "Starting qrsheet"
    );

    match qrsheet_cli::run(mode, config).await {
        Ok(outcome) => {
            info!(
                status = %outcome.status,
                processed = outcome.processed,
                skipped = outcome.skipped,
                total = outcome.total,
                "qrsheet finished"
            );
        }
        Err(e) => {
            error!("Run aborted: {e:#}");
            std::process::exit(1);
        }
    }
}
