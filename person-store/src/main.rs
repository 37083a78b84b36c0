//! Person Store Main Entry Point
//!
//! Runs the demonstration workflow against the backend selected by the environment.

use dotenv::dotenv;
use person_store::{workflow, AppError, Dependencies};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("person_store=info,person_store_repository=info"));

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()
            .map_err(|e| AppError::config(format!("Failed to initialize tracing: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
            .map_err(|e| AppError::config(format!("Failed to initialize tracing: {}", e)))?;
    }

    info!(
        service_name = "person-store",
        service_version = env!("CARGO_PKG_VERSION"),
        json,
        "Tracing initialized"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing()?;

    info!("Starting person store");

    let deps = match Dependencies::new() {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match workflow::run(&deps.service, &deps.workflow_config).await {
        Ok(report) => {
            info!(
                stored = report.inserted.len(),
                found = report.all.len(),
                customers = report.customers.len(),
                by_name = report.by_name.len(),
                by_credit_limit = report.by_credit_limit.len(),
                "Person store workflow finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Person store workflow failed");
            Err(e.into())
        }
    }
}
