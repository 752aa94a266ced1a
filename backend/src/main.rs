//! Health Tracker Backend
//!
//! Profiles, meal logs and the BMI / daily calorie metrics derived from them.
//!
//! Requests flow routes → services → repositories; the metric calculations
//! themselves live in `healthtrack-shared` and are shared with the WASM build.

use anyhow::Result;
use healthtrack_backend::{config::AppConfig, db, routes, state::AppState};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let production = AppConfig::is_production();
    init_tracing(production);

    let config = AppConfig::load()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        production,
        "Starting Health Tracker Backend"
    );

    if production {
        let problems = config.production_problems();
        if !problems.is_empty() {
            for problem in &problems {
                error!(problem, "Configuration error");
            }
            anyhow::bail!("Invalid production configuration");
        }
        if config.database.url.contains("localhost") {
            warn!("Database URL points at localhost in production");
        }
    }

    let db_pool = db::create_pool(&config.database).await?;

    // Production runs migrations as a separate deploy step
    if !production {
        db::run_migrations(&db_pool).await?;
    }

    let state = AppState::new(db_pool, config.clone()).with_prometheus(install_metrics()?);
    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Pretty logs in development, JSON lines in production; `RUST_LOG` overrides
fn init_tracing(production: bool) {
    let default_filter = if production {
        "healthtrack_backend=info,healthtrack_shared=info,tower_http=info"
    } else {
        "healthtrack_backend=debug,healthtrack_shared=debug,tower_http=debug,sqlx=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    if production {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

/// Install the recorder rendered at /metrics/prometheus
fn install_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!(
        "healthtrack_metric_computations_total",
        "BMI and calorie computations, labelled by source (profile or calculator)"
    );
    metrics::describe_counter!(
        "healthtrack_meals_logged_total",
        "Meals logged, labelled by meal type"
    );
    metrics::describe_counter!("healthtrack_registrations_total", "Accounts created");
    metrics::describe_counter!("healthtrack_login_failures_total", "Rejected logins");

    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
