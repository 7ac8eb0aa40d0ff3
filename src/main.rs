use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use sems::access::AccessService;
use sems::api::{create_router, AppState};
use sems::audit::{
    replay_into, AuditRecorder, AuditSink, JsonlAuditWriter, MemoryAuditLog, TeeSink,
};
use sems::catalog::load_catalog;
use sems::config::Config;
use sems::observability::init_tracing;
use sems::rules::DecisionEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level, config.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting sems access engine"
    );

    // Load subjects and documents
    let catalog = load_catalog(&config.catalog_path).with_context(|| {
        format!(
            "failed to load catalog from {}",
            config.catalog_path.display()
        )
    })?;

    info!(
        subjects = catalog.subjects().len(),
        resources = catalog.resources().len(),
        "Catalog loaded"
    );

    // In-memory trail, optionally mirrored to a JSON-lines file
    let audit_log = Arc::new(MemoryAuditLog::new(config.audit_capacity));
    if let Some(ref path) = config.audit_log_path {
        match replay_into(path, &audit_log) {
            Ok(stats) => {
                if stats.errors > 0 {
                    warn!(errors = stats.errors, "Skipped unreadable audit lines during replay");
                }
                info!(
                    path = %path.display(),
                    records_read = stats.records,
                    errors = stats.errors,
                    held = audit_log.len(),
                    "Audit trail replayed"
                );
            }
            Err(e) => {
                error!(error = %e, "Failed to replay audit file, starting with an empty trail");
            }
        }
    }

    let sink: Arc<dyn AuditSink> = match config.audit_log_path {
        Some(ref path) => match JsonlAuditWriter::open(path) {
            Ok(writer) => {
                info!(path = %path.display(), "Audit file enabled");
                Arc::new(TeeSink::new(vec![
                    Box::new(audit_log.clone()),
                    Box::new(writer),
                ]))
            }
            Err(e) => {
                error!(error = %e, "Failed to open audit file, continuing with in-memory trail only");
                audit_log.clone()
            }
        },
        None => {
            info!("Audit file disabled (no path configured)");
            audit_log.clone()
        }
    };

    let engine = DecisionEngine::new(config.engine_options());
    info!(
        contract_cutoff = %config.contract_cutoff,
        simulate_origin = config.simulate_origin,
        "Decision engine ready"
    );

    let recorder = AuditRecorder::new().origin_policy(config.origin_policy());
    let service = AccessService::new(catalog, engine, recorder, sink);

    // Create application state
    let state = Arc::new(AppState {
        service,
        audit_log,
        start_time: Instant::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    });

    // Create router
    let app = create_router(state).into_make_service_with_connect_info::<SocketAddr>();

    // Parse listen address
    let addr: SocketAddr = config.listen_addr.parse()?;

    info!(addr = %addr, "Starting HTTP server");

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    if config.graceful_shutdown {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    } else {
        axum::serve(listener, app).await?;
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
