use std::sync::Arc;

use anyhow::Context;
use brochure_api::config::{self, AppConfig, CmsBackend, Severity};
use brochure_api::{build_router, middleware, AppState};
use brochure_cms::{HttpPurgeRevalidator, ResendNotifier, SanityClient};
use brochure_core::content::{ContentStore, MemoryContentStore};
use brochure_core::events::bus::EventBus;
use brochure_core::notify::{DisabledNotifier, Notifier};
use brochure_core::revalidate::{LoggingRevalidator, Revalidator};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env().context("Failed to load config")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    tracing::info!("Starting brochure site server");

    for issue in config::check_environment(&config) {
        match issue.severity {
            Severity::Error => tracing::error!(var = issue.var, "{}", issue.message),
            Severity::Warning => tracing::warn!(var = issue.var, "{}", issue.message),
        }
    }

    let content = content_store(&config).await?;
    let notifier = notifier(&config)?;
    let revalidator = revalidator(&config)?;
    tracing::info!(
        content = content.backend_tag(),
        email = notifier.provider_tag(),
        revalidator = revalidator.backend_tag(),
        "Backends ready"
    );

    let event_bus = EventBus::new(config.event_bus_capacity);
    let state = AppState::new(config.clone(), content, notifier, revalidator, event_bus);

    let app = build_router(state)
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn content_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ContentStore>> {
    match config.cms_backend {
        CmsBackend::Sanity => {
            let sanity = config
                .sanity()
                .context("SANITY_PROJECT_ID is required for the sanity backend")?;
            Ok(Arc::new(SanityClient::new(sanity)?))
        }
        CmsBackend::Memory => match &config.content_seed_file {
            Some(path) => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let store = MemoryContentStore::from_seed(&json)?;
                tracing::info!(path = %path.display(), "Seeded in-memory content store");
                Ok(Arc::new(store))
            }
            None => Ok(Arc::new(MemoryContentStore::new())),
        },
    }
}

fn notifier(config: &AppConfig) -> anyhow::Result<Arc<dyn Notifier>> {
    match (&config.resend_api_key, &config.email_from) {
        (Some(key), Some(from)) => Ok(Arc::new(ResendNotifier::new(key.clone(), from.clone())?)),
        _ => Ok(Arc::new(DisabledNotifier)),
    }
}

fn revalidator(config: &AppConfig) -> anyhow::Result<Arc<dyn Revalidator>> {
    match &config.purge_url {
        Some(url) => Ok(Arc::new(HttpPurgeRevalidator::new(
            url.clone(),
            config.purge_token.clone(),
        )?)),
        None => Ok(Arc::new(LoggingRevalidator)),
    }
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received Ctrl+C, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
