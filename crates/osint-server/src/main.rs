mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use osint_collectors::build_collectors;
use osint_core::SourcesConfig;
use osint_report::ReportWriter;
use osint_sentiment::SentimentAnalyzer;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = osint_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let sources = SourcesConfig::resolve(config.sources_path.as_deref())?;
    let collectors = build_collectors(&config, &sources)?;
    tracing::info!(
        env = %config.env,
        platforms = ?collectors.iter().map(|c| c.platform()).collect::<Vec<_>>(),
        "collectors ready"
    );

    let state = AppState {
        collectors: Arc::new(collectors),
        analyzer: Arc::new(SentimentAnalyzer::new()),
        collector_timeout: Duration::from_secs(config.collector_timeout_secs),
        default_limit: config.max_posts_per_platform,
        report_writer: Arc::new(ReportWriter::new(config.output_directory.clone())),
        report_formats: config.report_formats.clone().into(),
    };
    let auth = AuthState::from_env(matches!(config.env, osint_core::Environment::Development))?;
    let app = build_app(state, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "dashboard listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
