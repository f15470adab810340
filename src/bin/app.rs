use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use adapter::{database::connect_database_with, redis::RedisClient};
use anyhow::{Context, Result};
use api::route::v1;
use axum::Router;
use chrono::{Local, Utc};
use registry::AppRegistry;
use shared::config::{AppConfig, SweepConfig};
use shared::env::{which, Environment};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    let sweep_config = app_config.sweep.clone();
    let pool = connect_database_with(&app_config.database);
    let kv = Arc::new(RedisClient::new(&app_config.redis)?);

    let registry = AppRegistry::new(pool, kv, app_config)?;

    tokio::spawn(run_reconciliation_sweeper(registry.clone(), sweep_config));

    let app = Router::new()
        .merge(v1::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 8080);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e, error.message = %e, "Unexpected error"
            )
        })
}

// Periodic reconciliation pass: abandoned pending intents are failed once
// their TTL passes, then the cached room availability flags are re-derived
// from the confirmed bookings covering today. Errors are logged and the loop
// keeps running; the overlap invariant itself is enforced at confirm time.
async fn run_reconciliation_sweeper(registry: AppRegistry, config: SweepConfig) {
    let mut interval = tokio::time::interval(Duration::from_secs(config.interval_secs));
    loop {
        interval.tick().await;

        let cutoff = Utc::now() - chrono::Duration::seconds(config.pending_ttl_secs);
        match registry
            .booking_repository()
            .expire_stale_pending(cutoff)
            .await
        {
            Ok(expired) if expired > 0 => {
                tracing::info!(expired, "expired stale pending bookings");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(
                    error.message = %e,
                    "failed to expire stale pending bookings"
                );
            }
        }

        let today = Local::now().date_naive();
        match registry
            .booking_repository()
            .reconcile_availability(today)
            .await
        {
            Ok(flipped) if flipped > 0 => {
                tracing::info!(flipped, "reconciled room availability flags");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(
                    error.message = %e,
                    "failed to reconcile room availability"
                );
            }
        }
    }
}
