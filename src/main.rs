mod booking;
mod config;
mod errors;
mod handlers;
mod mailer;
mod models;
mod scoring;
mod sheets;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::booking::BookingGuard;
use crate::config::Config;
use crate::mailer::Mailer;
use crate::sheets::SheetsClient;

/// Main entry point for the application.
///
/// Initializes logging, configuration, the Sheets client, the booking guard,
/// and the optional SMTP mailer, then starts the Axum server with CORS,
/// request tracing, body-size limiting, and per-IP rate limiting.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_intake_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Tabular store client and the booking guard that shares it
    let sheets = Arc::new(SheetsClient::new(&config));
    let booking = BookingGuard::new(
        sheets.clone(),
        config.bookings_range.clone(),
        config.availability_policy,
    );
    tracing::info!("Sheets client and booking guard initialized");

    // Mailer only when SMTP is configured; booking still works without it
    let mailer = config.smtp.clone().map(|smtp| {
        tracing::info!("SMTP mailer initialized: {}", smtp.host);
        Arc::new(Mailer::new(smtp))
    });

    // Build application state
    let app_state = Arc::new(handlers::AppState {
        config: config.clone(),
        sheets,
        booking,
        mailer,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = Router::new()
        .route("/api/v1/leads", post(handlers::submit_lead))
        .route("/api/v1/score", post(handlers::score_lead))
        .route("/api/v1/bookings", post(handlers::book_appointment))
        .route("/api/v1/contact", post(handlers::contact))
        .layer(
            ServiceBuilder::new()
                // Request size limit: 1MB max payload (questionnaires are small)
                .layer(RequestBodyLimitLayer::new(1024 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check (bypasses rate limiting)
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
