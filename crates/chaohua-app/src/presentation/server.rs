use anyhow::Context;
use axum::extract::Request;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Span};

use crate::application::config::AppSettings;
use crate::application::services::CheckInService;

use super::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CheckInService>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: Arc<CheckInService>) -> Self {
        Self {
            service,
            start_time: Instant::now(),
        }
    }
}

fn build_router(state: AppState) -> axum::Router {
    routes::router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request| {
                if req.uri().path() == "/health" {
                    Span::none()
                } else {
                    let mut make_span =
                        tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO);
                    use tower_http::trace::MakeSpan;
                    make_span.make_span(req)
                }
            })
            .on_response(
                |res: &axum::http::Response<_>, latency: Duration, span: &Span| {
                    if span.is_disabled() {
                        return;
                    }
                    let on_response =
                        tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO);
                    use tower_http::trace::OnResponse;
                    on_response.on_response(res, latency, span);
                },
            ),
    )
}

/// Bind and serve until Ctrl-C
pub async fn serve(settings: &AppSettings, state: AppState) -> anyhow::Result<()> {
    let addr = settings.socket_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Web UI listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Web UI shutting down...");
        })
        .await
        .context("server error")?;

    Ok(())
}
