//! HTTP API handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;

use crate::session::SessionStats;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Whether a session is running.
    pub ready: Arc<std::sync::atomic::AtomicBool>,
    /// Token ID of the instrument being traded.
    pub instrument: Arc<tokio::sync::RwLock<Option<String>>>,
    /// Live session stats.
    pub stats: Arc<tokio::sync::RwLock<SessionStats>>,
    /// Prometheus render handle, if a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new() -> Self {
        Self {
            ready: Arc::new(std::sync::atomic::AtomicBool::new(false)),
            instrument: Arc::new(tokio::sync::RwLock::new(None)),
            stats: Arc::new(tokio::sync::RwLock::new(SessionStats::default())),
            metrics: None,
        }
    }

    /// Attach a Prometheus render handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready
            .store(ready, std::sync::atomic::Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether a session is running.
    pub ready: bool,
    /// Instrument token ID if a session is running.
    pub instrument: Option<String>,
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service status.
    pub status: &'static str,
    /// Instrument token ID.
    pub instrument: Option<String>,
    /// Session statistics.
    pub stats: StatsResponse,
}

/// Session statistics in status response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Evaluation rounds started.
    pub iterations: u64,
    /// Orders accepted by the venue.
    pub trades_executed: u64,
    /// Rounds where the venue had no quote.
    pub no_quote_rounds: u64,
    /// Rounds that ended in a caught error.
    pub iteration_errors: u64,
    /// Cumulative USDC committed.
    pub total_spent: String,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 during a session, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();
    let instrument = state.instrument.read().await.clone();

    let response = ReadyResponse {
        ready: is_ready,
        instrument,
    };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Status handler - returns session status and statistics.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let instrument = state.instrument.read().await.clone();
    let stats = state.stats.read().await;

    let status = if state.is_ready() { "running" } else { "idle" };

    Json(StatusResponse {
        status,
        instrument,
        stats: StatsResponse {
            iterations: stats.iterations,
            trades_executed: stats.trades_executed,
            no_quote_rounds: stats.no_quote_rounds,
            iteration_errors: stats.iteration_errors,
            total_spent: stats.total_spent.to_string(),
        },
    })
}

/// Prometheus metrics handler.
pub async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed",
        )
            .into_response(),
    }
}
