//! HTTP adapter.
//!
//! - `GET /analyze?text=...&score=0|1`: plain-text label, or the score with
//!   three decimals when `score=1`.
//! - `GET /health`: JSON status including the active strategy.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::{PipelineError, Result};
use crate::pipelines::sentiment::SentimentPipeline;

#[derive(Debug, Deserialize)]
struct AnalyzeParams {
    text: Option<String>,
    score: Option<String>,
}

#[derive(Debug)]
enum AppError {
    MissingText,
    Scoring(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingText => (
                StatusCode::BAD_REQUEST,
                "Missing 'text' parameter".to_string(),
            )
                .into_response(),
            AppError::Scoring(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

/// Routes over a shared pipeline.
pub fn router(pipeline: Arc<SentimentPipeline>) -> Router {
    Router::new()
        .route("/analyze", get(analyze_handler))
        .route("/health", get(health_handler))
        .with_state(pipeline)
}

/// Bind `config.host:config.port` and serve until the process exits.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn start_server(config: ServerConfig, pipeline: Arc<SentimentPipeline>) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PipelineError::Config(format!("Failed to bind {addr}: {e}")))?;

    info!("HTTP server running on http://{addr}");
    axum::serve(listener, router(pipeline)).await?;
    Ok(())
}

async fn analyze_handler(
    State(pipeline): State<Arc<SentimentPipeline>>,
    Query(params): Query<AnalyzeParams>,
) -> std::result::Result<String, AppError> {
    let text = match params.text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(AppError::MissingText),
    };
    let score_mode = params.score.as_deref() == Some("1");

    // The first request may read the model artifact from disk.
    let outcome = tokio::task::spawn_blocking(move || -> Result<String> {
        if score_mode {
            Ok(format!("{:.3}", pipeline.analyze_score(&text)?))
        } else {
            Ok(pipeline.analyze(&text)?.to_string())
        }
    })
    .await;

    match outcome {
        Ok(Ok(body)) => Ok(body),
        Ok(Err(e)) => {
            error!(error = %e, "Scoring failed");
            Err(AppError::Scoring(e.to_string()))
        }
        Err(e) => {
            error!(error = %e, "Scoring task failed");
            Err(AppError::Scoring("Internal error".to_string()))
        }
    }
}

async fn health_handler(
    State(pipeline): State<Arc<SentimentPipeline>>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "strategy": pipeline.state().as_str(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
