use crate::contract::{AnalyzeRequest, AnalyzeResponse, VerdictRequest, VerdictResponse};
use crate::{error::AppError, AppState};
use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

/// # POST /api/analyze
/// Evaluates one strategy at one price and solves its price ladder.
pub async fn post_analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let engine = state.engine.clone();
    // The engine is synchronous and CPU-bound; keep it off the async workers.
    let analysis = tokio::task::spawn_blocking(move || {
        engine.analyze(
            request.strategy_id,
            request.purchase_price,
            &request.property,
            &request.assumptions,
        )
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(Json(AnalyzeResponse::from(analysis)))
}

/// # POST /api/verdict
/// Runs all six strategies, solves prices, scores and returns one verdict.
pub async fn post_verdict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VerdictRequest>,
) -> Result<Json<VerdictResponse>, AppError> {
    let engine = state.engine.clone();
    let as_of = Utc::now();
    let verdict = tokio::task::spawn_blocking(move || {
        engine.run(&request.property, &request.assumptions, as_of)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(Json(VerdictResponse::from(verdict)))
}

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}
