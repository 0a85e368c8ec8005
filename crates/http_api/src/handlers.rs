use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use app_api::{
    CheckLimitRequest, CostEstimateRequest, CostGateRequest, CostStateRequest, EmptyRequest,
    EventsRequest, RecordRequest, UsageOverviewRequest,
};

use crate::{errors::HttpError, state::HttpState};

pub async fn check_limit(
    State(state): State<HttpState>,
    Json(req): Json<CheckLimitRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::check_limit(&state.context, req)?;
    Ok(Json(response))
}

pub async fn record(
    State(state): State<HttpState>,
    Json(req): Json<RecordRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::record(&state.context, req)?;
    Ok(Json(response))
}

pub async fn usage_overview(
    State(state): State<HttpState>,
    Json(req): Json<UsageOverviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::usage_overview(&state.context, req)?;
    Ok(Json(response))
}

pub async fn events(
    State(state): State<HttpState>,
    Json(req): Json<EventsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::events(&state.context, req)?;
    Ok(Json(response))
}

pub async fn cost_estimate(
    State(state): State<HttpState>,
    Json(req): Json<CostEstimateRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::cost_estimate(&state.context, req);
    Ok(Json(response))
}

pub async fn cost_state(
    State(state): State<HttpState>,
    Json(req): Json<CostStateRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::cost_state(&state.context, req)?;
    Ok(Json(response))
}

pub async fn cost_gate(
    State(state): State<HttpState>,
    Json(req): Json<CostGateRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::cost_gate(&state.context, req)?;
    Ok(Json(response))
}

pub async fn plans_get(
    State(state): State<HttpState>,
    Json(_): Json<EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::plans_get(&state.context);
    Ok(Json(response))
}

pub async fn health() -> impl IntoResponse {
    Json(app_api::ok())
}

pub async fn not_found() -> HttpError {
    HttpError::new(
        StatusCode::NOT_FOUND,
        "not found",
        Some("not_found".to_string()),
    )
}
