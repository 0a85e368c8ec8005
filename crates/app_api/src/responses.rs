use chrono::{DateTime, Utc};
use meter_core::{Bound, CostState, Feature, LimitReason, PlanTier};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckLimitResponse {
    pub allowed: bool,
    pub reason: Option<LimitReason>,
    pub reset_at: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureUsageResponse {
    pub feature: Feature,
    pub hourly_used: u64,
    pub hourly_limit: Bound,
    pub daily_used: u64,
    pub daily_limit: Bound,
    pub total_used: u64,
    pub total_limit: Bound,
    pub remaining: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageOverviewResponse {
    pub subject_id: String,
    pub tier: PlanTier,
    pub features: Vec<FeatureUsageResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimateResponse {
    pub feature: Feature,
    pub unit_count: u64,
    pub cost: f64,
    pub cost_display: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostStateResponse {
    pub subject_id: String,
    pub state: CostState,
    pub total_display: String,
    pub daily_cap: Option<f64>,
    pub remaining_budget: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostGateResponse {
    pub would_exceed: bool,
    pub daily_total: f64,
    pub estimate: f64,
    pub daily_cap: f64,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
