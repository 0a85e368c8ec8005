use meter_core::{Feature, PlanTier};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct EmptyRequest {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckLimitRequest {
    pub subject_id: String,
    pub feature: Feature,
    pub tier: PlanTier,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    pub subject_id: String,
    pub feature: Feature,
    pub success: bool,
    pub unit_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageOverviewRequest {
    pub subject_id: String,
    pub tier: PlanTier,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsRequest {
    pub subject_id: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimateRequest {
    pub feature: Feature,
    pub unit_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostStateRequest {
    pub subject_id: String,
    pub tier: Option<PlanTier>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostGateRequest {
    pub subject_id: String,
    pub tier: PlanTier,
    pub feature: Feature,
    pub unit_count: u64,
}
