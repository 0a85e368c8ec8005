use meter_app::{AppError, MeterConfig, Result};
use meter_core::{UsageEvent, format_cost};

use crate::{
    AppContext, CheckLimitRequest, CheckLimitResponse, CostEstimateRequest, CostEstimateResponse,
    CostGateRequest, CostGateResponse, CostStateRequest, CostStateResponse, EventsRequest,
    FeatureUsageResponse, OkResponse, RecordRequest, UsageOverviewRequest, UsageOverviewResponse,
};

const DEFAULT_EVENTS_LIMIT: usize = 200;
const MAX_EVENTS_LIMIT: usize = 1000;

pub fn check_limit(ctx: &AppContext, req: CheckLimitRequest) -> Result<CheckLimitResponse> {
    let decision = ctx
        .app_state
        .services
        .limits
        .check(&req.subject_id, req.feature, req.tier)?;
    let message = decision.message(req.feature);
    Ok(CheckLimitResponse {
        allowed: decision.allowed,
        reason: decision.reason,
        reset_at: decision.reset_at,
        message,
    })
}

pub fn record(ctx: &AppContext, req: RecordRequest) -> Result<UsageEvent> {
    ctx.app_state.services.usage.record(
        &req.subject_id,
        req.feature,
        req.success,
        req.unit_count.unwrap_or(0),
    )
}

pub fn usage_overview(ctx: &AppContext, req: UsageOverviewRequest) -> Result<UsageOverviewResponse> {
    let usage = ctx
        .app_state
        .services
        .limits
        .overview(&req.subject_id, req.tier)?;
    let features = usage
        .into_iter()
        .map(|usage| FeatureUsageResponse {
            remaining: usage.remaining(),
            feature: usage.feature,
            hourly_used: usage.hourly_used,
            hourly_limit: usage.hourly_limit,
            daily_used: usage.daily_used,
            daily_limit: usage.daily_limit,
            total_used: usage.total_used,
            total_limit: usage.total_limit,
        })
        .collect();
    Ok(UsageOverviewResponse {
        subject_id: req.subject_id.trim().to_string(),
        tier: req.tier,
        features,
    })
}

pub fn events(ctx: &AppContext, req: EventsRequest) -> Result<Vec<UsageEvent>> {
    let limit = req.limit.unwrap_or(DEFAULT_EVENTS_LIMIT).min(MAX_EVENTS_LIMIT);
    if limit == 0 {
        return Err(AppError::InvalidInput(
            "limit must be greater than zero".to_string(),
        ));
    }
    ctx.app_state.services.usage.events(&req.subject_id, limit)
}

pub fn cost_estimate(ctx: &AppContext, req: CostEstimateRequest) -> CostEstimateResponse {
    let cost = ctx
        .app_state
        .services
        .costs
        .estimate(req.feature, req.unit_count);
    CostEstimateResponse {
        feature: req.feature,
        unit_count: req.unit_count,
        cost,
        cost_display: format_cost(cost),
    }
}

pub fn cost_state(ctx: &AppContext, req: CostStateRequest) -> Result<CostStateResponse> {
    let costs = &ctx.app_state.services.costs;
    let state = costs.state(&req.subject_id)?;
    let daily_cap = req.tier.map(|tier| costs.daily_cap(tier));
    let remaining_budget = daily_cap.map(|cap| (cap - state.total_cost_today).max(0.0));
    Ok(CostStateResponse {
        subject_id: req.subject_id.trim().to_string(),
        total_display: format_cost(state.total_cost_today),
        state,
        daily_cap,
        remaining_budget,
    })
}

pub fn cost_gate(ctx: &AppContext, req: CostGateRequest) -> Result<CostGateResponse> {
    let check = ctx.app_state.services.costs.check_daily_cap(
        &req.subject_id,
        req.tier,
        req.feature,
        req.unit_count,
    )?;
    Ok(CostGateResponse {
        would_exceed: check.would_exceed(),
        daily_total: check.daily_total,
        estimate: check.estimate,
        daily_cap: check.daily_cap,
    })
}

pub fn plans_get(ctx: &AppContext) -> MeterConfig {
    ctx.app_state.services.costs.config().clone()
}

pub fn ok() -> OkResponse {
    OkResponse { ok: true }
}
