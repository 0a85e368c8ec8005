use std::path::PathBuf;
use std::sync::Arc;

use app_api::{
    AppContext, CheckLimitRequest, CostGateRequest, CostStateRequest, EventsRequest,
    RecordRequest, UsageOverviewRequest,
};
use chrono::{TimeZone, Utc};
use meter_app::{AppConfig, AppState, load_initial_plans};
use meter_core::{Feature, LimitReason, ManualClock, PlanTier};
use meter_db::MemoryStore;

fn context() -> AppContext {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 6, 2, 14, 40, 0).unwrap());
    let config = AppConfig {
        store_path: PathBuf::from("memory"),
        plans_path: PathBuf::from("plans.json"),
    };
    let app_state = AppState::with_parts(
        config,
        Arc::new(MemoryStore::new()),
        Arc::new(clock),
        load_initial_plans().expect("plans"),
    );
    AppContext { app_state }
}

fn record(ctx: &AppContext, feature: Feature, unit_count: u64) {
    app_api::record(
        ctx,
        RecordRequest {
            subject_id: "u1".to_string(),
            feature,
            success: true,
            unit_count: Some(unit_count),
        },
    )
    .expect("record");
}

#[test]
fn check_limit_includes_denial_message() {
    let ctx = context();
    for _ in 0..5 {
        record(&ctx, Feature::Generation, 100);
    }
    let response = app_api::check_limit(
        &ctx,
        CheckLimitRequest {
            subject_id: "u1".to_string(),
            feature: Feature::Generation,
            tier: PlanTier::Free,
        },
    )
    .expect("check");
    assert!(!response.allowed);
    assert_eq!(response.reason, Some(LimitReason::HourlyLimit));
    assert_eq!(
        response.message.as_deref(),
        Some("Hourly generation limit reached. Try again after 15:00 UTC.")
    );
}

#[test]
fn overview_reports_remaining_allowance() {
    let ctx = context();
    record(&ctx, Feature::Export, 0);
    let response = app_api::usage_overview(
        &ctx,
        UsageOverviewRequest {
            subject_id: " u1 ".to_string(),
            tier: PlanTier::Free,
        },
    )
    .expect("overview");
    assert_eq!(response.subject_id, "u1");
    let export = response
        .features
        .iter()
        .find(|usage| usage.feature == Feature::Export)
        .expect("export");
    assert_eq!(export.daily_used, 1);
    assert_eq!(export.remaining, Some(2));
}

#[test]
fn events_rejects_zero_limit_and_caps_results() {
    let ctx = context();
    for _ in 0..3 {
        record(&ctx, Feature::Project, 0);
    }
    let err = app_api::events(
        &ctx,
        EventsRequest {
            subject_id: "u1".to_string(),
            limit: Some(0),
        },
    );
    assert!(err.is_err());
    let events = app_api::events(
        &ctx,
        EventsRequest {
            subject_id: "u1".to_string(),
            limit: Some(2),
        },
    )
    .expect("events");
    assert_eq!(events.len(), 2);
}

#[test]
fn cost_state_and_gate_use_tier_cap() {
    let ctx = context();
    record(&ctx, Feature::VoiceChar, 300);
    let state = app_api::cost_state(
        &ctx,
        CostStateRequest {
            subject_id: "u1".to_string(),
            tier: Some(PlanTier::Free),
        },
    )
    .expect("state");
    assert_eq!(state.total_display, "0.0900");
    assert_eq!(state.daily_cap, Some(0.10));
    let remaining = state.remaining_budget.expect("remaining");
    assert!((remaining - 0.01).abs() < 1e-9);

    let gate = app_api::cost_gate(
        &ctx,
        CostGateRequest {
            subject_id: "u1".to_string(),
            tier: PlanTier::Free,
            feature: Feature::VoiceChar,
            unit_count: 100,
        },
    )
    .expect("gate");
    assert!(gate.would_exceed);
    assert!((gate.daily_total - 0.09).abs() < 1e-9);
    assert!((gate.estimate - 0.03).abs() < 1e-9);
    assert_eq!(gate.daily_cap, 0.10);
}

#[test]
fn plans_get_returns_loaded_config() {
    let ctx = context();
    let config = app_api::plans_get(&ctx);
    assert_eq!(config.daily_caps.premium, 5.0);
}
