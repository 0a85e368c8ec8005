use meter_app::{AppPaths, AppState, ensure_app_data_dir};
use meter_core::{Feature, PlanTier};
use tempfile::tempdir;

#[test]
fn app_state_persists_usage_across_restarts() {
    let dir = tempdir().expect("temp dir");
    let paths = AppPaths::new(dir.path().join("data"));
    ensure_app_data_dir(&paths).expect("data dir");

    {
        let state = AppState::open(paths.store_path.clone(), paths.plans_path.clone())
            .expect("open state");
        let services = &state.services;
        for _ in 0..3 {
            services
                .usage
                .record("writer-1", Feature::Generation, true, 1200)
                .expect("record");
        }
        services
            .usage
            .record("writer-1", Feature::Generation, false, 0)
            .expect("record failure");
        let decision = services
            .limits
            .check("writer-1", Feature::Generation, PlanTier::Free)
            .expect("check");
        assert!(decision.allowed);
    }

    assert!(paths.plans_path.exists());
    let state =
        AppState::open(paths.store_path.clone(), paths.plans_path.clone()).expect("reopen state");
    let services = &state.services;
    let events = services.usage.events("writer-1", 10).expect("events");
    assert_eq!(events.len(), 4);
    assert_eq!(
        services
            .usage
            .total_count("writer-1", Feature::Generation, true)
            .expect("count"),
        3
    );
    let total = services.costs.daily_total("writer-1").expect("daily total");
    assert!(total > 0.0);
    let state = services.costs.state("writer-1").expect("cost state");
    assert_eq!(state.request_count, 3);
}

#[test]
fn blank_subject_is_invalid_input() {
    let dir = tempdir().expect("temp dir");
    let state = AppState::open(
        dir.path().join("usage-meter.sqlite"),
        dir.path().join("plans.json"),
    )
    .expect("open state");
    let err = state
        .services
        .usage
        .record("   ", Feature::Export, true, 0)
        .expect_err("blank subject");
    assert!(matches!(err, meter_app::AppError::InvalidInput(_)));
}
