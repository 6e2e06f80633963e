//! Reducer transitions, last-request-wins ordering, and the async
//! orchestrator path.

use async_trait::async_trait;
use chrono::NaiveDate;
use usageboard_core::{
    config::DashboardConfig,
    dashboard::Dashboard,
    distribution::SpendBucketDatum,
    error::DashResult,
    series::UsagePoint,
    source::SpendDataSource,
    types::WindowDays,
    view::{LoadState, ViewAction, ViewState},
};

fn config() -> DashboardConfig {
    DashboardConfig::default()
}

fn point(day: u32, total: f64) -> UsagePoint {
    UsagePoint {
        date: NaiveDate::from_ymd_opt(2026, 3, day).expect("valid date"),
        total,
        by_model: Vec::new(),
    }
}

fn bucket(label: &str, users: u32) -> SpendBucketDatum {
    SpendBucketDatum {
        bucket: label.into(),
        users,
    }
}

#[test]
fn stale_series_result_is_discarded() {
    let config = config();
    let mut state = ViewState::new();

    // Two fetches in flight: request 1 (window 30), then request 2
    // (window 7) issued before 1 resolves.
    state = state.apply(ViewAction::SeriesLoadStarted { request: 1 }, &config);
    state = state.apply(ViewAction::SeriesLoadStarted { request: 2 }, &config);

    // The slow, superseded fetch lands first — it must be dropped.
    state = state.apply(
        ViewAction::SeriesLoaded {
            request: 1,
            points: vec![point(1, 111.0)],
        },
        &config,
    );
    assert_eq!(state.series, LoadState::Loading { request: 2 });

    // The latest fetch commits.
    state = state.apply(
        ViewAction::SeriesLoaded {
            request: 2,
            points: vec![point(2, 222.0)],
        },
        &config,
    );
    let data = state.series.data().expect("committed");
    assert_eq!(data[0].total, 222.0);
}

#[test]
fn stale_failure_cannot_clobber_a_newer_fetch() {
    let config = config();
    let mut state = ViewState::new();
    state = state.apply(ViewAction::DistributionLoadStarted { request: 1 }, &config);
    state = state.apply(ViewAction::DistributionLoadStarted { request: 2 }, &config);
    state = state.apply(
        ViewAction::DistributionLoadFailed {
            request: 1,
            message: "timeout".into(),
        },
        &config,
    );
    assert_eq!(state.distribution, LoadState::Loading { request: 2 });
}

#[test]
fn failure_of_the_latest_fetch_commits() {
    let config = config();
    let mut state = ViewState::new();
    state = state.apply(ViewAction::SeriesLoadStarted { request: 1 }, &config);
    state = state.apply(
        ViewAction::SeriesLoadFailed {
            request: 1,
            message: "backend unavailable".into(),
        },
        &config,
    );
    assert_eq!(
        state.series,
        LoadState::Failed {
            message: "backend unavailable".into()
        }
    );
}

#[test]
fn window_change_clears_the_drilldown() {
    let config = config();
    let mut state = ViewState::new();
    state = state.apply(ViewAction::DistributionLoadStarted { request: 1 }, &config);
    state = state.apply(
        ViewAction::DistributionLoaded {
            request: 1,
            buckets: vec![bucket("$20–40", 10)],
        },
        &config,
    );
    state = state.apply(
        ViewAction::SelectBucket {
            label: "$20–40".into(),
        },
        &config,
    );
    assert!(!state.roster.is_empty());
    let email = state.roster[0].email.clone();
    state = state.apply(ViewAction::SelectUser { email }, &config);
    assert!(state.user_detail.is_some());

    state = state.apply(ViewAction::SetWindow { days: 7 }, &config);
    assert_eq!(state.window, 7);
    assert_eq!(state.selected_bucket, None);
    assert!(state.roster.is_empty());
    assert_eq!(state.selected_user, None);
    assert_eq!(state.user_detail, None);
}

#[test]
fn selecting_an_unknown_bucket_shows_an_empty_table() {
    let config = config();
    let mut state = ViewState::new();
    state = state.apply(ViewAction::DistributionLoadStarted { request: 1 }, &config);
    state = state.apply(
        ViewAction::DistributionLoaded {
            request: 1,
            buckets: vec![bucket("$20–40", 10)],
        },
        &config,
    );
    state = state.apply(
        ViewAction::SelectBucket {
            label: "$500–520".into(),
        },
        &config,
    );
    assert_eq!(state.selected_bucket.as_deref(), Some("$500–520"));
    assert!(state.roster.is_empty());
}

#[test]
fn selecting_an_unknown_user_is_a_no_op_display() {
    let config = config();
    let mut state = ViewState::new();
    state = state.apply(ViewAction::DistributionLoadStarted { request: 1 }, &config);
    state = state.apply(
        ViewAction::DistributionLoaded {
            request: 1,
            buckets: vec![bucket("$20–40", 5)],
        },
        &config,
    );
    state = state.apply(
        ViewAction::SelectBucket {
            label: "$20–40".into(),
        },
        &config,
    );
    state = state.apply(
        ViewAction::SelectUser {
            email: "nobody@example.com".into(),
        },
        &config,
    );
    assert_eq!(state.selected_user, None);
    assert_eq!(state.user_detail, None);
}

#[test]
fn clearing_selections_walks_back_out_of_the_drilldown() {
    let config = config();
    let mut state = ViewState::new();
    state = state.apply(ViewAction::DistributionLoadStarted { request: 1 }, &config);
    state = state.apply(
        ViewAction::DistributionLoaded {
            request: 1,
            buckets: vec![bucket("$20–40", 8)],
        },
        &config,
    );
    state = state.apply(
        ViewAction::SelectBucket {
            label: "$20–40".into(),
        },
        &config,
    );
    let email = state.roster[0].email.clone();
    state = state.apply(ViewAction::SelectUser { email }, &config);

    state = state.apply(ViewAction::ClearUser, &config);
    assert_eq!(state.selected_user, None);
    assert_eq!(state.user_detail, None);
    assert!(!state.roster.is_empty(), "bucket stays open");

    state = state.apply(ViewAction::ClearBucket, &config);
    assert_eq!(state.selected_bucket, None);
    assert!(state.roster.is_empty());
}

#[test]
fn view_state_round_trips_through_json() {
    let config = config();
    let mut state = ViewState::new();
    state = state.apply(ViewAction::SeriesLoadStarted { request: 1 }, &config);
    state = state.apply(
        ViewAction::SeriesLoaded {
            request: 1,
            points: vec![point(3, 42.5)],
        },
        &config,
    );
    let json = serde_json::to_string(&state).expect("serialize");
    let back: ViewState = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, state);
}

// ── Orchestrator path ──────────────────────────────────────────────

struct FailingSource;

#[async_trait]
impl SpendDataSource for FailingSource {
    async fn usage_series(&self, _window: WindowDays) -> DashResult<Vec<UsagePoint>> {
        Err(anyhow::anyhow!("backend unavailable").into())
    }

    async fn spend_distribution(
        &self,
        _window: WindowDays,
    ) -> DashResult<Vec<SpendBucketDatum>> {
        Err(anyhow::anyhow!("backend unavailable").into())
    }
}

#[tokio::test]
async fn refresh_commits_both_slots() {
    let mut dashboard = Dashboard::with_mock(config());
    dashboard.set_window(14).await;

    let state = dashboard.state();
    assert_eq!(state.window, 14);
    assert_eq!(state.series.data().expect("series committed").len(), 14);
    assert_eq!(
        state.distribution.data().expect("distribution committed").len(),
        50
    );
}

#[tokio::test]
async fn drilldown_flows_from_a_committed_distribution() {
    let mut dashboard = Dashboard::with_mock(config());
    dashboard.refresh().await;

    let label = dashboard
        .state()
        .distribution
        .data()
        .and_then(|buckets| buckets.iter().find(|b| b.users > 0))
        .map(|b| b.bucket.clone())
        .expect("some populated bucket");
    dashboard.select_bucket(&label);
    assert!(!dashboard.state().roster.is_empty());

    let email = dashboard.state().roster[0].email.clone();
    dashboard.select_user(&email);
    let detail = dashboard.state().user_detail.as_ref().expect("detail");
    let percent_sum: u32 = detail.model_usage.iter().map(|m| m.percent).sum();
    assert_eq!(percent_sum, 100);
}

#[tokio::test]
async fn fetch_failure_lands_in_a_failed_slot_not_a_wedge() {
    let mut dashboard = Dashboard::new(config(), std::sync::Arc::new(FailingSource));
    dashboard.refresh().await;

    let state = dashboard.state();
    assert!(matches!(state.series, LoadState::Failed { .. }));
    assert!(matches!(state.distribution, LoadState::Failed { .. }));
}
