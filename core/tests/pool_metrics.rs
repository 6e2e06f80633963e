//! Derived contract metrics over the pool summary.

use chrono::{DateTime, Duration, Utc};
use usageboard_core::{
    config::DashboardConfig,
    pool::{compute_pool_metrics, mock_usage_stats, true_up_milestones, UsageStats},
};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-08-05T00:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn stats() -> UsageStats {
    UsageStats {
        active_users: 1562,
        license_count: 1442,
        total_pool: 1_000_000.0,
        remaining_pool: 732_450.0,
        renewal_date: now() + Duration::days(200),
        average_daily_spend: 1621.52,
    }
}

#[test]
fn remaining_percent_scenario() {
    let metrics = compute_pool_metrics(&stats(), now());
    assert_eq!(metrics.remaining_percent, 73);
}

#[test]
fn metrics_stay_in_display_range() {
    let metrics = compute_pool_metrics(&stats(), now());
    assert!(metrics.remaining_percent <= 100);
    assert!(metrics.days_until_renewal >= 0);
    assert!(metrics.projected_overage_spend >= 0.0);
    assert!(metrics.projected_seats_added == 120);
}

#[test]
fn zero_burn_rate_shows_no_run_out_date() {
    let mut s = stats();
    s.average_daily_spend = 0.0;
    let metrics = compute_pool_metrics(&s, now());
    assert_eq!(metrics.days_until_run_out, None);
    assert_eq!(metrics.run_out_date, None);
    // Nothing burning means nothing projected over.
    assert_eq!(metrics.projected_overage_spend, 0.0);
}

#[test]
fn run_out_date_tracks_the_burn_rate() {
    let mut s = stats();
    s.remaining_pool = 100.0;
    s.average_daily_spend = 10.0;
    let metrics = compute_pool_metrics(&s, now());
    assert_eq!(metrics.days_until_run_out, Some(10));
    assert_eq!(metrics.run_out_date, Some(now() + Duration::days(10)));
}

#[test]
fn overage_grows_when_burn_outpaces_the_pool() {
    let mut s = stats();
    s.remaining_pool = 1_000.0;
    s.average_daily_spend = 100.0;
    let metrics = compute_pool_metrics(&s, now());
    // 200 days * $100/day = $20,000 against a $1,000 pool.
    assert_eq!(metrics.projected_overage_spend, 19_000.0);
}

#[test]
fn renewal_in_the_past_is_not_negative() {
    let mut s = stats();
    s.renewal_date = now() - Duration::days(30);
    let metrics = compute_pool_metrics(&s, now());
    assert_eq!(metrics.days_until_renewal, 0);
    assert_eq!(metrics.projected_overage_spend, 0.0);
}

#[test]
fn next_true_up_is_a_milestone_or_the_renewal() {
    let s = stats();
    let metrics = compute_pool_metrics(&s, now());
    let milestones = true_up_milestones(s.renewal_date);
    assert!(metrics.next_true_up >= now());
    assert!(
        milestones.contains(&metrics.next_true_up) || metrics.next_true_up == s.renewal_date
    );
}

#[test]
fn mock_summary_matches_the_catalog_scenario() {
    let config = DashboardConfig::default();
    let s = mock_usage_stats(&config.pool, now());
    assert_eq!(s.active_users, 1562);
    assert_eq!(s.license_count, 1442);
    assert!(s.license_count <= s.active_users);
    assert!(s.remaining_pool <= s.total_pool);
    assert!(s.average_daily_spend > 0.0);

    let metrics = compute_pool_metrics(&s, now());
    assert_eq!(metrics.remaining_percent, 73);
    assert_eq!(metrics.projected_seats_added, 120);
}
