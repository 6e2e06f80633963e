//! Usage-pool summary and derived contract metrics.
//!
//! This module is REACTIVE arithmetic only. It observes a pool summary
//! and a caller-supplied "now" and computes renewal countdowns, run-out
//! projections, true-up cadence, and overage. No state, no randomness,
//! no reads of the system clock.

use crate::{config::PoolParams, types::round2};
use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The pool/license summary as the (mocked) billing backend reports it.
///
/// Invariants: `license_count <= active_users`,
/// `remaining_pool <= total_pool`, all counts and amounts non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    pub active_users: u32,
    pub license_count: u32,
    pub total_pool: f64,
    pub remaining_pool: f64,
    pub renewal_date: DateTime<Utc>,
    pub average_daily_spend: f64,
}

/// Everything the summary cards derive from a `UsageStats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolMetrics {
    pub remaining_percent: u8,
    pub days_until_renewal: i64,
    /// None when the burn rate is zero — the pool never runs out.
    pub days_until_run_out: Option<i64>,
    pub run_out_date: Option<DateTime<Utc>>,
    pub projected_overage_spend: f64,
    pub next_true_up: DateTime<Utc>,
    pub projected_seats_added: u32,
}

/// Percent of the pool remaining, rounded, clamped to [0, 100].
/// The denominator floors at 1 so an unconfigured pool reads as 0%.
pub fn remaining_percent(remaining_pool: f64, total_pool: f64) -> u8 {
    let ratio = 100.0 * remaining_pool / total_pool.max(1.0);
    ratio.round().clamp(0.0, 100.0) as u8
}

/// Whole days from `now` until `date`, rounded up, floored at 0.
pub fn days_until(now: DateTime<Utc>, date: DateTime<Utc>) -> i64 {
    let seconds = (date - now).num_seconds() as f64;
    ((seconds / SECONDS_PER_DAY).ceil() as i64).max(0)
}

/// Days until the pool reaches zero at the current burn rate.
/// A zero burn rate means the pool never runs out.
pub fn days_until_run_out(remaining_pool: f64, average_daily_spend: f64) -> Option<i64> {
    if average_daily_spend > 0.0 {
        Some((remaining_pool / average_daily_spend).ceil() as i64)
    } else {
        None
    }
}

/// Spend projected past the remaining pool before renewal, floored at 0.
pub fn projected_overage_spend(
    average_daily_spend: f64,
    days_until_renewal: i64,
    remaining_pool: f64,
) -> f64 {
    (average_daily_spend * days_until_renewal as f64 - remaining_pool)
        .round()
        .max(0.0)
}

/// Quarterly true-up milestones: contract start + 3/6/9/12 months, where
/// contract start = renewal − 1 year (so the last milestone is the
/// renewal itself).
pub fn true_up_milestones(renewal_date: DateTime<Utc>) -> [DateTime<Utc>; 4] {
    let contract_start = renewal_date
        .checked_sub_months(Months::new(12))
        .unwrap_or_else(|| renewal_date - Duration::days(365));
    [3u32, 6, 9, 12].map(|months| {
        contract_start
            .checked_add_months(Months::new(months))
            .unwrap_or(renewal_date)
    })
}

/// The first milestone at or after `now`, else the renewal date itself.
pub fn next_true_up(renewal_date: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    true_up_milestones(renewal_date)
        .into_iter()
        .find(|milestone| *milestone >= now)
        .unwrap_or(renewal_date)
}

/// Seats in use beyond the licensed count, floored at 0.
pub fn projected_seats_added(active_users: u32, license_count: u32) -> u32 {
    active_users.saturating_sub(license_count)
}

/// Compute the full derived set in one pass.
pub fn compute_pool_metrics(stats: &UsageStats, now: DateTime<Utc>) -> PoolMetrics {
    let renewal_days = days_until(now, stats.renewal_date);
    let run_out_days = days_until_run_out(stats.remaining_pool, stats.average_daily_spend);

    PoolMetrics {
        remaining_percent: remaining_percent(stats.remaining_pool, stats.total_pool),
        days_until_renewal: renewal_days,
        days_until_run_out: run_out_days,
        run_out_date: run_out_days.map(|days| now + Duration::days(days)),
        projected_overage_spend: projected_overage_spend(
            stats.average_daily_spend,
            renewal_days,
            stats.remaining_pool,
        ),
        next_true_up: next_true_up(stats.renewal_date, now),
        projected_seats_added: projected_seats_added(stats.active_users, stats.license_count),
    }
}

/// The deterministic mock pool summary — the stand-in for the billing
/// backend. The burn rate is the consumed pool averaged over the elapsed
/// contract term.
pub fn mock_usage_stats(params: &PoolParams, now: DateTime<Utc>) -> UsageStats {
    let total_pool = params.total_pool.max(0.0);
    let remaining_pool = params.remaining_pool.clamp(0.0, total_pool);

    let consumed = total_pool - remaining_pool;
    let elapsed_days = (params.term_days - params.renewal_in_days).max(1);
    let average_daily_spend = round2(consumed / elapsed_days as f64);

    UsageStats {
        active_users: params.active_users,
        license_count: params.active_users.saturating_sub(params.unlicensed_gap),
        total_pool,
        remaining_pool,
        renewal_date: now + Duration::days(params.renewal_in_days),
        average_daily_spend,
    }
}
