//! Per-user synthetic detail metrics.
//!
//! RULE: Everything here is a pure function of (identity, spend, bucket).
//! The RNG is seeded from the identity hash and nothing else, so the same
//! user always shows the same numbers no matter how often the panel
//! re-renders.

use crate::{
    config::DashboardConfig,
    distribution::parse_bucket_label,
    rng::SeededRng,
};
use serde::{Deserialize, Serialize};

/// Spend factor floor — even a $0 user gets a sliver of activity.
const MIN_SPEND_FACTOR: f64 = 0.05;

/// One row of the model-usage breakdown. Percentages across the catalog
/// always sum to exactly 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelUsage {
    pub model: String,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetailStats {
    pub agent_requests: u32,
    pub lines_generated: u32,
    pub lines_accepted: u32,
    pub tab_completions_accepted: u32,
    pub model_usage: Vec<ModelUsage>,
}

/// Derive detail stats for one user.
///
/// `bucket_label` anchors the spend factor: spend relative to the
/// bucket's upper bound, clamped to [0.05, 1]. A label with no parseable
/// range falls back to the histogram ceiling as the upper bound.
pub fn generate_user_stats(
    config: &DashboardConfig,
    email: &str,
    spend: f64,
    bucket_label: &str,
) -> UserDetailStats {
    let mut rng = SeededRng::from_identity(email);

    let upper = parse_bucket_label(bucket_label)
        .map(|range| f64::from(range.max))
        .unwrap_or(f64::from(config.distribution.bucket_ceiling))
        .max(1.0);
    let factor = (spend / upper).clamp(MIN_SPEND_FACTOR, 1.0);

    let agent_requests = (30.0 + 520.0 * factor * (0.6 + 0.8 * rng.next_f64())).round() as u32;
    let lines_generated =
        (600.0 + 18_000.0 * factor * (0.7 + 0.6 * rng.next_f64())).round() as u32;

    // Heavier spenders accept more of what the assistant writes.
    let acceptance = (0.25 + 0.55 * factor + 0.15 * (rng.next_f64() - 0.5)).clamp(0.05, 0.95);
    let lines_accepted =
        (((f64::from(lines_generated)) * acceptance).round() as u32).min(lines_generated);

    let tab_completions_accepted =
        (80.0 + 1_200.0 * factor * (0.5 + rng.next_f64())).round() as u32;

    // Per-model weights in catalog order. The top tier gains share as the
    // spend factor rises; the budget tiers lose it.
    let weights: Vec<(String, f64)> = config
        .models
        .iter()
        .map(|profile| {
            let bias = match profile.tier_rank {
                0 => 0.15 + 0.60 * factor,
                1 => 0.30 + 0.10 * factor,
                2 => 0.30 - 0.15 * factor,
                _ => 0.25 - 0.20 * factor,
            };
            let jitter = 0.06 * rng.next_f64();
            (profile.key.clone(), (bias + jitter).max(0.02))
        })
        .collect();

    UserDetailStats {
        agent_requests,
        lines_generated,
        lines_accepted,
        tab_completions_accepted,
        model_usage: weights_to_percentages(&weights),
    }
}

/// Convert raw weights to integer percentages that sum to exactly 100.
///
/// Each weight is proportionally rounded to the nearest percent, then the
/// rounding drift (at most a couple of points either way) is folded into
/// whichever model currently holds the largest share.
fn weights_to_percentages(weights: &[(String, f64)]) -> Vec<ModelUsage> {
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let total = if total > 0.0 { total } else { 1.0 };

    let mut shares: Vec<i64> = weights
        .iter()
        .map(|(_, w)| (w / total * 100.0).round() as i64)
        .collect();

    let drift: i64 = 100 - shares.iter().sum::<i64>();
    if drift != 0 {
        if let Some(largest) = shares
            .iter()
            .enumerate()
            .max_by_key(|(_, share)| **share)
            .map(|(index, _)| index)
        {
            shares[largest] += drift;
        }
    }

    weights
        .iter()
        .zip(shares)
        .map(|((model, _), share)| ModelUsage {
            model: model.clone(),
            percent: share.max(0) as u32,
        })
        .collect()
}
