//! Mock spend-distribution generator and bucket-label handling.
//!
//! The histogram is a fixed partition of [0, ceiling) into equal-width
//! buckets — the bucket set never changes with the lookback window, only
//! the simulated user counts do. Counts decay exponentially with the
//! bucket midpoint and scale with the window length.

use crate::{
    config::DashboardConfig,
    error::{DashResult, DashboardError},
    types::WindowDays,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The label separator rendered into bucket labels. Parsing also accepts
/// a plain ASCII hyphen, which older exports used.
const LABEL_SEPARATOR: char = '–';

/// One histogram bar: a half-open dollar range and its user count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendBucketDatum {
    pub bucket: String,
    pub users: u32,
}

/// The numeric range behind a bucket label, half-open [min, max).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRange {
    pub min: u32,
    pub max: u32,
}

/// Render a bucket label, e.g. `"$20–40"`.
pub fn format_bucket_label(min: u32, max: u32) -> String {
    format!("${min}{LABEL_SEPARATOR}{max}")
}

/// Parse a bucket label back into its range.
///
/// Accepts both the en dash the dashboard renders and an ASCII hyphen.
/// Anything else — missing `$`, non-numeric bounds, inverted range —
/// yields `None`, never an error: callers treat "no range" as "nothing
/// to display".
pub fn parse_bucket_label(label: &str) -> Option<BucketRange> {
    let rest = label.strip_prefix('$')?;
    let (lo, hi) = rest
        .split_once(LABEL_SEPARATOR)
        .or_else(|| rest.split_once('-'))?;
    let min: u32 = lo.trim().parse().ok()?;
    let max: u32 = hi.trim().parse().ok()?;
    if max <= min {
        return None;
    }
    Some(BucketRange { min, max })
}

/// Generate the full bucket set for a lookback window, ascending by
/// range start. The picker offers 7/14/30; any positive window works.
pub fn generate_spend_distribution(
    config: &DashboardConfig,
    window: WindowDays,
) -> DashResult<Vec<SpendBucketDatum>> {
    if window == 0 {
        return Err(DashboardError::InvalidWindow { days: 0 });
    }

    let params = &config.distribution;
    let window_scale = params.window_blend
        + (1.0 - params.window_blend) * (f64::from(window) / params.reference_window);

    let mut rng = rand::thread_rng();
    let mut buckets = Vec::with_capacity((params.bucket_ceiling / params.bucket_width) as usize);

    let mut start = 0u32;
    while start < params.bucket_ceiling {
        let end = start + params.bucket_width;
        let midpoint = f64::from(start + end) / 2.0;
        let mean = params.base_users * (-midpoint / params.decay_dollars).exp() * window_scale;
        let noise = rng.gen_range(-params.noise_ratio..params.noise_ratio);
        let users = (mean * (1.0 + noise)).max(0.0).round() as u32;

        buckets.push(SpendBucketDatum {
            bucket: format_bucket_label(start, end),
            users,
        });
        start = end;
    }

    log::debug!(
        "generated spend distribution: window={window} buckets={}",
        buckets.len()
    );
    Ok(buckets)
}
