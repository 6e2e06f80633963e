//! Generator parameter catalog.
//!
//! The built-in defaults mirror the mocked billing backend the dashboard
//! currently renders. A deployment can override any of it with a JSON
//! catalog file; the shapes below are the file format.

use crate::error::{DashResult, DashboardError};
use serde::{Deserialize, Serialize};

/// One entry in the fixed model catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelProfile {
    pub key: String,
    /// 0 = top tier. Drill-down usage skews toward lower ranks as spend grows.
    pub tier_rank: u8,
    /// Mean daily spend, dollars, before seasonal swing and noise.
    pub baseline: f64,
    /// Half-height of the seasonal swing, dollars.
    pub amplitude: f64,
    /// Length of one full swing, days.
    pub period_days: f64,
    /// Phase offset, radians, so the model curves don't move in lockstep.
    pub phase: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesParams {
    /// Half-width of the uniform per-day noise, dollars.
    pub noise: f64,
    /// Fixed multiplier applied after flooring at zero.
    pub scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionParams {
    /// Bucket width, dollars.
    pub bucket_width: u32,
    /// Histogram ceiling, dollars. Buckets partition [0, ceiling).
    pub bucket_ceiling: u32,
    /// Simulated user count at a $0 midpoint, before decay.
    pub base_users: f64,
    /// e-folding scale of the exponential decay, dollars.
    pub decay_dollars: f64,
    /// Window scale = blend + (1 - blend) * (window / reference_window).
    pub window_blend: f64,
    pub reference_window: f64,
    /// Bounded proportional noise, e.g. 0.18 = ±18%.
    pub noise_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolParams {
    pub active_users: u32,
    /// Seats in use beyond what the contract licenses.
    pub unlicensed_gap: u32,
    pub total_pool: f64,
    pub remaining_pool: f64,
    /// Days from "now" to the contract renewal.
    pub renewal_in_days: i64,
    /// Contract term, days. Renewal minus term = contract start.
    pub term_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub models: Vec<ModelProfile>,
    pub series: SeriesParams,
    pub distribution: DistributionParams,
    pub pool: PoolParams,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            models: vec![
                ModelProfile {
                    key: "atlas-4".into(),
                    tier_rank: 0,
                    baseline: 520.0,
                    amplitude: 120.0,
                    period_days: 9.0,
                    phase: 0.0,
                },
                ModelProfile {
                    key: "atlas-mini".into(),
                    tier_rank: 1,
                    baseline: 340.0,
                    amplitude: 80.0,
                    period_days: 6.5,
                    phase: 1.3,
                },
                ModelProfile {
                    key: "nimbus-2".into(),
                    tier_rank: 2,
                    baseline: 210.0,
                    amplitude: 60.0,
                    period_days: 11.0,
                    phase: 2.6,
                },
                ModelProfile {
                    key: "nimbus-lite".into(),
                    tier_rank: 3,
                    baseline: 90.0,
                    amplitude: 35.0,
                    period_days: 4.5,
                    phase: 4.1,
                },
            ],
            series: SeriesParams {
                noise: 45.0,
                scale: 1.15,
            },
            distribution: DistributionParams {
                bucket_width: 20,
                bucket_ceiling: 1000,
                base_users: 340.0,
                decay_dollars: 170.0,
                window_blend: 0.35,
                reference_window: 30.0,
                noise_ratio: 0.18,
            },
            pool: PoolParams {
                active_users: 1562,
                unlicensed_gap: 120,
                total_pool: 1_000_000.0,
                remaining_pool: 732_450.0,
                renewal_in_days: 200,
                term_days: 365,
            },
        }
    }
}

impl DashboardConfig {
    /// Parse a catalog from JSON text.
    pub fn from_json(text: &str) -> DashResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &str) -> DashResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    fn validate(&self) -> DashResult<()> {
        if self.models.is_empty() {
            return Err(DashboardError::EmptyCatalog);
        }
        if self.distribution.bucket_width == 0 {
            return Err(DashboardError::InvalidCatalog {
                reason: "bucket_width must be positive".into(),
            });
        }
        if self.series.noise <= 0.0 || self.distribution.noise_ratio <= 0.0 {
            return Err(DashboardError::InvalidCatalog {
                reason: "noise parameters must be positive".into(),
            });
        }
        Ok(())
    }
}
