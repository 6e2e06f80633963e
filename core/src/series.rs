//! Mock usage-over-time generator.
//!
//! Stand-in for the real usage endpoint: each model's daily spend is a
//! baseline plus a slow sinusoidal swing (distinct period and phase per
//! model) plus bounded uniform noise, floored at zero and scaled. The
//! noise draws from the platform RNG — unlike the drill-down generators
//! this one is non-reproducible on purpose, matching the live endpoint
//! it will be swapped out for.

use crate::{
    config::DashboardConfig,
    error::{DashResult, DashboardError},
    types::{round2, WindowDays},
};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Spend attributed to one catalog model on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpend {
    pub model: String,
    pub amount: f64,
}

/// One day of the usage chart, per-model amounts in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsagePoint {
    pub date: NaiveDate,
    pub total: f64,
    pub by_model: Vec<ModelSpend>,
}

/// Generate `window` days of per-model spend, oldest first, ending at
/// `today`. Any positive window works; the picker offers 7/14/30/60/90.
pub fn generate_usage_series(
    config: &DashboardConfig,
    window: WindowDays,
    today: NaiveDate,
) -> DashResult<Vec<UsagePoint>> {
    if window == 0 {
        return Err(DashboardError::InvalidWindow { days: 0 });
    }

    let mut rng = rand::thread_rng();
    let mut points = Vec::with_capacity(window as usize);

    for day in 0..window {
        let date = today - Duration::days(i64::from(window - 1 - day));
        let mut by_model = Vec::with_capacity(config.models.len());
        let mut total = 0.0;

        for profile in &config.models {
            let swing = profile.amplitude
                * (TAU * f64::from(day) / profile.period_days + profile.phase).sin();
            let noise = rng.gen_range(-config.series.noise..config.series.noise);
            let amount =
                round2((profile.baseline + swing + noise).max(0.0) * config.series.scale);
            total += amount;
            by_model.push(ModelSpend {
                model: profile.key.clone(),
                amount,
            });
        }

        points.push(UsagePoint {
            date,
            total: round2(total),
            by_model,
        });
    }

    log::debug!("generated usage series: window={window} points={}", points.len());
    Ok(points)
}
