//! The pluggable data-source seam.
//!
//! The chart components fetch through this trait. Today the only
//! implementation is the mock generator pair; a real backend client
//! implements the same two calls and must preserve the record shapes.
//! Retry and timeout policy belong to that implementation — the core
//! only guarantees last-request-wins ordering on commit.

use crate::{
    config::DashboardConfig,
    distribution::{generate_spend_distribution, SpendBucketDatum},
    error::DashResult,
    series::{generate_usage_series, UsagePoint},
    types::WindowDays,
};
use async_trait::async_trait;

#[async_trait]
pub trait SpendDataSource: Send + Sync {
    /// Per-day, per-model spend for the window, oldest first.
    async fn usage_series(&self, window: WindowDays) -> DashResult<Vec<UsagePoint>>;

    /// The fixed bucket set with simulated user counts for the window.
    async fn spend_distribution(&self, window: WindowDays) -> DashResult<Vec<SpendBucketDatum>>;
}

/// The built-in mock source, used whenever no override is supplied.
pub struct MockDataSource {
    config: DashboardConfig,
}

impl MockDataSource {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}

#[async_trait]
impl SpendDataSource for MockDataSource {
    async fn usage_series(&self, window: WindowDays) -> DashResult<Vec<UsagePoint>> {
        let today = chrono::Local::now().date_naive();
        generate_usage_series(&self.config, window, today)
    }

    async fn spend_distribution(&self, window: WindowDays) -> DashResult<Vec<SpendBucketDatum>> {
        generate_spend_distribution(&self.config, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_source_serves_both_shapes() {
        let source = MockDataSource::new(DashboardConfig::default());
        let series = source.usage_series(7).await.expect("series");
        assert_eq!(series.len(), 7);
        let buckets = source.spend_distribution(30).await.expect("distribution");
        assert_eq!(buckets.len(), 50);
    }
}
