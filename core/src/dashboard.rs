//! Dashboard orchestrator — wires the data source to the view state.
//!
//! Owns the request-id counter. Every fetch gets a fresh id and its
//! completion is offered back to the reducer, which enforces
//! last-request-wins; the orchestrator never writes view fields itself.

use crate::{
    config::DashboardConfig,
    source::{MockDataSource, SpendDataSource},
    types::{RequestId, WindowDays},
    view::{ViewAction, ViewState},
};
use std::sync::Arc;

pub struct Dashboard {
    config: DashboardConfig,
    source: Arc<dyn SpendDataSource>,
    state: ViewState,
    next_request: RequestId,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, source: Arc<dyn SpendDataSource>) -> Self {
        Self {
            config,
            source,
            state: ViewState::new(),
            next_request: 0,
        }
    }

    /// Wire up against the built-in mock generators.
    pub fn with_mock(config: DashboardConfig) -> Self {
        let source = Arc::new(MockDataSource::new(config.clone()));
        Self::new(config, source)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Fold one action into the view state.
    pub fn dispatch(&mut self, action: ViewAction) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action, &self.config);
    }

    fn issue_request(&mut self) -> RequestId {
        self.next_request += 1;
        self.next_request
    }

    /// Change the lookback window and reload both charts.
    pub async fn set_window(&mut self, days: WindowDays) {
        self.dispatch(ViewAction::SetWindow { days });
        self.refresh().await;
    }

    /// Reload both charts for the current window. A failed fetch commits
    /// a Failed slot so the page never wedges in a loading state.
    pub async fn refresh(&mut self) {
        let window = self.state.window;

        let request = self.issue_request();
        self.dispatch(ViewAction::SeriesLoadStarted { request });
        let action = match self.source.usage_series(window).await {
            Ok(points) => ViewAction::SeriesLoaded { request, points },
            Err(error) => {
                log::warn!("usage series fetch failed: {error}");
                ViewAction::SeriesLoadFailed {
                    request,
                    message: error.to_string(),
                }
            }
        };
        self.dispatch(action);

        let request = self.issue_request();
        self.dispatch(ViewAction::DistributionLoadStarted { request });
        let action = match self.source.spend_distribution(window).await {
            Ok(buckets) => ViewAction::DistributionLoaded { request, buckets },
            Err(error) => {
                log::warn!("spend distribution fetch failed: {error}");
                ViewAction::DistributionLoadFailed {
                    request,
                    message: error.to_string(),
                }
            }
        };
        self.dispatch(action);
    }

    /// Drill into a bucket. Pure computation, no fetch.
    pub fn select_bucket(&mut self, label: &str) {
        self.dispatch(ViewAction::SelectBucket {
            label: label.to_string(),
        });
    }

    /// Open one user's detail panel. Pure computation, no fetch.
    pub fn select_user(&mut self, email: &str) {
        self.dispatch(ViewAction::SelectUser {
            email: email.to_string(),
        });
    }
}
