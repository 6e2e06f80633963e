//! Serializable view state and its reducer.
//!
//! RULE: Rendering layers never mutate view state directly. Every change
//! is a ViewAction folded through apply(), a pure function of
//! (state, action, config). Async loads carry request ids: a completion
//! commits only while its id is still the latest issued for that slot,
//! so a superseded fetch can never clobber a newer selection.

use crate::{
    config::DashboardConfig,
    detail::{generate_user_stats, UserDetailStats},
    distribution::SpendBucketDatum,
    roster::{generate_bucket_roster, SyntheticUser},
    series::UsagePoint,
    types::{RequestId, WindowDays},
};
use serde::{Deserialize, Serialize};

/// Window shown on first render.
pub const DEFAULT_WINDOW: WindowDays = 30;

/// One async load slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState<T> {
    Idle,
    Loading { request: RequestId },
    Ready { data: T },
    Failed { message: String },
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready { data } => Some(data),
            _ => None,
        }
    }
}

/// Every transition the dashboard view can make.
/// Variants are added per page feature — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewAction {
    // ── Window selection ──────────────────────────
    SetWindow { days: WindowDays },

    // ── Usage-over-time slot ──────────────────────
    SeriesLoadStarted { request: RequestId },
    SeriesLoaded { request: RequestId, points: Vec<UsagePoint> },
    SeriesLoadFailed { request: RequestId, message: String },

    // ── Spend-distribution slot ───────────────────
    DistributionLoadStarted { request: RequestId },
    DistributionLoaded { request: RequestId, buckets: Vec<SpendBucketDatum> },
    DistributionLoadFailed { request: RequestId, message: String },

    // ── Drill-down ────────────────────────────────
    SelectBucket { label: String },
    ClearBucket,
    SelectUser { email: String },
    ClearUser,
}

/// The whole page, as a value. Serializable so a session can be
/// snapshotted and restored, and so the reducer stays testable without
/// any rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub window: WindowDays,
    pub series: LoadState<Vec<UsagePoint>>,
    pub distribution: LoadState<Vec<SpendBucketDatum>>,
    pub selected_bucket: Option<String>,
    pub roster: Vec<SyntheticUser>,
    pub selected_user: Option<String>,
    pub user_detail: Option<UserDetailStats>,
    /// Latest request id issued per slot. Completions with older ids are
    /// discarded on arrival.
    pub latest_series_request: RequestId,
    pub latest_distribution_request: RequestId,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            series: LoadState::Idle,
            distribution: LoadState::Idle,
            selected_bucket: None,
            roster: Vec::new(),
            selected_user: None,
            user_detail: None,
            latest_series_request: 0,
            latest_distribution_request: 0,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one action into the state. Pure: same (state, action, config)
    /// in, same state out.
    pub fn apply(mut self, action: ViewAction, config: &DashboardConfig) -> Self {
        match action {
            ViewAction::SetWindow { days } => {
                self.window = days;
                // Drill-down derives from the window's distribution;
                // a new window invalidates it.
                self.clear_drilldown();
            }

            ViewAction::SeriesLoadStarted { request } => {
                if request >= self.latest_series_request {
                    self.latest_series_request = request;
                    self.series = LoadState::Loading { request };
                }
            }
            ViewAction::SeriesLoaded { request, points } => {
                if request == self.latest_series_request {
                    self.series = LoadState::Ready { data: points };
                } else {
                    log::debug!("discarding stale series result (request {request})");
                }
            }
            ViewAction::SeriesLoadFailed { request, message } => {
                if request == self.latest_series_request {
                    self.series = LoadState::Failed { message };
                }
            }

            ViewAction::DistributionLoadStarted { request } => {
                if request >= self.latest_distribution_request {
                    self.latest_distribution_request = request;
                    self.distribution = LoadState::Loading { request };
                }
            }
            ViewAction::DistributionLoaded { request, buckets } => {
                if request == self.latest_distribution_request {
                    self.distribution = LoadState::Ready { data: buckets };
                    // The counts behind an open drill-down just changed.
                    if let Some(label) = self.selected_bucket.clone() {
                        self.materialize_bucket(&label, config);
                    }
                } else {
                    log::debug!("discarding stale distribution result (request {request})");
                }
            }
            ViewAction::DistributionLoadFailed { request, message } => {
                if request == self.latest_distribution_request {
                    self.distribution = LoadState::Failed { message };
                }
            }

            ViewAction::SelectBucket { label } => {
                self.materialize_bucket(&label, config);
            }
            ViewAction::ClearBucket => self.clear_drilldown(),

            ViewAction::SelectUser { email } => {
                let row = self.roster.iter().find(|user| user.email == email);
                match (row, self.selected_bucket.as_deref()) {
                    (Some(user), Some(label)) => {
                        self.user_detail =
                            Some(generate_user_stats(config, &user.email, user.spend, label));
                        self.selected_user = Some(email);
                    }
                    _ => {
                        // Unknown user or no open bucket: nothing to show.
                        self.selected_user = None;
                        self.user_detail = None;
                    }
                }
            }
            ViewAction::ClearUser => {
                self.selected_user = None;
                self.user_detail = None;
            }
        }
        self
    }

    /// Open a bucket: derive its roster from the committed distribution.
    /// An unknown or malformed bucket shows an empty table, not an error.
    fn materialize_bucket(&mut self, label: &str, config: &DashboardConfig) {
        self.selected_bucket = Some(label.to_string());
        let datum = self
            .distribution
            .data()
            .and_then(|buckets| buckets.iter().find(|b| b.bucket == label));
        self.roster = match datum {
            Some(datum) => generate_bucket_roster(datum),
            None => Vec::new(),
        };

        // Keep the user selection only if it survived the refresh.
        match self.selected_user.take() {
            Some(email) if self.roster.iter().any(|u| u.email == email) => {
                let user = self
                    .roster
                    .iter()
                    .find(|u| u.email == email)
                    .cloned();
                if let Some(user) = user {
                    self.user_detail =
                        Some(generate_user_stats(config, &user.email, user.spend, label));
                    self.selected_user = Some(email);
                }
            }
            _ => self.user_detail = None,
        }
    }

    fn clear_drilldown(&mut self) {
        self.selected_bucket = None;
        self.roster = Vec::new();
        self.selected_user = None;
        self.user_detail = None;
    }
}
