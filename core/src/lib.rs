//! usageboard-core — data shaping for the admin usage dashboard.
//!
//! Everything the page shells render: deterministic mock generators for
//! the usage-over-time chart, the spend-distribution histogram and its
//! drill-down, the derived pool/contract metrics, and the serializable
//! view state those components share.

pub mod config;
pub mod dashboard;
pub mod detail;
pub mod distribution;
pub mod error;
pub mod pool;
pub mod rng;
pub mod roster;
pub mod series;
pub mod source;
pub mod types;
pub mod view;
