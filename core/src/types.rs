//! Shared primitive types used across the dashboard core.

/// A lookback window, in whole days.
pub type WindowDays = u32;

/// Monotonically increasing identifier for an issued data fetch.
pub type RequestId = u64;

/// Round a currency amount to cents.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
