//! Per-post engagement and return-on-spend.

use crate::error::MetricError;

/// A share is worth this many likes.
pub const SHARE_WEIGHT: u64 = 3;

/// Weighted interaction count: `likes + SHARE_WEIGHT * shares`.
///
/// Saturates at `u64::MAX` rather than wrapping.
#[must_use]
pub fn engagement(likes: u64, shares: u64) -> u64 {
    likes.saturating_add(shares.saturating_mul(SHARE_WEIGHT))
}

/// Engagement earned per unit of spend.
///
/// # Errors
///
/// Returns [`MetricError::NonPositiveCost`] when `cost` is zero, negative,
/// or not finite.
#[allow(clippy::cast_precision_loss)]
pub fn roi(engagement: u64, cost: f64) -> Result<f64, MetricError> {
    if !cost.is_finite() || cost <= 0.0 {
        return Err(MetricError::NonPositiveCost { cost });
    }
    Ok(engagement as f64 / cost)
}
