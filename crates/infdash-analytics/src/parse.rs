//! Lenient numeric coercion for raw CSV cells.
//!
//! Every helper returns a usable value plus a flag saying whether a fallback
//! was substituted, so callers can count degraded rows without failing.

/// Coerces a like/share count to a non-negative integer.
///
/// - Plain integers (`"42"`, `" 7 "`) parse cleanly.
/// - Whole decimals (`"12.0"`) parse cleanly.
/// - Fractional decimals truncate toward zero (`"12.7"` → `12`) and are flagged.
/// - Empty, non-numeric, non-finite and negative cells become `0` and are flagged.
#[must_use]
pub(crate) fn coerce_count(raw: &str) -> (u64, bool) {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return (n, false);
    }

    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let n = v.trunc() as u64;
            (n, v.fract() != 0.0)
        }
        _ => (0, true),
    }
}

/// Parses a spend cell. Finite, non-negative numbers are accepted.
///
/// A zero cell is kept as `0.0` so the ROI stage rejects it on every pass,
/// rather than being replaced by a fallback on re-read.
#[must_use]
pub(crate) fn parse_cost(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Canonical cell text for a cost so re-parsing yields the same value.
#[must_use]
pub(crate) fn format_cost(cost: f64) -> String {
    cost.to_string()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
