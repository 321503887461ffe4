//! Map shading: per-metric color gradients and the visual-map value range.
//!
//! Both are pure functions of the metric (and, for the range, of the current data).

use crate::models::Metric;

/// Light-to-dark green, used for exports.
pub const EXPORT_GRADIENT: [&str; 3] = ["#e0f3db", "#43a2ca", "#006837"];
/// Light-to-dark red, used for imports.
pub const IMPORT_GRADIENT: [&str; 3] = ["#fee0d2", "#fc9272", "#cb181d"];
/// Diverging red-white-blue, used for the balance (deficit -> surplus).
pub const BALANCE_GRADIENT: [&str; 3] = ["#cb181d", "#f7f7f7", "#2171b5"];

/// Colors for the visual map's `inRange`, low to high.
pub fn gradient(metric: Metric) -> [&'static str; 3] {
    match metric {
        Metric::Exp => EXPORT_GRADIENT,
        Metric::Imp => IMPORT_GRADIENT,
        Metric::Bal => BALANCE_GRADIENT,
    }
}

/// `(min, max)` for the visual map given the largest value on the map.
///
/// Balance is centred on zero (`-max..max`); the other metrics start at zero.
/// An empty map (`None`) collapses to `(0, 0)`.
pub fn visual_range(metric: Metric, max: Option<f64>) -> (f64, f64) {
    let max = max.unwrap_or(0.0);
    match metric {
        Metric::Bal => (-max, max),
        Metric::Exp | Metric::Imp => (0.0, max),
    }
}
