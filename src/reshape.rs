//! Pure reshaping from the raw [`Dataset`] into the arrays each chart view needs.
//!
//! Nothing here fails: a metric or year missing from the dataset yields empty output,
//! and a country missing from a year counts as zero activity.

use crate::models::{Dataset, MapPoint, Metric, Series};
use log::debug;

/// Raw currency units per displayed unit (amounts are shown in billions).
pub const BILLION: f64 = 1e9;

/// Map points for one (metric, year) bucket, values in billions, in dataset order.
pub fn map_points_for(dataset: &Dataset, metric: Metric, year: i32) -> Vec<MapPoint> {
    let points: Vec<MapPoint> = dataset
        .bucket(metric, year)
        .unwrap_or_default()
        .iter()
        .map(|r| MapPoint {
            name: r.name.clone(),
            value: r.us_value / BILLION,
        })
        .collect();
    debug!("{metric}/{year}: {} map points", points.len());
    points
}

/// Yearly values for one country, years in lexicographic label order.
///
/// Labels are compared as strings, so mixed-width labels (`"99"` vs `"2001"`) sort
/// out of numeric order.
pub fn series_for(dataset: &Dataset, metric: Metric, country: &str) -> Series {
    let Some(buckets) = dataset.years(metric) else {
        return Series::default();
    };
    let mut series = Series::default();
    for (year, records) in buckets {
        let value = records
            .iter()
            .find(|r| r.name == country)
            .map(|r| r.us_value / BILLION)
            .unwrap_or(0.0);
        series.years.push(year.clone());
        series.values.push(value);
    }
    series
}

/// Largest value among `points`, or `None` when there are none.
pub fn max_value(points: &[MapPoint]) -> Option<f64> {
    points
        .iter()
        .map(|p| p.value)
        .filter(|v| !v.is_nan())
        .reduce(f64::max)
}

/// One decimal place with a comma as decimal separator: `1.23456` -> `"1,2"`.
///
/// Exact halves (`0.25`, `-1.75`) round away from zero, negative zero prints as
/// `"0,0"`, and non-finite values print as `NaN` / `Infinity` / `-Infinity`.
/// Magnitudes of `1e21` and above use exponent form (`"1e+21"`, `"-1,5e+21"`).
pub fn format_amount(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let abs = n.abs();
    let body = if abs >= 1e21 {
        exponent_form(abs)
    } else {
        one_decimal(abs)
    };
    let body = body.replace('.', ",");
    if n < 0.0 { format!("-{body}") } else { body }
}

/// `{:.1}` with halves rounded up. Halves at one decimal are odd multiples of `0.25`,
/// whose two-decimal expansion is exact, so the tenths digit is bumped in the string.
fn one_decimal(abs: f64) -> String {
    let quarters = abs * 4.0;
    if quarters.fract() != 0.0 || quarters % 2.0 != 1.0 {
        return format!("{abs:.1}");
    }
    let mut s = format!("{abs:.2}");
    s.pop();
    // The tenths digit is 2 or 7 here, so there is no carry.
    let bumped = match s.pop() {
        Some('2') => '3',
        Some('7') => '8',
        Some(d) => d,
        None => '0',
    };
    s.push(bumped);
    s
}

/// Shortest round-trip digits with an explicit exponent sign: `1.5e21` -> `"1.5e+21"`.
fn exponent_form(abs: f64) -> String {
    let s = format!("{abs:e}");
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}
