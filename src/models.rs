use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the three tracked trade quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    /// Export volume
    #[serde(rename = "EXP")]
    Exp,
    /// Import volume
    #[serde(rename = "IMP")]
    Imp,
    /// Trade balance (exports minus imports)
    #[serde(rename = "BAL")]
    Bal,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Exp, Metric::Imp, Metric::Bal];

    /// Key used in the dataset file (`"EXP"`, `"IMP"`, `"BAL"`).
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Exp => "EXP",
            Metric::Imp => "IMP",
            Metric::Bal => "BAL",
        }
    }

    /// Display label used in titles, legends and series names.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Exp => "Exportações",
            Metric::Imp => "Importações",
            Metric::Bal => "Balança Comercial",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric `{0}`, expected one of EXP, IMP, BAL")]
pub struct ParseMetricError(pub String);

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EXP" => Ok(Metric::Exp),
            "IMP" => Ok(Metric::Imp),
            "BAL" => Ok(Metric::Bal),
            _ => Err(ParseMetricError(s.to_string())),
        }
    }
}

/// Raw record from the dataset file: one country inside a (metric, year) bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryRecord {
    pub name: String,
    /// Amount in base currency units (US$). Some exports encode it as a string
    /// or leave it `null`; both are accepted, `null` reads as zero.
    #[serde(deserialize_with = "de_f64_from_string_number_or_null")]
    pub us_value: f64,
}

/// Serde helper: parse `f64` from a JSON number, a numeric string, or `null`.
fn de_f64_from_string_number_or_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct F64Visitor;

    impl<'de> Visitor<'de> for F64Visitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a number, a numeric string, or null")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<f64>().map_err(E::custom)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(F64Visitor)
}

/// Country records for one year, keyed by the year label (e.g. `"2025"`).
///
/// A `BTreeMap` keeps the labels in lexicographic order, which is the order the
/// time-series view uses.
pub type YearBuckets = BTreeMap<String, Vec<CountryRecord>>;

/// The whole `data.json` document: metric key -> year label -> records.
///
/// Metric keys stay strings so that files carrying extra metrics still parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Dataset {
    pub metrics: BTreeMap<String, YearBuckets>,
}

impl Dataset {
    /// Parse a dataset from JSON text.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// All year buckets recorded for `metric`, if any.
    pub fn years(&self, metric: Metric) -> Option<&YearBuckets> {
        self.metrics.get(metric.key())
    }

    /// The bucket for (`metric`, `year`), if present.
    pub fn bucket(&self, metric: Metric, year: i32) -> Option<&[CountryRecord]> {
        self.years(metric)
            .and_then(|years| years.get(&year.to_string()))
            .map(Vec::as_slice)
    }

    /// Insert one record, creating the metric and year entries on demand.
    pub fn push(&mut self, metric: Metric, year: &str, record: CountryRecord) {
        self.metrics
            .entry(metric.key().to_string())
            .or_default()
            .entry(year.to_string())
            .or_default()
            .push(record);
    }
}

/// One country shaded on the map; `value` is in billions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapPoint {
    pub name: String,
    pub value: f64,
}

/// Yearly values for one (metric, country) pair; `values[i]` belongs to `years[i]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub years: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Iterate `(year, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.years
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
