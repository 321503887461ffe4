//! Tooltip formatters.
//!
//! ECharts takes formatters as JavaScript callbacks. A [`Formatter`] serializes to the
//! callback's source text (revived by the HTML page) and can also produce the same
//! tooltip text in Rust, which is what the tests and the CLI use.

use serde::{Serialize, Serializer};

use crate::models::Metric;
use crate::reshape::format_amount;

/// JS twin of [`format_amount`]; `toFixed(1)` already matches its rounding.
const JS_FORMAT_AMOUNT: &str = r#"function (n) { return n.toFixed(1).replace(".", ","); }"#;

#[derive(Debug, Clone, PartialEq)]
pub enum Formatter {
    /// `{country}<br/>US$ {amount} bi` for one map item.
    MapItem,
    /// One header line per year plus one line per series for `country`.
    TradeTotals { country: String },
}

impl Formatter {
    /// Tooltip for a map item. A missing, zero or NaN value shows as `0,0`.
    pub fn format_item(name: &str, value: Option<f64>) -> String {
        let amount = match value {
            Some(v) if v != 0.0 && !v.is_nan() => format_amount(v),
            _ => "0,0".to_string(),
        };
        format!("{name}<br/>US$ {amount} bi")
    }

    /// Tooltip for the year under the axis pointer; `rows` are `(series name, value)`.
    pub fn format_axis(country: &str, year: &str, rows: &[(&str, f64)]) -> String {
        let mut lines = vec![format!("Ano {year}")];
        for (series_name, value) in rows {
            lines.push(format!(
                "Total de {} {country}: US$ {} bi",
                series_label(series_name),
                format_amount(*value)
            ));
        }
        lines.join("<br/>")
    }

    /// JavaScript source of the callback.
    pub fn to_js(&self) -> String {
        match self {
            Formatter::MapItem => format!(
                "function (p) {{ var fmt = {JS_FORMAT_AMOUNT}; \
                 return p.name + \"<br/>US$ \" + (p.value ? fmt(p.value) : \"0,0\") + \" bi\"; }}"
            ),
            Formatter::TradeTotals { country } => {
                // JSON string literals are valid JS string literals.
                let country = serde_json::Value::String(country.clone()).to_string();
                let (exp, imp, bal) = (
                    Metric::Exp.label(),
                    Metric::Imp.label(),
                    Metric::Bal.label(),
                );
                format!(
                    "function (params) {{ var fmt = {JS_FORMAT_AMOUNT}; var country = {country}; \
                     var lines = [\"Ano \" + params[0].axisValue]; \
                     params.forEach(function (p) {{ \
                     var label = p.seriesName === \"{exp}\" ? \"{exp}\" \
                     : p.seriesName === \"{imp}\" ? \"{imp}\" : \"{bal}\"; \
                     lines.push(\"Total de \" + label + \" \" + country + \": US$ \" + fmt(p.data) + \" bi\"); }}); \
                     return lines.join(\"<br/>\"); }}"
                )
            }
        }
    }
}

/// Series names other than exports/imports are reported as the balance.
fn series_label(series_name: &str) -> &'static str {
    if series_name == Metric::Exp.label() {
        Metric::Exp.label()
    } else if series_name == Metric::Imp.label() {
        Metric::Imp.label()
    } else {
        Metric::Bal.label()
    }
}

impl Serialize for Formatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_js())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_tooltip_defaults_to_zero() {
        assert_eq!(Formatter::format_item("Chile", Some(3.46)), "Chile<br/>US$ 3,5 bi");
        assert_eq!(Formatter::format_item("Peru", None), "Peru<br/>US$ 0,0 bi");
        assert_eq!(Formatter::format_item("Peru", Some(0.0)), "Peru<br/>US$ 0,0 bi");
    }

    #[test]
    fn axis_tooltip_lists_each_series() {
        let text = Formatter::format_axis(
            "Brazil",
            "2024",
            &[("Exportações", 2.0), ("Importações", 1.25), ("anything", -0.5)],
        );
        assert_eq!(
            text,
            "Ano 2024<br/>\
             Total de Exportações Brazil: US$ 2,0 bi<br/>\
             Total de Importações Brazil: US$ 1,3 bi<br/>\
             Total de Balança Comercial Brazil: US$ -0,5 bi"
        );
    }

    #[test]
    fn js_source_quotes_country() {
        let js = Formatter::TradeTotals {
            country: "Côte d\"Ivoire".into(),
        }
        .to_js();
        assert!(js.starts_with("function (params)"));
        assert!(js.contains(r#"var country = "Côte d\"Ivoire";"#));
    }
}
