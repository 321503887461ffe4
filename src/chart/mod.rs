//! Chart configuration assembly for the two dashboard views.
//!
//! - World map shaded by one metric for one year ([`map_option`])
//! - Yearly totals of exports, imports and balance for one country ([`line_option`])
//!
//! Options are plain data; pushing them to a renderer is the view controller's job.

pub mod formatter;
pub mod types;

pub use formatter::Formatter;
pub use types::*;

use crate::models::{Dataset, Metric};
use crate::palette::{gradient, visual_range};
use crate::reshape::{map_points_for, max_value, series_for};

pub const MAP_SUBTITLE: &str = "Dados do monitor do comércio brasileiro";
pub const VISUAL_MAP_NAME: &str = "Volume negociado com o país (Bilhões de US$)";
pub const VALUE_AXIS_NAME: &str = "Bilhões US$";
/// Geo map the map series draws on; must be registered with the renderer.
pub const WORLD_MAP: &str = "world";

/// World-map option for `metric` in `year`.
pub fn map_option(dataset: &Dataset, metric: Metric, year: i32) -> ChartOption {
    let points = map_points_for(dataset, metric, year);
    let (min, max) = visual_range(metric, max_value(&points));

    ChartOption {
        title: Title {
            text: format!("Volume de {} ({year})", metric.label()),
            subtext: Some(MAP_SUBTITLE.to_string()),
            left: Some("center".into()),
            top: None,
        },
        tooltip: Tooltip {
            trigger: Trigger::Item,
            formatter: Formatter::MapItem,
        },
        legend: None,
        grid: None,
        x_axis: None,
        y_axis: None,
        data_zoom: Vec::new(),
        visual_map: Some(VisualMap {
            min,
            max,
            right: 20.into(),
            top: "middle".into(),
            text: vec!["Alto".to_string(), "Baixo".to_string()],
            calculable: true,
            orient: Orient::Vertical,
            name: VISUAL_MAP_NAME.to_string(),
            in_range: InRange {
                color: gradient(metric).iter().map(|c| c.to_string()).collect(),
            },
        }),
        series: vec![ChartSeries {
            name: "Mapa".to_string(),
            kind: SeriesKind::Map,
            map: Some(WORLD_MAP.to_string()),
            roam: Some(true),
            smooth: None,
            emphasis: Some(Emphasis {
                label: Label { show: false },
            }),
            item_style: Some(ItemStyle {
                normal: AreaStyle {
                    area_color: "#f5f5f5".to_string(),
                    border_color: Some("#999".to_string()),
                },
                emphasis: AreaStyle {
                    area_color: "#d1e6fa".to_string(),
                    border_color: None,
                },
            }),
            data: SeriesData::Points(points),
        }],
    }
}

/// Time-series option for `country`: one smooth line per metric.
///
/// The category axis uses the export years; each line carries the values of its own
/// metric's years, so metrics with different year sets are index-aligned, not
/// year-aligned.
pub fn line_option(dataset: &Dataset, country: &str) -> ChartOption {
    let exp = series_for(dataset, Metric::Exp, country);
    let lines: Vec<ChartSeries> = Metric::ALL
        .iter()
        .map(|&metric| {
            let values = if metric == Metric::Exp {
                exp.values.clone()
            } else {
                series_for(dataset, metric, country).values
            };
            ChartSeries {
                name: metric.label().to_string(),
                kind: SeriesKind::Line,
                map: None,
                roam: None,
                smooth: Some(true),
                emphasis: None,
                item_style: None,
                data: SeriesData::Values(values),
            }
        })
        .collect();

    ChartOption {
        title: Title {
            text: format!("Totais por ano ({country})"),
            subtext: None,
            left: Some("center".into()),
            top: Some(5.into()),
        },
        tooltip: Tooltip {
            trigger: Trigger::Axis,
            formatter: Formatter::TradeTotals {
                country: country.to_string(),
            },
        },
        legend: Some(Legend {
            data: Metric::ALL.iter().map(|m| m.label().to_string()).collect(),
            top: Some(50.into()),
        }),
        grid: Some(Grid {
            left: "10%".into(),
            right: "10%".into(),
            bottom: "15%".into(),
            top: 90.into(),
        }),
        x_axis: Some(Axis {
            kind: AxisType::Category,
            name: None,
            data: Some(exp.years),
        }),
        y_axis: Some(Axis {
            kind: AxisType::Value,
            name: Some(VALUE_AXIS_NAME.to_string()),
            data: None,
        }),
        data_zoom: vec![
            DataZoom {
                kind: ZoomKind::Inside,
                start: 0.0,
                end: 100.0,
                show_data_shadow: None,
            },
            DataZoom {
                kind: ZoomKind::Slider,
                start: 0.0,
                end: 100.0,
                show_data_shadow: Some(false),
            },
        ],
        visual_map: None,
        series: lines,
    }
}

impl ChartOption {
    /// Tooltip text for every category of a line option, as the axis formatter would
    /// render it. Empty for options without a category axis.
    pub fn axis_tooltips(&self) -> Vec<String> {
        let Formatter::TradeTotals { country } = &self.tooltip.formatter else {
            return Vec::new();
        };
        let Some(years) = self.x_axis.as_ref().and_then(|a| a.data.as_ref()) else {
            return Vec::new();
        };
        years
            .iter()
            .enumerate()
            .map(|(i, year)| {
                let rows: Vec<(&str, f64)> = self
                    .series
                    .iter()
                    .filter_map(|s| match &s.data {
                        SeriesData::Values(v) => v.get(i).map(|v| (s.name.as_str(), *v)),
                        SeriesData::Points(_) => None,
                    })
                    .collect();
                Formatter::format_axis(country, year, &rows)
            })
            .collect()
    }

    /// Tooltip text for every item of a map option.
    pub fn item_tooltips(&self) -> Vec<String> {
        self.series
            .iter()
            .filter_map(|s| match &s.data {
                SeriesData::Points(points) => Some(points),
                SeriesData::Values(_) => None,
            })
            .flatten()
            .map(|p| Formatter::format_item(&p.name, Some(p.value)))
            .collect()
    }
}
