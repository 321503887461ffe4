//! The chart configuration ("option") handed to ECharts' `setOption`.
//!
//! Field names serialize in ECharts' camelCase; optional parts are omitted when unset.

use serde::Serialize;

use super::formatter::Formatter;
use crate::models::MapPoint;

/// Placement value: pixels (`20`) or a keyword/percentage (`"center"`, `"10%"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Position {
    Px(i32),
    Named(String),
}

impl From<i32> for Position {
    fn from(px: i32) -> Self {
        Position::Px(px)
    }
}

impl From<&str> for Position {
    fn from(s: &str) -> Self {
        Position::Named(s.to_string())
    }
}

/// A complete view configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOption {
    pub title: Title,
    pub tooltip: Tooltip,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Axis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_zoom: Vec<DataZoom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_map: Option<VisualMap>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// One data item (a country on the map).
    Item,
    /// Everything under the axis pointer (one year across series).
    Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub trigger: Trigger,
    pub formatter: Formatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub data: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub left: Position,
    pub right: Position,
    pub bottom: Position,
    pub top: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Category,
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    #[serde(rename = "type")]
    pub kind: AxisType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomKind {
    /// Mouse-wheel / drag zoom inside the grid.
    Inside,
    /// Slider bar under the grid.
    Slider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataZoom {
    #[serde(rename = "type")]
    pub kind: ZoomKind,
    pub start: f64,
    pub end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_data_shadow: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orient {
    Vertical,
    Horizontal,
}

/// Continuous visual map shading the countries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualMap {
    pub min: f64,
    pub max: f64,
    pub right: Position,
    pub top: Position,
    /// `[high label, low label]`
    pub text: Vec<String>,
    pub calculable: bool,
    pub orient: Orient,
    pub name: String,
    pub in_range: InRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InRange {
    pub color: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Map,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    /// Named points for the map.
    Points(Vec<MapPoint>),
    /// Bare values aligned with the category axis.
    Values(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    /// Registered geo map name (map series only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roam: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smooth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Emphasis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<ItemStyle>,
    pub data: SeriesData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emphasis {
    pub label: Label,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub show: bool,
}

/// Area styling in the normal and highlighted states.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStyle {
    pub normal: AreaStyle,
    pub emphasis: AreaStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaStyle {
    pub area_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}
