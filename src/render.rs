//! Renderer collaborators: where the view controller's options end up.
//!
//! - [`MemoryRenderer`] keeps every option it receives
//! - [`JsonFileRenderer`] writes the latest option as pretty JSON
//! - [`Dashboard`] holds the options a session can reach without reloading the data;
//!   [`write_dashboard`] turns it into a standalone page where map clicks and the
//!   metric selector swap precomputed options into ECharts

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::{ChartOption, line_option, map_option};
use crate::models::{Dataset, Metric};
use crate::view::{ChartRenderer, InteractionState};

pub const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";
/// Registers the `world` geo map with ECharts.
pub const WORLD_MAP_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@4.9.0/map/js/world.js";

/// Records every option pushed to it, oldest first.
#[derive(Debug, Default, Clone)]
pub struct MemoryRenderer {
    pub options: Vec<ChartOption>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&ChartOption> {
        self.options.last()
    }

    pub fn render_count(&self) -> usize {
        self.options.len()
    }
}

impl ChartRenderer for MemoryRenderer {
    fn set_option(&mut self, option: &ChartOption) -> Result<()> {
        self.options.push(option.clone());
        Ok(())
    }
}

/// Overwrites `path` with each option it receives.
#[derive(Debug, Clone)]
pub struct JsonFileRenderer {
    path: PathBuf,
    writes: usize,
}

impl JsonFileRenderer {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writes: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of options written so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ChartRenderer for JsonFileRenderer {
    fn set_option(&mut self, option: &ChartOption) -> Result<()> {
        let s = serde_json::to_string_pretty(option)?;
        fs::write(&self.path, s).with_context(|| format!("write {}", self.path.display()))?;
        self.writes += 1;
        info!("wrote chart option to {}", self.path.display());
        Ok(())
    }
}

/// Every option the page can show for one session year.
///
/// `maps` is keyed by metric key (`EXP`, `IMP`, `BAL`), `lines` by country name. The
/// page starts from `metric` / `country` and only ever looks options up, the same way
/// [`InteractionState::apply`] picks which view a UI event refreshes.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub metric: Metric,
    pub year: i32,
    pub country: Option<String>,
    pub maps: BTreeMap<String, ChartOption>,
    pub lines: BTreeMap<String, ChartOption>,
}

impl Dashboard {
    /// Map options for all metrics at `state.year`, and a line option for every
    /// country named in the dataset plus the currently selected one.
    pub fn precompute(dataset: &Dataset, state: &InteractionState) -> Self {
        let maps = Metric::ALL
            .iter()
            .map(|&m| (m.key().to_string(), map_option(dataset, m, state.year)))
            .collect();

        let mut countries: BTreeSet<&str> = dataset
            .metrics
            .values()
            .flat_map(|years| years.values())
            .flatten()
            .map(|r| r.name.as_str())
            .collect();
        if let Some(c) = &state.country {
            countries.insert(c.as_str());
        }
        let lines: BTreeMap<String, ChartOption> = countries
            .into_iter()
            .map(|c| (c.to_string(), line_option(dataset, c)))
            .collect();
        debug!(
            "precomputed {} map and {} line options for {}",
            Metric::ALL.len(),
            lines.len(),
            state.year
        );

        Self {
            metric: state.metric,
            year: state.year,
            country: state.country.clone(),
            maps,
            lines,
        }
    }

    /// The option the map shows first.
    pub fn initial_map(&self) -> Option<&ChartOption> {
        self.maps.get(self.metric.key())
    }

    /// The option the line view shows first, if a country is selected.
    pub fn initial_line(&self) -> Option<&ChartOption> {
        self.country.as_deref().and_then(|c| self.lines.get(c))
    }
}

/// Build the dashboard page: a metric selector, the map and the time-series view.
///
/// Clicking a country shows its line option. Changing the metric shows that metric's
/// map and leaves the line untouched.
pub fn dashboard_page(title: &str, dashboard: &Dashboard) -> Result<String> {
    let mut select = String::new();
    for m in Metric::ALL {
        let selected = if m == dashboard.metric { " selected" } else { "" };
        select.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>\n",
            m.key(),
            escape_html(m.label())
        ));
    }
    // Keep `</script>` sequences in data from closing the inline script.
    let payload = serde_json::to_string(dashboard)?.replace("</", "<\\/");
    let title = escape_html(title);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{ECHARTS_CDN}"></script>
<script src="{WORLD_MAP_CDN}"></script>
<style>body {{ font-family: sans-serif; margin: 0 }} .chart {{ width: 100%; height: 520px }}</style>
</head>
<body>
<select id="metric">
{select}</select>
<div id="map" class="chart"></div>
<div id="line" class="chart"></div>
<script>
function revive(o) {{
  if (o.tooltip && typeof o.tooltip.formatter === "string" && o.tooltip.formatter.indexOf("function") === 0) {{
    o.tooltip.formatter = new Function("return " + o.tooltip.formatter)();
  }}
  return o;
}}
var dashboard = {payload};
var state = {{ metric: dashboard.metric, country: dashboard.country }};
var mapChart = echarts.init(document.getElementById("map"));
var lineChart = echarts.init(document.getElementById("line"));
function showMap() {{
  var o = dashboard.maps[state.metric];
  if (o) {{ mapChart.setOption(revive(JSON.parse(JSON.stringify(o))), true); }}
}}
function showLine() {{
  var o = state.country === null ? undefined : dashboard.lines[state.country];
  if (o) {{ lineChart.setOption(revive(JSON.parse(JSON.stringify(o))), true); }}
}}
mapChart.on("click", function (params) {{
  state.country = params.name;
  showLine();
}});
document.getElementById("metric").addEventListener("change", function (e) {{
  state.metric = e.target.value;
  showMap();
}});
showMap();
showLine();
</script>
</body>
</html>
"#
    ))
}

/// Write [`dashboard_page`] to `path`.
pub fn write_dashboard<P: AsRef<Path>>(path: P, title: &str, dashboard: &Dashboard) -> Result<()> {
    let path = path.as_ref();
    let html = dashboard_page(title, dashboard)?;
    fs::write(path, html).with_context(|| format!("write {}", path.display()))?;
    info!(
        "wrote dashboard page to {} ({} line options)",
        path.display(),
        dashboard.lines.len()
    );
    Ok(())
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
