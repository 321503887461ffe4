//! tmon_rs
//!
//! Data-reshaping and chart-wiring core of a trade monitor dashboard: exports, imports
//! and trade balance per country, shown on a world map and as yearly totals. Pairs
//! with the `tmon` CLI.
//!
//! ### Features
//! - Load the `data.json` dataset from a file or an HTTP(S) URL
//! - Reshape it into map points (one metric, one year) or series (one metric, one country)
//! - Build ECharts options for the map and the time-series view
//! - Drive both views from user events through a [`ViewController`]
//! - Write options as JSON, as an interactive HTML page, or export the derived data as CSV/JSON
//!
//! ### Example
//! ```no_run
//! use tmon_rs::render::{Dashboard, JsonFileRenderer, write_dashboard};
//! use tmon_rs::{Metric, ViewController};
//!
//! let dataset = tmon_rs::loader::load("data.json")?;
//! let map = JsonFileRenderer::new("map.json");
//! let line = JsonFileRenderer::new("line.json");
//! let mut views = ViewController::new(&dataset, map, line);
//! views.start()?;
//! views.on_map_click("Brazil")?;
//! views.on_metric_change(Metric::Imp)?;
//! let dashboard = Dashboard::precompute(&dataset, views.state());
//! write_dashboard("dashboard.html", "Trade monitor", &dashboard)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod config;
pub mod loader;
pub mod models;
pub mod palette;
pub mod render;
pub mod reshape;
pub mod storage;
pub mod view;

pub use chart::ChartOption;
pub use config::DashboardConfig;
pub use models::{CountryRecord, Dataset, MapPoint, Metric, Series};
pub use reshape::{format_amount, map_points_for, series_for};
pub use view::{ChartRenderer, Event, InteractionState, ViewController};
