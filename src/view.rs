//! View controller: interaction state, event handling and renderer wiring.
//!
//! State changes are pure ([`InteractionState::apply`]); the controller threads its
//! state through `apply`, then rebuilds and pushes the option of the view that changed.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::chart::{self, ChartOption};
use crate::models::{Dataset, Metric};

/// Year shown on the map until the user picks another one.
pub const DEFAULT_YEAR: i32 = 2025;

/// Receiver of chart configurations for one view (one DOM anchor).
pub trait ChartRenderer {
    /// Replace the view's configuration with `option`.
    fn set_option(&mut self, option: &ChartOption) -> Result<()>;
}

impl<R: ChartRenderer + ?Sized> ChartRenderer for &mut R {
    fn set_option(&mut self, option: &ChartOption) -> Result<()> {
        (**self).set_option(option)
    }
}

impl<R: ChartRenderer + ?Sized> ChartRenderer for Box<R> {
    fn set_option(&mut self, option: &ChartOption) -> Result<()> {
        (**self).set_option(option)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    pub metric: Metric,
    pub year: i32,
    /// `None` until a country is clicked on the map.
    pub country: Option<String>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            metric: Metric::Exp,
            year: DEFAULT_YEAR,
            country: None,
        }
    }
}

/// User interactions the dashboard reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A country was clicked on the map.
    MapClick { name: String },
    /// The metric selector changed.
    MetricChanged(Metric),
    /// The year selector changed.
    YearChanged(i32),
}

/// Which view has to be rebuilt after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Map,
    Line,
}

impl InteractionState {
    /// Next state for `event`, plus the view it invalidates.
    ///
    /// Changing the metric or year only refreshes the map; the line view keeps showing
    /// the last clicked country until the next click.
    pub fn apply(self, event: &Event) -> (InteractionState, Refresh) {
        match event {
            Event::MapClick { name } => (
                InteractionState {
                    country: Some(name.clone()),
                    ..self
                },
                Refresh::Line,
            ),
            Event::MetricChanged(metric) => (
                InteractionState {
                    metric: *metric,
                    ..self
                },
                Refresh::Map,
            ),
            Event::YearChanged(year) => (InteractionState { year: *year, ..self }, Refresh::Map),
        }
    }
}

/// Owns the interaction state and both views of the dashboard.
pub struct ViewController<'d, M, L> {
    dataset: &'d Dataset,
    state: InteractionState,
    map: M,
    line: L,
}

impl<'d, M: ChartRenderer, L: ChartRenderer> ViewController<'d, M, L> {
    pub fn new(dataset: &'d Dataset, map: M, line: L) -> Self {
        Self::with_state(dataset, InteractionState::default(), map, line)
    }

    pub fn with_state(dataset: &'d Dataset, state: InteractionState, map: M, line: L) -> Self {
        Self {
            dataset,
            state,
            map,
            line,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// First render: the map for the initial metric and year.
    pub fn start(&mut self) -> Result<()> {
        info!(
            "starting dashboard: metric={} year={}",
            self.state.metric, self.state.year
        );
        self.render(Refresh::Map)
    }

    /// Apply `event` and re-render the affected view.
    pub fn handle(&mut self, event: Event) -> Result<()> {
        debug!("event: {event:?}");
        let (next, refresh) = self.state.clone().apply(&event);
        self.state = next;
        self.render(refresh)
    }

    pub fn on_map_click(&mut self, name: &str) -> Result<()> {
        self.handle(Event::MapClick {
            name: name.to_string(),
        })
    }

    pub fn on_metric_change(&mut self, metric: Metric) -> Result<()> {
        self.handle(Event::MetricChanged(metric))
    }

    pub fn on_year_change(&mut self, year: i32) -> Result<()> {
        self.handle(Event::YearChanged(year))
    }

    fn render(&mut self, refresh: Refresh) -> Result<()> {
        match refresh {
            Refresh::Map => {
                let option = chart::map_option(self.dataset, self.state.metric, self.state.year);
                self.map.set_option(&option).context("render map view")
            }
            Refresh::Line => {
                // `apply` only asks for the line view after a click, which sets the country.
                let Some(country) = self.state.country.as_deref() else {
                    return Ok(());
                };
                let option = chart::line_option(self.dataset, country);
                self.line.set_option(&option).context("render line view")
            }
        }
    }

    /// Hand back the renderers, e.g. to write out what they collected.
    pub fn into_renderers(self) -> (M, L) {
        (self.map, self.line)
    }
}
