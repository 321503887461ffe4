use serde::{Deserialize, Serialize};

use crate::models::Metric;
use crate::view::{DEFAULT_YEAR, InteractionState};

/// Dataset file the dashboard reads when no source is given.
pub const DEFAULT_DATA_SOURCE: &str = "data.json";

/// Startup settings of a dashboard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Filesystem path or `http(s)://` URL of the dataset.
    pub data_source: String,
    pub metric: Metric,
    pub year: i32,
    /// Page title of the HTML dashboard.
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            metric: Metric::Exp,
            year: DEFAULT_YEAR,
            title: "Monitor do Comércio Brasileiro".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Interaction state the session starts in (no country selected).
    pub fn initial_state(&self) -> InteractionState {
        InteractionState {
            metric: self.metric,
            year: self.year,
            country: None,
        }
    }
}
