//! Loading of the `data.json` trade dataset.
//!
//! The dataset is read once per session, either from the filesystem or over HTTP(S).
//! HTTP requests retry briefly on server errors and network failures; client errors
//! (4xx) fail immediately.
//!
//! Typical usage:
//! ```no_run
//! # use tmon_rs::loader::{DataSource, Loader};
//! let loader = Loader::new()?;
//! let dataset = loader.load(&DataSource::parse("https://example.org/data.json"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::models::Dataset;
use anyhow::{Context, Result, bail};
use log::{info, warn};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` prefixes select a URL, anything else is a path.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(t.to_string())
        } else {
            DataSource::Path(PathBuf::from(t))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => f.write_str(u),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Loader {
    http: HttpClient,
    backoff_ms: Vec<u64>,
}

impl Loader {
    pub fn new() -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("tmon_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self::with_client(http))
    }

    /// Use a preconfigured HTTP client (proxy, TLS roots, timeouts).
    pub fn with_client(http: HttpClient) -> Self {
        Self {
            http,
            backoff_ms: vec![100, 300, 700],
        }
    }

    /// Replace the retry schedule (one attempt per entry, sleeping that long after a
    /// failed attempt).
    pub fn with_backoff(mut self, backoff_ms: Vec<u64>) -> Self {
        self.backoff_ms = backoff_ms;
        self
    }

    /// Read and parse the dataset from `source`.
    pub fn load(&self, source: &DataSource) -> Result<Dataset> {
        let text = match source {
            DataSource::Path(p) => {
                std::fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?
            }
            DataSource::Url(u) => self.get_text(u).with_context(|| format!("GET {u}"))?,
        };
        let dataset =
            Dataset::from_json_str(&text).with_context(|| format!("parse dataset from {source}"))?;
        info!(
            "loaded dataset from {source}: metrics [{}]",
            dataset
                .metrics
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(dataset)
    }

    fn get_text(&self, url: &str) -> Result<String> {
        let mut last_err: Option<anyhow::Error> = None;
        for &backoff_ms in &self.backoff_ms {
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => {
                    return r.text().context("read response body");
                }
                Ok(r) if r.status().is_server_error() => {
                    warn!("{url}: HTTP {}, retrying", r.status());
                    last_err = Some(anyhow::anyhow!("HTTP {}", r.status()));
                }
                Ok(r) => bail!("request failed with HTTP {}", r.status()),
                Err(e) => {
                    warn!("{url}: {e}, retrying");
                    last_err = Some(e.into());
                }
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        match last_err {
            Some(e) => Err(e.context("giving up after retries")),
            None => bail!("no attempts configured"),
        }
    }
}

/// Convenience: load with a default [`Loader`].
pub fn load(source: &str) -> Result<Dataset> {
    Loader::new()?.load(&DataSource::parse(source))
}
