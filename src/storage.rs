use crate::models::{MapPoint, Series};
use anyhow::{Result, ensure};
use csv::WriterBuilder;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix text that a spreadsheet would evaluate as a formula with `'`.
fn guard_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{s}"),
        _ => s.to_string(),
    }
}

/// Save map points as CSV (`name,value`), values in billions.
pub fn save_map_points_csv<P: AsRef<Path>>(points: &[MapPoint], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path.as_ref())?;
    wtr.serialize(("name", "value"))?;
    for p in points {
        wtr.serialize((guard_cell(&p.name), p.value))?;
    }
    wtr.flush()?;
    info!("saved {} map points to {}", points.len(), path.as_ref().display());
    Ok(())
}

/// Save a country's series as CSV (`year,value`), values in billions.
pub fn save_series_csv<P: AsRef<Path>>(series: &Series, path: P) -> Result<()> {
    ensure!(
        series.years.len() == series.values.len(),
        "series has {} years but {} values",
        series.years.len(),
        series.values.len()
    );
    let mut wtr = WriterBuilder::new().from_path(path.as_ref())?;
    wtr.serialize(("year", "value"))?;
    for (year, value) in series.iter() {
        wtr.serialize((guard_cell(year), value))?;
    }
    wtr.flush()?;
    info!("saved {} series rows to {}", series.len(), path.as_ref().display());
    Ok(())
}

/// Save map points as a pretty JSON array of `{name, value}`.
pub fn save_map_points_json<P: AsRef<Path>>(points: &[MapPoint], path: P) -> Result<()> {
    save_json(points, path)
}

/// Save a series as pretty JSON `{years, values}`.
pub fn save_series_json<P: AsRef<Path>>(series: &Series, path: P) -> Result<()> {
    save_json(series, path)
}

fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
