use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tmon_rs::config::{DEFAULT_DATA_SOURCE, DashboardConfig};
use tmon_rs::render::{Dashboard, JsonFileRenderer, write_dashboard};
use tmon_rs::{Event, Metric, ViewController, format_amount, loader, storage};

#[derive(Parser, Debug)]
#[command(
    name = "tmon",
    version,
    about = "Reshape trade-monitor data and build world-map / time-series chart options"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Map values (billions US$) for one metric and year.
    Map(MapArgs),
    /// Yearly values (billions US$) for one metric and country.
    Series(SeriesArgs),
    /// Run a dashboard session and write the chart options plus an HTML page.
    Render(RenderArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Dataset path or http(s) URL
    #[arg(long, default_value = DEFAULT_DATA_SOURCE)]
    data: String,
    /// Metric: EXP, IMP or BAL
    #[arg(short, long, default_value = "EXP")]
    metric: Metric,
}

#[derive(Args, Debug)]
struct OutArgs {
    /// Save results to file instead of printing them.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct MapArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Year (YYYY)
    #[arg(short, long, default_value_t = tmon_rs::view::DEFAULT_YEAR)]
    year: i32,
    #[command(flatten)]
    out: OutArgs,
}

#[derive(Args, Debug)]
struct SeriesArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Country name as written in the dataset (e.g., "Brazil")
    #[arg(short, long)]
    country: String,
    #[command(flatten)]
    out: OutArgs,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Initial year (YYYY)
    #[arg(short, long, default_value_t = tmon_rs::view::DEFAULT_YEAR)]
    year: i32,
    /// Click this country on the map after the first render.
    #[arg(short, long)]
    country: Option<String>,
    /// Further events applied in order, separated by commas:
    /// `click:<country>`, `metric:<EXP|IMP|BAL>`, `year:<YYYY>`.
    #[arg(long)]
    events: Option<String>,
    /// Directory for map.json, line.json and dashboard.html
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Title of the HTML page
    #[arg(long)]
    title: Option<String>,
}

fn parse_event(s: &str) -> Result<Event> {
    let Some((kind, arg)) = s.split_once(':') else {
        bail!("invalid event `{s}`, expected kind:value");
    };
    let arg = arg.trim();
    match kind.trim().to_ascii_lowercase().as_str() {
        "click" if !arg.is_empty() => Ok(Event::MapClick {
            name: arg.to_string(),
        }),
        "metric" => Ok(Event::MetricChanged(arg.parse()?)),
        "year" => Ok(Event::YearChanged(
            arg.parse::<i32>()
                .with_context(|| format!("invalid year `{arg}`"))?,
        )),
        _ => bail!("invalid event `{s}`, expected click:, metric: or year:"),
    }
}

fn parse_events(s: &str) -> Result<Vec<Event>> {
    s.split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(parse_event)
        .collect()
}

fn out_format(out: &OutArgs, path: &Path) -> Result<OutFormat> {
    Ok(match &out.format {
        Some(f) => f.clone(),
        None => match path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_ascii_lowercase()
            .as_str()
        {
            "csv" => OutFormat::Csv,
            "json" => OutFormat::Json,
            other => bail!("unsupported format: {}", other),
        },
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Map(args) => cmd_map(args),
        Command::Series(args) => cmd_series(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_map(args: MapArgs) -> Result<()> {
    let dataset = loader::load(&args.source.data)?;
    let points = tmon_rs::map_points_for(&dataset, args.source.metric, args.year);

    if let Some(path) = args.out.out.as_ref() {
        match out_format(&args.out, path)? {
            OutFormat::Csv => storage::save_map_points_csv(&points, path)?,
            OutFormat::Json => storage::save_map_points_json(&points, path)?,
        }
        eprintln!("Saved {} rows to {}", points.len(), path.display());
    } else {
        for p in &points {
            println!("{}\t{}", p.name, format_amount(p.value));
        }
    }
    Ok(())
}

fn cmd_series(args: SeriesArgs) -> Result<()> {
    let dataset = loader::load(&args.source.data)?;
    let series = tmon_rs::series_for(&dataset, args.source.metric, &args.country);

    if let Some(path) = args.out.out.as_ref() {
        match out_format(&args.out, path)? {
            OutFormat::Csv => storage::save_series_csv(&series, path)?,
            OutFormat::Json => storage::save_series_json(&series, path)?,
        }
        eprintln!("Saved {} rows to {}", series.len(), path.display());
    } else {
        for (year, value) in series.iter() {
            println!("{}\t{}", year, format_amount(value));
        }
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let defaults = DashboardConfig::default();
    let config = DashboardConfig {
        data_source: args.source.data,
        metric: args.source.metric,
        year: args.year,
        title: args.title.unwrap_or(defaults.title),
    };
    let mut events: Vec<Event> = args
        .country
        .map(|name| Event::MapClick { name })
        .into_iter()
        .collect();
    if let Some(list) = args.events.as_deref() {
        events.extend(parse_events(list)?);
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create {}", args.out_dir.display()))?;
    let dataset = loader::load(&config.data_source)?;

    let map = JsonFileRenderer::new(args.out_dir.join("map.json"));
    let line = JsonFileRenderer::new(args.out_dir.join("line.json"));
    let mut views = ViewController::with_state(&dataset, config.initial_state(), map, line);
    views.start()?;
    for event in events {
        views.handle(event)?;
    }
    let state = views.state().clone();
    let (map_json, line_json) = views.into_renderers();

    // A line.json from an earlier run would contradict this session.
    if line_json.writes() == 0 && line_json.path().exists() {
        std::fs::remove_file(line_json.path())
            .with_context(|| format!("remove stale {}", line_json.path().display()))?;
    }

    let page = args.out_dir.join("dashboard.html");
    let dashboard = Dashboard::precompute(&dataset, &state);
    write_dashboard(&page, &config.title, &dashboard)?;

    eprintln!(
        "Wrote {} ({}/{}){}",
        map_json.path().display(),
        state.metric,
        state.year,
        match &state.country {
            Some(c) if line_json.writes() > 0 =>
                format!(", {} ({c})", line_json.path().display()),
            _ => String::new(),
        }
    );
    eprintln!(
        "Wrote dashboard to {} ({} countries)",
        page.display(),
        dashboard.lines.len()
    );
    Ok(())
}
