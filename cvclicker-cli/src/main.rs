use clap::Parser;
use cvclicker::actuator::EnigoActuator;
use cvclicker::capture::XcapSource;
use cvclicker::io::load_template;
use cvclicker::runner::listen_for_stop_keys;
use cvclicker::{
    ClickConfig, Clicker, ClickerConfig, LocateConfig, MatchConfig, Point, Region, SearchConfig,
    StopKeys,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Template-driven auto-clicker")]
struct Cli {
    /// Reference image of the on-screen target.
    #[arg(short, long, value_name = "FILE")]
    template: PathBuf,
    /// Top-left corner of the search region, as `x,y` screen pixels.
    #[arg(
        long,
        value_name = "X,Y",
        default_value = "0,0",
        allow_hyphen_values = true,
        value_parser = parse_point
    )]
    origin: (i32, i32),
    /// Size of the search region, as `WIDTHxHEIGHT`.
    #[arg(long, value_name = "WxH", default_value = "1920x1080", value_parser = parse_size)]
    size: (u32, u32),
    /// Search cycles per second; 0 disables searching.
    #[arg(long, default_value_t = 1.0)]
    search_rate: f64,
    /// Clicks per second; 0 disables clicking.
    #[arg(long, default_value_t = 200.0)]
    click_rate: f64,
    /// Capture-and-match attempts per search cycle.
    #[arg(long, default_value_t = 5)]
    attempts: usize,
    /// Matches must score strictly above this confidence.
    #[arg(long, default_value_t = 0.8)]
    threshold: f32,
    /// Displacement from the target center to the click point, as `dx,dy`.
    #[arg(
        long,
        value_name = "DX,DY",
        default_value = "-65,40",
        allow_hyphen_values = true,
        value_parser = parse_point
    )]
    click_offset: (i32, i32),
    /// Keys that stop the run; repeat to add more.
    #[arg(long = "stop-key", value_name = "KEY", default_value = "q")]
    stop_keys: Vec<String>,
    /// Scan template placements in parallel.
    #[arg(long)]
    parallel: bool,
    /// Pyramid levels for coarse-to-fine matching; 1 scans exhaustively.
    #[arg(long, default_value_t = 4)]
    levels: usize,
    /// Print the resolved configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
    /// Enable debug-level tracing output.
    #[arg(long)]
    trace: bool,
}

fn parse_pair<T: std::str::FromStr>(text: &str, sep: char) -> Result<(T, T), String> {
    let (a, b) = text
        .split_once(sep)
        .ok_or_else(|| format!("expected two values separated by '{sep}'"))?;
    let a = a.trim().parse().map_err(|_| format!("invalid number '{a}'"))?;
    let b = b.trim().parse().map_err(|_| format!("invalid number '{b}'"))?;
    Ok((a, b))
}

fn parse_point(text: &str) -> Result<(i32, i32), String> {
    parse_pair(text, ',')
}

fn parse_size(text: &str) -> Result<(u32, u32), String> {
    parse_pair(&text.to_ascii_lowercase(), 'x')
}

#[derive(Debug, Serialize)]
struct RegionRecord {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

#[derive(Debug, Serialize)]
struct ConfigRecord {
    template: String,
    region: RegionRecord,
    search_rate: f64,
    click_rate: f64,
    max_attempts: usize,
    confidence_threshold: f32,
    click_offset: (i32, i32),
    origin: (i32, i32),
    parallel: bool,
    max_levels: usize,
    min_var_i: f32,
    stop_keys: Vec<String>,
}

impl ConfigRecord {
    fn new(cli: &Cli, cfg: &ClickerConfig) -> Self {
        let search = &cfg.search;
        Self {
            template: cli.template.display().to_string(),
            region: RegionRecord {
                left: search.region.left(),
                top: search.region.top(),
                right: search.region.right(),
                bottom: search.region.bottom(),
            },
            search_rate: search.rate,
            click_rate: cfg.click.rate,
            max_attempts: search.locate.max_attempts,
            confidence_threshold: search.locate.confidence_threshold,
            click_offset: (search.click_offset.x, search.click_offset.y),
            origin: (search.origin.x, search.origin.y),
            parallel: search.matching.parallel,
            max_levels: search.matching.max_levels,
            min_var_i: search.matching.min_var_i,
            stop_keys: cli.stop_keys.clone(),
        }
    }
}

fn build_config(cli: &Cli) -> Result<ClickerConfig, Box<dyn std::error::Error>> {
    let origin = Point::from(cli.origin);
    let region = Region::from_origin_size(origin, cli.size.0, cli.size.1)?;
    Ok(ClickerConfig {
        search: SearchConfig {
            rate: cli.search_rate,
            region,
            click_offset: Point::from(cli.click_offset),
            origin: region.origin(),
            locate: LocateConfig {
                max_attempts: cli.attempts,
                confidence_threshold: cli.threshold,
            },
            matching: MatchConfig {
                parallel: cli.parallel,
                max_levels: cli.levels,
                ..MatchConfig::default()
            },
        },
        click: ClickConfig {
            rate: cli.click_rate,
        },
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.trace { "cvclicker=debug" } else { "cvclicker=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_target(false)
        .init();

    let config = build_config(&cli)?;
    if cli.print_config {
        let record = ConfigRecord::new(&cli, &config);
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }
    config.validate()?;

    let template = load_template(&cli.template)?;
    tracing::info!(
        width = template.width(),
        height = template.height(),
        "template loaded"
    );
    let clicker = Clicker::new(config, template)?;

    let stop = StopKeys::new(cli.stop_keys.iter().cloned(), clicker.signal());
    if let Err(err) = listen_for_stop_keys(stop) {
        tracing::warn!(%err, "stop keys unavailable; stop the process externally");
    }
    tracing::info!(keys = ?cli.stop_keys, "running; press a stop key to exit");

    let report = clicker.run(XcapSource::primary, EnigoActuator::new)?;
    if let Some(search) = report.search {
        tracing::info!(cycles = search.cycles, moves = search.moves, "search loop stopped");
    }
    if let Some(click) = report.click {
        tracing::info!(clicks = click.clicks, "click loop stopped");
    }
    Ok(())
}
