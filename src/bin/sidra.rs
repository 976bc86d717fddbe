use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sidra_rs::lookup::RegionTable;
use sidra_rs::normalize::{self, RawRecord, TableLayout};
use sidra_rs::stats::{self, Scope};
use sidra_rs::{ChartKind, Client, Dashboard, Grouping, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sidra",
    version,
    about = "Fetch, normalize, chart & summarize IBGE SIDRA literacy data"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch data (and optionally save, emit a chart spec, render, and print stats).
    Get(GetArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GroupingArg {
    Unit,
    Region,
}

impl From<GroupingArg> for Grouping {
    fn from(g: GroupingArg) -> Self {
        match g {
            GroupingArg::Unit => Grouping::Unit,
            GroupingArg::Region => Grouping::Region,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChartArg {
    Bar,
    Heatmap,
    Geo,
}

impl From<ChartArg> for ChartKind {
    fn from(c: ChartArg) -> Self {
        match c {
            ChartArg::Bar => ChartKind::Bar,
            ChartArg::Heatmap => ChartKind::Heatmap,
            ChartArg::Geo => ChartKind::Geo,
        }
    }
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Read the raw payload from a JSON file instead of fetching from SIDRA.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Reporting year; defaults to the earliest year in the dataset.
    #[arg(short, long)]
    year: Option<String>,
    /// Grouping level for charts.
    #[arg(short, long, value_enum, default_value_t = GroupingArg::Unit)]
    grouping: GroupingArg,
    /// Chart style.
    #[arg(short, long, value_enum, default_value_t = ChartArg::Bar)]
    chart: ChartArg,
    /// Save normalized observations to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Write the chart spec as JSON to the given path.
    #[arg(long)]
    spec: Option<PathBuf>,
    /// Render the chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Print headline indicators for the selected year to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
    }
}

fn load_payload(args: &GetArgs) -> Result<Vec<RawRecord>> {
    match &args.input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
        }
        None => Client::default().fetch_literacy_table(),
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let payload = load_payload(&args)?;
    let observations =
        normalize::normalize(&payload, &TableLayout::default(), &RegionTable::brazil())?;
    log::info!("normalized {} observations", observations.len());
    let dash = Dashboard::new(observations);

    let years = dash.distinct_years();
    let year = match args.year.clone() {
        Some(y) => y,
        None => years
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("dataset has no years"))?,
    };

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(dash.observations(), path)?,
            "json" => storage::save_json(dash.observations(), path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!(
            "Saved {} rows to {}",
            dash.observations().len(),
            path.display()
        );
    }

    if args.spec.is_some() || args.plot.is_some() {
        let chart = dash.on_parameter_change(&year, args.grouping.into(), args.chart.into())?;
        if let Some(path) = args.spec.as_ref() {
            std::fs::write(path, serde_json::to_string_pretty(&chart)?)?;
            eprintln!("Wrote chart spec to {}", path.display());
        }
        if let Some(path) = args.plot.as_ref() {
            viz::render(&chart, path, args.width, args.height)?;
            eprintln!("Wrote plot to {}", path.display());
        }
    }

    if args.stats {
        let headline = dash.headline_indicators(&year)?;
        println!(
            "{}  mean={:.4}  max={:.4} ({})  min={:.4} ({})",
            year,
            headline.national_mean,
            headline.max.value,
            headline.max.label,
            headline.min.value,
            headline.min.label
        );
        if let Some(pair) = stats::comparison_pair(&years, &year) {
            let note = if pair.fallback {
                " [earliest year selected; comparing the two most recent years]"
            } else {
                ""
            };
            match stats::year_over_year(dash.observations(), &Scope::National, &pair.base, &pair.target)
            {
                Ok(delta) => println!("variation {} -> {}: {:+.2}%{}", pair.base, pair.target, delta, note),
                Err(e) => println!("variation {} -> {}: n/a ({e})", pair.base, pair.target),
            }
        }
    }

    Ok(())
}
