//! TrendScope CLI: enrich bar files with indicator profiles.
//!
//! Commands:
//! - `compute`: enrich one bar CSV with a profile, write CSV or JSON
//! - `timeframes`: enrich a daily/weekly/monthly file triple
//! - `batch`: run many ticker × profile jobs from a TOML file; fails if any job fails
//! - `summary`: print the trailing-rows summary of one file as JSON
//! - `columns`: print a profile's output schema

mod config;
mod io;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trendscope_core::batch::failure_count;
use trendscope_core::{
    compute_batch, compute_profile, compute_timeframes, BatchJob, IndicatorSummary, Profile,
    Timeframe, TimeframeBars,
};

use crate::config::BatchConfig;

#[derive(Parser)]
#[command(
    name = "trendscope",
    about = "TrendScope CLI: multi-timeframe technical indicator engine"
)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich one bar CSV with a profile.
    Compute {
        /// Bar CSV (timestamp|date, open, high, low, close, volume).
        #[arg(long)]
        input: PathBuf,

        /// short | intermediate | long (aliases: daily, weekly, monthly).
        #[arg(long)]
        profile: Profile,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write JSON instead of CSV.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Enrich a daily/weekly/monthly triple; writes <stem>_indicators.csv next to each input.
    Timeframes {
        #[arg(long)]
        daily: Option<PathBuf>,

        #[arg(long)]
        weekly: Option<PathBuf>,

        #[arg(long)]
        monthly: Option<PathBuf>,
    },
    /// Run every job of a TOML batch file.
    Batch {
        #[arg(long)]
        config: PathBuf,
    },
    /// Print the trailing-rows summary of one bar CSV as JSON.
    Summary {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        profile: Profile,

        /// Number of trailing rows.
        #[arg(long, default_value_t = 10)]
        recent: usize,
    },
    /// Print a profile's output columns, one per line.
    Columns {
        #[arg(long)]
        profile: Profile,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compute {
            input,
            profile,
            output,
            json,
        } => run_compute(&input, profile, output.as_deref(), json),
        Commands::Timeframes {
            daily,
            weekly,
            monthly,
        } => run_timeframes(daily, weekly, monthly),
        Commands::Batch { config } => run_batch(&config),
        Commands::Summary {
            input,
            profile,
            recent,
        } => run_summary(&input, profile, recent),
        Commands::Columns { profile } => {
            for name in profile.column_names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn run_compute(input: &Path, profile: Profile, output: Option<&Path>, json: bool) -> Result<()> {
    let bars = io::read_bars(input, profile)?;
    let series = compute_profile(&bars, profile)
        .with_context(|| format!("compute {profile} for {}", input.display()))?;

    match (output, json) {
        (Some(path), true) => {
            std::fs::write(path, series.to_json()?)
                .with_context(|| format!("write {}", path.display()))?;
        }
        (Some(path), false) => io::write_enriched_file(&series, path)?,
        (None, true) => println!("{}", series.to_json()?),
        (None, false) => io::write_enriched_csv(&series, std::io::stdout().lock())?,
    }

    if let Some(path) = output {
        info!(
            rows = series.len(),
            columns = series.columns.len(),
            hash = %series.content_hash(),
            "wrote {}",
            path.display()
        );
    }
    Ok(())
}

fn run_timeframes(
    daily: Option<PathBuf>,
    weekly: Option<PathBuf>,
    monthly: Option<PathBuf>,
) -> Result<()> {
    let paths = [
        (Timeframe::Daily, daily),
        (Timeframe::Weekly, weekly),
        (Timeframe::Monthly, monthly),
    ];

    let mut input = TimeframeBars::default();
    for (timeframe, path) in &paths {
        let Some(path) = path else { continue };
        if !path.exists() {
            warn!(%timeframe, "{} does not exist, skipping", path.display());
            continue;
        }
        let bars = io::read_bars(path, timeframe.profile())?;
        match timeframe {
            Timeframe::Daily => input.daily = Some(bars),
            Timeframe::Weekly => input.weekly = Some(bars),
            Timeframe::Monthly => input.monthly = Some(bars),
        }
    }

    let set = compute_timeframes(&input)?;
    for (timeframe, path) in &paths {
        let (Some(series), Some(path)) = (set.get(*timeframe), path) else {
            continue;
        };
        let out = io::indicators_path(path);
        io::write_enriched_file(series, &out)?;
        info!(%timeframe, rows = series.len(), "saved {}", out.display());
        println!("Saved {timeframe} indicators to {}", out.display());
    }
    Ok(())
}

fn run_batch(config_path: &Path) -> Result<()> {
    let config = BatchConfig::from_file(config_path)?;
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("create {}", config.output_dir.display()))?;

    let mut failed = 0usize;
    let mut jobs = Vec::with_capacity(config.jobs.len());
    for job in &config.jobs {
        let profile = job.profile()?;
        match io::read_bars(&job.input, profile) {
            Ok(bars) => jobs.push(BatchJob::new(job.ticker.clone(), profile, bars)),
            Err(e) => {
                warn!(ticker = %job.ticker, %profile, "input failed: {e:#}");
                eprintln!("Error for {} ({profile}): {e:#}", job.ticker);
                failed += 1;
            }
        }
    }

    let outcomes = compute_batch(&jobs, config.parallel);
    failed += failure_count(&outcomes);

    for outcome in &outcomes {
        let series = match &outcome.result {
            Ok(series) => series,
            Err(e) => {
                eprintln!("Error for {} ({}): {e}", outcome.ticker, outcome.profile);
                continue;
            }
        };
        let stem = io::output_stem(&outcome.ticker, outcome.profile);
        let csv_path = config.output_dir.join(format!("{stem}_indicators.csv"));
        io::write_enriched_file(series, &csv_path)?;

        if let Some(recent) = config.recent {
            let summary = IndicatorSummary::from_series(series, recent);
            let json_path = config.output_dir.join(format!("{stem}_summary.json"));
            std::fs::write(&json_path, serde_json::to_string_pretty(&summary)?)
                .with_context(|| format!("write {}", json_path.display()))?;
        }
        println!("{stem}: {} rows → {}", series.len(), csv_path.display());
    }

    let total = config.jobs.len();
    println!("{} of {total} jobs succeeded", total - failed);
    if failed > 0 {
        bail!("{failed} of {total} jobs failed");
    }
    Ok(())
}

fn run_summary(input: &Path, profile: Profile, recent: usize) -> Result<()> {
    let bars = io::read_bars(input, profile)?;
    let series = compute_profile(&bars, profile)?;
    let summary = IndicatorSummary::from_series(&series, recent);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn profile_arguments_accept_aliases() {
        let cli = Cli::try_parse_from(["trendscope", "columns", "--profile", "weekly"]).unwrap();
        match cli.command {
            Commands::Columns { profile } => assert_eq!(profile, Profile::Intermediate),
            _ => panic!("expected columns"),
        }
        assert!(Cli::try_parse_from(["trendscope", "columns", "--profile", "hourly"]).is_err());
    }

    fn write_bars(path: &Path, rows: usize) {
        let mut text = String::from("Date,Open,High,Low,Close,Volume\n");
        for i in 0..rows {
            let close = 100.0 + (i as f64 * 0.4).sin() * 3.0;
            let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + chrono::Duration::days(i as i64);
            text.push_str(&format!(
                "{date},{:.2},{:.2},{:.2},{close:.2},{}\n",
                close - 0.3,
                close + 1.0,
                close - 1.0,
                5_000 + i * 10
            ));
        }
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn timeframes_write_next_to_inputs_and_skip_absent() {
        let dir = tempfile::tempdir().unwrap();
        let daily = dir.path().join("XYZ_daily.csv");
        write_bars(&daily, 40);
        let monthly = dir.path().join("XYZ_monthly.csv");

        run_timeframes(Some(daily.clone()), None, Some(monthly.clone())).unwrap();

        let out = dir.path().join("XYZ_daily_indicators.csv");
        let text = std::fs::read_to_string(out).unwrap();
        assert!(text.lines().next().unwrap().ends_with("MFI_14,CMF_20"));
        assert_eq!(text.lines().count(), 41);
        assert!(!dir.path().join("XYZ_monthly_indicators.csv").exists());
    }

    #[test]
    fn batch_writes_csv_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        write_bars(&dir.path().join("a.csv"), 30);
        let config = r#"
output_dir = "out"
parallel = true
recent = 3

[[job]]
ticker = "AAA"
profile = "long"
input = "a.csv"

[[job]]
ticker = "AAA"
profile = "short"
input = "a.csv"
"#;
        let config_path = dir.path().join("jobs.toml");
        std::fs::write(&config_path, config).unwrap();

        run_batch(&config_path).unwrap();

        let out = dir.path().join("out");
        assert!(out.join("AAA_long_indicators.csv").exists());
        assert!(out.join("AAA_short_indicators.csv").exists());
        let summary: IndicatorSummary = serde_json::from_str(
            &std::fs::read_to_string(out.join("AAA_long_summary.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.profile, Profile::LongTerm);
    }

    #[test]
    fn batch_reports_failed_jobs_after_writing_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        write_bars(&dir.path().join("good.csv"), 30);
        let config = r#"
output_dir = "out"

[[job]]
ticker = "GOOD"
profile = "intermediate"
input = "good.csv"

[[job]]
ticker = "GONE"
profile = "short"
input = "missing.csv"
"#;
        let config_path = dir.path().join("jobs.toml");
        std::fs::write(&config_path, config).unwrap();

        let err = run_batch(&config_path).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 jobs failed");

        let out = dir.path().join("out");
        assert!(out.join("GOOD_intermediate_indicators.csv").exists());
        assert!(!out.join("GONE_short_indicators.csv").exists());
    }
}
