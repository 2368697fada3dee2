//! # demand-forecast
//!
//! Command-line demand planner: simulates a year of daily sales for a
//! product, fits the additive forecaster and exports the forecast table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use demand_forecast::config::ForecastConfig;
use demand_forecast::core::{ForecastRow, TimeSeries};
use demand_forecast::export;
use demand_forecast::models::{ForecastEngine, Forecaster};
use demand_forecast::synthetic::DemandSimulator;
use demand_forecast::utils::{calculate_metrics, interval_coverage};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "demand-forecast")]
#[command(about = "Simulate daily demand and forecast it with trend + weekly seasonality", long_about = None)]
struct Cli {
    /// Product to plan, used in the output file name
    #[arg(short, long, value_enum, default_value = "a")]
    product: Product,

    /// Average daily demand of the simulated history
    #[arg(long, default_value_t = 150, value_parser = clap::value_parser!(u32).range(50..=300))]
    avg_demand: u32,

    /// Forecast horizon in days (30, 60 or 90)
    #[arg(long, value_parser = parse_horizon)]
    horizon: Option<usize>,

    /// Seasonal period in days
    #[arg(long)]
    period: Option<usize>,

    /// Interval coverage, between 0 and 1
    #[arg(long)]
    interval_width: Option<f64>,

    /// Random seed for the simulated history
    #[arg(long)]
    seed: Option<u64>,

    /// First day of the simulated history
    #[arg(long, default_value = "2025-01-01")]
    start: NaiveDate,

    /// Last day of the simulated history
    #[arg(long, default_value = "2025-12-31")]
    end: NaiveDate,

    /// JSON file with forecast options; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output CSV path (default: <product>_forecast.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of rows shown in the history and forecast previews
    #[arg(long, default_value_t = 5)]
    preview: usize,

    /// Export only future rows instead of history + future
    #[arg(long)]
    future_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Product {
    #[value(alias = "product-a")]
    A,
    #[value(alias = "product-b")]
    B,
    #[value(alias = "product-c")]
    C,
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Product::A => "Product A",
            Product::B => "Product B",
            Product::C => "Product C",
        };
        f.write_str(label)
    }
}

fn parse_horizon(s: &str) -> std::result::Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(days @ (30 | 60 | 90)) => Ok(days),
        Ok(days) => Err(format!("horizon must be 30, 60 or 90 days, got {}", days)),
        Err(e) => Err(format!("invalid horizon '{}': {}", s, e)),
    }
}

fn resolve_config(cli: &Cli) -> Result<ForecastConfig> {
    let mut config = match &cli.config {
        Some(path) => ForecastConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ForecastConfig::default(),
    };
    if let Some(horizon) = cli.horizon {
        config = config.with_horizon_days(horizon);
    }
    if let Some(period) = cli.period {
        config = config.with_period_days(period);
    }
    if let Some(width) = cli.interval_width {
        config = config.with_interval_width(width);
    }
    config.validate().context("invalid forecast options")?;
    Ok(config)
}

fn print_history(series: &TimeSeries, n: usize) {
    println!("{:>12} {:>8}", "date", "sales");
    for (date, value) in series.head(n).iter() {
        println!("{:>12} {:>8.0}", date.to_string(), value);
    }
}

fn print_rows(rows: &[ForecastRow]) {
    println!(
        "{:>12} {:>10} {:>12} {:>12}",
        "date", "yhat", "yhat_lower", "yhat_upper"
    );
    for row in rows {
        println!(
            "{:>12} {:>10.2} {:>12.2} {:>12.2}",
            row.date.to_string(),
            row.yhat,
            row.yhat_lower,
            row.yhat_upper
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "demand_forecast=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let mut simulator = DemandSimulator::new(f64::from(cli.avg_demand));
    if let Some(seed) = cli.seed {
        simulator = simulator.with_seed(seed);
    }
    let series = simulator
        .generate(cli.start, cli.end)
        .context("simulating sales history")?;

    println!("== {} - past sales ==", cli.product);
    print_history(&series, cli.preview);

    let mut engine = ForecastEngine::new(config);
    engine.fit(&series).context("fitting forecast model")?;
    let model = engine.model()?;

    println!("\n== Model ==");
    println!(
        "trend:       {:.4} per day, {:.2} at {}",
        model.slope(),
        model.intercept(),
        model.start_date()
    );
    let offsets: Vec<String> = model
        .seasonal_offsets()
        .iter()
        .map(|o| format!("{:+.2}", o))
        .collect();
    println!("seasonality: [{}]", offsets.join(", "));
    println!(
        "sigma:       {:.3} (band ±{:.2})",
        model.sigma(),
        model.half_width()
    );

    let in_sample = engine.predict_in_sample()?;
    let metrics = calculate_metrics(
        series.values(),
        &in_sample.point(),
        Some(config.period_days),
    )?;
    let coverage = interval_coverage(series.values(), in_sample.rows())?;
    println!(
        "in-sample:   MAE {:.2}  RMSE {:.2}  SMAPE {:.2}%  coverage {:.1}%",
        metrics.mae,
        metrics.rmse,
        metrics.smape,
        coverage * 100.0
    );

    let future = engine.forecast()?;
    println!("\n== {}-day forecast ==", config.horizon_days);
    print_rows(future.tail(cli.preview));

    let table = if cli.future_only {
        future
    } else {
        engine.predict_with_history(config.horizon_days)?
    };

    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(export::file_name(&cli.product.to_string())));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    export::write_csv(&table, BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))?;

    info!(path = %path.display(), rows = table.horizon(), "forecast exported");
    println!("\nwrote {} rows to {}", table.horizon(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_accepts_only_menu_values() {
        assert_eq!(parse_horizon("30"), Ok(30));
        assert_eq!(parse_horizon("60"), Ok(60));
        assert_eq!(parse_horizon(" 90 "), Ok(90));
        assert!(parse_horizon("45").is_err());
        assert!(parse_horizon("0").is_err());
        assert!(parse_horizon("ninety").is_err());
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cli = Cli::parse_from([
            "demand-forecast",
            "--horizon",
            "90",
            "--period",
            "14",
            "--interval-width",
            "0.8",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.horizon_days, 90);
        assert_eq!(config.period_days, 14);
        assert_eq!(config.interval_width, 0.8);
    }

    #[test]
    fn product_is_chosen_from_the_menu() {
        let cli = Cli::parse_from(["demand-forecast", "--product", "b"]);
        assert_eq!(cli.product, Product::B);
        assert_eq!(cli.product.to_string(), "Product B");

        let cli = Cli::parse_from(["demand-forecast", "-p", "product-c"]);
        assert_eq!(cli.product, Product::C);

        assert!(Cli::try_parse_from(["demand-forecast", "--product", "d"]).is_err());
        assert!(Cli::try_parse_from(["demand-forecast", "--product", "Widget"]).is_err());
    }

    #[test]
    fn cli_rejects_out_of_range_demand() {
        assert!(Cli::try_parse_from(["demand-forecast", "--avg-demand", "40"]).is_err());
        assert!(Cli::try_parse_from(["demand-forecast", "--avg-demand", "300"]).is_ok());
    }

    #[test]
    fn cli_defaults_match_demo() {
        let cli = Cli::parse_from(["demand-forecast"]);
        assert_eq!(cli.product, Product::A);
        assert_eq!(cli.avg_demand, 150);
        assert_eq!(cli.start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(cli.end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(resolve_config(&cli).unwrap(), ForecastConfig::default());
    }
}
