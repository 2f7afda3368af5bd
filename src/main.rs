use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use severityboard::config::{Config, DEFAULT_CONFIG_PATH};
use severityboard::dataset::Dataset;
use severityboard::detect::engine::SeverityEngine;
use severityboard::report::{self, DashboardView};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "severityboard",
    about = "Per-server error severity dashboard backend",
    version,
    long_about = None
)]
struct Cli {
    /// Config file (missing file means defaults)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Dataset CSV, overrides the config file
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard API server
    Serve {
        /// Bind address, overrides the config file
        #[arg(long)]
        bind: Option<String>,
    },

    /// Classify the trailing window ending at a date
    Classify {
        /// Selected date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Days before the selected date to include
        #[arg(long)]
        trailing_days: Option<usize>,

        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// List the dates available for selection
    Dates,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let data_path = cli.data.unwrap_or(config.data.path);

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or(config.server.bind);
            tracing::info!(%bind, "Starting severityboard");
            severityboard::serve(&bind, &data_path, config.classify.trailing_days).await?;
        }
        Commands::Classify {
            date,
            trailing_days,
            json,
        } => {
            let trailing_days = trailing_days.unwrap_or(config.classify.trailing_days);
            let dataset = Dataset::load_csv(&data_path)
                .with_context(|| format!("Failed to load dataset {}", data_path.display()))?;
            let engine = SeverityEngine::new(dataset, trailing_days);
            let evaluation = engine.evaluate(date)?;
            let view = DashboardView::new(evaluation, trailing_days);

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!(
                    "\n{} (trailing {} day(s))\n",
                    view.display_date, view.trailing_days
                );
                print!(
                    "{}",
                    report::format_table(&view.table.rows, view.table.selected_index)
                );
                println!();
                print!("{}", report::format_summary(&view.summary));
                println!();
            }
        }
        Commands::Dates => {
            let dataset = Dataset::load_csv(&data_path)
                .with_context(|| format!("Failed to load dataset {}", data_path.display()))?;
            if dataset.is_empty() {
                println!("No dates in dataset.");
            }
            for date in dataset.dates() {
                println!("{}  {}", date, report::display_date(date));
            }
        }
    }

    Ok(())
}
