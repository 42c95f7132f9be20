mod analyze;
mod download;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use memetrends_core::{Country, LookbackPeriod};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "memetrends-cli")]
#[command(about = "Rising meme searches and the short-form videos behind them")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch rising terms and their top short-form videos
    Analyze {
        /// Country presets to analyze, by geo code (defaults to KR)
        #[arg(long = "country", value_delimiter = ',')]
        countries: Vec<Country>,
        /// Look-back window for videos: day, week, month or year
        #[arg(long, default_value = "year")]
        period: LookbackPeriod,
        /// Spreadsheet to write
        #[arg(long, default_value = "meme_search_results.xlsx")]
        output: PathBuf,
        /// Also write the report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Download every video listed in a spreadsheet's `url` column
    Download {
        /// Spreadsheet with a `url` header
        #[arg(long)]
        input: PathBuf,
        /// Zip file to write (defaults to a timestamped name)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List country presets and look-back periods
    Countries,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("memetrends-cli: run with --help to list commands");
        return Ok(());
    };

    if matches!(command, Commands::Countries) {
        print_options();
        return Ok(());
    }

    let config = memetrends_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    match command {
        Commands::Analyze {
            countries,
            period,
            output,
            json,
        } => {
            let countries = if countries.is_empty() {
                vec![Country::default()]
            } else {
                countries
            };
            analyze::run_analyze(&config, &countries, period, &output, json.as_deref()).await
        }
        Commands::Download { input, output } => {
            download::run_download(&config, &input, output.as_deref()).await
        }
        Commands::Countries => Ok(()),
    }
}

fn print_options() {
    println!("Countries:");
    for country in Country::ALL {
        println!(
            "  {} {:<14} geo={} hl={} seed={}",
            country.flag(),
            country.display_name(),
            country.geo(),
            country.locale(),
            country.seed_term()
        );
    }
    println!("Periods:");
    for period in LookbackPeriod::ALL {
        println!("  {:<6} {} ({} days)", period, period.label(), period.days());
    }
}
