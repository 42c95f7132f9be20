//! `analyze` command: run the pipeline, summarize, write the spreadsheet.

use std::path::Path;

use anyhow::Context;
use memetrends_core::{AppConfig, Country, CountryOutcome, LookbackPeriod, Report};
use memetrends_export::{export_report, ThumbnailFetcher};
use memetrends_pipeline::Analyzer;

pub(crate) async fn run_analyze(
    config: &AppConfig,
    countries: &[Country],
    period: LookbackPeriod,
    output: &Path,
    json: Option<&Path>,
) -> anyhow::Result<()> {
    let analyzer = Analyzer::from_config(config)?;

    println!(
        "analyzing {} countries, videos from the {}",
        countries.len(),
        period.label()
    );
    let report = analyzer
        .run(countries, period, |p| {
            println!("[{}/{}] {}", p.completed, p.total, p.message);
        })
        .await;

    print_summary(&report);

    let thumbnails = ThumbnailFetcher::new(config.thumbnail_timeout_secs, &config.user_agent)?;
    let bytes = export_report(&report, &thumbnails).await?;
    tokio::fs::write(output, bytes)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("spreadsheet written to {}", output.display());

    if let Some(path) = json {
        let body = serde_json::to_vec_pretty(&report)?;
        tokio::fs::write(path, body)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("report JSON written to {}", path.display());
    }

    if report.failed_countries().len() == report.countries.len() && !countries.is_empty() {
        anyhow::bail!("every country failed; see messages above");
    }
    Ok(())
}

fn print_summary(report: &Report) {
    for entry in &report.countries {
        println!();
        println!("{} {}", entry.country.flag(), entry.country.display_name());
        match &entry.outcome {
            CountryOutcome::Failed { error } => println!("  failed: {error}"),
            CountryOutcome::Completed { terms } if terms.is_empty() => {
                println!("  no rising terms");
            }
            CountryOutcome::Completed { terms } => {
                for result in terms {
                    println!("  {} ({})", result.term.query, result.term.value);
                    if result.videos.is_empty() {
                        println!("    no qualifying videos");
                    }
                    for video in &result.videos {
                        println!(
                            "    {:>12} views  {}  {}",
                            video.view_count, video.title, video.url
                        );
                    }
                }
            }
        }
    }
}
