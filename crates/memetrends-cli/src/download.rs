//! `download` command: bulk-download the links in a spreadsheet.

use std::path::{Path, PathBuf};

use anyhow::Context;
use memetrends_core::AppConfig;
use memetrends_export::{run_bulk_download, YtDlpDownloader};

pub(crate) async fn run_download(
    config: &AppConfig,
    input: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let spreadsheet = tokio::fs::read(input)
        .await
        .with_context(|| format!("failed to read {}", input.display()))?;

    let downloader = YtDlpDownloader::new(&config.ytdlp_path);
    let archive = run_bulk_download(&downloader, &spreadsheet, |done, total| {
        println!("[{done}/{total}] downloaded");
    })
    .await?;

    let target = output.map_or_else(|| PathBuf::from(&archive.file_name), Path::to_path_buf);
    tokio::fs::write(&target, &archive.bytes)
        .await
        .with_context(|| format!("failed to write {}", target.display()))?;

    let outcome = &archive.outcome;
    println!(
        "{} of {} videos downloaded into {}",
        outcome.downloaded,
        outcome.total,
        target.display()
    );
    for failure in &outcome.failures {
        println!("  failed: {} ({})", failure.url, failure.error);
    }
    Ok(())
}
