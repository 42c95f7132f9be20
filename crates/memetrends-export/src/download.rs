//! Bulk download of video links through an external downloader.

use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tokio::process::Command;

use crate::archive::zip_directory;
use crate::error::DownloadError;
use crate::upload::read_video_links;

const VIDEO_FORMAT: &str = "bestvideo[ext=mp4][vcodec^=avc]+bestaudio[ext=m4a]/best[ext=mp4]";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36";

/// Fetches one video into a directory.
pub trait VideoDownloader: Send + Sync {
    fn download(
        &self,
        url: &str,
        dir: &Path,
    ) -> impl Future<Output = Result<(), DownloadError>> + Send;
}

/// Runs the `yt-dlp` command-line tool once per link.
#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    program: PathBuf,
}

impl YtDlpDownloader {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(url: &str, dir: &Path) -> Vec<String> {
        let template = dir.join("%(title)s.%(ext)s");
        vec![
            "-f".to_string(),
            VIDEO_FORMAT.to_string(),
            "-o".to_string(),
            template.to_string_lossy().into_owned(),
            "--merge-output-format".to_string(),
            "mp4".to_string(),
            "--recode-video".to_string(),
            "mp4".to_string(),
            "--user-agent".to_string(),
            BROWSER_USER_AGENT.to_string(),
            "--force-ipv4".to_string(),
            "--no-playlist".to_string(),
            url.to_string(),
        ]
    }
}

impl VideoDownloader for YtDlpDownloader {
    async fn download(&self, url: &str, dir: &Path) -> Result<(), DownloadError> {
        let program = self.program.display().to_string();
        let output = Command::new(&self.program)
            .args(Self::args(url, dir))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| DownloadError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DownloadError::Tool {
                program,
                status: output.status.to_string(),
                stderr: stderr.trim().lines().next_back().unwrap_or_default().to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadFailure {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub total: usize,
    pub downloaded: usize,
    pub failures: Vec<DownloadFailure>,
}

/// Zipped result of a bulk download.
#[derive(Debug)]
pub struct DownloadArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub outcome: BatchOutcome,
}

/// Downloads each link in order into `dir`.
///
/// A failed link is recorded and the batch moves on; nothing is retried.
/// `on_progress(done, total)` fires after every link.
pub async fn download_batch<D, F>(
    downloader: &D,
    urls: &[String],
    dir: &Path,
    mut on_progress: F,
) -> BatchOutcome
where
    D: VideoDownloader,
    F: FnMut(usize, usize),
{
    let total = urls.len();
    let mut outcome = BatchOutcome {
        total,
        ..BatchOutcome::default()
    };

    for (index, url) in urls.iter().enumerate() {
        match downloader.download(url, dir).await {
            Ok(()) => {
                outcome.downloaded += 1;
                tracing::info!(url = %url, "video downloaded");
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "video download failed");
                outcome.failures.push(DownloadFailure {
                    url: url.clone(),
                    error: e.to_string(),
                });
            }
        }
        on_progress(index + 1, total);
    }

    outcome
}

/// Reads links from an uploaded spreadsheet, downloads them into a
/// temporary directory and zips whatever arrived.
///
/// The temporary directory is removed before returning.
///
/// # Errors
///
/// Propagates [`read_video_links`] errors, and [`DownloadError::Io`] or
/// [`DownloadError::Zip`] if the scratch directory or archive cannot be
/// handled. Per-link failures are reported in [`BatchOutcome::failures`].
pub async fn run_bulk_download<D, F>(
    downloader: &D,
    spreadsheet: &[u8],
    on_progress: F,
) -> Result<DownloadArchive, DownloadError>
where
    D: VideoDownloader,
    F: FnMut(usize, usize),
{
    let urls = read_video_links(spreadsheet)?;
    let scratch = tempfile::Builder::new()
        .prefix("downloaded_videos_")
        .tempdir()?;

    let outcome = download_batch(downloader, &urls, scratch.path(), on_progress).await;
    let bytes = zip_directory(scratch.path())?;
    scratch.close()?;

    tracing::info!(
        total = outcome.total,
        downloaded = outcome.downloaded,
        failed = outcome.failures.len(),
        "bulk download finished"
    );

    Ok(DownloadArchive {
        file_name: format!("youtube_videos_{}.zip", Utc::now().timestamp()),
        bytes,
        outcome,
    })
}
