//! Spreadsheet export and bulk video download.
//!
//! - [`workbook`] renders a [`memetrends_core::Report`] into a styled `.xlsx`
//!   with embedded thumbnails ([`thumbnails`] fetches them).
//! - [`upload`], [`download`] and [`archive`] turn an uploaded spreadsheet of
//!   video URLs into a zip of downloaded files.

pub mod archive;
pub mod download;
pub mod error;
pub mod thumbnails;
pub mod upload;
pub mod workbook;

pub use archive::zip_directory;
pub use download::{
    download_batch, run_bulk_download, BatchOutcome, DownloadArchive, DownloadFailure,
    VideoDownloader, YtDlpDownloader,
};
pub use error::{DownloadError, ExportError};
pub use thumbnails::ThumbnailFetcher;
pub use upload::read_video_links;
pub use workbook::{export_report, render_workbook, REPORT_FILE_NAME};
