//! Bulk download flow with a scripted downloader in place of `yt-dlp`.

use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Mutex;

use memetrends_export::{run_bulk_download, DownloadError, VideoDownloader};
use rust_xlsxwriter::Workbook;
use zip::ZipArchive;

/// Writes `{id}.mp4` for every link except those containing "broken".
#[derive(Default)]
struct ScriptedDownloader {
    seen: Mutex<Vec<String>>,
}

impl VideoDownloader for ScriptedDownloader {
    async fn download(&self, url: &str, dir: &Path) -> Result<(), DownloadError> {
        self.seen.lock().expect("lock").push(url.to_string());
        if url.contains("broken") {
            return Err(DownloadError::Tool {
                program: "yt-dlp".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "ERROR: Video unavailable".to_string(),
            });
        }
        let id = url.rsplit('=').next().unwrap_or("video");
        std::fs::write(dir.join(format!("{id}.mp4")), url.as_bytes())?;
        Ok(())
    }
}

fn upload(urls: &[&str]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "title").expect("header");
    sheet.write_string(0, 1, "url").expect("header");
    for (row, url) in (1u32..).zip(urls) {
        sheet.write_string(row, 0, format!("clip {row}")).expect("cell");
        sheet.write_string(row, 1, *url).expect("cell");
    }
    workbook.save_to_buffer().expect("save")
}

#[tokio::test]
async fn failures_are_collected_and_successes_zipped() {
    let downloader = ScriptedDownloader::default();
    let spreadsheet = upload(&[
        "https://youtube.com/shorts/one?feature=share",
        "https://www.youtube.com/watch?v=broken",
        "https://www.youtube.com/watch?v=three",
    ]);

    let mut progress = Vec::new();
    let archive = run_bulk_download(&downloader, &spreadsheet, |done, total| {
        progress.push((done, total));
    })
    .await
    .expect("bulk download");

    assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);
    assert_eq!(
        *downloader.seen.lock().expect("lock"),
        vec![
            "https://www.youtube.com/watch?v=one",
            "https://www.youtube.com/watch?v=broken",
            "https://www.youtube.com/watch?v=three",
        ],
        "shorts links are normalized and order is preserved"
    );

    assert_eq!(archive.outcome.total, 3);
    assert_eq!(archive.outcome.downloaded, 2);
    assert_eq!(archive.outcome.failures.len(), 1);
    assert_eq!(
        archive.outcome.failures[0].url,
        "https://www.youtube.com/watch?v=broken"
    );
    assert!(archive.outcome.failures[0]
        .error
        .contains("Video unavailable"));

    assert!(archive.file_name.starts_with("youtube_videos_"));
    assert!(archive.file_name.ends_with(".zip"));

    let mut zip = ZipArchive::new(Cursor::new(archive.bytes)).expect("zip");
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["one.mp4", "three.mp4"]);

    let mut body = String::new();
    zip.by_name("three.mp4")
        .expect("entry")
        .read_to_string(&mut body)
        .expect("read");
    assert_eq!(body, "https://www.youtube.com/watch?v=three");
}

#[tokio::test]
async fn upload_without_url_column_fails_before_downloading() {
    let downloader = ScriptedDownloader::default();
    let mut workbook = Workbook::new();
    workbook
        .add_worksheet()
        .write_string(0, 0, "link")
        .expect("header");
    let spreadsheet = workbook.save_to_buffer().expect("save");

    let result = run_bulk_download(&downloader, &spreadsheet, |_, _| {}).await;
    assert!(matches!(result, Err(DownloadError::MissingUrlColumn)));
    assert!(downloader.seen.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn empty_upload_yields_empty_archive() {
    let downloader = ScriptedDownloader::default();
    let archive = run_bulk_download(&downloader, &upload(&[]), |_, _| {})
        .await
        .expect("bulk download");

    assert_eq!(archive.outcome.total, 0);
    assert!(archive.outcome.failures.is_empty());
    let zip = ZipArchive::new(Cursor::new(archive.bytes)).expect("zip");
    assert_eq!(zip.len(), 0);
}
