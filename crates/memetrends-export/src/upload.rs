use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use memetrends_youtube::normalize_video_url;

use crate::error::DownloadError;

const URL_HEADER: &str = "url";

/// Video links from the `url` column of the first worksheet in `bytes`.
///
/// Blank and non-text cells are skipped. Shorts links are rewritten to
/// their watch URL.
///
/// # Errors
///
/// - [`DownloadError::Spreadsheet`] if `bytes` is not a readable `.xlsx`.
/// - [`DownloadError::EmptyWorkbook`] if there is no worksheet.
/// - [`DownloadError::MissingUrlColumn`] if the header row has no `url` cell.
pub fn read_video_links(bytes: &[u8]) -> Result<Vec<String>, DownloadError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DownloadError::EmptyWorkbook)??;

    let mut rows = range.rows();
    let header = rows.next().ok_or(DownloadError::MissingUrlColumn)?;
    let url_col = header
        .iter()
        .position(|cell| matches!(cell, Data::String(s) if s.trim() == URL_HEADER))
        .ok_or(DownloadError::MissingUrlColumn)?;

    let links: Vec<String> = rows
        .filter_map(|row| match row.get(url_col) {
            Some(Data::String(s)) if !s.trim().is_empty() => Some(normalize_video_url(s)),
            _ => None,
        })
        .collect();
    tracing::debug!(count = links.len(), "read video links from upload");
    Ok(links)
}

#[cfg(test)]
mod tests {
    use rust_xlsxwriter::Workbook;

    use super::*;

    fn sheet_with(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in (0u32..).zip(rows) {
            for (c, value) in (0u16..).zip(row.iter()) {
                if !value.is_empty() {
                    sheet.write_string(r, c, *value).expect("write cell");
                }
            }
        }
        workbook.save_to_buffer().expect("save")
    }

    #[test]
    fn reads_url_column_and_normalizes_shorts() {
        let bytes = sheet_with(&[
            &["title", "url"],
            &["a", "https://youtube.com/shorts/XYZ?feature=share"],
            &["b", "https://www.youtube.com/watch?v=abc"],
        ]);
        let links = read_video_links(&bytes).expect("links");
        assert_eq!(
            links,
            vec![
                "https://www.youtube.com/watch?v=XYZ",
                "https://www.youtube.com/watch?v=abc",
            ]
        );
    }

    #[test]
    fn blank_and_numeric_cells_are_skipped() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "url").expect("header");
        sheet.write_string(1, 0, "https://youtu.be/one").expect("cell");
        sheet.write_string(2, 0, "   ").expect("cell");
        sheet.write_number(3, 0, 42).expect("cell");
        sheet.write_string(5, 0, "https://youtu.be/two").expect("cell");
        let bytes = workbook.save_to_buffer().expect("save");

        let links = read_video_links(&bytes).expect("links");
        assert_eq!(links, vec!["https://youtu.be/one", "https://youtu.be/two"]);
    }

    #[test]
    fn missing_url_column_is_an_error() {
        let bytes = sheet_with(&[&["title", "link"], &["a", "https://youtu.be/x"]]);
        assert!(matches!(
            read_video_links(&bytes),
            Err(DownloadError::MissingUrlColumn)
        ));
    }

    #[test]
    fn garbage_upload_is_a_spreadsheet_error() {
        assert!(matches!(
            read_video_links(b"definitely not a zip"),
            Err(DownloadError::Spreadsheet(_))
        ));
    }
}
