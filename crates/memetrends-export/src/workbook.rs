//! Styled `.xlsx` rendering of a [`Report`].

use std::collections::HashMap;

use chrono::SecondsFormat;
use memetrends_core::Report;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatUnderline, Image, Url, Workbook, Worksheet, XlsxError,
};

use crate::error::ExportError;
use crate::thumbnails::ThumbnailFetcher;

pub const REPORT_FILE_NAME: &str = "meme_search_results.xlsx";

const VIDEO_SHEET: &str = "Video results";
const KEYWORD_SHEET: &str = "Search Keyword";

const VIDEO_HEADERS: [&str; 9] = [
    "Country",
    "Search Query",
    "Title",
    "Channel",
    "Views",
    "Likes",
    "Published Date",
    "url",
    "Thumbnail",
];
const VIDEO_COLUMN_WIDTHS: [f64; 9] = [15.0, 15.0, 30.0, 20.0, 12.0, 12.0, 15.0, 7.0, 30.0];
const KEYWORD_HEADERS: [&str; 3] = ["Country", "Related Query", "Value"];

const HEADER_FILL: u32 = 0x00CC_FFCC;
const HEADER_HEIGHT: f64 = 30.0;
const DATA_ROW_HEIGHT: f64 = 135.0;
const THUMBNAIL_COL: u16 = 8;
const THUMBNAIL_WIDTH_PX: f64 = 240.0;
const THUMBNAIL_HEIGHT_PX: f64 = 180.0;

struct Styles {
    header: Format,
    cell: Format,
    wrapped: Format,
    link: Format,
}

impl Styles {
    fn new() -> Self {
        let centered = Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        Self {
            header: centered
                .clone()
                .set_bold()
                .set_background_color(Color::RGB(HEADER_FILL)),
            wrapped: centered.clone().set_text_wrap(),
            link: Format::new()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap()
                .set_font_color(Color::Blue)
                .set_underline(FormatUnderline::Single),
            cell: centered,
        }
    }
}

/// Fetches thumbnails for every video in `report` and renders the workbook.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if the workbook cannot be written. Thumbnail
/// failures never fail the export.
pub async fn export_report(
    report: &Report,
    thumbnails: &ThumbnailFetcher,
) -> Result<Vec<u8>, ExportError> {
    let images = thumbnails.fetch_for_report(report).await;
    render_workbook(report, &images)
}

/// Renders `report` into `.xlsx` bytes.
///
/// `thumbnails` maps video id to raw image bytes; videos without an entry,
/// or whose bytes are not a decodable image, are written without a picture.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if any worksheet operation fails.
pub fn render_workbook(
    report: &Report,
    thumbnails: &HashMap<String, Vec<u8>>,
) -> Result<Vec<u8>, ExportError> {
    let styles = Styles::new();
    let mut workbook = Workbook::new();

    let videos = workbook.add_worksheet();
    videos.set_name(VIDEO_SHEET)?;
    write_video_sheet(videos, report, thumbnails, &styles)?;

    let keywords = workbook.add_worksheet();
    keywords.set_name(KEYWORD_SHEET)?;
    write_keyword_sheet(keywords, report, &styles)?;

    Ok(workbook.save_to_buffer()?)
}

fn write_header(
    sheet: &mut Worksheet,
    headers: &[&str],
    styles: &Styles,
) -> Result<(), XlsxError> {
    sheet.set_row_height(0, HEADER_HEIGHT)?;
    for (col, title) in (0u16..).zip(headers) {
        sheet.write_string_with_format(0, col, *title, &styles.header)?;
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn write_video_sheet(
    sheet: &mut Worksheet,
    report: &Report,
    thumbnails: &HashMap<String, Vec<u8>>,
    styles: &Styles,
) -> Result<(), XlsxError> {
    write_header(sheet, &VIDEO_HEADERS, styles)?;
    for (col, width) in (0u16..).zip(VIDEO_COLUMN_WIDTHS) {
        sheet.set_column_width(col, width)?;
    }

    for (row, entry) in (1u32..).zip(report.video_rows()) {
        let video = entry.video;
        sheet.set_row_height(row, DATA_ROW_HEIGHT)?;
        sheet.write_string_with_format(row, 0, entry.country.display_name(), &styles.cell)?;
        sheet.write_string_with_format(row, 1, &entry.term.query, &styles.cell)?;
        sheet.write_string_with_format(row, 2, &video.title, &styles.wrapped)?;
        sheet.write_string_with_format(row, 3, &video.channel_title, &styles.wrapped)?;
        sheet.write_number_with_format(row, 4, video.view_count as f64, &styles.cell)?;
        sheet.write_number_with_format(row, 5, video.like_count as f64, &styles.cell)?;
        sheet.write_string_with_format(
            row,
            6,
            video.published_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            &styles.cell,
        )?;
        sheet.write_url_with_format(row, 7, Url::new(&video.url), &styles.link)?;
        sheet.write_string_with_format(
            row,
            THUMBNAIL_COL,
            video.thumbnail_url(),
            &styles.wrapped,
        )?;

        if let Some(bytes) = thumbnails.get(&video.video_id) {
            match Image::new_from_buffer(bytes) {
                Ok(image) => {
                    let (width, height) = (image.width(), image.height());
                    let image = image
                        .set_scale_width(THUMBNAIL_WIDTH_PX / width)
                        .set_scale_height(THUMBNAIL_HEIGHT_PX / height);
                    sheet.insert_image(row, THUMBNAIL_COL, &image)?;
                }
                Err(e) => {
                    tracing::warn!(
                        video_id = %video.video_id,
                        error = %e,
                        "skipping undecodable thumbnail"
                    );
                }
            }
        }
    }
    Ok(())
}

fn write_keyword_sheet(
    sheet: &mut Worksheet,
    report: &Report,
    styles: &Styles,
) -> Result<(), XlsxError> {
    write_header(sheet, &KEYWORD_HEADERS, styles)?;
    for (row, (country, term)) in (1u32..).zip(report.term_rows()) {
        sheet.write_string_with_format(row, 0, country.display_name(), &styles.cell)?;
        sheet.write_string_with_format(row, 1, &term.query, &styles.cell)?;
        sheet.write_string_with_format(row, 2, &term.value, &styles.cell)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "workbook_test.rs"]
mod tests;
