use std::path::Path;

use log::info;
use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};
use thiserror::Error;

use crate::records::SearchResultRecord;

#[derive(Debug, Error)]
#[error("could not write report: {0}")]
pub struct ReportError(#[from] XlsxError);

/// Column layout of the report. Downstream review sheets key on the exact
/// header order, so both variants are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    /// 8 columns, ranked on whatever the run configured.
    Base,
    /// Base plus an engagement column and an empty `code` column for
    /// manual annotation.
    Extended,
}

const BASE_HEADERS: [&str; 8] = [
    "title", "subreddit", "keyword", "score", "comments", "post url", "url", "created",
];
const EXTENDED_HEADERS: [&str; 10] = [
    "title",
    "subreddit",
    "keyword",
    "score",
    "comments",
    "post url",
    "url",
    "created",
    "engagement",
    "code",
];

const BASE_WIDTHS: [f64; 8] = [53.5, 20.0, 17.5, 10.0, 16.0, 16.0, 16.0, 18.0];
const EXTENDED_WIDTHS: [f64; 10] = [53.5, 20.0, 17.5, 10.0, 16.0, 16.0, 16.0, 18.0, 14.0, 10.0];

impl SchemaVariant {
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            SchemaVariant::Base => &BASE_HEADERS,
            SchemaVariant::Extended => &EXTENDED_HEADERS,
        }
    }

    fn widths(self) -> &'static [f64] {
        match self {
            SchemaVariant::Base => &BASE_WIDTHS,
            SchemaVariant::Extended => &EXTENDED_WIDTHS,
        }
    }
}

/// Writes the cleaned records to a single formatted sheet. Rows land in the
/// order given; the writer does not reorder.
pub fn write_report(
    records: &[SearchResultRecord],
    path: &Path,
    sheet_name: &str,
    schema: SchemaVariant,
) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    let header_format = Format::new()
        .set_background_color(Color::Black)
        .set_font_color(Color::White);
    let number_format = Format::new().set_num_format("#,##0");

    let headers = schema.headers();
    let last_col = (headers.len() - 1) as u16;

    for (col, width) in schema.widths().iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    sheet.autofilter(0, 0, 0, last_col)?;

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &record.title)?;
        sheet.write_string(row, 1, &record.subreddit)?;
        sheet.write_string(row, 2, &record.keyword)?;
        sheet.write_number_with_format(row, 3, record.score as f64, &number_format)?;
        sheet.write_number_with_format(row, 4, f64::from(record.comments), &number_format)?;
        sheet.write_string(row, 5, &record.post_url)?;
        sheet.write_string(row, 6, &record.url)?;
        sheet.write_string(row, 7, record.created.as_deref().unwrap_or(""))?;
        if schema == SchemaVariant::Extended {
            sheet.write_number_with_format(row, 8, record.engagement as f64, &number_format)?;
            // Column 9 ("code") stays blank for manual annotation.
        }
    }

    workbook.save(path)?;
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
