//! Excel workbook generation
//!
//! Exports exactly three columns (key, value, comments); `source_file` is
//! kept for on-screen grouping and statistics only.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::types::OutputRow;

const SHEET_NAME: &str = "Extracted Data";
const HEADER_COLOR: u32 = 0x366092;
const MAX_COLUMN_WIDTH: usize = 50;

const COLUMNS: [&str; 3] = ["key", "value", "comments"];

/// Generate a formatted .xlsx workbook from the output rows
pub fn generate_excel(rows: &[OutputRow], options: &ExportConfig) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| Error::Export(e.to_string()))?;

    let header_format = Format::new()
        .set_font_name("Arial")
        .set_font_size(11)
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_COLOR))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin);

    let cell_format = Format::new()
        .set_font_name("Arial")
        .set_font_size(10)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Thin);

    let mut row_idx = 0u32;
    if options.include_header {
        for (col, name) in COLUMNS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *name, &header_format)
                .map_err(|e| Error::Export(e.to_string()))?;
        }
        row_idx = 1;
    }

    for row in rows {
        for (col, value) in [row.key.as_str(), row.value.as_str(), row.comments.as_str()]
            .into_iter()
            .enumerate()
        {
            worksheet
                .write_string_with_format(row_idx, col as u16, value, &cell_format)
                .map_err(|e| Error::Export(e.to_string()))?;
        }
        row_idx += 1;
    }

    if options.auto_width {
        for (col, width) in column_widths(rows, options.include_header).into_iter().enumerate() {
            worksheet
                .set_column_width(col as u16, width as f64)
                .map_err(|e| Error::Export(e.to_string()))?;
        }
    }

    if options.include_header {
        worksheet
            .set_freeze_panes(1, 0)
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Export(e.to_string()))
}

/// Column widths fitted to content, capped at `MAX_COLUMN_WIDTH`
fn column_widths(rows: &[OutputRow], include_header: bool) -> [usize; 3] {
    let mut widths = if include_header {
        [COLUMNS[0].len(), COLUMNS[1].len(), COLUMNS[2].len()]
    } else {
        [0; 3]
    };
    for row in rows {
        for (i, value) in [&row.key, &row.value, &row.comments].into_iter().enumerate() {
            widths[i] = widths[i].max(value.chars().count());
        }
    }
    widths.map(|w| (w + 2).min(MAX_COLUMN_WIDTH))
}
