//! Report emission: the "Recommended Trades" spreadsheet and the console
//! rendering of an allocation.
//!
//! The workbook is built entirely in memory and written with a temp-file
//! rename, so a failed run never leaves a partial artifact behind.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::allocator::AllocationRow;

pub const SHEET_NAME: &str = "Recommended Trades";
pub const HEADERS: [&str; 4] = [
    "Ticker",
    "Stock Price",
    "Market Cap",
    "Number of Shares to Buy",
];

const BACKGROUND_COLOR: Color = Color::RGB(0x0A0A23);
const FONT_COLOR: Color = Color::RGB(0xFFFFFF);
const COLUMN_WIDTH: f64 = 18.0;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to build workbook: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the allocation spreadsheet to `path`, atomically.
pub fn write_report(rows: &[AllocationRow], path: &Path) -> Result<(), ReportError> {
    let buffer = build_workbook(rows)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    // Temp file in the destination directory so the rename stays on one filesystem
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "recommended_trades.xlsx".to_string());
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    std::fs::write(&tmp_path, &buffer)?;
    std::fs::rename(&tmp_path, path)?;

    info!(rows = rows.len(), path = %path.display(), "Wrote recommendation spreadsheet");
    Ok(())
}

fn build_workbook(rows: &[AllocationRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let text_format = Format::new()
        .set_background_color(BACKGROUND_COLOR)
        .set_font_color(FONT_COLOR)
        .set_border(FormatBorder::Thin);
    let dollar_format = text_format.clone().set_num_format("$0.00");
    let integer_format = text_format.clone().set_num_format("0");

    for col in 0..HEADERS.len() as u16 {
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
    }

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &text_format)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string_with_format(r, 0, &row.symbol, &text_format)?;
        worksheet.write_number_with_format(
            r,
            1,
            row.price.to_f64().unwrap_or(0.0),
            &dollar_format,
        )?;
        worksheet.write_number_with_format(
            r,
            2,
            row.market_cap.to_f64().unwrap_or(0.0),
            &dollar_format,
        )?;
        worksheet.write_number_with_format(r, 3, row.shares_to_buy as f64, &integer_format)?;
    }

    workbook.save_to_buffer()
}

/// Render the allocation as a console table
pub fn render_table(rows: &[AllocationRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(HEADERS);

    for row in rows {
        table.add_row(vec![
            row.symbol.clone(),
            format!("${:.2}", row.price),
            format!("${:.2}", row.market_cap),
            row.shares_to_buy.to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_rows() -> Vec<AllocationRow> {
        vec![
            AllocationRow {
                symbol: "A".to_string(),
                price: dec!(10),
                market_cap: dec!(1000000),
                shares_to_buy: 3,
            },
            AllocationRow {
                symbol: "B".to_string(),
                price: dec!(20),
                market_cap: dec!(2000000),
                shares_to_buy: 1,
            },
            AllocationRow {
                symbol: "C".to_string(),
                price: dec!(40),
                market_cap: dec!(4000000),
                shares_to_buy: 0,
            },
        ]
    }

    #[test]
    fn test_console_table_has_headers_and_rows_in_order() {
        let table = render_table(&sample_rows());
        let rendered = table.to_string();

        for header in HEADERS {
            assert!(rendered.contains(header), "missing header {header}");
        }

        let a_pos = rendered.find("$10.00").unwrap();
        let b_pos = rendered.find("$20.00").unwrap();
        let c_pos = rendered.find("$40.00").unwrap();
        assert!(a_pos < b_pos && b_pos < c_pos);
    }

    #[test]
    fn test_workbook_buffer_is_a_zip() {
        let buffer = build_workbook(&sample_rows()).unwrap();
        // xlsx is a zip container
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_write_report_creates_file_and_no_temp_leftover() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recommended_trades.xlsx");

        write_report(&sample_rows(), &path).unwrap();

        assert!(path.exists());
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_write_report_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.xlsx");

        write_report(&sample_rows(), &path).unwrap();
        assert!(path.exists());
    }
}
