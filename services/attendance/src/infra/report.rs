use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};

use crate::domain::repository::ReportRenderer;
use crate::domain::types::{RowStyle, SheetCell, SheetLayout};
use crate::error::AttendanceServiceError;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const COLUMN_WIDTHS: [f64; 6] = [10.0, 30.0, 20.0, 26.0, 26.0, 22.0];

/// Writes an attendance sheet as an Excel workbook.
#[derive(Clone, Copy, Default)]
pub struct XlsxReportRenderer;

impl XlsxReportRenderer {
    fn build(sheet: &SheetLayout) -> Result<Vec<u8>, XlsxError> {
        let title = Format::new().set_bold().set_font_size(14);
        let bold = Format::new().set_bold();
        let header = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(0xE0E0E0));

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name.as_str())?;
        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        for (r, row) in sheet.rows.iter().enumerate() {
            let r = r as u32;
            for (c, cell) in row.cells.iter().enumerate() {
                let c = c as u16;
                let format = match row.style {
                    RowStyle::Title => Some(&title),
                    RowStyle::TableHeader => Some(&header),
                    RowStyle::Label if c == 0 => Some(&bold),
                    RowStyle::Label | RowStyle::Plain => None,
                };
                match (cell, format) {
                    (SheetCell::Text(text), Some(format)) => {
                        worksheet.write_string_with_format(r, c, text.as_str(), format)?;
                    }
                    (SheetCell::Text(text), None) => {
                        worksheet.write_string(r, c, text.as_str())?;
                    }
                    (SheetCell::Number(n), Some(format)) => {
                        worksheet.write_number_with_format(r, c, *n, format)?;
                    }
                    (SheetCell::Number(n), None) => {
                        worksheet.write_number(r, c, *n)?;
                    }
                }
            }
        }

        workbook.save_to_buffer()
    }
}

impl ReportRenderer for XlsxReportRenderer {
    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, sheet: &SheetLayout) -> Result<Vec<u8>, AttendanceServiceError> {
        Self::build(sheet)
            .map_err(|e| anyhow::anyhow!("failed to render xlsx report: {e}").into())
    }
}
