use crate::error::Error;
use crate::metrics::{MetricValue, MetricsTable};
use chrono::NaiveDate;
use rust_xlsxwriter::{Color, DocProperties, Format, FormatAlign, FormatUnderline, Url, Workbook, Worksheet, XlsxError};
use std::io::Write;

const LINKS_SHEET: &str = "Release Metrics Charts";
const DATA_SHEET: &str = "Data from Queries";

const LINK_COLUMN_WIDTH: f64 = 50.0;
const DATA_COLUMN_WIDTH: f64 = 12.0;
const FONT_SIZE: f64 = 10.0;

const HEADER_BACKGROUND: u32 = 0x00B0_B3B2;
const DATE_BACKGROUND: u32 = 0x00D4_D4D4;
const LINK_COLOR: u32 = 0x0000_00FF;

/// Write the two-sheet report workbook for `table` to `writer`.
///
/// The first sheet lists a clickable link for every metric with a browsable query. The
/// second holds a single data row: the report date followed by every metric value.
pub fn generate<W: Write>(table: &MetricsTable, date: NaiveDate, writer: &mut W) -> Result<(), Error> {
    let data = build_workbook(table, date).map_err(Error::export)?;
    writer.write_all(&data).map_err(Error::export)
}

fn build_workbook(table: &MetricsTable, date: NaiveDate) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("tb-metrics").set_title("Thunderbird release metrics");
    _ = workbook.set_properties(&properties);

    workbook.push_worksheet(links_sheet(table)?);
    workbook.push_worksheet(data_sheet(table, date)?);

    workbook.save_to_buffer()
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn links_sheet(table: &MetricsTable) -> Result<Worksheet, XlsxError> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(LINKS_SHEET)?;

    let header_format = Format::new()
        .set_background_color(Color::RGB(HEADER_BACKGROUND))
        .set_align(FormatAlign::Center)
        .set_font_name("Arial")
        .set_font_size(FONT_SIZE);
    let link_format = Format::new()
        .set_font_color(Color::RGB(LINK_COLOR))
        .set_underline(FormatUnderline::Single)
        .set_font_name("Arial")
        .set_font_size(FONT_SIZE);

    worksheet.write_string_with_format(0, 0, "Query URLs", &header_format)?;

    let links = table
        .iter()
        .filter_map(|record| record.url.as_deref().map(|url| (record.text.as_deref().unwrap_or(record.name()), url)));

    let mut row = 1;
    for (text, url) in links {
        worksheet.write_url_with_format(row, 0, Url::new(url).set_text(text), &link_format)?;
        row += 1;
    }

    worksheet.set_column_width(0, LINK_COLUMN_WIDTH)?;

    Ok(worksheet)
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
#[expect(clippy::cast_precision_loss, reason = "Counts are far below 2^52")]
fn data_sheet(table: &MetricsTable, date: NaiveDate) -> Result<Worksheet, XlsxError> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(DATA_SHEET)?;

    let font = "Helvetica Neue";
    let header_format = Format::new()
        .set_background_color(Color::RGB(HEADER_BACKGROUND))
        .set_align(FormatAlign::Center)
        .set_font_name(font)
        .set_font_size(FONT_SIZE)
        .set_text_wrap();
    let date_format = Format::new()
        .set_background_color(Color::RGB(DATE_BACKGROUND))
        .set_align(FormatAlign::Center)
        .set_font_name(font)
        .set_font_size(FONT_SIZE);
    let percentage_format = Format::new()
        .set_num_format("0.00%")
        .set_align(FormatAlign::Center)
        .set_font_name(font)
        .set_font_size(FONT_SIZE);
    let count_format = Format::new().set_align(FormatAlign::Center).set_font_name(font).set_font_size(FONT_SIZE);

    worksheet.write_string_with_format(0, 0, "Date", &header_format)?;
    worksheet.write_string_with_format(1, 0, date.format("%Y-%m-%d").to_string(), &date_format)?;
    worksheet.set_column_width(0, DATA_COLUMN_WIDTH)?;

    for (index, record) in table.iter().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "Column index limited by the number of metrics")]
        let col = (index + 1) as u16;

        worksheet.write_string_with_format(0, col, record.name(), &header_format)?;
        worksheet.set_column_width(col, DATA_COLUMN_WIDTH)?;

        match record.value {
            Some(MetricValue::Count(count)) => {
                worksheet.write_number_with_format(1, col, count as f64, &count_format)?;
            }
            Some(MetricValue::Ratio(ratio)) => {
                worksheet.write_number_with_format(1, col, ratio, &percentage_format)?;
            }
            None => {
                worksheet.write_blank(1, col, &count_format)?;
            }
        }
    }

    Ok(worksheet)
}
