use chrono::NaiveDate;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::errors::AppError;
use crate::models::facility::facility_name;
use crate::models::Booking;

const HEADERS: [&str; 6] = ["Facility", "Date", "Time", "Client Name", "Phone", "Created At"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(AppError::Validation(format!("unknown export format: {other}"))),
        }
    }
}

pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Serializes the bookings falling inside [start, end] (inclusive), sorted
/// by date then slot time, as a downloadable document named by the range.
pub fn export(
    bookings: &[Booking],
    start: NaiveDate,
    end: NaiveDate,
    format: ExportFormat,
) -> Result<ExportFile, AppError> {
    let mut rows: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.date >= start && b.date <= end)
        .collect();
    rows.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));

    let records: Vec<[String; 6]> = rows.iter().map(|&b| to_record(b)).collect();

    match format {
        ExportFormat::Csv => Ok(ExportFile {
            filename: format!("bookings-{start}-to-{end}.csv"),
            content_type: "text/csv; charset=utf-8",
            bytes: to_csv(&records)?,
        }),
        ExportFormat::Pdf => Ok(ExportFile {
            filename: format!("bookings-{start}-to-{end}.pdf"),
            content_type: "application/pdf",
            bytes: to_pdf(&records, start, end)?,
        }),
    }
}

fn to_record(b: &Booking) -> [String; 6] {
    [
        facility_name(&b.facility_id),
        b.date.to_string(),
        b.time.clone(),
        b.client_name.clone(),
        b.client_phone.clone().unwrap_or_default(),
        b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]
}

fn to_csv(records: &[[String; 6]]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(HEADERS)
        .map_err(|e| AppError::Export(e.to_string()))?;
    for record in records {
        writer
            .write_record(record)
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))
}

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const COLUMN_X: [f32; 6] = [10.0, 55.0, 82.0, 102.0, 142.0, 168.0];
const ROW_STEP: f32 = 6.0;
const BOTTOM_MARGIN: f32 = 15.0;

fn to_pdf(records: &[[String; 6]], start: NaiveDate, end: NaiveDate) -> Result<Vec<u8>, AppError> {
    let title = format!("Bookings {start} to {end}");
    let (doc, page, layer) = PdfDocument::new(&title, PAGE_WIDTH, PAGE_HEIGHT, "table");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Export(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Export(e.to_string()))?;

    let mut layer_ref = doc.get_page(page).get_layer(layer);
    layer_ref.use_text(&title, 14.0, Mm(10.0), Mm(283.0), &bold);

    let mut y = 273.0;
    write_row(&layer_ref, &HEADERS.map(String::from), y, &bold);
    y -= ROW_STEP;

    for record in records {
        if y < BOTTOM_MARGIN {
            let (next_page, next_layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "table");
            layer_ref = doc.get_page(next_page).get_layer(next_layer);
            y = 283.0;
            write_row(&layer_ref, &HEADERS.map(String::from), y, &bold);
            y -= ROW_STEP;
        }
        write_row(&layer_ref, record, y, &font);
        y -= ROW_STEP;
    }

    doc.save_to_bytes().map_err(|e| AppError::Export(e.to_string()))
}

fn write_row(layer: &PdfLayerReference, record: &[String; 6], y: f32, font: &IndirectFontRef) {
    for (value, x) in record.iter().zip(COLUMN_X) {
        layer.use_text(value, 9.0, Mm(x), Mm(y), font);
    }
}
