//! CSV export of completed service requests.
//!
//! The header line is plain comma-joined names. Data rows are written with the
//! `csv` crate using `QuoteStyle::Always`, so every field is wrapped in double
//! quotes and embedded quotes are doubled. Any standard CSV reader gets the
//! original strings back.

use crate::error::{BoardError, Result};
use crate::model::{RequestStatus, ServiceRequest};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const FILE_PREFIX: &str = "mechanic-completed-services";
pub const MIME_TYPE: &str = "text/csv;charset=utf-8";

pub const HEADERS: [&str; 7] = [
    "Customer Name",
    "Contact",
    "Vehicle",
    "Service Type",
    "Location",
    "Requested Date",
    "Completed Date",
];

const UNKNOWN_CUSTOMER: &str = "Unknown";
const NO_CONTACT: &str = "No contact";
const GENERAL_SERVICE: &str = "General Service";
const NO_LOCATION: &str = "No location data";
const INVALID_DATE: &str = "Invalid Date";

/// Caller-supplied context: the current date (for the file name) and the
/// offset used to render timestamps in the user's local time.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    pub today: NaiveDate,
    pub offset: FixedOffset,
}

/// A ready-to-download file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
    pub rows: usize,
}

impl CsvExport {
    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing completed yet, so no file was produced.
    Empty,
    Ready(CsvExport),
}

/// `mechanic-completed-services-YYYY-MM-DD.csv`
pub fn file_name(today: NaiveDate) -> String {
    format!("{}-{}.csv", FILE_PREFIX, today.format("%Y-%m-%d"))
}

/// Serializes every `Completed` request, in collection order.
pub fn export_completed(requests: &[ServiceRequest], options: ExportOptions) -> Result<ExportOutcome> {
    let completed: Vec<&ServiceRequest> = requests
        .iter()
        .filter(|r| r.status == RequestStatus::Completed)
        .collect();

    if completed.is_empty() {
        return Ok(ExportOutcome::Empty);
    }

    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(HEADERS)?;
    let buffer = header
        .into_inner()
        .map_err(|e| BoardError::Export(e.to_string()))?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);
    for request in &completed {
        writer.write_record(row(request, options.offset))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| BoardError::Export(e.to_string()))?;
    let content =
        String::from_utf8(bytes).map_err(|e| BoardError::Export(e.to_string()))?;

    Ok(ExportOutcome::Ready(CsvExport {
        file_name: file_name(options.today),
        content,
        rows: completed.len(),
    }))
}

fn row(request: &ServiceRequest, offset: FixedOffset) -> [String; 7] {
    let customer = request.customer.as_ref();
    [
        or_placeholder(customer.map(|c| c.name.as_str()), UNKNOWN_CUSTOMER),
        or_placeholder(customer.map(|c| c.mobile_number.as_str()), NO_CONTACT),
        request.vehicle_descriptor(),
        or_placeholder(Some(request.service_type.as_str()), GENERAL_SERVICE),
        or_placeholder(request.location.as_ref().map(|l| l.address.as_str()), NO_LOCATION),
        local_timestamp(request.created_at, offset),
        local_timestamp(request.updated_at, offset),
    ]
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// `M/D/YYYY, h:mm:ss AM` in the given offset.
pub fn local_timestamp(value: Option<DateTime<Utc>>, offset: FixedOffset) -> String {
    match value {
        Some(ts) => ts
            .with_timezone(&offset)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        None => INVALID_DATE.to_string(),
    }
}
