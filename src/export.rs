use crate::{CollectorError, JobPosting, COLUMNS};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;
use tracing::debug;

const SHEET_NAME: &str = "Jobs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

impl OutputFormat {
    /// Format named by the extension of `path`, ignoring case.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<OutputFormat, CollectorError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("xlsx") => Ok(OutputFormat::Xlsx),
            Some("csv") => Ok(OutputFormat::Csv),
            _ => Err(CollectorError::UnsupportedOutput(path.to_path_buf())),
        }
    }
}

/// Writes `postings` to `path`, picking the format from the extension.
pub fn write_table<P: AsRef<Path>>(path: P, postings: &[JobPosting]) -> Result<(), CollectorError> {
    let path = path.as_ref();
    match OutputFormat::from_path(path)? {
        OutputFormat::Xlsx => write_xlsx(path, postings),
        OutputFormat::Csv => write_csv(path, postings),
    }
}

pub fn write_xlsx<P: AsRef<Path>>(path: P, postings: &[JobPosting]) -> Result<(), CollectorError> {
    let path = path.as_ref();
    debug!("Write {} rows to {}", postings.len(), path.display());
    workbook(postings)?.save(path)?;
    Ok(())
}

/// Spreadsheet bytes, for callers that serve the file instead of saving it.
pub fn xlsx_bytes(postings: &[JobPosting]) -> Result<Vec<u8>, CollectorError> {
    Ok(workbook(postings)?.save_to_buffer()?)
}

// Every cell is written as a string so salary text is never coerced to a number.
fn workbook(postings: &[JobPosting]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    for (i, posting) in postings.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, value) in posting.row().iter().enumerate() {
            sheet.write_string(row, col as u16, *value)?;
        }
    }
    sheet.autofit();

    Ok(workbook)
}

pub fn write_csv<P: AsRef<Path>>(path: P, postings: &[JobPosting]) -> Result<(), CollectorError> {
    let path = path.as_ref();
    debug!("Write {} rows to {}", postings.len(), path.display());

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMNS)?;
    for posting in postings {
        writer.write_record(posting.row())?;
    }
    writer.flush()?;
    Ok(())
}
