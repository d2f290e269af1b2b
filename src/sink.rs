//! Append-only storage for density records.

use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    rect::SelectionRect,
};

/// Column names written once at the top of a new result file.
pub const HEADER: [&str; 5] = ["X1", "Y1", "X2", "Y2", "Brightness Density"];

/// One finalised selection and its measured density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityRecord {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    pub density: f64,
}

impl DensityRecord {
    pub fn new(selection: SelectionRect, density: f64) -> Self {
        Self {
            x1: selection.x1,
            y1: selection.y1,
            x2: selection.x2,
            y2: selection.y2,
            density,
        }
    }

    fn fields(&self) -> [String; 5] {
        [
            self.x1.to_string(),
            self.y1.to_string(),
            self.x2.to_string(),
            self.y2.to_string(),
            self.density.to_string(),
        ]
    }
}

/// Destination for density records.
pub trait RecordSink {
    /// Durably appends one record. Failures are reported, never retried.
    fn append(&mut self, record: &DensityRecord) -> Result<()>;
}

impl RecordSink for Vec<DensityRecord> {
    fn append(&mut self, record: &DensityRecord) -> Result<()> {
        self.push(*record);
        Ok(())
    }
}

/// Comma-separated result file.
///
/// Every append opens the file, writes exactly one row and closes it again, so a crash after
/// `n` selections leaves exactly `n` complete rows. The header is written only when the file
/// is empty.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn csv_error(&self, source: csv::Error) -> Error {
        Error::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, record: &DensityRecord) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| Error::Io {
                path: self.path.clone(),
                source,
            })?;
        let is_empty = file
            .metadata()
            .map_err(|source| Error::Io {
                path: self.path.clone(),
                source,
            })?
            .len()
            == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        if is_empty {
            writer
                .write_record(HEADER)
                .map_err(|e| self.csv_error(e))?;
        }
        writer
            .write_record(record.fields())
            .map_err(|e| self.csv_error(e))?;
        writer.flush().map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }
}
