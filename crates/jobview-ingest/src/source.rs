//! Sheet sources
//!
//! A [`SheetSource`] yields raw sheets by position. The loader only ever asks
//! for indices, never names, because job logs are exported with whatever sheet
//! titles the operator happened to use.

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::IngestError;
use crate::sheet::{CellValue, RawSheet};

/// Something that can hand out worksheets by index.
pub trait SheetSource {
    fn sheet_count(&self) -> usize;

    fn read_sheet(&mut self, index: usize) -> Result<RawSheet, IngestError>;
}

/// Workbook on disk, in any format calamine understands (xlsx, xlsm, xlsb, xls, ods).
pub struct WorkbookSource {
    path: PathBuf,
    names: Vec<String>,
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref().to_path_buf();
        let workbook = open_workbook_auto(&path).map_err(|source| IngestError::Open {
            path: path.clone(),
            source,
        })?;
        let names = workbook.sheet_names();

        debug!(path = %path.display(), sheets = ?names, "Opened workbook");

        Ok(Self {
            path,
            names,
            workbook,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for WorkbookSource {
    fn sheet_count(&self) -> usize {
        self.names.len()
    }

    fn read_sheet(&mut self, index: usize) -> Result<RawSheet, IngestError> {
        let missing = IngestError::MissingSheet {
            index,
            available: self.names.len(),
        };
        let Some(name) = self.names.get(index).cloned() else {
            return Err(missing);
        };

        let range = match self.workbook.worksheet_range_at(index) {
            Some(Ok(range)) => range,
            Some(Err(source)) => return Err(IngestError::Sheet { name, source }),
            None => return Err(missing),
        };

        let grid = range
            .rows()
            .map(|row| row.iter().map(cell_from_data).collect::<Vec<_>>());

        Ok(RawSheet::from_grid(name, grid))
    }
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => value
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Float(value.as_f64())),
        Data::DateTimeIso(text) => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
            .map(CellValue::DateTime)
            .unwrap_or_else(|_| CellValue::Text(text.clone())),
        Data::DurationIso(text) => CellValue::Text(text.clone()),
    }
}

/// Sheets built in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: Vec<RawSheet>,
}

impl MemorySource {
    pub fn new(sheets: Vec<RawSheet>) -> Self {
        Self { sheets }
    }
}

impl SheetSource for MemorySource {
    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn read_sheet(&mut self, index: usize) -> Result<RawSheet, IngestError> {
        self.sheets
            .get(index)
            .cloned()
            .ok_or(IngestError::MissingSheet {
                index,
                available: self.sheets.len(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_from_data(&Data::Empty), CellValue::Missing);
        assert_eq!(
            cell_from_data(&Data::String("report.csv".into())),
            CellValue::from("report.csv")
        );
        assert_eq!(cell_from_data(&Data::String(String::new())), CellValue::from(""));
        assert_eq!(cell_from_data(&Data::Float(7.0)), CellValue::Float(7.0));
        assert_eq!(cell_from_data(&Data::Int(7)), CellValue::Int(7));
        assert_eq!(cell_from_data(&Data::Bool(false)), CellValue::Bool(false));
    }

    #[test]
    fn test_error_cells_are_missing() {
        let cell = Data::Error(calamine::CellErrorType::NA);
        assert_eq!(cell_from_data(&cell), CellValue::Missing);
    }

    #[test]
    fn test_iso_datetime_cells() {
        let cell = cell_from_data(&Data::DateTimeIso("2024-05-06T07:08:09".into()));
        assert_eq!(cell.render(), "2024-05-06 07:08:09");

        let odd = cell_from_data(&Data::DateTimeIso("not a date".into()));
        assert_eq!(odd, CellValue::from("not a date"));
    }

    #[test]
    fn test_memory_source_by_index() {
        let mut source = MemorySource::new(vec![RawSheet::new("A", vec![], vec![])]);

        assert_eq!(source.sheet_count(), 1);
        assert_eq!(source.read_sheet(0).unwrap().name, "A");
        assert!(matches!(
            source.read_sheet(1),
            Err(IngestError::MissingSheet { index: 1, available: 1 })
        ));
    }

    #[test]
    fn test_open_missing_workbook() {
        let err = WorkbookSource::open("/definitely/not/here.xlsx").err().unwrap();
        assert!(matches!(err, IngestError::Open { .. }));
        assert!(err.to_string().contains("/definitely/not/here.xlsx"));
    }
}
