//! Loading real workbooks from disk
//!
//! Fixtures are authored with rust_xlsxwriter into a temp dir, then read back
//! through calamine exactly as the server does at startup.

use jobview_ingest::{load, LoadOutcome, SheetSource, WorkbookSource};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_sheet(name: &str, headers: &[&str], rows: &[&[&str]]) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(name)?;

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            // Empty strings stand for cells left blank
            if !value.is_empty() {
                sheet.write_string(r as u32 + 1, col as u16, *value)?;
            }
        }
    }

    Ok(sheet)
}

fn job_log(dir: &Path) -> PathBuf {
    let path = dir.join("jobs.xlsx");
    let mut workbook = Workbook::new();

    workbook.push_worksheet(
        write_sheet(
            "Batch",
            &["Work Flow Id", "Submitted By", "Status", "Created At", "Error Message"],
            &[
                &["wf-1", "Alice@x.com", "done", "2024-01-02 03:04:05", "disk full"],
                &["wf-2", "bob@x.com", "queued", "", ""],
            ],
        )
        .unwrap(),
    );
    workbook.push_worksheet(
        write_sheet(
            "Interactive",
            &["workflowid", " SUBMITTEDBY ", "status", "Output Result"],
            &[&["wf-3", "alice@x.com", "running", "report.csv"]],
        )
        .unwrap(),
    );
    workbook.push_worksheet(
        write_sheet("Archive", &["Status"], &[&["archived"], &["archived"]]).unwrap(),
    );

    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_load_merges_first_two_sheets() {
    let dir = TempDir::new().unwrap();
    let outcome = load(job_log(dir.path()));

    let LoadOutcome::Loaded(table) = outcome else {
        panic!("expected workbook to load");
    };

    assert_eq!(table.len(), 3);
    assert_eq!(
        table.columns(),
        &[
            "workflowid",
            "submittedby",
            "status",
            "createdat",
            "errormessage",
            "outputresult"
        ]
    );

    let rows: Vec<_> = table.rows().collect();
    assert_eq!(rows[0].present("errormessage").unwrap().render(), "disk full");
    assert!(rows[1].present("createdat").is_none());
    assert_eq!(rows[2].present("submittedby").unwrap().render(), "alice@x.com");
    assert!(rows[2].present("errormessage").is_none());
}

#[test]
fn test_workbook_source_reads_diagnostic_sheet() {
    let dir = TempDir::new().unwrap();
    let mut source = WorkbookSource::open(job_log(dir.path())).unwrap();

    assert_eq!(source.sheet_count(), 3);
    let archive = source.read_sheet(2).unwrap();
    assert_eq!(archive.name, "Archive");
    assert_eq!(archive.row_count(), 2);
    assert!(source.read_sheet(3).is_err());
}

#[test]
fn test_empty_file_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("jobs.xlsx");
    std::fs::write(&path, b"").unwrap();

    let outcome = load(&path);
    assert!(!outcome.is_loaded());
    assert!(outcome.table().is_empty());
    assert!(outcome.failure_reason().unwrap().contains("jobs.xlsx"));
}

#[test]
fn test_single_sheet_workbook_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("one.xlsx");
    let mut workbook = Workbook::new();
    workbook.push_worksheet(write_sheet("Only", &["Status"], &[&["done"]]).unwrap());
    workbook.save(&path).unwrap();

    let outcome = load(&path);
    assert!(matches!(outcome, LoadOutcome::LoadFailed { .. }));
}

/// Timestamps and numbers stored as real typed cells, the way spreadsheet
/// apps save them.
fn typed_job_log(dir: &Path) -> Result<PathBuf, XlsxError> {
    let path = dir.join("typed.xlsx");
    let mut workbook = Workbook::new();

    let mut first = Worksheet::new();
    first.set_name("Batch")?;
    for (col, header) in ["Submitted By", "Created At", "Output Result", "Retries"]
        .iter()
        .enumerate()
    {
        first.write_string(0, col as u16, *header)?;
    }
    let timestamp = ExcelDateTime::parse_from_str("2024-01-02 03:04:05")?;
    let format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    first.write_number(1, 0, 123.0)?;
    first.write_datetime_with_format(1, 1, &timestamp, &format)?;
    first.write_number(1, 2, 42.0)?;
    first.write_number(1, 3, 2.5)?;

    let mut second = Worksheet::new();
    second.set_name("Interactive")?;
    second.write_string(0, 0, "Submitted By")?;

    workbook.push_worksheet(first);
    workbook.push_worksheet(second);
    workbook.save(&path)?;
    Ok(path)
}

#[test]
fn test_typed_cells_render_as_text() {
    let dir = TempDir::new().unwrap();
    let outcome = load(typed_job_log(dir.path()).unwrap());

    let LoadOutcome::Loaded(table) = outcome else {
        panic!("expected workbook to load");
    };
    assert_eq!(table.len(), 1);

    let row = table.rows().next().unwrap();
    assert_eq!(row.present("submittedby").unwrap().render(), "123");
    assert_eq!(row.present("createdat").unwrap().render(), "2024-01-02 03:04:05");
    assert_eq!(row.present("outputresult").unwrap().render(), "42");
    assert_eq!(row.present("retries").unwrap().render(), "2.5");
}
