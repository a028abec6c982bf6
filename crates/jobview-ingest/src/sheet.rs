//! Raw sheet model
//!
//! A [`RawSheet`] is exactly what one worksheet claims: its header row as
//! written and its data rows as typed cells. Normalization happens later,
//! when sheets are merged into a [`crate::JobTable`].

use chrono::NaiveDateTime;

use crate::normalize::normalize_key;

/// Rendering used for date-time cells, matching how timestamps print elsewhere.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One typed cell value.
///
/// `Missing` is the missing-value sentinel: an empty cell, an error cell, or a
/// column the row's sheet never had. An empty string is `Text("")` and counts
/// as present.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Missing,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_present(&self) -> bool {
        !matches!(self, CellValue::Missing)
    }

    /// Render the cell as text.
    ///
    /// Whole floats print without a fractional part (`3.0` -> `"3"`), since
    /// spreadsheets store every number as a float. `Missing` renders empty.
    pub fn render(&self) -> String {
        match self {
            CellValue::Missing => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Int(value) => value.to_string(),
            CellValue::Float(value) => value.to_string(),
            CellValue::Bool(value) => value.to_string(),
            CellValue::DateTime(value) => value.format(DATETIME_FORMAT).to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

/// One worksheet as read from a source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    pub name: String,
    /// Header row, as written in the sheet
    pub headers: Vec<String>,
    /// Data rows; every row has exactly `headers.len()` cells
    pub rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    /// Build a sheet from headers and rows, padding short rows with
    /// `Missing` and cutting cells that have no header.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Missing);
                row
            })
            .collect();

        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Build a sheet from a cell grid whose first row is the header row.
    ///
    /// Blank header cells are named `Unnamed: <col>`. Rows with no present
    /// cell at all are dropped.
    pub fn from_grid<I>(name: impl Into<String>, grid: I) -> Self
    where
        I: IntoIterator<Item = Vec<CellValue>>,
    {
        let mut grid = grid.into_iter();

        let headers = grid
            .next()
            .map(|header_row| {
                header_row
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| match cell {
                        CellValue::Missing => format!("Unnamed: {}", col),
                        other => other.render(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let rows = grid
            .filter(|row| row.iter().any(CellValue::is_present))
            .collect();

        Self::new(name, headers, rows)
    }

    /// Header keys after normalization, in sheet order.
    pub fn normalized_headers(&self) -> Vec<String> {
        self.headers.iter().map(|h| normalize_key(h)).collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
