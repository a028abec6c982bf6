//! The merged, normalized job table

use std::collections::{BTreeMap, HashSet};
use tracing::warn;

use crate::normalize::normalize_key;
use crate::sheet::{CellValue, RawSheet};

/// All merged sheets as one table keyed by normalized column names.
///
/// Columns are the union of every sheet's keys in first-seen order. Rows keep
/// sheet order, then row order within a sheet, and hold a cell for every
/// column (`Missing` where the row's sheet lacked it).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobTable {
    columns: Vec<String>,
    index: BTreeMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct JobRow<'a> {
    index: &'a BTreeMap<String, usize>,
    cells: &'a [CellValue],
}

impl<'a> JobRow<'a> {
    /// Cell under a normalized key; `None` if the table has no such column.
    pub fn get(&self, key: &str) -> Option<&'a CellValue> {
        self.index.get(key).and_then(|&col| self.cells.get(col))
    }

    /// Cell under a normalized key, only if it holds a real value.
    pub fn present(&self, key: &str) -> Option<&'a CellValue> {
        self.get(key).filter(|cell| cell.is_present())
    }
}

impl JobTable {
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
            index: BTreeMap::new(),
            rows: Vec::new(),
        }
    }

    /// Concatenate sheets row-wise after normalizing their headers.
    pub fn concat<I>(sheets: I) -> Self
    where
        I: IntoIterator<Item = RawSheet>,
    {
        let mut table = Self::empty();
        for sheet in sheets {
            table.append(sheet);
        }
        table
    }

    fn append(&mut self, sheet: RawSheet) {
        let mut seen = HashSet::new();
        let mut targets = Vec::with_capacity(sheet.headers.len());

        for header in &sheet.headers {
            let key = normalize_key(header);

            // Within one sheet the first column holding a key wins
            if !seen.insert(key.clone()) {
                warn!(sheet = %sheet.name, header = %header, key = %key, "Duplicate column after normalization, ignoring");
                targets.push(None);
                continue;
            }

            let col = match self.index.get(&key) {
                Some(&col) => col,
                None => self.add_column(key),
            };
            targets.push(Some(col));
        }

        let width = self.columns.len();
        for raw in sheet.rows {
            let mut row = vec![CellValue::Missing; width];
            for (cell, target) in raw.into_iter().zip(&targets) {
                if let Some(slot) = target.and_then(|col| row.get_mut(col)) {
                    *slot = cell;
                }
            }
            self.rows.push(row);
        }
    }

    fn add_column(&mut self, key: String) -> usize {
        let col = self.columns.len();
        self.columns.push(key.clone());
        self.index.insert(key, col);
        for row in &mut self.rows {
            row.push(CellValue::Missing);
        }
        col
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = JobRow<'_>> + '_ {
        self.rows.iter().map(move |cells| JobRow {
            index: &self.index,
            cells,
        })
    }
}
