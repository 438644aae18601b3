//! The narrow spreadsheet-backend contract (§6) and its one concrete,
//! shippable adapter over `calamine`.
//!
//! [`SheetGrid`] is the decoupling point: everything above this module
//! (name synthesis, row parsing) only ever sees a `SheetGrid`, so it can be
//! exercised in tests without a real workbook on disk.

use std::collections::BTreeMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Empty,
    Blank,
    Number,
    Bool,
    String,
    Date,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    /// A blank cell: present in the sheet's used range but carrying no value.
    Blank,
    Number(f64),
    Bool(bool),
    String(String),
    /// An Excel 1900-epoch serial, same representation as `Number` but
    /// tagged so the row parser can run it through `excel_date` first.
    Date(f64),
}

impl CellValue {
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Empty => CellType::Empty,
            CellValue::Blank => CellType::Blank,
            CellValue::Number(_) => CellType::Number,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::String(_) => CellType::String,
            CellValue::Date(_) => CellType::Date,
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, CellValue::Empty | CellValue::Blank)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) | CellValue::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// One loaded worksheet: bounds plus a sparse cell map, both 1-based (row,
/// column) coordinates to match the encoder-side `(row, column-label)`
/// error reporting convention.
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    pub first_row: u32,
    pub last_row: u32,
    pub first_col: u32,
    pub last_col: u32,
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl SheetGrid {
    pub fn new(first_row: u32, last_row: u32, first_col: u32, last_col: u32) -> Self {
        Self {
            first_row,
            last_row,
            first_col,
            last_col,
            cells: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, row: u32, col: u32, value: CellValue) {
        self.cells.insert((row, col), value);
    }

    pub fn cell(&self, row: u32, col: u32) -> &CellValue {
        self.cells.get(&(row, col)).unwrap_or(&CellValue::Empty)
    }

    pub fn cell_type(&self, row: u32, col: u32) -> CellType {
        self.cell(row, col).cell_type()
    }

    pub fn is_date(&self, row: u32, col: u32) -> bool {
        self.cell_type(row, col) == CellType::Date
    }
}

/// The external spreadsheet-I/O collaborator of §6: opens a workbook and
/// yields one sheet's grid, with `.xls`/`.xlsx` dispatch handled internally.
pub trait SpreadsheetBackend {
    fn open_sheet(&self, workbook_path: &str, sheet_name: &str) -> Result<SheetGrid, InputError>;
}

/// Concrete adapter backed by `calamine`, covering both legacy `.xls` and
/// OOXML `.xlsx` workbooks via [`open_workbook_auto`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CalamineBackend;

impl CalamineBackend {
    fn convert(data: &Data) -> CellValue {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) if s.is_empty() => CellValue::Blank,
            Data::String(s) => CellValue::String(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Date(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
            Data::Error(_) => CellValue::Blank,
        }
    }
}

impl SpreadsheetBackend for CalamineBackend {
    fn open_sheet(&self, workbook_path: &str, sheet_name: &str) -> Result<SheetGrid, InputError> {
        let path = Path::new(workbook_path);
        if !matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("xls") | Some("xlsx") | Some("xlsm") | Some("xlsb")
        ) {
            return Err(InputError::UnsupportedExtension {
                path: workbook_path.to_string(),
            });
        }

        let mut workbook =
            open_workbook_auto(path).map_err(|source| InputError::Open {
                path: workbook_path.to_string(),
                source,
            })?;

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|_| InputError::SheetNotFound {
                path: workbook_path.to_string(),
                sheet: sheet_name.to_string(),
            })?;

        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let (end_row, end_col) = range.end().unwrap_or((0, 0));
        let mut grid = SheetGrid::new(start_row + 1, end_row + 1, start_col + 1, end_col + 1);

        for (row, col, data) in range.used_cells() {
            let value = Self::convert(data);
            if value.is_present() {
                grid.set(row as u32 + 1, col as u32 + 1, value);
            }
        }

        Ok(grid)
    }
}
