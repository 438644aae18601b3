use thiserror::Error;

/// The workbook or sheet named by a scheme's `excel`/`sheet` options could
/// not be opened or found.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to open workbook `{path}`: {source}")]
    Open {
        path: String,
        #[source]
        source: calamine::Error,
    },
    #[error("workbook `{path}` has unsupported extension (expected .xls or .xlsx)")]
    UnsupportedExtension { path: String },
    #[error("sheet `{sheet}` not found in workbook `{path}`")]
    SheetNotFound { path: String, sheet: String },
}

/// A cell's type did not match the expected type for the field it targets,
/// or a numeric value did not fit the target kind.
#[derive(Debug, Error)]
pub enum CellError {
    #[error("{sheet}!row {row}, column `{label}`: expected {expected}, found {actual}")]
    TypeMismatch {
        sheet: String,
        row: u32,
        label: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("{sheet}!row {row}, column `{label}`: number `{value}` out of range for kind `{kind}`")]
    OutOfRange {
        sheet: String,
        row: u32,
        label: String,
        value: f64,
        kind: &'static str,
    },
    #[error("{sheet}!row {row}, column `{label}`: failed to unpack date value")]
    DateUnpack {
        sheet: String,
        row: u32,
        label: String,
    },
}

/// Either half of a scheme's parse pass: opening its workbook/sheet, or
/// parsing a row once opened. A row/cell error anywhere aborts the whole
/// sheet, per the abort-on-first-error policy.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Cell(#[from] CellError),
}
