//! Field coercion, column-label name synthesis, and recursive row-to-record
//! construction over a schema-described message type.

pub mod coerce;
pub mod error;
pub mod excel_date;
pub mod names;
pub mod reader;
pub mod row;

pub use error::{CellError, InputError, ParseError};
pub use reader::{CalamineBackend, CellType, CellValue, SheetGrid, SpreadsheetBackend};
pub use row::{parse_sheet, HeaderMap};
