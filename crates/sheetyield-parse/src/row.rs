//! Row Parser (C3): header indexing plus recursive row-to-record
//! construction, dispatched by field cardinality.

use std::collections::HashMap;

use sheetyield_common::{Cardinality, Kind, Value};
use sheetyield_descriptor::{FieldDescriptor, MessageDescriptor};

use crate::coerce;
use crate::error::CellError;
use crate::excel_date;
use crate::names;
use crate::reader::{CellType, CellValue, SheetGrid};

/// `label -> column_index`, built once from the first populated (header)
/// row. Only string-typed header cells are retained.
pub struct HeaderMap {
    columns: HashMap<String, u32>,
}

impl HeaderMap {
    pub fn build(grid: &SheetGrid, header_row: u32) -> Self {
        let mut columns = HashMap::new();
        for col in grid.first_col..=grid.last_col {
            if let CellValue::String(label) = grid.cell(header_row, col) {
                columns.insert(label.clone(), col);
            }
        }
        Self { columns }
    }

    pub fn col_of(&self, label: &str) -> Option<u32> {
        self.columns.get(label).copied()
    }
}

/// Parse every data row of `grid` (the rows after the header row) against
/// `message`, in sheet row order.
pub fn parse_sheet(
    grid: &SheetGrid,
    sheet_name: &str,
    message: &MessageDescriptor,
) -> Result<Vec<Value>, CellError> {
    let headers = HeaderMap::build(grid, grid.first_row);
    let mut records = Vec::new();
    for row in (grid.first_row + 1)..=grid.last_row {
        let mut record = Value::empty_message();
        parse_message_fields(grid, &headers, sheet_name, row, message, "", &mut record)?;
        records.push(record);
    }
    Ok(records)
}

fn parse_message_fields(
    grid: &SheetGrid,
    headers: &HeaderMap,
    sheet: &str,
    row: u32,
    message: &MessageDescriptor,
    base: &str,
    record: &mut Value,
) -> Result<(), CellError> {
    for field in message.fields_in_order() {
        let label = field.effective_label();
        let col_label = names::field_label(base, label);

        match (field.cardinality, field.kind) {
            (Cardinality::Singular, Kind::Message) => {
                let nested_msg = field
                    .message
                    .as_ref()
                    .expect("message-kind field must carry a resolved message descriptor");
                let mut sub = Value::empty_message();
                parse_message_fields(
                    grid,
                    headers,
                    sheet,
                    row,
                    nested_msg,
                    &names::nested_base(base, label),
                    &mut sub,
                )?;
                insert_field(record, field, sub);
            }
            (Cardinality::Singular, _) => {
                if let Some(col) = headers.col_of(&col_label) {
                    let cell = grid.cell(row, col);
                    if cell.is_present() {
                        let input = extract_scalar(sheet, row, &col_label, field.kind, cell)?;
                        write_singular(record, field, input, sheet, row, &col_label)?;
                    }
                }
            }
            (Cardinality::Repeated, Kind::Message) | (Cardinality::Map, _) => {
                let nested_msg = field
                    .message
                    .as_ref()
                    .expect("message/map field must carry a resolved message descriptor");
                let mut index = 1;
                loop {
                    let indexed_base = format!("{}.", names::indexed_label(&col_label, index));
                    if !any_leaf_present(grid, headers, row, &indexed_base, nested_msg) {
                        break;
                    }
                    let mut sub = Value::empty_message();
                    parse_message_fields(grid, headers, sheet, row, nested_msg, &indexed_base, &mut sub)?;
                    coerce::add_message(record, field, sub);
                    index += 1;
                }
            }
            (Cardinality::Repeated, _) => {
                if let Some(col) = headers.col_of(&col_label) {
                    let cell = grid.cell(row, col);
                    if cell.is_present() {
                        if !field.kind.is_numeric() {
                            return Err(CellError::TypeMismatch {
                                sheet: sheet.to_string(),
                                row,
                                label: col_label.clone(),
                                expected: "indexed columns (non-numeric repeated field)",
                                actual: "inline semicolon-delimited array",
                            });
                        }
                        let text = cell_as_text(cell).ok_or_else(|| CellError::TypeMismatch {
                            sheet: sheet.to_string(),
                            row,
                            label: col_label.clone(),
                            expected: "number or string",
                            actual: "bool",
                        })?;
                        coerce::fill_number_array(record, field, &text).map_err(|(value, e)| {
                            CellError::OutOfRange {
                                sheet: sheet.to_string(),
                                row,
                                label: col_label.clone(),
                                value,
                                kind: e.kind,
                            }
                        })?;
                    }
                } else {
                    let mut index = 1;
                    loop {
                        let idx_label = names::indexed_label(&col_label, index);
                        let Some(col) = headers.col_of(&idx_label) else {
                            break;
                        };
                        let cell = grid.cell(row, col);
                        if !cell.is_present() {
                            break;
                        }
                        let input = extract_scalar(sheet, row, &idx_label, field.kind, cell)?;
                        write_repeated(record, field, input, sheet, row, &idx_label)?;
                        index += 1;
                    }
                }
            }
        }
    }
    Ok(())
}

/// A sub-record (nested/repeated message, or map entry) at a given index is
/// present iff any leaf column it would occupy is present and non-empty.
fn any_leaf_present(
    grid: &SheetGrid,
    headers: &HeaderMap,
    row: u32,
    base: &str,
    message: &MessageDescriptor,
) -> bool {
    message.fields_in_order().iter().any(|field| {
        let label = field.effective_label();
        let col_label = names::field_label(base, label);
        match (field.cardinality, field.kind) {
            (Cardinality::Singular, Kind::Message) => {
                let nested = field
                    .message
                    .as_ref()
                    .expect("message-kind field must carry a resolved message descriptor");
                any_leaf_present(grid, headers, row, &names::nested_base(base, label), nested)
            }
            (Cardinality::Repeated, Kind::Message) | (Cardinality::Map, _) => {
                let nested = field
                    .message
                    .as_ref()
                    .expect("message/map field must carry a resolved message descriptor");
                let first = format!("{}.", names::indexed_label(&col_label, 1));
                any_leaf_present(grid, headers, row, &first, nested)
            }
            (Cardinality::Singular, _) => headers
                .col_of(&col_label)
                .is_some_and(|col| grid.cell(row, col).is_present()),
            (Cardinality::Repeated, _) => {
                if let Some(col) = headers.col_of(&col_label) {
                    grid.cell(row, col).is_present()
                } else {
                    let first = names::indexed_label(&col_label, 1);
                    headers
                        .col_of(&first)
                        .is_some_and(|col| grid.cell(row, col).is_present())
                }
            }
        }
    })
}

/// A type-checked, kind-dispatched scalar value read from one cell, ready
/// to be handed to the Field Coercer's `set_*`/`add_*` family.
enum ScalarInput {
    Number(f64),
    Bool(bool),
    Text(String),
}

fn cell_as_text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::String(s) => Some(s.clone()),
        CellValue::Number(n) => Some(n.to_string()),
        CellValue::Date(serial) => Some(serial.to_string()),
        _ => None,
    }
}

fn extract_scalar(
    sheet: &str,
    row: u32,
    label: &str,
    kind: Kind,
    cell: &CellValue,
) -> Result<ScalarInput, CellError> {
    let mismatch = |expected: &'static str| CellError::TypeMismatch {
        sheet: sheet.to_string(),
        row,
        label: label.to_string(),
        expected,
        actual: cell_type_name(cell.cell_type()),
    };

    if kind.is_numeric() {
        match cell {
            CellValue::Number(n) => Ok(ScalarInput::Number(*n)),
            CellValue::Date(serial) => excel_date::serial_to_unix_seconds(*serial)
                .map(|secs| ScalarInput::Number(secs as f64))
                .ok_or_else(|| CellError::DateUnpack {
                    sheet: sheet.to_string(),
                    row,
                    label: label.to_string(),
                }),
            _ => Err(mismatch("number")),
        }
    } else if kind == Kind::Bool {
        match cell {
            CellValue::Bool(b) => Ok(ScalarInput::Bool(*b)),
            _ => Err(mismatch("bool")),
        }
    } else {
        // Enum or String.
        match cell {
            CellValue::String(s) => Ok(ScalarInput::Text(s.clone())),
            _ => Err(mismatch("string")),
        }
    }
}

fn cell_type_name(t: CellType) -> &'static str {
    match t {
        CellType::Empty => "empty",
        CellType::Blank => "blank",
        CellType::Number => "number",
        CellType::Bool => "bool",
        CellType::String => "string",
        CellType::Date => "date",
    }
}

fn write_singular(
    record: &mut Value,
    field: &FieldDescriptor,
    input: ScalarInput,
    sheet: &str,
    row: u32,
    label: &str,
) -> Result<(), CellError> {
    match input {
        ScalarInput::Number(n) => {
            coerce::set_number(record, field, n).map_err(|e| out_of_range(sheet, row, label, n, e))
        }
        ScalarInput::Bool(b) => {
            coerce::set_bool(record, field, b);
            Ok(())
        }
        ScalarInput::Text(t) => {
            if field.kind == Kind::Enum {
                coerce::set_enum(record, field, &t);
            } else {
                coerce::set_string(record, field, &t);
            }
            Ok(())
        }
    }
}

fn write_repeated(
    record: &mut Value,
    field: &FieldDescriptor,
    input: ScalarInput,
    sheet: &str,
    row: u32,
    label: &str,
) -> Result<(), CellError> {
    match input {
        ScalarInput::Number(n) => {
            coerce::add_number(record, field, n).map_err(|e| out_of_range(sheet, row, label, n, e))
        }
        ScalarInput::Bool(b) => {
            coerce::add_bool(record, field, b);
            Ok(())
        }
        ScalarInput::Text(t) => {
            if field.kind == Kind::Enum {
                coerce::add_enum(record, field, &t);
            } else {
                coerce::add_string(record, field, &t);
            }
            Ok(())
        }
    }
}

fn out_of_range(sheet: &str, row: u32, label: &str, value: f64, err: coerce::OutOfRange) -> CellError {
    CellError::OutOfRange {
        sheet: sheet.to_string(),
        row,
        label: label.to_string(),
        value,
        kind: err.kind,
    }
}

fn insert_field(record: &mut Value, field: &FieldDescriptor, value: Value) {
    record
        .as_message_mut()
        .expect("record must be a Value::Message")
        .insert(field.tag, value);
}
