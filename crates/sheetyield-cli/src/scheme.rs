//! Per-scheme pipeline: open its workbook(s)/sheet(s), parse rows, build the
//! keyed store, and emit the `.bytes` envelope and `.lua` text literal.

use std::path::PathBuf;

use sheetyield_codec::{encode_text, write_file, Envelope};
use sheetyield_descriptor::SchemaDocument;
use sheetyield_parse::{parse_sheet, CalamineBackend, SpreadsheetBackend};

use crate::error::SchemeError;
use crate::workbook::workbook_sheet_pairs;

/// Run one scheme end to end. On success, `<output>.bytes` and
/// `<output>.lua` have been written next to the schema document's output
/// base name.
pub fn run_scheme(doc: &SchemaDocument, scheme_name: &str) -> Result<(), SchemeError> {
    let message = doc.resolve(scheme_name)?;
    let pairs = workbook_sheet_pairs(scheme_name, &message.options)?;

    let backend = CalamineBackend;
    let mut records = Vec::new();
    for (workbook, sheet) in &pairs {
        let grid = backend.open_sheet(workbook, sheet)?;
        let mut rows = parse_sheet(&grid, sheet, &message)?;
        records.append(&mut rows);
    }

    let key_names = message.options.key_names();
    if key_names.is_empty() {
        return Err(SchemeError::MissingKeyOption {
            message: scheme_name.to_string(),
        });
    }

    let envelope = Envelope::build(&message.name, &key_names, &records)?;
    let bytes = envelope.to_bytes()?;

    let store = sheetyield_store::build(records, &key_names, &message)?;
    let prefix = message.options.prefix.as_deref().unwrap_or("");
    let suffix = message.options.suffix.as_deref().unwrap_or("");
    let text = encode_text(&store, &message, prefix, suffix);

    let output = message.options.output_name(&message.name);
    write_file(&PathBuf::from(format!("{output}.bytes")), &bytes)?;
    write_file(&PathBuf::from(format!("{output}.lua")), text.as_bytes())?;

    Ok(())
}
