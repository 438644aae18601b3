//! Field Coercer (C2): centralizes typed writes into a [`Value`] tree so
//! the row parser never branches on field kind itself.

use sheetyield_common::{Key, Kind, Scalar, Value};
use sheetyield_descriptor::FieldDescriptor;

/// A coercion failed because the numeric value does not fit the field's
/// declared kind. Carries no location — the row parser attaches
/// `(sheet, row, label)` when it turns this into a [`crate::error::CellError`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfRange {
    pub kind: &'static str,
}

fn coerce_number(kind: Kind, value: f64) -> Result<Scalar, OutOfRange> {
    match kind {
        Kind::Double => Ok(Scalar::F64(value)),
        Kind::Float => Ok(Scalar::F64(value as f32 as f64)),
        Kind::I32 => {
            let truncated = value.trunc();
            if truncated < i32::MIN as f64 || truncated > i32::MAX as f64 {
                Err(OutOfRange { kind: "i32" })
            } else {
                Ok(Scalar::I64(truncated as i64))
            }
        }
        Kind::U32 => {
            let truncated = value.trunc();
            if truncated < 0.0 || truncated > u32::MAX as f64 {
                Err(OutOfRange { kind: "u32" })
            } else {
                Ok(Scalar::U64(truncated as u64))
            }
        }
        Kind::I64 => {
            let truncated = value.trunc();
            if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
                Err(OutOfRange { kind: "i64" })
            } else {
                Ok(Scalar::I64(truncated as i64))
            }
        }
        Kind::U64 => {
            let truncated = value.trunc();
            if truncated < 0.0 || truncated > u64::MAX as f64 {
                Err(OutOfRange { kind: "u64" })
            } else {
                Ok(Scalar::U64(truncated as u64))
            }
        }
        Kind::Bool | Kind::Enum | Kind::String | Kind::Message => {
            unreachable!("coerce_number called on non-numeric kind `{kind}`")
        }
    }
}

fn message_fields(record: &mut Value) -> &mut std::collections::BTreeMap<u32, Value> {
    record
        .as_message_mut()
        .expect("record must be a Value::Message")
}

pub fn set_number(record: &mut Value, field: &FieldDescriptor, value: f64) -> Result<(), OutOfRange> {
    let scalar = coerce_number(field.kind, value)?;
    message_fields(record).insert(field.tag, Value::Scalar(scalar));
    Ok(())
}

pub fn set_bool(record: &mut Value, field: &FieldDescriptor, value: bool) {
    message_fields(record).insert(field.tag, Value::Scalar(Scalar::Bool(value)));
}

pub fn set_string(record: &mut Value, field: &FieldDescriptor, value: &str) {
    message_fields(record).insert(field.tag, Value::Scalar(Scalar::Str(value.to_string())));
}

/// Resolve `text` to a numeric enum ordinal by canonical name or `cname`
/// alias; on no match, warns and writes the enum's default.
pub fn set_enum(record: &mut Value, field: &FieldDescriptor, text: &str) {
    let descriptor = field
        .enum_descriptor
        .as_ref()
        .expect("set_enum called on a non-enum field");
    let ordinal = match descriptor.resolve(text) {
        Some(ordinal) => ordinal,
        None => {
            tracing::warn!(
                field = %field.name,
                enum_type = %descriptor.name,
                text,
                "enum text matches neither a canonical name nor an alias; writing default"
            );
            descriptor.default
        }
    };
    message_fields(record).insert(field.tag, Value::Scalar(Scalar::EnumOrdinal(ordinal)));
}

fn append(record: &mut Value, field: &FieldDescriptor, value: Value) {
    let fields = message_fields(record);
    match fields.get_mut(&field.tag) {
        Some(Value::List(items)) => items.push(value),
        _ => {
            fields.insert(field.tag, Value::List(vec![value]));
        }
    }
}

pub fn add_number(record: &mut Value, field: &FieldDescriptor, value: f64) -> Result<(), OutOfRange> {
    let scalar = coerce_number(field.kind, value)?;
    append(record, field, Value::Scalar(scalar));
    Ok(())
}

pub fn add_bool(record: &mut Value, field: &FieldDescriptor, value: bool) {
    append(record, field, Value::Scalar(Scalar::Bool(value)));
}

pub fn add_string(record: &mut Value, field: &FieldDescriptor, value: &str) {
    append(record, field, Value::Scalar(Scalar::Str(value.to_string())));
}

pub fn add_enum(record: &mut Value, field: &FieldDescriptor, text: &str) {
    let descriptor = field
        .enum_descriptor
        .as_ref()
        .expect("add_enum called on a non-enum field");
    let ordinal = match descriptor.resolve(text) {
        Some(ordinal) => ordinal,
        None => {
            tracing::warn!(
                field = %field.name,
                enum_type = %descriptor.name,
                text,
                "enum text matches neither a canonical name nor an alias; writing default"
            );
            descriptor.default
        }
    };
    append(record, field, Value::Scalar(Scalar::EnumOrdinal(ordinal)));
}

/// Add a sub-record (message/map-value) to a repeated field.
pub fn add_message(record: &mut Value, field: &FieldDescriptor, value: Value) {
    append(record, field, value);
}

/// Split `text` on `;`, parse each fragment as a double (blank fragments
/// yield 0), and append each via [`add_number`]. Only valid for numeric kinds.
pub fn fill_number_array(
    record: &mut Value,
    field: &FieldDescriptor,
    text: &str,
) -> Result<(), (f64, OutOfRange)> {
    debug_assert!(field.kind.is_numeric(), "fill_number_array on non-numeric field");
    for fragment in text.split(';') {
        let trimmed = fragment.trim();
        let value = if trimmed.is_empty() {
            0.0
        } else {
            trimmed.parse::<f64>().unwrap_or(0.0)
        };
        add_number(record, field, value).map_err(|e| (value, e))?;
    }
    Ok(())
}

/// Read a scalar field into a [`Key`]. Only valid for integer/enum/string
/// kinds; schema validation is expected to have already rejected any other
/// kind from a `key` option list.
pub fn get_key(record: &Value, field: &FieldDescriptor) -> Option<Key> {
    debug_assert!(field.kind.is_key_capable(), "get_key on non-key-capable field");
    record
        .as_message()?
        .get(&field.tag)
        .and_then(Value::as_key)
}
