//! Deterministic nested text-literal encoder: renders a [`Store`] as a
//! Lua-style `{[key]=value, …}` table, suitable for embedding directly in
//! a scripting-language source file.

use std::fmt::Write as _;

use sheetyield_common::{Cardinality, Key, Kind, Scalar, Value};
use sheetyield_descriptor::{FieldDescriptor, MessageDescriptor};
use sheetyield_store::Store;

/// Render `store` as a text literal, wrapped verbatim by `prefix`/`suffix`.
pub fn encode_text(
    store: &Store,
    message: &MessageDescriptor,
    prefix: &str,
    suffix: &str,
) -> String {
    let mut out = String::new();
    out.push_str(prefix);
    render_store(store, message, 0, &mut out);
    out.push_str(suffix);
    out
}

fn render_store(store: &Store, message: &MessageDescriptor, depth: usize, out: &mut String) {
    out.push_str("{\n");
    let indent = "\t".repeat(depth + 1);
    for key in store.export_keys() {
        let child = store
            .get(&key)
            .expect("a key from export_keys always resolves on the same store");
        write!(out, "{indent}{} = ", render_key(&key)).unwrap();
        if child.is_leaf() {
            match child.first_record() {
                Some(record) => render_record(record, message, out),
                None => out.push_str("{}"),
            }
        } else {
            render_store(child, message, depth + 1, out);
        }
        out.push_str(",\n");
    }
    out.push_str(&"\t".repeat(depth));
    out.push('}');
}

fn render_key(key: &Key) -> String {
    match key {
        Key::Int(v) => format!("[{v}]"),
        Key::Str(v) => format!("['{v}']"),
    }
}

fn render_record(record: &Value, message: &MessageDescriptor, out: &mut String) {
    let fields = record
        .as_message()
        .expect("a store record is always Value::Message");
    out.push('{');
    let mut first = true;
    for field in message.fields_in_order() {
        if !first {
            out.push_str(", ");
        }
        first = false;
        write!(out, "{}=", field.name).unwrap();
        let default;
        let value = match fields.get(&field.tag) {
            Some(value) => value,
            None => {
                default = default_value(field);
                &default
            }
        };
        render_value(value, field, out);
    }
    out.push('}');
}

/// A field absent from the record's map is still emitted, at its kind's
/// default value — `0`/`''`/empty `{}` — matching an unconditional
/// field-by-field walk over the message descriptor rather than only
/// emitting what happens to be set.
fn default_value(field: &FieldDescriptor) -> Value {
    match field.cardinality {
        Cardinality::Repeated | Cardinality::Map => Value::empty_list(),
        Cardinality::Singular => default_scalar_or_message(field),
    }
}

fn default_scalar_or_message(field: &FieldDescriptor) -> Value {
    match field.kind {
        Kind::Message => Value::empty_message(),
        Kind::Bool => Value::Scalar(Scalar::Bool(false)),
        Kind::Double | Kind::Float => Value::Scalar(Scalar::F64(0.0)),
        Kind::I32 | Kind::I64 => Value::Scalar(Scalar::I64(0)),
        Kind::U32 | Kind::U64 => Value::Scalar(Scalar::U64(0)),
        Kind::Enum => Value::Scalar(Scalar::EnumOrdinal(
            field.enum_descriptor.as_ref().map_or(0, |d| d.default),
        )),
        Kind::String => Value::Scalar(Scalar::Str(String::new())),
    }
}

fn render_value(value: &Value, field: &FieldDescriptor, out: &mut String) {
    match field.cardinality {
        Cardinality::Map => {
            let Value::List(items) = value else {
                unreachable!("a map field always coerces to Value::List")
            };
            render_table(items, field, out);
        }
        Cardinality::Repeated => {
            let Value::List(items) = value else {
                unreachable!("a repeated field always coerces to Value::List")
            };
            render_array(items, field, out);
        }
        Cardinality::Singular => render_element(value, field, out),
    }
}

fn render_element(value: &Value, field: &FieldDescriptor, out: &mut String) {
    match value {
        Value::Scalar(scalar) => render_scalar(scalar, out),
        Value::Message(_) => {
            let nested = field
                .message
                .as_deref()
                .expect("a message-kind field always carries a nested descriptor");
            render_record(value, nested, out);
        }
        Value::List(_) => unreachable!("a single element is never itself a Value::List"),
    }
}

fn render_array(items: &[Value], field: &FieldDescriptor, out: &mut String) {
    out.push('{');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        render_element(item, field, out);
    }
    out.push('}');
}

fn render_table(items: &[Value], field: &FieldDescriptor, out: &mut String) {
    let nested = field
        .message
        .as_deref()
        .expect("a map field always carries a nested {key,value} descriptor");
    let key_field = nested
        .find_field("key")
        .expect("a synthetic map entry always declares a `key` field");
    let value_field = nested
        .find_field("value")
        .expect("a synthetic map entry always declares a `value` field");

    out.push('{');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let entry = item
            .as_message()
            .expect("a map entry is always Value::Message");
        let key_value = entry
            .get(&key_field.tag)
            .expect("a map entry's key is always present");
        let key = key_value
            .as_key()
            .expect("a map key field is always key-capable");
        write!(out, "{} = ", render_key(&key)).unwrap();
        let value = entry
            .get(&value_field.tag)
            .expect("a map entry's value is always present");
        render_element(value, value_field, out);
    }
    out.push('}');
}

fn render_scalar(scalar: &Scalar, out: &mut String) {
    match scalar {
        Scalar::Bool(b) => out.push_str(if *b { "1" } else { "0" }),
        Scalar::I64(v) => write!(out, "{v}").unwrap(),
        Scalar::U64(v) => write!(out, "{v}").unwrap(),
        Scalar::F64(v) => write!(out, "{v}").unwrap(),
        Scalar::EnumOrdinal(v) => write!(out, "{v}").unwrap(),
        Scalar::Str(s) => {
            if s.contains('\'') {
                tracing::warn!(value = %s, "string value contains a single quote; text literal does not escape it");
            }
            write!(out, "'{s}'").unwrap();
        }
    }
}
