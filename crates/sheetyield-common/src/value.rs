use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Key;

/// A single scalar reachable at a field of a [`Value::Message`].
///
/// This is the statically-typed replacement for the source schema
/// library's protobuf-reflection `Set*`/`Get*` calls: instead of writing
/// through a `Reflection*` handle keyed by `FieldDescriptor*`, every
/// coercion target is one of these six variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(String),
    /// The numeric ordinal of an enum value (never the name/alias text).
    EnumOrdinal(i64),
}

/// A schema-typed value tree.
///
/// A [`Record`] is simply `Value::Message(..)` at the root. Present
/// fields are keyed by their schema-declared numeric tag rather than by
/// name: this keeps the wire encoding self-contained (no descriptor
/// needed to walk the byte stream) while leaving interpretation against
/// field names/kinds to whoever holds the matching descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Scalar(Scalar),
    Message(BTreeMap<u32, Value>),
    List(Vec<Value>),
}

/// An instance of a message type. Alias kept distinct from `Value` so call
/// sites that only ever operate on whole records read clearly.
pub type Record = Value;

impl Value {
    pub fn empty_message() -> Self {
        Value::Message(BTreeMap::new())
    }

    pub fn empty_list() -> Self {
        Value::List(Vec::new())
    }

    pub fn as_message(&self) -> Option<&BTreeMap<u32, Value>> {
        match self {
            Value::Message(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_message_mut(&mut self) -> Option<&mut BTreeMap<u32, Value>> {
        match self {
            Value::Message(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Read this value as a [`Key`]. Only integer, enum, and string
    /// scalars are key-capable; anything else is a programming error
    /// (the schema should never have let a non-key-capable field into a
    /// `key` option list — see `Kind::is_key_capable`).
    pub fn as_key(&self) -> Option<Key> {
        match self.as_scalar()? {
            Scalar::I64(v) => Some(Key::Int(*v)),
            Scalar::U64(v) => Some(Key::Int(*v as i64)),
            Scalar::EnumOrdinal(v) => Some(Key::Int(*v)),
            Scalar::Str(v) => Some(Key::Str(v.clone())),
            Scalar::Bool(_) | Scalar::F64(_) => None,
        }
    }
}
