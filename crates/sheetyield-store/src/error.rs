use thiserror::Error;

/// A `key` option names a field that does not resolve, or that resolves to
/// a kind that cannot back a store key.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("key field `{field}` not found on message `{message}`")]
    UnknownKeyField { message: String, field: String },
    #[error("key field `{message}.{field}` has kind `{kind}`, which is not key-capable")]
    NonKeyCapableField {
        message: String,
        field: String,
        kind: String,
    },
    #[error("message `{0}` declares no key fields")]
    EmptyKeyList(String),
    #[error("key field `{message}.{field}` has no value on one or more records")]
    MissingKeyValue { message: String, field: String },
}
