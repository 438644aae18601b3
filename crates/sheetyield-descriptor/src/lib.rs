//! Schema document model: messages, fields, enums, and the
//! `excel`/`sheet`/`key`/`output`/`prefix`/`suffix`/`text`/`cname` options
//! that drive the rest of the pipeline.

pub mod json_schema;
pub mod schema;
pub mod validation;

pub use json_schema::{generate_schema_json_pretty, generate_schema_value, schema_json};
pub use schema::{
    EnumDef, EnumDescriptor, EnumValueDef, EnumValueDescriptor, FieldCardinality, FieldDef,
    FieldDescriptor, FieldKind, MessageDef, MessageDescriptor, MessageOptions, SchemaDocument,
};
pub use validation::{validate_document, Issue, ValidationError};
