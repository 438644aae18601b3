//! JSON Schema export for [`crate::schema::SchemaDocument`].
//!
//! Exercises the same `schemars` derive the document types carry, so an
//! editor author (or a CI check) can validate a YAML/JSON schema document
//! without this crate in the loop.

use schemars::schema_for;
use serde_json::Value as JsonValue;

use crate::schema::SchemaDocument;

/// Generate the JSON Schema for [`SchemaDocument`] as a `serde_json::Value`.
pub fn generate_schema_value() -> JsonValue {
    serde_json::to_value(schema_for!(SchemaDocument))
        .expect("schemars root schema always serializes")
}

/// Generate the JSON Schema for [`SchemaDocument`], pretty-printed.
pub fn generate_schema_json_pretty() -> String {
    serde_json::to_string_pretty(&generate_schema_value())
        .expect("schemars root schema always serializes")
}

/// The JSON Schema text served by `sheetyield-cli schema --print`, for
/// consumption by editors/linters that never invoke this crate directly.
pub fn schema_json() -> String {
    generate_schema_json_pretty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_schema_is_an_object_with_message_properties() {
        let value = generate_schema_value();
        let properties = value
            .get("properties")
            .and_then(JsonValue::as_object)
            .expect("root schema has a properties object");
        assert!(properties.contains_key("messages"));
        assert!(properties.contains_key("schemes"));
    }

    #[test]
    fn bundled_schema_matches_generated() {
        let committed: JsonValue =
            serde_json::from_str(&schema_json()).expect("schema must be valid JSON");
        assert_eq!(committed, generate_schema_value());
    }
}
