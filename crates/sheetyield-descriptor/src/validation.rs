use std::fmt;

use sheetyield_common::Kind;

use crate::schema::{MessageDescriptor, SchemaDocument};

/// One granular validation failure, tagged with the path that produced it
/// (`MessageName`, `MessageName.field_name`, …).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl Issue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema validation failed with {} issue(s): ", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

/// Validate every message declared in `doc`: resolves nested
/// `message`/`enum` references, then checks that each message's `excel`,
/// `sheet`, and `key` options are well-formed.
pub fn validate_document(doc: &SchemaDocument) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    if doc.schemes.is_empty() {
        issues.push(Issue::new("schemes", "schema document declares no schemes"));
    }

    for name in &doc.schemes {
        if !doc.messages.contains_key(name) {
            issues.push(Issue::new(
                "schemes",
                format!("scheme `{name}` does not name a declared message"),
            ));
            continue;
        }
        match doc.resolve(name) {
            Ok(descriptor) => validate_scheme(&descriptor, &mut issues),
            Err(err) => issues.extend(err.issues().iter().cloned()),
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(issues))
    }
}

/// Validate a top-level parse target: its own `excel`/`sheet`/`key`
/// options, plus (recursively, but without re-requiring those options)
/// every message type it reaches through nested/map fields.
fn validate_scheme(descriptor: &MessageDescriptor, issues: &mut Vec<Issue>) {
    let excel = descriptor.options.excel_paths();
    let sheet = descriptor.options.sheet_names();
    let key = descriptor.options.key_names();

    if excel.is_empty() || sheet.is_empty() {
        issues.push(Issue::new(
            &descriptor.name,
            "message options `excel` and `sheet` must both be non-empty".to_string(),
        ));
    } else if excel.len() > 1 && sheet.len() > 1 && excel.len() != sheet.len() {
        issues.push(Issue::new(
            &descriptor.name,
            format!(
                "`excel` has {} entr{} but `sheet` has {} entr{} and neither is broadcastable (exactly one entry)",
                excel.len(),
                if excel.len() == 1 { "y" } else { "ies" },
                sheet.len(),
                if sheet.len() == 1 { "y" } else { "ies" },
            ),
        ));
    }

    if key.is_empty() {
        issues.push(Issue::new(
            &descriptor.name,
            "message option `key` must name at least one field".to_string(),
        ));
    }

    for key_name in &key {
        match descriptor.find_field(key_name) {
            None => issues.push(Issue::new(
                &descriptor.name,
                format!("key field `{key_name}` not found on message"),
            )),
            Some(field) if !field.kind.is_key_capable() => issues.push(Issue::new(
                format!("{}.{}", descriptor.name, field.name),
                format!(
                    "key field has kind `{}`, which is not key-capable (must be integer, enum, or string)",
                    field.kind
                ),
            )),
            Some(_) => {}
        }
    }

    for field in descriptor.fields_in_order() {
        if field.kind == Kind::Message {
            if let Some(nested) = &field.message {
                validate_nested(nested, issues);
            }
        }
    }
}

/// Validate a message reached only as a nested/map-value type: no
/// `excel`/`sheet`/`key` options are expected here, just structural
/// soundness of anything it nests further.
fn validate_nested(descriptor: &MessageDescriptor, issues: &mut Vec<Issue>) {
    for field in descriptor.fields_in_order() {
        if field.kind == Kind::Message {
            if let Some(nested) = &field.message {
                validate_nested(nested, issues);
            }
        }
    }
}
