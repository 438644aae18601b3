use std::collections::BTreeMap;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sheetyield_common::{Cardinality, Kind};

use crate::validation::{Issue, ValidationError};

/// Root schema document: a named set of message types plus top-level enums.
///
/// This is the one concrete, shippable backing for the abstract
/// "Descriptor Model" contract (messages, fields, enum values, and the
/// options of `excel`/`sheet`/`key`/`output`/`prefix`/`suffix`/`text`/`cname`) —
/// the schema-loading collaborator itself (how this document ends up on
/// disk, what editor authors it) stays out of scope, same as the upstream
/// spec leaves schema-file parsing to an injected service.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// Message types, keyed by their short, stable name. Includes both
    /// top-level parse targets and nested helper types (e.g. a `Props`
    /// type nested under `Role`, or a map field's synthetic `{key, value}`
    /// pair) — nesting in the source `.proto` grammar is flattened into
    /// one name-addressed table here, distinguished from parse targets by
    /// `schemes` below rather than by lexical position.
    pub messages: BTreeMap<String, MessageDef>,
    /// Enum types, keyed by their short, stable name.
    #[serde(default)]
    pub enums: BTreeMap<String, EnumDef>,
    /// Names (into `messages`) of the message types that are actual parse
    /// targets — each gets its own workbook read, Keyed Store, and pair of
    /// emitted artifacts. Every other entry in `messages` exists only to
    /// be referenced as a nested/map-value type.
    pub schemes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MessageDef {
    #[serde(default)]
    pub options: MessageOptions,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MessageOptions {
    /// Semicolon-separated list of workbook paths.
    #[serde(default)]
    pub excel: Option<String>,
    /// Semicolon-separated list of sheet names within those workbooks.
    #[serde(default)]
    pub sheet: Option<String>,
    /// Semicolon-separated ordered list of field names used to build the nested index.
    #[serde(default)]
    pub key: Option<String>,
    /// Base name for emitted artifacts; defaults to the message's short name.
    #[serde(default)]
    pub output: Option<String>,
    /// Literal text prepended to the emitted text literal.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Literal text appended to the emitted text literal.
    #[serde(default)]
    pub suffix: Option<String>,
}

impl MessageOptions {
    fn split_semicolons(value: &Option<String>) -> Vec<String> {
        value
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn excel_paths(&self) -> Vec<String> {
        Self::split_semicolons(&self.excel)
    }

    pub fn sheet_names(&self) -> Vec<String> {
        Self::split_semicolons(&self.sheet)
    }

    pub fn key_names(&self) -> Vec<String> {
        Self::split_semicolons(&self.key)
    }

    pub fn output_name(&self, message_name: &str) -> String {
        self.output
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| message_name.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    pub name: String,
    /// Stable declaration-order tiebreaker; irrelevant to parsing beyond ordering.
    pub tag: u32,
    pub kind: FieldKind,
    #[serde(default = "default_cardinality")]
    pub cardinality: FieldCardinality,
    /// Name of the nested message type, required when `kind == message`
    /// (including synthetic `{key, value}` messages backing `map` fields).
    #[serde(default)]
    pub message: Option<String>,
    /// Name of the enum type, required when `kind == enum`.
    #[serde(default)]
    pub r#enum: Option<String>,
    /// Header-label override; defaults to `name` when absent.
    #[serde(default)]
    pub text: Option<String>,
}

fn default_cardinality() -> FieldCardinality {
    FieldCardinality::Singular
}

impl FieldDef {
    pub fn effective_label(&self) -> &str {
        self.text.as_deref().unwrap_or(self.name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Double,
    Float,
    I32,
    U32,
    I64,
    U64,
    Bool,
    Enum,
    String,
    Message,
}

impl From<FieldKind> for Kind {
    fn from(value: FieldKind) -> Self {
        match value {
            FieldKind::Double => Kind::Double,
            FieldKind::Float => Kind::Float,
            FieldKind::I32 => Kind::I32,
            FieldKind::U32 => Kind::U32,
            FieldKind::I64 => Kind::I64,
            FieldKind::U64 => Kind::U64,
            FieldKind::Bool => Kind::Bool,
            FieldKind::Enum => Kind::Enum,
            FieldKind::String => Kind::String,
            FieldKind::Message => Kind::Message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldCardinality {
    Singular,
    Repeated,
    Map,
}

impl From<FieldCardinality> for Cardinality {
    fn from(value: FieldCardinality) -> Self {
        match value {
            FieldCardinality::Singular => Cardinality::Singular,
            FieldCardinality::Repeated => Cardinality::Repeated,
            FieldCardinality::Map => Cardinality::Map,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EnumDef {
    #[serde(default)]
    pub default: i64,
    pub values: Vec<EnumValueDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EnumValueDef {
    pub name: String,
    pub number: i64,
    /// Alias accepted as input in addition to `name` (field-level option `cname`).
    #[serde(default)]
    pub cname: Option<String>,
}

impl SchemaDocument {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve the [`MessageDescriptor`] for a declared message by name,
    /// wiring up `message`/`enum` field references into a navigable tree.
    pub fn resolve(&self, message_name: &str) -> Result<Arc<MessageDescriptor>, ValidationError> {
        let mut issues = Vec::new();
        let resolved = self.resolve_message(message_name, &mut issues, &mut Vec::new());
        if !issues.is_empty() {
            return Err(ValidationError::new(issues));
        }
        Ok(resolved.expect("no issues implies resolution succeeded"))
    }

    fn resolve_message(
        &self,
        message_name: &str,
        issues: &mut Vec<Issue>,
        stack: &mut Vec<String>,
    ) -> Option<Arc<MessageDescriptor>> {
        let Some(def) = self.messages.get(message_name) else {
            issues.push(Issue::new(
                message_name,
                format!("message `{message_name}` is not declared"),
            ));
            return None;
        };

        if stack.contains(&message_name.to_string()) {
            issues.push(Issue::new(
                message_name,
                format!("message `{message_name}` recursively references itself"),
            ));
            return None;
        }
        stack.push(message_name.to_string());

        let mut fields = Vec::with_capacity(def.fields.len());
        let mut seen_names = std::collections::HashSet::new();
        for field in &def.fields {
            let path = format!("{message_name}.{}", field.name);
            if !seen_names.insert(field.name.clone()) {
                issues.push(Issue::new(&path, "duplicate field name".to_string()));
                continue;
            }

            let message = if field.kind == FieldKind::Message {
                match &field.message {
                    Some(name) => self.resolve_message(name, issues, stack),
                    None => {
                        issues.push(Issue::new(
                            &path,
                            "kind `message` requires a `message` reference".to_string(),
                        ));
                        None
                    }
                }
            } else {
                None
            };

            let enum_descriptor = if field.kind == FieldKind::Enum {
                match &field.r#enum {
                    Some(name) => match self.enums.get(name) {
                        Some(enum_def) => Some(Arc::new(EnumDescriptor::from_def(name, enum_def))),
                        None => {
                            issues.push(Issue::new(
                                &path,
                                format!("enum `{name}` is not declared"),
                            ));
                            None
                        }
                    },
                    None => {
                        issues.push(Issue::new(
                            &path,
                            "kind `enum` requires an `enum` reference".to_string(),
                        ));
                        None
                    }
                }
            } else {
                None
            };

            fields.push(FieldDescriptor {
                name: field.name.clone(),
                tag: field.tag,
                kind: field.kind.into(),
                cardinality: field.cardinality.into(),
                text: field.text.clone(),
                message,
                enum_descriptor,
            });
        }

        stack.pop();
        Some(Arc::new(MessageDescriptor {
            name: message_name.to_string(),
            fields,
            options: def.options.clone(),
        }))
    }
}

/// Resolved, navigable view of one message type: the Descriptor Model
/// contract of the core (`fields_in_order`, `find_field`, `message_option`)
/// realized as plain methods on an owned tree rather than reflection calls.
#[derive(Debug, Clone)]
pub struct MessageDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    pub options: MessageOptions,
}

impl MessageDescriptor {
    pub fn fields_in_order(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub tag: u32,
    pub kind: Kind,
    pub cardinality: Cardinality,
    pub text: Option<String>,
    pub message: Option<Arc<MessageDescriptor>>,
    pub enum_descriptor: Option<Arc<EnumDescriptor>>,
}

impl FieldDescriptor {
    pub fn effective_label(&self) -> &str {
        self.text.as_deref().unwrap_or(self.name.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct EnumDescriptor {
    pub name: String,
    pub default: i64,
    pub values: Vec<EnumValueDescriptor>,
}

impl EnumDescriptor {
    fn from_def(name: &str, def: &EnumDef) -> Self {
        EnumDescriptor {
            name: name.to_string(),
            default: def.default,
            values: def
                .values
                .iter()
                .map(|v| EnumValueDescriptor {
                    name: v.name.clone(),
                    number: v.number,
                    cname: v.cname.clone(),
                })
                .collect(),
        }
    }

    /// Resolve input text to a numeric ordinal by canonical name or `cname` alias.
    pub fn resolve(&self, text: &str) -> Option<i64> {
        self.values
            .iter()
            .find(|v| v.name == text || v.cname.as_deref() == Some(text))
            .map(|v| v.number)
    }
}

#[derive(Debug, Clone)]
pub struct EnumValueDescriptor {
    pub name: String,
    pub number: i64,
    pub cname: Option<String>,
}
