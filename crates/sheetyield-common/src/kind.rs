use std::fmt;

/// Scalar or structural type of a schema field.
///
/// `Map` is not modeled here: per the schema the core works against, a
/// `map` field is always a `repeated` field of a synthetic two-field
/// `{key, value}` message (see [`Cardinality`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
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

impl Kind {
    /// Whether this kind can back a [`crate::Key`] in a store's key list.
    pub fn is_key_capable(self) -> bool {
        matches!(
            self,
            Kind::I32 | Kind::U32 | Kind::I64 | Kind::U64 | Kind::Enum | Kind::String
        )
    }

    /// Whether this kind is one of the six numeric kinds coerced via `set_number`/`add_number`.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Kind::Double | Kind::Float | Kind::I32 | Kind::U32 | Kind::I64 | Kind::U64
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Double => "double",
            Kind::Float => "float",
            Kind::I32 => "i32",
            Kind::U32 => "u32",
            Kind::I64 => "i64",
            Kind::U64 => "u64",
            Kind::Bool => "bool",
            Kind::Enum => "enum",
            Kind::String => "string",
            Kind::Message => "message",
        };
        f.write_str(s)
    }
}

/// Field cardinality: how many values a field carries.
///
/// `singular` folds the source schema's required/optional distinction —
/// the core treats both identically (a missing required field simply
/// stays at its default, it is never a hard error on its own).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Singular,
    Repeated,
    Map,
}
