//! Column-label name synthesis: `f(base, label)` and `g(label, index)`.
//!
//! These two format strings are implementation constants shared with the
//! encoder side — the same recursive concatenation must be used wherever a
//! nested/repeated field's column label is derived, or round-tripping a
//! schema between writer and reader tooling would silently disagree.

/// `f(base, L) = concat(base, L)`. `base` is `""` at the root, or a
/// trailing-dotted prefix like `"props."` / `"items[2]."` when recursing
/// into a nested message.
pub fn field_label(base: &str, label: &str) -> String {
    format!("{base}{label}")
}

/// `g(label, i) = concat(label, "[", i, "]")`. Element indexing starts at 1.
pub fn indexed_label(label: &str, index: u32) -> String {
    format!("{label}[{index}]")
}

/// The `base'` a nested message recurses with: `f(base, L) + "."`.
pub fn nested_base(base: &str, label: &str) -> String {
    format!("{}.", field_label(base, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_field_label_is_just_the_label() {
        assert_eq!(field_label("", "roleid"), "roleid");
    }

    #[test]
    fn nested_field_label_concatenates_base() {
        assert_eq!(field_label("props.", "attack"), "props.attack");
    }

    #[test]
    fn indexed_label_starts_at_one() {
        assert_eq!(indexed_label("drops", 1), "drops[1]");
        assert_eq!(indexed_label("drops", 3), "drops[3]");
    }

    #[test]
    fn nested_base_adds_trailing_dot() {
        assert_eq!(nested_base("", "props"), "props.");
        assert_eq!(nested_base("items[2].", "detail"), "items[2].detail.");
    }
}
