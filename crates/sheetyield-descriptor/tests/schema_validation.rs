use sheetyield_descriptor::{schema_json, validate_document, SchemaDocument};

fn load_fixture(name: &str) -> SchemaDocument {
    let path = format!("tests/fixtures/{name}.yaml");
    let text = std::fs::read_to_string(&path).expect("failed to read fixture");
    SchemaDocument::from_yaml_str(&text).expect("fixture should deserialize")
}

#[test]
fn role_fixture_validates() {
    let doc = load_fixture("role");
    validate_document(&doc).expect("fixture should validate");
}

#[test]
fn role_fixture_resolves_nested_message_and_enum() {
    let doc = load_fixture("role");
    let role = doc.resolve("Role").expect("Role should resolve");

    let props_field = role.find_field("props").expect("props field present");
    let props = props_field.message.as_ref().expect("props is a message field");
    let attack = props.find_field("attack").expect("attack field present");
    assert_eq!(attack.effective_label(), "props.attack");

    let color_field = role.find_field("color").expect("color field present");
    let color = color_field
        .enum_descriptor
        .as_ref()
        .expect("color is an enum field");
    assert_eq!(color.resolve("红"), Some(0));
    assert_eq!(color.resolve("BLUE"), Some(1));
    assert_eq!(color.resolve("unknown"), None);
}

#[test]
fn item_fixture_two_level_key_validates() {
    let doc = load_fixture("item");
    validate_document(&doc).expect("fixture should validate");
    let item = doc.resolve("Item").expect("Item should resolve");
    assert_eq!(item.options.key_names(), vec!["bag", "slot"]);
}

#[test]
fn missing_scheme_name_is_reported() {
    let mut doc = load_fixture("role");
    doc.schemes.push("DoesNotExist".to_string());

    let err = validate_document(&doc).expect_err("validation should fail");
    assert!(err
        .issues()
        .iter()
        .any(|issue| issue.message.contains("DoesNotExist")));
}

#[test]
fn non_key_capable_field_is_rejected() {
    let mut doc = load_fixture("role");
    doc.messages.get_mut("Role").unwrap().options.key = Some("name;props".to_string());

    let err = validate_document(&doc).expect_err("validation should fail");
    assert!(err
        .issues()
        .iter()
        .any(|issue| issue.path == "Role.props" && issue.message.contains("not key-capable")));
}

#[test]
fn missing_excel_or_sheet_is_rejected() {
    let mut doc = load_fixture("item");
    doc.messages.get_mut("Item").unwrap().options.sheet = None;

    let err = validate_document(&doc).expect_err("validation should fail");
    assert!(err
        .issues()
        .iter()
        .any(|issue| issue.message.contains("excel") && issue.message.contains("sheet")));
}

#[test]
fn schema_json_is_well_formed() {
    let schema_str = schema_json();
    let value: serde_json::Value =
        serde_json::from_str(&schema_str).expect("schema must be valid JSON");
    assert!(value.is_object(), "schema root should be an object");
}
