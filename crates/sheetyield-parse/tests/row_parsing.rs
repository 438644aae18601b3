use sheetyield_common::{Scalar, Value};
use sheetyield_descriptor::SchemaDocument;
use sheetyield_parse::reader::{CellValue, SheetGrid};
use sheetyield_parse::row::parse_sheet;

fn scalar<'a>(record: &'a Value, tag: u32) -> &'a Scalar {
    record
        .as_message()
        .expect("record is a message")
        .get(&tag)
        .expect("field present")
        .as_scalar()
        .expect("field is a scalar")
}

/// S1 — single scalar record.
#[test]
fn s1_single_scalar_record() {
    const SCHEMA: &str = r#"
schemes: [Role]
messages:
  Role:
    options: { excel: roles.xlsx, sheet: Roles, key: roleid }
    fields:
      - { name: roleid, tag: 1, kind: i32 }
      - { name: name, tag: 2, kind: string }
"#;
    let doc = SchemaDocument::from_yaml_str(SCHEMA).unwrap();
    let role = doc.resolve("Role").unwrap();

    let mut grid = SheetGrid::new(1, 2, 1, 2);
    grid.set(1, 1, CellValue::String("roleid".into()));
    grid.set(1, 2, CellValue::String("name".into()));
    grid.set(2, 1, CellValue::Number(10001.0));
    grid.set(2, 2, CellValue::String("alice".into()));

    let records = parse_sheet(&grid, "Roles", &role).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(*scalar(&records[0], 1), Scalar::I64(10001));
    assert_eq!(*scalar(&records[0], 2), Scalar::Str("alice".to_string()));
}

/// S2 — nested message, with a field-level `text` override on the nested field.
#[test]
fn s2_nested_message_with_label_override() {
    const SCHEMA: &str = r#"
schemes: [Role]
messages:
  Role:
    options: { excel: roles.xlsx, sheet: Roles, key: roleid }
    fields:
      - { name: roleid, tag: 1, kind: i32 }
      - { name: name, tag: 2, kind: string }
      - { name: props, tag: 3, kind: message, message: Props }
  Props:
    fields:
      - { name: attack, tag: 1, kind: i32, text: "props.attack" }
      - { name: defense, tag: 2, kind: i32 }
"#;
    let doc = SchemaDocument::from_yaml_str(SCHEMA).unwrap();
    let role = doc.resolve("Role").unwrap();

    let mut grid = SheetGrid::new(1, 2, 1, 4);
    grid.set(1, 1, CellValue::String("roleid".into()));
    grid.set(1, 2, CellValue::String("name".into()));
    grid.set(1, 3, CellValue::String("props.attack".into()));
    grid.set(1, 4, CellValue::String("props.defense".into()));
    grid.set(2, 1, CellValue::Number(10001.0));
    grid.set(2, 2, CellValue::String("alice".into()));
    grid.set(2, 3, CellValue::Number(7.0));
    grid.set(2, 4, CellValue::Number(3.0));

    let records = parse_sheet(&grid, "Roles", &role).unwrap();
    let props = records[0]
        .as_message()
        .unwrap()
        .get(&3)
        .unwrap();
    assert_eq!(*scalar(props, 1), Scalar::I64(7));
    assert_eq!(*scalar(props, 2), Scalar::I64(3));
}

/// S3 — repeated scalar as an inline `;`-delimited array.
#[test]
fn s3_repeated_scalar_inline_array() {
    const SCHEMA: &str = r#"
schemes: [Role]
messages:
  Role:
    options: { excel: roles.xlsx, sheet: Roles, key: roleid }
    fields:
      - { name: roleid, tag: 1, kind: i32 }
      - { name: drops, tag: 2, kind: i32, cardinality: repeated }
"#;
    let doc = SchemaDocument::from_yaml_str(SCHEMA).unwrap();
    let role = doc.resolve("Role").unwrap();

    let mut grid = SheetGrid::new(1, 2, 1, 2);
    grid.set(1, 1, CellValue::String("roleid".into()));
    grid.set(1, 2, CellValue::String("drops".into()));
    grid.set(2, 1, CellValue::Number(1.0));
    grid.set(2, 2, CellValue::String("1;2;3".into()));

    let records = parse_sheet(&grid, "Roles", &role).unwrap();
    let drops = records[0].as_message().unwrap().get(&2).unwrap();
    let items: Vec<_> = drops.as_list().unwrap().iter().map(|v| v.as_scalar().unwrap().clone()).collect();
    assert_eq!(items, vec![Scalar::I64(1), Scalar::I64(2), Scalar::I64(3)]);
}

/// S4 — repeated scalar as indexed columns, stopping at the first gap.
#[test]
fn s4_repeated_scalar_indexed_columns_stop_at_gap() {
    const SCHEMA: &str = r#"
schemes: [Role]
messages:
  Role:
    options: { excel: roles.xlsx, sheet: Roles, key: roleid }
    fields:
      - { name: roleid, tag: 1, kind: i32 }
      - { name: drops, tag: 2, kind: i32, cardinality: repeated }
"#;
    let doc = SchemaDocument::from_yaml_str(SCHEMA).unwrap();
    let role = doc.resolve("Role").unwrap();

    let mut grid = SheetGrid::new(1, 2, 1, 4);
    grid.set(1, 1, CellValue::String("roleid".into()));
    grid.set(1, 2, CellValue::String("drops[1]".into()));
    grid.set(1, 3, CellValue::String("drops[2]".into()));
    grid.set(1, 4, CellValue::String("drops[3]".into()));
    grid.set(2, 1, CellValue::Number(1.0));
    grid.set(2, 2, CellValue::Number(10.0));
    // drops[2] left empty: enumeration must stop after index 1.
    grid.set(2, 4, CellValue::Number(30.0));

    let records = parse_sheet(&grid, "Roles", &role).unwrap();
    let drops = records[0].as_message().unwrap().get(&2).unwrap();
    let items: Vec<_> = drops.as_list().unwrap().iter().map(|v| v.as_scalar().unwrap().clone()).collect();
    assert_eq!(items, vec![Scalar::I64(10)]);
}

/// S6 — enum resolved by alias (`cname`).
#[test]
fn s6_enum_by_alias() {
    const SCHEMA: &str = r#"
schemes: [Role]
messages:
  Role:
    options: { excel: roles.xlsx, sheet: Roles, key: roleid }
    fields:
      - { name: roleid, tag: 1, kind: i32 }
      - { name: color, tag: 2, kind: enum, enum: Color }
enums:
  Color:
    default: 0
    values:
      - { name: RED, number: 0, cname: "红" }
      - { name: BLUE, number: 1 }
"#;
    let doc = SchemaDocument::from_yaml_str(SCHEMA).unwrap();
    let role = doc.resolve("Role").unwrap();

    let mut grid = SheetGrid::new(1, 2, 1, 2);
    grid.set(1, 1, CellValue::String("roleid".into()));
    grid.set(1, 2, CellValue::String("color".into()));
    grid.set(2, 1, CellValue::Number(1.0));
    grid.set(2, 2, CellValue::String("红".into()));

    let records = parse_sheet(&grid, "Roles", &role).unwrap();
    assert_eq!(*scalar(&records[0], 2), Scalar::EnumOrdinal(0));
}

/// Unknown enum text logs a warning and falls back to the enum's default.
#[test]
fn unknown_enum_text_falls_back_to_default() {
    const SCHEMA: &str = r#"
schemes: [Role]
messages:
  Role:
    options: { excel: roles.xlsx, sheet: Roles, key: roleid }
    fields:
      - { name: roleid, tag: 1, kind: i32 }
      - { name: color, tag: 2, kind: enum, enum: Color }
enums:
  Color:
    default: 1
    values:
      - { name: RED, number: 0 }
      - { name: BLUE, number: 1 }
"#;
    let doc = SchemaDocument::from_yaml_str(SCHEMA).unwrap();
    let role = doc.resolve("Role").unwrap();

    let mut grid = SheetGrid::new(1, 2, 1, 2);
    grid.set(1, 1, CellValue::String("roleid".into()));
    grid.set(1, 2, CellValue::String("color".into()));
    grid.set(2, 1, CellValue::Number(1.0));
    grid.set(2, 2, CellValue::String("PURPLE".into()));

    let records = parse_sheet(&grid, "Roles", &role).unwrap();
    assert_eq!(*scalar(&records[0], 2), Scalar::EnumOrdinal(1));
}

/// A cell-type mismatch against the field's declared kind aborts the row.
#[test]
fn type_mismatch_is_reported_with_location() {
    const SCHEMA: &str = r#"
schemes: [Role]
messages:
  Role:
    options: { excel: roles.xlsx, sheet: Roles, key: roleid }
    fields:
      - { name: roleid, tag: 1, kind: i32 }
"#;
    let doc = SchemaDocument::from_yaml_str(SCHEMA).unwrap();
    let role = doc.resolve("Role").unwrap();

    let mut grid = SheetGrid::new(1, 2, 1, 1);
    grid.set(1, 1, CellValue::String("roleid".into()));
    grid.set(2, 1, CellValue::String("not-a-number".into()));

    let err = parse_sheet(&grid, "Roles", &role).unwrap_err();
    match err {
        sheetyield_parse::CellError::TypeMismatch { sheet, row, label, .. } => {
            assert_eq!(sheet, "Roles");
            assert_eq!(row, 2);
            assert_eq!(label, "roleid");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

/// A date-valued cell targeting a numeric field is converted to Unix epoch
/// seconds before being read as a number.
#[test]
fn date_cell_targeting_numeric_field_is_unix_epoch_converted() {
    const SCHEMA: &str = r#"
schemes: [Role]
messages:
  Role:
    options: { excel: roles.xlsx, sheet: Roles, key: roleid }
    fields:
      - { name: roleid, tag: 1, kind: i32 }
      - { name: joined_at, tag: 2, kind: i64 }
"#;
    let doc = SchemaDocument::from_yaml_str(SCHEMA).unwrap();
    let role = doc.resolve("Role").unwrap();

    let mut grid = SheetGrid::new(1, 2, 1, 2);
    grid.set(1, 1, CellValue::String("roleid".into()));
    grid.set(1, 2, CellValue::String("joined_at".into()));
    grid.set(2, 1, CellValue::Number(1.0));
    // Excel serial 45000 is 2023-03-15.
    grid.set(2, 2, CellValue::Date(45000.0));

    let records = parse_sheet(&grid, "Roles", &role).unwrap();
    match scalar(&records[0], 2) {
        Scalar::I64(seconds) => assert!(*seconds > 0),
        other => panic!("expected I64, got {other:?}"),
    }
}
