//! Tests for record navigation helpers.

use marc_model::{ControlField, DataField, FieldCategory, Record, SubfieldCode};

fn sample_record() -> Record {
    Record::new()
        .with_field(ControlField::new("008", "850101s1921    cau"))
        .with_field(
            DataField::new("245")
                .with_indicators('1', '0')
                .with_subfield(SubfieldCode::A, "Letters")
                .with_subfield(SubfieldCode::F, "1921"),
        )
        .with_field(
            DataField::new("852")
                .with_subfield(SubfieldCode::B, "Library")
                .with_subfield(SubfieldCode::J, "MS 100"),
        )
}

#[test]
fn finds_subfield_values_by_tag_and_code() {
    let record = sample_record();
    assert_eq!(
        record.subfield_value("852", SubfieldCode::J),
        Some("MS 100")
    );
    assert_eq!(record.subfield_value("852", SubfieldCode::K), None);
    assert_eq!(record.subfield_value("300", SubfieldCode::A), None);
}

#[test]
fn subfield_mut_edits_in_place() {
    let mut record = sample_record();
    let subfield = record
        .subfield_mut("852", SubfieldCode::J)
        .expect("call number present");
    subfield.code = SubfieldCode::K;
    assert_eq!(
        record.subfield_value("852", SubfieldCode::K),
        Some("MS 100")
    );
}

#[test]
fn category_lookup() {
    let record = sample_record();
    assert!(record.has_category(FieldCategory::DateControl));
    assert!(record.has_category(FieldCategory::Title));
    assert!(!record.has_category(FieldCategory::Extent));
}

#[test]
fn control_positions_truncate_instead_of_failing() {
    let field = ControlField::new("008", "850101s19");
    assert_eq!(field.char_at(7), Some('1'));
    assert_eq!(field.char_at(40), None);
    let flags: String = field.positions(7, 11).collect();
    assert_eq!(flags, "19");
}

#[test]
fn data_field_values_keep_order() {
    let field = DataField::new("300")
        .with_subfield(SubfieldCode::A, "2 boxes")
        .with_subfield(SubfieldCode::F, "linear feet")
        .with_subfield(SubfieldCode::A, "3 folders");
    assert_eq!(field.values(SubfieldCode::A), vec!["2 boxes", "3 folders"]);
    assert!(field.has(SubfieldCode::F));
    assert!(!field.has(SubfieldCode::Source));
}

#[test]
fn subfield_value_outlives_the_tag_argument() {
    let record = sample_record();
    let value = {
        let tag = String::from("852");
        record.subfield_value(&tag, SubfieldCode::J)
    };
    assert_eq!(value, Some("MS 100"));
}
