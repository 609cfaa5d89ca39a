//! End-to-end tests for the rule engine.

use marc_model::{ControlField, DataField, Field, FieldCategory, Record, RuleAction, SubfieldCode};
use marc_transform::{Rule, RuleEngine, normalize_record};

fn title(subfields: &[(SubfieldCode, &str)]) -> DataField {
    subfields
        .iter()
        .fold(DataField::new("245").with_indicators('1', '0'), |field, (code, value)| {
            field.with_subfield(*code, *value)
        })
}

fn extent(value: &str) -> DataField {
    DataField::new("300").with_subfield(SubfieldCode::A, value)
}

fn extent_values(record: &Record) -> Vec<Vec<&str>> {
    record
        .data_fields("300")
        .map(|field| field.values(SubfieldCode::A))
        .collect()
}

#[test]
fn record_without_extent_gets_placeholder() {
    let mut record = Record::new().with_field(title(&[(SubfieldCode::A, "Letters")]));

    let report = RuleEngine::new().apply(&mut record);

    assert_eq!(extent_values(&record), vec![vec!["placeholder"]]);
    assert_eq!(report.count("placeholder extent"), 1);
}

#[test]
fn existing_extent_is_not_duplicated() {
    let mut record = Record::new().with_field(extent("1 box"));

    let report = RuleEngine::new().apply(&mut record);

    assert_eq!(extent_values(&record), vec![vec!["1 box"]]);
    assert_eq!(report.count("placeholder extent"), 0);
}

#[test]
fn parenthetical_extent_splits_into_two_fields() {
    let mut record = Record::new().with_field(extent("2 boxes (3 folders)"));

    RuleEngine::new().apply(&mut record);

    assert_eq!(
        extent_values(&record),
        vec![vec!["2 boxes"], vec!["3 folders"]]
    );
}

#[test]
fn unbalanced_parenthesis_is_literal() {
    let mut record = Record::new().with_field(extent("2 boxes (3 folders"));

    RuleEngine::new().apply(&mut record);

    assert_eq!(extent_values(&record), vec![vec!["2 boxes (3 folders"]]);
}

#[test]
fn new_fields_are_appended_after_existing_ones() {
    let mut record = Record::new()
        .with_field(extent("2 boxes (3 folders)"))
        .with_field(title(&[(SubfieldCode::A, "Papers"), (SubfieldCode::K, "Diaries")]))
        .with_field(DataField::new("520").with_subfield(SubfieldCode::A, "Summary"));

    RuleEngine::new().apply(&mut record);

    let tags: Vec<&str> = record.fields.iter().map(Field::tag).collect();
    assert_eq!(tags, vec!["300", "245", "520", "300", "500"]);
}

#[test]
fn undated_and_circa_are_added_from_one_control_field() {
    let mut record = Record::new()
        .with_field(ControlField::new("008", "850101quuuu    cau"))
        .with_field(title(&[(SubfieldCode::A, "Papers")]))
        .with_field(extent("1 box"));

    let report = RuleEngine::new().apply(&mut record);

    let title = record.data_fields("245").next().expect("title present");
    assert_eq!(
        title.values(SubfieldCode::F),
        vec!["undated", "fix circa date"]
    );
    assert_eq!(report.count("undated"), 1);
    assert_eq!(report.count("fix circa date"), 1);
}

#[test]
fn date_type_other_than_single_adds_undated_only() {
    let mut record = Record::new()
        .with_field(ControlField::new("008", "850101n        cau"))
        .with_field(title(&[(SubfieldCode::A, "Papers")]));

    RuleEngine::new().apply(&mut record);

    let title = record.data_fields("245").next().expect("title present");
    assert_eq!(title.values(SubfieldCode::F), vec!["undated"]);
}

#[test]
fn title_with_date_expression_is_left_alone() {
    let mut record = Record::new()
        .with_field(ControlField::new("008", "850101quuuu    cau"))
        .with_field(title(&[(SubfieldCode::A, "Papers"), (SubfieldCode::F, "1900s.")]));

    RuleEngine::new().apply(&mut record);

    let title = record.data_fields("245").next().expect("title present");
    assert_eq!(title.values(SubfieldCode::F), vec!["1900s"]);
}

#[test]
fn title_preceding_the_control_field_is_not_linked() {
    let mut record = Record::new()
        .with_field(title(&[(SubfieldCode::A, "Papers")]))
        .with_field(ControlField::new("008", "850101quuuu    cau"));

    RuleEngine::new().apply(&mut record);

    let title = record.data_fields("245").next().expect("title present");
    assert!(!title.has(SubfieldCode::F));
}

#[test]
fn title_cleanup_relocates_part_and_drops_designation() {
    let mut record = Record::new().with_field(title(&[
        (SubfieldCode::A, "Panoramic views :"),
        (SubfieldCode::H, "[graphic]"),
        (SubfieldCode::B, ": San Francisco"),
        (SubfieldCode::K, "Photographs"),
        (SubfieldCode::F, "1906."),
        (SubfieldCode::C, "Pillsbury."),
    ]));

    let report = RuleEngine::new().apply(&mut record);

    let title = record.data_fields("245").next().expect("title present");
    let codes: Vec<char> = title.subfields.iter().map(|s| s.code.as_char()).collect();
    assert_eq!(codes, vec!['a', 'b', 'f', 'c']);
    assert_eq!(title.values(SubfieldCode::A), vec!["Panoramic views"]);
    assert_eq!(title.values(SubfieldCode::B), vec!["San Francisco"]);
    assert_eq!(title.values(SubfieldCode::F), vec!["1906"]);
    assert_eq!(title.values(SubfieldCode::C), vec!["Pillsbury"]);
    assert_eq!(
        record.subfield_value("500", SubfieldCode::A),
        Some("Photographs")
    );
    assert!(report.actions.contains(&RuleAction::TitlePartRelocated {
        value: "Photographs".to_string()
    }));
}

#[test]
fn heading_rules_keep_initials_and_unwrap_dates() {
    let mut record = Record::new()
        .with_field(
            DataField::new("100")
                .with_subfield(SubfieldCode::A, "Smith, J.")
                .with_subfield(SubfieldCode::Q, "(John)")
                .with_subfield(SubfieldCode::D, "1850-1920."),
        )
        .with_field(DataField::new("700").with_subfield(SubfieldCode::A, "Jones, Mary."));

    RuleEngine::new().apply(&mut record);

    assert_eq!(record.subfield_value("100", SubfieldCode::A), Some("Smith, J."));
    assert_eq!(record.subfield_value("100", SubfieldCode::Q), Some("John"));
    assert_eq!(record.subfield_value("100", SubfieldCode::D), Some("1850-1920"));
    assert_eq!(record.subfield_value("700", SubfieldCode::A), Some("Jones, Mary"));
}

#[test]
fn provenance_punctuation() {
    let mut record = Record::new().with_field(
        DataField::new("541")
            .with_subfield(SubfieldCode::A, "Jane Doe ;")
            .with_subfield(SubfieldCode::C, "Gift ;")
            .with_subfield(SubfieldCode::D, "1999."),
    );

    RuleEngine::new().apply(&mut record);

    let field = record.data_fields("541").next().expect("541 present");
    assert_eq!(field.values(SubfieldCode::A), vec!["Jane Doe"]);
    assert_eq!(field.values(SubfieldCode::C), vec!["Gift"]);
    assert_eq!(field.values(SubfieldCode::D), vec!["1999"]);
}

#[test]
fn subject_source_repair() {
    let mut record = Record::new()
        .with_field(DataField::new("752").with_subfield(SubfieldCode::A, "United States"))
        .with_field(
            DataField::new("754")
                .with_subfield(SubfieldCode::A, "Quercus")
                .with_subfield(SubfieldCode::Source, "itis"),
        )
        .with_field(DataField::new("656").with_subfield(SubfieldCode::A, "Photographers."))
        .with_field(
            DataField::new("656")
                .with_subfield(SubfieldCode::A, "Surveyors")
                .with_subfield(SubfieldCode::Source, "itoamc"),
        );

    let report = RuleEngine::new().apply(&mut record);

    assert_eq!(
        record.subfield_value("752", SubfieldCode::Source),
        Some("naf")
    );
    assert_eq!(
        record.subfield_value("754", SubfieldCode::Source),
        Some("itis")
    );
    let genre: Vec<&DataField> = record.data_fields("656").collect();
    assert_eq!(genre.len(), 1);
    assert_eq!(genre[0].values(SubfieldCode::A), vec!["Surveyors"]);
    assert_eq!(report.count("field dropped"), 1);
    assert_eq!(report.count("source added"), 1);
}

#[test]
fn every_processed_record_has_an_extent() {
    let records = vec![
        Record::new(),
        Record::new().with_field(DataField::new("656").with_subfield(SubfieldCode::A, "x")),
        Record::new().with_field(extent("(1 folder)")),
    ];
    let engine = RuleEngine::new();
    for mut record in records {
        normalize_record(&mut record);
        engine.apply(&mut record);
        assert!(record.has_category(FieldCategory::Extent));
    }
}

#[test]
fn required_repairs_survive_any_disabled_set() {
    let optional: Vec<Rule> = Rule::ALL
        .into_iter()
        .filter(|rule| !rule.is_required())
        .collect();
    for mask in 0u32..(1 << optional.len()) {
        let mut disabled: Vec<Rule> = optional
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, rule)| *rule)
            .collect();
        disabled.extend(Rule::REQUIRED);
        let mut record = Record::new()
            .with_field(DataField::new("656").with_subfield(SubfieldCode::A, "Farmers"))
            .with_field(DataField::new("752").with_subfield(SubfieldCode::A, "United States"));

        RuleEngine::without(&disabled).apply(&mut record);

        assert_eq!(record.data_fields("300").count(), 1, "disabled {disabled:?}");
        assert_eq!(record.data_fields("656").count(), 0, "disabled {disabled:?}");
        assert_eq!(
            record.subfield_value("752", SubfieldCode::Source),
            Some("naf"),
            "disabled {disabled:?}"
        );
    }
}
