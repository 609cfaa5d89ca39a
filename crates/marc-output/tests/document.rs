//! Serialization tests for single-record documents and sinks.

use marc_ingest::MarcXmlReader;
use marc_model::{ControlField, DataField, Record, SubfieldCode};
use marc_output::{DirectorySink, RecordSink, emit_record, render_record_document};

fn sample_record() -> Record {
    let mut record = Record::new()
        .with_field(ControlField::new("008", "950101i19001910xx"))
        .with_field(
            DataField::new("245")
                .with_indicators('1', '0')
                .with_subfield(SubfieldCode::A, "Letters & papers")
                .with_subfield(SubfieldCode::F, "1900-1910"),
        )
        .with_field(
            DataField::new("852")
                .with_subfield(SubfieldCode::B, "")
                .with_subfield(SubfieldCode::K, "MS 101"),
        );
    record.leader = Some("00000npc a2200000 a 4500".to_string());
    record.record_type = Some("Bibliographic".to_string());
    record
}

#[test]
fn document_has_fixed_envelope() {
    let bytes = render_record_document(&sample_record()).expect("render");
    let text = String::from_utf8(bytes).expect("utf-8");

    insta::assert_snapshot!(text.trim_end(), @r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <collection xmlns="http://www.loc.gov/MARC21/slim" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.loc.gov/MARC21/slim http://www.loc.gov/standards/marcxml/schema/MARC21slim.xsd">
      <record type="Bibliographic">
        <leader>00000npc a2200000 a 4500</leader>
        <controlfield tag="008">950101i19001910xx</controlfield>
        <datafield tag="245" ind1="1" ind2="0">
          <subfield code="a">Letters &amp; papers</subfield>
          <subfield code="f">1900-1910</subfield>
        </datafield>
        <datafield tag="852" ind1=" " ind2=" ">
          <subfield code="b"/>
          <subfield code="k">MS 101</subfield>
        </datafield>
      </record>
    </collection>
    "#);
}

#[test]
fn rendered_document_reads_back() {
    let original = sample_record();
    let bytes = render_record_document(&original).expect("render");
    let text = String::from_utf8(bytes).expect("utf-8");

    let records: Vec<Record> = MarcXmlReader::from_document(&text)
        .collect::<Result<_, _>>()
        .expect("parse rendered document");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0], original);
}

#[test]
fn record_without_leader_or_type() {
    let record = Record::new().with_field(DataField::new("500").with_subfield(SubfieldCode::A, "Note"));
    let text = String::from_utf8(render_record_document(&record).expect("render")).expect("utf-8");

    assert!(text.contains("<record>"));
    assert!(!text.contains("<leader"));
    assert!(text.trim_end().ends_with("</collection>"));
}

#[test]
fn directory_sink_writes_identifier_files() {
    let temp = tempfile::tempdir().expect("tempdir");
    let out = temp.path().join("nested").join("out");
    let mut sink = DirectorySink::new(&out).expect("create sink");

    let path = emit_record(&mut sink, "MS. 100-1", &sample_record()).expect("emit");

    assert_eq!(path, out.join("MS. 100-1.xml"));
    let written = std::fs::read_to_string(&path).expect("read back");
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
}

#[test]
fn directory_sink_overwrites_existing_files() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut sink = DirectorySink::new(temp.path()).expect("create sink");

    sink.write_document("MS 5", b"old").expect("first write");
    let path = sink.write_document("MS 5", b"new").expect("second write");

    assert_eq!(std::fs::read(&path).expect("read"), b"new");
}
