//! Single-record MARCXML documents.

use std::io::Write;

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use marc_model::{ControlField, DataField, Field, Record};

use crate::common::{MARC_NS, SCHEMA_LOCATION, XSI_NS};

/// Write one record wrapped in the collection envelope.
pub fn write_record_document<W: Write>(writer: W, record: &Record) -> Result<()> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("collection");
    root.push_attribute(("xmlns", MARC_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    xml.write_event(Event::Start(root))?;

    let mut start = BytesStart::new("record");
    if let Some(record_type) = &record.record_type {
        start.push_attribute(("type", record_type.as_str()));
    }
    xml.write_event(Event::Start(start))?;
    if let Some(leader) = &record.leader {
        write_text_element(&mut xml, BytesStart::new("leader"), leader)?;
    }
    for field in &record.fields {
        match field {
            Field::Control(control) => write_control_field(&mut xml, control)?,
            Field::Data(data) => write_data_field(&mut xml, data)?,
        }
    }
    xml.write_event(Event::End(BytesEnd::new("record")))?;

    xml.write_event(Event::End(BytesEnd::new("collection")))?;
    xml.get_mut().write_all(b"\n")?;
    Ok(())
}

/// Serialize a record document into memory.
pub fn render_record_document(record: &Record) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_record_document(&mut buffer, record)?;
    Ok(buffer)
}

fn write_control_field<W: Write>(xml: &mut Writer<W>, field: &ControlField) -> Result<()> {
    let mut start = BytesStart::new("controlfield");
    start.push_attribute(("tag", field.tag.as_str()));
    write_text_element(xml, start, &field.value)
}

fn write_data_field<W: Write>(xml: &mut Writer<W>, field: &DataField) -> Result<()> {
    let ind1 = field.ind1.to_string();
    let ind2 = field.ind2.to_string();
    let mut start = BytesStart::new("datafield");
    start.push_attribute(("tag", field.tag.as_str()));
    start.push_attribute(("ind1", ind1.as_str()));
    start.push_attribute(("ind2", ind2.as_str()));
    xml.write_event(Event::Start(start))?;
    for subfield in &field.subfields {
        let code = subfield.code.to_string();
        let mut sub = BytesStart::new("subfield");
        sub.push_attribute(("code", code.as_str()));
        write_text_element(xml, sub, &subfield.value)?;
    }
    xml.write_event(Event::End(BytesEnd::new("datafield")))?;
    Ok(())
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, start: BytesStart<'_>, text: &str) -> Result<()> {
    if text.is_empty() {
        xml.write_event(Event::Empty(start))?;
        return Ok(());
    }
    let end = start.to_end().into_owned();
    xml.write_event(Event::Start(start))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(end))?;
    Ok(())
}
