//! Streaming MARCXML reader.
//!
//! Reads one `<record>` element at a time from a MARCXML document and hands it
//! over as a [`Record`]. Only the record under construction is held in memory,
//! so exports of any size are processed with a bounded footprint.
//!
//! Element names are matched on their local name; the MARC21 slim namespace
//! may be declared as the default namespace or bound to a prefix (`marc:record`).
//!
//! # Usage
//!
//! ```ignore
//! use marc_ingest::MarcXmlReader;
//!
//! let reader = MarcXmlReader::from_path("export.xml")?;
//! for record in reader {
//!     let record = record?;
//!     // ...
//! }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use tracing::trace;

use marc_model::{
    ControlField, DataField, ModelError, Record, SubfieldCode, parse_indicator, parse_tag,
};

use crate::error::{IngestError, Result};

/// Streaming reader yielding records in document order.
pub struct MarcXmlReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    index: usize,
    done: bool,
}

impl MarcXmlReader<BufReader<File>> {
    /// Open a MARCXML file for streaming.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IngestError::io(path, source))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<'a> MarcXmlReader<&'a [u8]> {
    /// Read records from an in-memory document.
    pub fn from_document(document: &'a str) -> Self {
        Self::new(document.as_bytes())
    }
}

impl<R: BufRead> MarcXmlReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: Reader::from_reader(inner),
            buf: Vec::new(),
            index: 0,
            done: false,
        }
    }

    /// Number of records yielded so far.
    pub fn records_read(&self) -> usize {
        self.index
    }

    /// Read the next record, or `None` at the end of the document.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        let mut builder: Option<RecordBuilder> = None;
        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf)?;
            let decoder = self.reader.decoder();
            match event {
                Event::Start(start) => {
                    let name = start.local_name();
                    match builder.as_mut() {
                        None if name.as_ref() == b"record" => {
                            builder = Some(RecordBuilder::new(self.index, &start, decoder)?);
                        }
                        None => {}
                        Some(_) if name.as_ref() == b"record" => {
                            return Err(malformed(self.index, "nested <record> element"));
                        }
                        Some(open) => open.open(name.as_ref(), &start)?,
                    }
                }
                Event::Empty(start) => {
                    let name = start.local_name();
                    match builder.as_mut() {
                        None if name.as_ref() == b"record" => {
                            let record =
                                RecordBuilder::new(self.index, &start, decoder)?.finish();
                            self.index += 1;
                            return Ok(Some(record));
                        }
                        None => {}
                        Some(open) => {
                            open.open(name.as_ref(), &start)?;
                            open.close(name.as_ref());
                        }
                    }
                }
                Event::End(end) => {
                    let name = end.local_name();
                    if name.as_ref() == b"record" {
                        if let Some(open) = builder.take() {
                            let record = open.finish();
                            trace!(index = self.index, fields = record.fields.len(), "read record");
                            self.index += 1;
                            return Ok(Some(record));
                        }
                    } else if let Some(open) = builder.as_mut() {
                        open.close(name.as_ref());
                    }
                }
                Event::Text(text) => {
                    if let Some(open) = builder.as_mut() {
                        open.push_text(&text.decode().map_err(quick_xml::Error::from)?);
                    }
                }
                Event::CData(data) => {
                    if let Some(open) = builder.as_mut() {
                        open.push_text(&data.decode().map_err(quick_xml::Error::from)?);
                    }
                }
                Event::GeneralRef(reference) => {
                    if let Some(open) = builder.as_mut() {
                        open.push_text(&resolve_reference(&reference)?);
                    }
                }
                Event::Eof => {
                    if builder.is_some() {
                        return Err(malformed(self.index, "document ended inside <record>"));
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for MarcXmlReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

/// Element whose text is being collected.
enum Target {
    Leader,
    Control(String),
    Subfield(SubfieldCode),
}

struct RecordBuilder {
    index: usize,
    decoder: Decoder,
    record: Record,
    data: Option<DataField>,
    target: Option<Target>,
    text: String,
}

impl RecordBuilder {
    fn new(index: usize, start: &BytesStart<'_>, decoder: Decoder) -> Result<Self> {
        let record = Record {
            record_type: attribute(start, "type", decoder)?,
            ..Record::default()
        };
        Ok(Self {
            index,
            decoder,
            record,
            data: None,
            target: None,
            text: String::new(),
        })
    }

    fn open(&mut self, name: &[u8], start: &BytesStart<'_>) -> Result<()> {
        match name {
            b"leader" => self.begin(Target::Leader),
            b"controlfield" => {
                let tag = self.tag(start)?;
                self.begin(Target::Control(tag));
            }
            b"datafield" => {
                if self.data.is_some() {
                    return Err(malformed(self.index, "nested <datafield> element"));
                }
                let tag = self.tag(start)?;
                let ind1 = parse_indicator(self.attribute(start, "ind1")?.as_deref())
                    .map_err(|source| self.model_error(source))?;
                let ind2 = parse_indicator(self.attribute(start, "ind2")?.as_deref())
                    .map_err(|source| self.model_error(source))?;
                self.data = Some(DataField::new(tag).with_indicators(ind1, ind2));
            }
            b"subfield" => {
                if self.data.is_none() {
                    return Err(malformed(self.index, "<subfield> outside <datafield>"));
                }
                let raw = self.attribute(start, "code")?.unwrap_or_default();
                let code = raw
                    .parse::<SubfieldCode>()
                    .map_err(|source| self.model_error(source))?;
                self.begin(Target::Subfield(code));
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match (name, self.target.take()) {
            (b"leader", Some(Target::Leader)) => {
                self.record.leader = Some(std::mem::take(&mut self.text));
            }
            (b"controlfield", Some(Target::Control(tag))) => {
                let value = std::mem::take(&mut self.text);
                self.record.push_field(ControlField::new(tag, value));
            }
            (b"subfield", Some(Target::Subfield(code))) => {
                let value = std::mem::take(&mut self.text);
                if let Some(data) = self.data.as_mut() {
                    data.push_subfield(code, value);
                }
            }
            (b"datafield", target) => {
                self.target = target;
                if let Some(data) = self.data.take() {
                    self.record.push_field(data);
                }
            }
            (_, target) => self.target = target,
        }
    }

    fn begin(&mut self, target: Target) {
        self.text.clear();
        self.target = Some(target);
    }

    fn push_text(&mut self, text: &str) {
        if self.target.is_some() {
            self.text.push_str(text);
        }
    }

    fn attribute(&self, start: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
        attribute(start, name, self.decoder)
    }

    fn tag(&self, start: &BytesStart<'_>) -> Result<String> {
        let raw = self.attribute(start, "tag")?.unwrap_or_default();
        parse_tag(&raw).map_err(|source| self.model_error(source))
    }

    fn model_error(&self, source: ModelError) -> IngestError {
        IngestError::Model {
            index: self.index,
            source,
        }
    }

    fn finish(self) -> Record {
        self.record
    }
}

fn attribute(start: &BytesStart<'_>, name: &str, decoder: Decoder) -> Result<Option<String>> {
    match start.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.decode_and_unescape_value(decoder)?.into_owned())),
        None => Ok(None),
    }
}

/// Resolve a character or predefined entity reference; unknown entities are
/// kept verbatim.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String> {
    if let Some(ch) = reference.resolve_char_ref()? {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(quick_xml::Error::from)?;
    Ok(match resolve_predefined_entity(&name) {
        Some(value) => value.to_string(),
        None => format!("&{name};"),
    })
}

fn malformed(index: usize, message: &str) -> IngestError {
    IngestError::Malformed {
        index,
        message: message.to_string(),
    }
}
