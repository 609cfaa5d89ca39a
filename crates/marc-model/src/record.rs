//! In-memory representation of a MARCXML record.

use serde::{Deserialize, Serialize};

use crate::enums::{FieldCategory, SubfieldCode};

/// A bibliographic record: an ordered sequence of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The 24-character leader, if the export carried one.
    pub leader: Option<String>,
    /// The `type` attribute of the `<record>` element.
    pub record_type: Option<String>,
    /// Control and data fields in document order.
    pub fields: Vec<Field>,
}

/// A MARC field: either a fixed-position control string or a structured
/// data field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Control(ControlField),
    Data(DataField),
}

/// A control field (00X).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlField {
    pub tag: String,
    pub value: String,
}

/// A data field (010-999) with indicators and subfields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataField {
    pub tag: String,
    pub ind1: char,
    pub ind2: char,
    pub subfields: Vec<Subfield>,
}

/// A subfield: single-character code plus text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    pub code: SubfieldCode,
    pub value: String,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Append a field at the end of the record.
    pub fn push_field(&mut self, field: impl Into<Field>) {
        self.fields.push(field.into());
    }

    /// Iterate over data fields with the given tag.
    pub fn data_fields<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a DataField> + 'a {
        self.fields.iter().filter_map(move |field| match field {
            Field::Data(data) if data.tag == tag => Some(data),
            _ => None,
        })
    }

    /// Returns true if any field falls in the given category.
    pub fn has_category(&self, category: FieldCategory) -> bool {
        self.fields
            .iter()
            .any(|field| field.category() == category)
    }

    /// First subfield value for a tag/code pair.
    pub fn subfield_value(&self, tag: &str, code: SubfieldCode) -> Option<&str> {
        self.fields
            .iter()
            .find_map(|field| match field {
                Field::Data(data) if data.tag == tag => data.first(code),
                _ => None,
            })
            .map(|subfield| subfield.value.as_str())
    }

    /// Mutable access to the first subfield for a tag/code pair.
    pub fn subfield_mut(&mut self, tag: &str, code: SubfieldCode) -> Option<&mut Subfield> {
        self.fields.iter_mut().find_map(|field| match field {
            Field::Data(data) if data.tag == tag => {
                data.subfields.iter_mut().find(|subfield| subfield.code == code)
            }
            _ => None,
        })
    }
}

impl Field {
    pub fn tag(&self) -> &str {
        match self {
            Field::Control(control) => &control.tag,
            Field::Data(data) => &data.tag,
        }
    }

    pub fn category(&self) -> FieldCategory {
        FieldCategory::from_tag(self.tag())
    }

    pub fn as_data(&self) -> Option<&DataField> {
        match self {
            Field::Data(data) => Some(data),
            Field::Control(_) => None,
        }
    }

    pub fn as_data_mut(&mut self) -> Option<&mut DataField> {
        match self {
            Field::Data(data) => Some(data),
            Field::Control(_) => None,
        }
    }

    pub fn as_control(&self) -> Option<&ControlField> {
        match self {
            Field::Control(control) => Some(control),
            Field::Data(_) => None,
        }
    }
}

impl From<ControlField> for Field {
    fn from(field: ControlField) -> Self {
        Field::Control(field)
    }
}

impl From<DataField> for Field {
    fn from(field: DataField) -> Self {
        Field::Data(field)
    }
}

impl ControlField {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// Character at a fixed position; `None` when the value is too short.
    pub fn char_at(&self, position: usize) -> Option<char> {
        self.value.chars().nth(position)
    }

    /// Characters in `start..end`, truncated to what the value holds.
    pub fn positions(&self, start: usize, end: usize) -> impl Iterator<Item = char> + '_ {
        self.value
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
    }
}

impl DataField {
    /// New data field with blank indicators and no subfields.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ind1: ' ',
            ind2: ' ',
            subfields: Vec::new(),
        }
    }

    pub fn with_indicators(mut self, ind1: char, ind2: char) -> Self {
        self.ind1 = ind1;
        self.ind2 = ind2;
        self
    }

    pub fn with_subfield(mut self, code: SubfieldCode, value: impl Into<String>) -> Self {
        self.push_subfield(code, value);
        self
    }

    pub fn push_subfield(&mut self, code: SubfieldCode, value: impl Into<String>) {
        self.subfields.push(Subfield::new(code, value));
    }

    pub fn category(&self) -> FieldCategory {
        FieldCategory::from_tag(&self.tag)
    }

    pub fn has(&self, code: SubfieldCode) -> bool {
        self.subfields.iter().any(|subfield| subfield.code == code)
    }

    pub fn first(&self, code: SubfieldCode) -> Option<&Subfield> {
        self.subfields.iter().find(|subfield| subfield.code == code)
    }

    /// Values of every subfield with the given code, in order.
    pub fn values(&self, code: SubfieldCode) -> Vec<&str> {
        self.subfields
            .iter()
            .filter(|subfield| subfield.code == code)
            .map(|subfield| subfield.value.as_str())
            .collect()
    }
}

impl Subfield {
    pub fn new(code: SubfieldCode, value: impl Into<String>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }
}
