//! Type-safe enumerations for MARC tags and subfield codes.
//!
//! Field tags and subfield codes arrive as raw strings in MARCXML. Rules are
//! keyed on these enums instead so that every category the rule table cares
//! about is matched exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Fixed-length data elements (dates, certainty flags).
pub const TAG_DATE_CONTROL: &str = "008";
/// Main entry, corporate name.
pub const TAG_CORPORATE_NAME: &str = "110";
/// Title statement.
pub const TAG_TITLE: &str = "245";
/// Physical description (extent).
pub const TAG_EXTENT: &str = "300";
/// General note.
pub const TAG_GENERAL_NOTE: &str = "500";
/// Immediate source of acquisition note.
pub const TAG_PROVENANCE: &str = "541";
/// Index term, occupation.
pub const TAG_GENRE_FORM: &str = "656";
/// Added entry, hierarchical place name.
pub const TAG_HIERARCHICAL_PLACE: &str = "752";
/// Added entry, taxonomic identification.
pub const TAG_TAXONOMIC: &str = "754";
/// Location (holds the call number).
pub const TAG_LOCATION: &str = "852";

/// Category of a field, derived from its three-character tag.
///
/// Categories are exclusive: a tag maps to exactly one variant. Rules that
/// apply to a whole family (for instance heading punctuation, which covers
/// every 1XX, 6XX and 7XX field) check [`FieldCategory::is_heading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldCategory {
    /// 008: fixed-position date type and date certainty flags.
    DateControl,
    /// Any other 00X control field.
    Control,
    /// 1XX/6XX/7XX headings without a more specific category.
    NameHeading,
    /// 110: corporate name main entry.
    CorporateName,
    /// 2XX: title family.
    Title,
    /// 300: extent.
    Extent,
    /// 500: general note.
    GeneralNote,
    /// 541: provenance.
    Provenance,
    /// 656: genre/form term that requires a source.
    GenreForm,
    /// 752/754: added entries that require a source of term.
    SubjectSource,
    /// 852: location, holding the call number.
    Location,
    /// Everything else.
    Other,
}

impl FieldCategory {
    /// Classify a raw tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            TAG_DATE_CONTROL => FieldCategory::DateControl,
            TAG_CORPORATE_NAME => FieldCategory::CorporateName,
            TAG_EXTENT => FieldCategory::Extent,
            TAG_GENERAL_NOTE => FieldCategory::GeneralNote,
            TAG_PROVENANCE => FieldCategory::Provenance,
            TAG_GENRE_FORM => FieldCategory::GenreForm,
            TAG_HIERARCHICAL_PLACE | TAG_TAXONOMIC => FieldCategory::SubjectSource,
            TAG_LOCATION => FieldCategory::Location,
            _ if tag.starts_with("00") => FieldCategory::Control,
            _ if tag.starts_with('2') => FieldCategory::Title,
            _ if tag.starts_with('1') || tag.starts_with('6') || tag.starts_with('7') => {
                FieldCategory::NameHeading
            }
            _ => FieldCategory::Other,
        }
    }

    /// Returns true for the access-point families (1XX, 6XX, 7XX).
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            FieldCategory::NameHeading
                | FieldCategory::CorporateName
                | FieldCategory::GenreForm
                | FieldCategory::SubjectSource
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::DateControl => "date control",
            FieldCategory::Control => "control",
            FieldCategory::NameHeading => "name heading",
            FieldCategory::CorporateName => "corporate name",
            FieldCategory::Title => "title",
            FieldCategory::Extent => "extent",
            FieldCategory::GeneralNote => "general note",
            FieldCategory::Provenance => "provenance",
            FieldCategory::GenreForm => "genre/form",
            FieldCategory::SubjectSource => "subject source",
            FieldCategory::Location => "location",
            FieldCategory::Other => "other",
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subfield code.
///
/// Codes the rule table dispatches on get their own variant; anything else is
/// carried through untouched as [`SubfieldCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubfieldCode {
    A,
    B,
    C,
    D,
    F,
    G,
    H,
    J,
    K,
    Q,
    /// `$2`, source of heading or term.
    Source,
    Other(char),
}

impl SubfieldCode {
    pub fn from_char(code: char) -> Self {
        match code {
            'a' => SubfieldCode::A,
            'b' => SubfieldCode::B,
            'c' => SubfieldCode::C,
            'd' => SubfieldCode::D,
            'f' => SubfieldCode::F,
            'g' => SubfieldCode::G,
            'h' => SubfieldCode::H,
            'j' => SubfieldCode::J,
            'k' => SubfieldCode::K,
            'q' => SubfieldCode::Q,
            '2' => SubfieldCode::Source,
            other => SubfieldCode::Other(other),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            SubfieldCode::A => 'a',
            SubfieldCode::B => 'b',
            SubfieldCode::C => 'c',
            SubfieldCode::D => 'd',
            SubfieldCode::F => 'f',
            SubfieldCode::G => 'g',
            SubfieldCode::H => 'h',
            SubfieldCode::J => 'j',
            SubfieldCode::K => 'k',
            SubfieldCode::Q => 'q',
            SubfieldCode::Source => '2',
            SubfieldCode::Other(code) => *code,
        }
    }
}

impl From<char> for SubfieldCode {
    fn from(code: char) -> Self {
        SubfieldCode::from_char(code)
    }
}

impl fmt::Display for SubfieldCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for SubfieldCode {
    type Err = ModelError;

    /// Parse a `code` attribute; exactly one character is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Ok(SubfieldCode::from_char(code)),
            _ => Err(ModelError::InvalidSubfieldCode {
                code: s.to_string(),
            }),
        }
    }
}

/// Validate a raw tag attribute.
pub fn parse_tag(raw: &str) -> Result<String, ModelError> {
    let tag = raw.trim();
    if tag.len() == 3 && tag.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        Ok(tag.to_string())
    } else {
        Err(ModelError::InvalidTag {
            tag: raw.to_string(),
        })
    }
}

/// Parse an indicator attribute; a missing or empty indicator is blank.
pub fn parse_indicator(raw: Option<&str>) -> Result<char, ModelError> {
    let Some(raw) = raw else {
        return Ok(' ');
    };
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(' '),
        (Some(ind), None) => Ok(ind),
        _ => Err(ModelError::InvalidIndicator {
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_specific_tags_before_families() {
        assert_eq!(FieldCategory::from_tag("008"), FieldCategory::DateControl);
        assert_eq!(FieldCategory::from_tag("001"), FieldCategory::Control);
        assert_eq!(FieldCategory::from_tag("110"), FieldCategory::CorporateName);
        assert_eq!(FieldCategory::from_tag("100"), FieldCategory::NameHeading);
        assert_eq!(FieldCategory::from_tag("650"), FieldCategory::NameHeading);
        assert_eq!(FieldCategory::from_tag("656"), FieldCategory::GenreForm);
        assert_eq!(FieldCategory::from_tag("752"), FieldCategory::SubjectSource);
        assert_eq!(FieldCategory::from_tag("754"), FieldCategory::SubjectSource);
        assert_eq!(FieldCategory::from_tag("245"), FieldCategory::Title);
        assert_eq!(FieldCategory::from_tag("300"), FieldCategory::Extent);
        assert_eq!(FieldCategory::from_tag("852"), FieldCategory::Location);
        assert_eq!(FieldCategory::from_tag("520"), FieldCategory::Other);
    }

    #[test]
    fn heading_family_covers_sourced_fields() {
        assert!(FieldCategory::GenreForm.is_heading());
        assert!(FieldCategory::SubjectSource.is_heading());
        assert!(!FieldCategory::Title.is_heading());
    }

    #[test]
    fn subfield_codes_round_trip_through_char() {
        for code in ['a', 'k', '2', 'z', '6'] {
            assert_eq!(SubfieldCode::from_char(code).as_char(), code);
        }
        assert_eq!(SubfieldCode::from_char('2'), SubfieldCode::Source);
    }

    #[test]
    fn subfield_code_rejects_multi_char() {
        assert!("ab".parse::<SubfieldCode>().is_err());
        assert!("".parse::<SubfieldCode>().is_err());
        assert_eq!("q".parse::<SubfieldCode>().unwrap(), SubfieldCode::Q);
    }

    #[test]
    fn indicators_default_to_blank() {
        assert_eq!(parse_indicator(None).unwrap(), ' ');
        assert_eq!(parse_indicator(Some("")).unwrap(), ' ');
        assert_eq!(parse_indicator(Some("1")).unwrap(), '1');
        assert!(parse_indicator(Some("10")).is_err());
    }

    #[test]
    fn tags_must_be_three_alphanumerics() {
        assert_eq!(parse_tag("245").unwrap(), "245");
        assert!(parse_tag("24").is_err());
        assert!(parse_tag("2 5").is_err());
    }
}
