//! Date inference from the 008 fixed-length data elements.
//!
//! The target system needs a date expression on the title. When the 008 says
//! the material has no single date, or flags its date as uncertain, the linked
//! 245 gets a `$f` placeholder for an archivist to fix after import.

use marc_model::{ControlField, DataField, RuleAction, SubfieldCode};

/// Position read for the date-type signal.
pub const DATE_TYPE_POSITION: usize = 7;
/// Value at [`DATE_TYPE_POSITION`] that marks a single, known date.
pub const SINGLE_DATE: char = '1';
/// Range of the four date certainty flags.
pub const CERTAINTY_RANGE: (usize, usize) = (7, 11);
/// Marker for an unknown digit in the certainty range.
pub const UNKNOWN_MARKER: char = 'u';

pub const UNDATED: &str = "undated";
pub const FIX_CIRCA_DATE: &str = "fix circa date";

/// What the 008 field says about the record's dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateSignals {
    pub undated: bool,
    pub circa: bool,
}

impl DateSignals {
    /// Read the signals; positions past the end of the value carry no signal.
    pub fn from_control(field: &ControlField) -> Self {
        let undated = field
            .char_at(DATE_TYPE_POSITION)
            .is_some_and(|ch| ch != SINGLE_DATE);
        let (start, end) = CERTAINTY_RANGE;
        let circa = field.positions(start, end).any(|ch| ch == UNKNOWN_MARKER);
        Self { undated, circa }
    }

    pub fn is_empty(&self) -> bool {
        !self.undated && !self.circa
    }
}

/// Append the inferred date expressions to a title field.
///
/// A title that already has a date expression (`$f`) or bulk dates (`$g`) is
/// left alone. Both placeholders are decided against the title as it was
/// before this call, so both may be appended together.
pub fn apply_date_signals(title: &mut DataField, signals: DateSignals) -> Vec<RuleAction> {
    if title.has(SubfieldCode::F) || title.has(SubfieldCode::G) {
        return Vec::new();
    }
    let mut actions = Vec::new();
    if signals.undated {
        title.push_subfield(SubfieldCode::F, UNDATED);
        actions.push(RuleAction::Undated);
    }
    if signals.circa {
        title.push_subfield(SubfieldCode::F, FIX_CIRCA_DATE);
        actions.push(RuleAction::CircaDate);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_known_date_has_no_signal() {
        let field = ControlField::new("008", "850101s1921    cau");
        assert!(DateSignals::from_control(&field).is_empty());
    }

    #[test]
    fn unknown_digits_flag_circa_and_undated() {
        let field = ControlField::new("008", "850101quuuu    cau");
        let signals = DateSignals::from_control(&field);
        assert!(signals.undated);
        assert!(signals.circa);
    }

    #[test]
    fn decade_uncertainty_only_flags_circa() {
        let field = ControlField::new("008", "850101q192u    cau");
        assert_eq!(
            DateSignals::from_control(&field),
            DateSignals {
                undated: false,
                circa: true
            }
        );
    }

    #[test]
    fn short_field_carries_no_signal() {
        let field = ControlField::new("008", "8501");
        assert!(DateSignals::from_control(&field).is_empty());
    }

    #[test]
    fn existing_bulk_dates_block_inference() {
        let mut title = DataField::new("245")
            .with_subfield(SubfieldCode::A, "Papers")
            .with_subfield(SubfieldCode::G, "1920-1925");
        let actions = apply_date_signals(
            &mut title,
            DateSignals {
                undated: true,
                circa: true,
            },
        );
        assert!(actions.is_empty());
        assert_eq!(title.subfields.len(), 2);
    }

    #[test]
    fn both_placeholders_can_be_added() {
        let mut title = DataField::new("245").with_subfield(SubfieldCode::A, "Papers");
        let actions = apply_date_signals(
            &mut title,
            DateSignals {
                undated: true,
                circa: true,
            },
        );
        assert_eq!(actions, vec![RuleAction::Undated, RuleAction::CircaDate]);
        assert_eq!(title.values(SubfieldCode::F), vec![UNDATED, FIX_CIRCA_DATE]);
    }
}
