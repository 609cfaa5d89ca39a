//! Text normalization applied before any rule runs.

use marc_model::{Field, Record};

/// Strip trailing commas and collapse runs of spaces to a single space.
///
/// Idempotent: the result never ends in a comma and never contains two
/// consecutive spaces, so a second pass leaves it unchanged.
///
/// # Examples
///
/// ```
/// use marc_transform::normalize_text;
///
/// assert_eq!(normalize_text("Smith,  John,,"), "Smith, John");
/// assert_eq!(normalize_text("already clean"), "already clean");
/// ```
pub fn normalize_text(value: &str) -> String {
    let trimmed = value.trim_end_matches(',');
    let mut out = String::with_capacity(trimmed.len());
    let mut previous_space = false;
    for ch in trimmed.chars() {
        let is_space = ch == ' ';
        if is_space && previous_space {
            continue;
        }
        previous_space = is_space;
        out.push(ch);
    }
    out
}

/// Normalize every subfield value in the record.
///
/// Control fields and the leader are fixed-position strings and are left
/// untouched; collapsing their spaces would shift every later position.
pub fn normalize_record(record: &mut Record) {
    for field in &mut record.fields {
        if let Field::Data(data) = field {
            for subfield in &mut data.subfields {
                if subfield.value.is_empty() {
                    continue;
                }
                let normalized = normalize_text(&subfield.value);
                if normalized != subfield.value {
                    subfield.value = normalized;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marc_model::{ControlField, DataField, SubfieldCode};

    #[test]
    fn strips_every_trailing_comma() {
        assert_eq!(normalize_text("Letters,,,"), "Letters");
        assert_eq!(normalize_text("a, b"), "a, b");
    }

    #[test]
    fn collapses_long_space_runs() {
        assert_eq!(normalize_text("2    boxes"), "2 boxes");
        assert_eq!(normalize_text("  lead"), " lead");
    }

    #[test]
    fn empty_is_untouched() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn record_normalization_skips_control_fields() {
        let mut record = Record::new()
            .with_field(ControlField::new("008", "850101s1921    cau,"))
            .with_field(DataField::new("245").with_subfield(SubfieldCode::A, "Papers  of,"));

        normalize_record(&mut record);

        let control = record.fields[0].as_control().expect("control field");
        assert_eq!(control.value, "850101s1921    cau,");
        assert_eq!(record.subfield_value("245", SubfieldCode::A), Some("Papers of"));
    }
}
