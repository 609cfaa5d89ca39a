//! Extent (300) cleanup and splitting.
//!
//! The target system accepts one quantity per extent field, so a 300 field
//! carrying repeated `$a`/`$f` subfields or a parenthetical quantity is split
//! into several 300 fields. Splitting is computed on a snapshot of the field
//! and applied afterwards; the new fields are returned to the caller, which
//! appends them to the end of the record.

use marc_model::{DataField, RuleAction, Subfield, SubfieldCode, TAG_EXTENT};

use crate::punctuation::{strip_parentheses, strip_semicolon, tail};

/// Value of the synthesized extent when a record has none.
pub const PLACEHOLDER_EXTENT: &str = "placeholder";

/// Build the placeholder extent field.
pub fn placeholder_extent() -> DataField {
    DataField::new(TAG_EXTENT).with_subfield(SubfieldCode::A, PLACEHOLDER_EXTENT)
}

/// Clean a single extent value.
///
/// Removes brackets, spells out `v.`/`p.`, drops a trailing period unless the
/// value ends in a short abbreviation ("1 ft."), and drops a trailing semicolon.
pub fn clean_extent_value(value: &str) -> String {
    let mut out = value
        .replace(['[', ']'], "")
        .replace("v.", "volumes")
        .replace("p.", "pages");
    if out.ends_with('.') && !tail(&out, 4).contains(' ') {
        out = out.trim_end_matches('.').to_string();
    }
    strip_semicolon(&out).to_string()
}

/// Lift the first parenthesized group out of a value.
///
/// Returns the value with the group removed (surrounding whitespace
/// collapsed) and the group's contents. Nested groups travel with their
/// parent. An opening parenthesis without a matching close is literal text
/// and yields `None`.
///
/// # Examples
///
/// ```
/// use marc_transform::extent::split_parenthetical;
///
/// assert_eq!(
///     split_parenthetical("2 boxes (3 folders)"),
///     Some(("2 boxes".to_string(), "3 folders".to_string()))
/// );
/// assert_eq!(
///     split_parenthetical("2 boxes (3 folders) (4 items)"),
///     Some(("2 boxes (4 items)".to_string(), "3 folders".to_string()))
/// );
/// assert_eq!(split_parenthetical("2 boxes (3 folders"), None);
/// ```
pub fn split_parenthetical(value: &str) -> Option<(String, String)> {
    let open = value.find('(')?;
    let mut depth = 0usize;
    let close = value[open..].char_indices().find_map(|(offset, ch)| {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        (depth == 0).then_some(open + offset)
    })?;
    let moved = value[open + 1..close].trim().to_string();
    let before = value[..open].trim_end();
    let after = value[close + 1..].trim();
    let kept = match (before.is_empty(), after.is_empty()) {
        (_, true) => before.to_string(),
        (true, false) => after.to_string(),
        (false, false) => format!("{before} {after}"),
    };
    Some((kept, moved))
}

/// Clean and split one extent field in place.
///
/// Returns the new extent fields (in the order they should be appended) and
/// the actions taken.
pub fn split_extent(field: &mut DataField) -> (Vec<DataField>, Vec<RuleAction>) {
    for subfield in &mut field.subfields {
        subfield.value = clean_extent_value(&subfield.value);
    }

    let mut appended = Vec::new();
    let mut actions = Vec::new();

    // Repeated $a/$f: the k-th extra $a and k-th extra $f share a new field.
    let extra_a = repeated_positions(&field.subfields, SubfieldCode::A);
    let extra_f = repeated_positions(&field.subfields, SubfieldCode::F);
    let pairs = extra_a.len().max(extra_f.len());
    for pair in 0..pairs {
        let mut split = DataField::new(TAG_EXTENT)
            .with_indicators(field.ind1, field.ind2);
        for position in [extra_a.get(pair), extra_f.get(pair)].into_iter().flatten() {
            let original = &field.subfields[*position];
            let value = strip_parentheses(&original.value).to_string();
            actions.push(RuleAction::ExtentSplit {
                value: value.clone(),
            });
            split.subfields.push(Subfield::new(original.code, value));
        }
        appended.push(split);
    }
    if pairs > 0 {
        let moved: Vec<usize> = extra_a.iter().chain(extra_f.iter()).copied().collect();
        let mut position = 0;
        field.subfields.retain(|_| {
            let keep = !moved.contains(&position);
            position += 1;
            keep
        });
    }

    for subfield in &mut field.subfields {
        while let Some((kept, moved)) = split_parenthetical(&subfield.value) {
            subfield.value = kept;
            if moved.is_empty() {
                continue;
            }
            actions.push(RuleAction::ParentheticalExtent {
                value: moved.clone(),
            });
            appended.push(
                DataField::new(TAG_EXTENT)
                    .with_indicators(field.ind1, field.ind2)
                    .with_subfield(SubfieldCode::A, moved),
            );
        }
    }

    (appended, actions)
}

/// Positions of every occurrence of `code` after the first one.
fn repeated_positions(subfields: &[Subfield], code: SubfieldCode) -> Vec<usize> {
    subfields
        .iter()
        .enumerate()
        .filter(|(_, subfield)| subfield.code == code)
        .skip(1)
        .map(|(position, _)| position)
        .collect()
}
