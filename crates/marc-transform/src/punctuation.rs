//! String helpers for the punctuation rules.
//!
//! Every helper returns the value unchanged when its pattern does not match.

/// The last `count` characters of `value` (all of it when shorter).
pub fn tail(value: &str, count: usize) -> &str {
    let start = value
        .char_indices()
        .rev()
        .nth(count.saturating_sub(1))
        .map_or(0, |(idx, _)| idx);
    if count == 0 { "" } else { &value[start..] }
}

/// Returns true when the value ends in something that looks like an initial
/// or a short abbreviation ("Smith, J.", "Jones, Mary Q.").
///
/// The heuristic: a space in the last four characters, unless those
/// characters contain "de" (a particle such as "Cruz, Juan de.").
pub fn ends_with_initial(value: &str) -> bool {
    let last = tail(value, 4);
    last.contains(' ') && !last.contains("de")
}

/// Remove one trailing period unless it terminates an initial.
pub fn strip_heading_period(value: &str) -> &str {
    match value.strip_suffix('.') {
        Some(stripped) if !ends_with_initial(value) => stripped,
        _ => value,
    }
}

/// Remove every trailing period.
pub fn strip_periods(value: &str) -> &str {
    value.trim_end_matches('.')
}

/// Remove wrapping parentheses: "(1850-1920)" becomes "1850-1920".
pub fn strip_parentheses(value: &str) -> &str {
    value.trim_start_matches('(').trim_end_matches(')')
}

/// Remove a trailing colon and the whitespace before it, then a leading
/// colon and the whitespace after it.
pub fn strip_colons(value: &str) -> &str {
    let mut out = value;
    if out.ends_with(':') {
        out = out.trim_end_matches(':').trim_end();
    }
    if out.starts_with(':') {
        out = out.trim_start_matches(':').trim_start();
    }
    out
}

/// Remove a trailing semicolon and the whitespace before it.
pub fn strip_semicolon(value: &str) -> &str {
    if value.ends_with(';') {
        value.trim_end_matches(';').trim_end()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_is_char_aware() {
        assert_eq!(tail("abcdef", 4), "cdef");
        assert_eq!(tail("ab", 4), "ab");
        assert_eq!(tail("Québec.", 4), "bec.");
        assert_eq!(tail("abc", 0), "");
    }

    #[test]
    fn heading_period_keeps_initials() {
        assert_eq!(strip_heading_period("Smith, John."), "Smith, John");
        assert_eq!(strip_heading_period("Smith, J."), "Smith, J.");
        assert_eq!(strip_heading_period("Jones, Mary Q."), "Jones, Mary Q.");
        assert_eq!(strip_heading_period("Cruz, Juan de."), "Cruz, Juan de");
        assert_eq!(strip_heading_period("Smith, John.."), "Smith, John.");
        assert_eq!(strip_heading_period("No period"), "No period");
    }

    #[test]
    fn colons_are_stripped_from_both_ends() {
        assert_eq!(strip_colons("Letters :"), "Letters");
        assert_eq!(strip_colons(": a subtitle"), "a subtitle");
        assert_eq!(strip_colons("Ratio 1:2"), "Ratio 1:2");
    }

    #[test]
    fn semicolons_and_parentheses() {
        assert_eq!(strip_semicolon("Gift of Jane Doe ;"), "Gift of Jane Doe");
        assert_eq!(strip_semicolon("no change"), "no change");
        assert_eq!(strip_parentheses("(1850-1920)"), "1850-1920");
        assert_eq!(strip_periods("1920-1930."), "1920-1930");
    }
}
