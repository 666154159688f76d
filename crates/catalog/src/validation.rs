use std::ops::RangeInclusive;

use hackerlearn_core::{DomainError, DomainResult};

/// Allowed length (in characters) of a chapter or lesson name.
pub const NAME_LEN: RangeInclusive<usize> = 3..=100;

/// Allowed length (in characters) of a chapter or lesson overview.
pub const OVERVIEW_LEN: RangeInclusive<usize> = 10..=500;

pub(crate) fn require_non_blank(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "is required"));
    }
    Ok(())
}

/// Length is counted in chars after trimming surrounding whitespace.
pub(crate) fn require_len(
    field: &'static str,
    value: &str,
    range: RangeInclusive<usize>,
) -> DomainResult<()> {
    require_non_blank(field, value)?;
    let len = value.trim().chars().count();
    if !range.contains(&len) {
        return Err(DomainError::validation(
            field,
            format!(
                "must be between {} and {} characters (got {len})",
                range.start(),
                range.end()
            ),
        ));
    }
    Ok(())
}

pub(crate) fn strip_blank(items: Vec<String>) -> Vec<String> {
    items.into_iter().filter(|s| !s.trim().is_empty()).collect()
}

/// Strip blanks, then require at least `min` entries.
pub(crate) fn require_entries(
    field: &'static str,
    items: Vec<String>,
    min: usize,
) -> DomainResult<Vec<String>> {
    let items = strip_blank(items);
    if items.len() < min {
        let noun = if min == 1 { "entry" } else { "entries" };
        return Err(DomainError::validation(
            field,
            format!("needs at least {min} non-blank {noun}"),
        ));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(require_len("name", "ééé", NAME_LEN).is_ok());
        assert!(require_len("name", "éé", NAME_LEN).is_err());
    }

    #[test]
    fn surrounding_whitespace_does_not_count() {
        let err = require_len("name", "  ab  ", NAME_LEN).unwrap_err();
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn blank_is_reported_as_required() {
        let err = require_len("overview", "   ", OVERVIEW_LEN).unwrap_err();
        assert_eq!(err.to_string(), "overview: is required");
    }

    #[test]
    fn entries_are_stripped_before_counting() {
        let items = vec!["a".to_string(), " ".to_string(), String::new(), "b".to_string()];
        assert_eq!(require_entries("options", items, 2).unwrap(), vec!["a", "b"]);
        assert!(require_entries("options", vec!["a".into(), "".into()], 2).is_err());
    }
}
