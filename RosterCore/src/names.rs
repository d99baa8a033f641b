//! Display name resolution
//!
//! Pure precedence rules turning a contact's raw fields into a label. A field
//! counts as "empty" when it is absent or the empty string, with one
//! exception: a nickname that is set to `""` still wins in
//! [`resolve_display_name`].

use crate::model::ContactRecord;

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Join first and last name, falling back to the email.
///
/// ```
/// use rostercore::names::build_full_name;
///
/// assert_eq!(build_full_name(Some("Ana"), Some("Lopez"), Some("ana@x.com")), "Ana Lopez");
/// assert_eq!(build_full_name(Some(""), Some("Lopez"), Some("ana@x.com")), "Lopez");
/// assert_eq!(build_full_name(None, None, Some("ana@x.com")), "ana@x.com");
/// assert_eq!(build_full_name(None, None, None), "");
/// ```
#[must_use]
pub fn build_full_name(first_name: Option<&str>, last_name: Option<&str>, email: Option<&str>) -> String {
    match (non_empty(first_name), non_empty(last_name)) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(first), None) => first.to_string(),
        (None, Some(last)) => last.to_string(),
        (None, None) => non_empty(email).unwrap_or_default().to_string(),
    }
}

/// Nickname if one is set (even empty), otherwise the full name.
#[must_use]
pub fn resolve_display_name(record: &ContactRecord) -> String {
    match &record.nickname {
        Some(nickname) => nickname.clone(),
        None => build_full_name(
            record.first_name.as_deref(),
            record.last_name.as_deref(),
            Some(&record.email),
        ),
    }
}

/// Best short label: first non-empty of nickname, first name, last name, email.
#[must_use]
pub fn resolve_first_line_name(record: &ContactRecord) -> String {
    [
        record.nickname.as_deref(),
        record.first_name.as_deref(),
        record.last_name.as_deref(),
        Some(record.email.as_str()),
    ]
    .into_iter()
    .find_map(non_empty)
    .unwrap_or_default()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_laws() {
        assert_eq!(build_full_name(Some("Ana"), Some("Lopez"), Some("ana@x.com")), "Ana Lopez");
        assert_eq!(build_full_name(Some(""), Some("Lopez"), Some("ana@x.com")), "Lopez");
        assert_eq!(build_full_name(Some(""), Some(""), Some("ana@x.com")), "ana@x.com");
        assert_eq!(build_full_name(Some(""), Some(""), Some("")), "");
    }

    #[test]
    fn test_full_name_absent_fields() {
        assert_eq!(build_full_name(Some("Ana"), None, Some("ana@x.com")), "Ana");
        assert_eq!(build_full_name(None, Some("Lopez"), None), "Lopez");
        assert_eq!(build_full_name(None, None, None), "");
    }

    #[test]
    fn test_display_name_prefers_nickname() {
        let record = ContactRecord::new(1u64, "ana@x.com")
            .with_first_name("Ana")
            .with_last_name("Lopez");
        assert_eq!(resolve_display_name(&record), "Ana Lopez");

        let record = record.with_nickname("Annie");
        assert_eq!(resolve_display_name(&record), "Annie");
    }

    #[test]
    fn test_empty_nickname_still_wins() {
        let record = ContactRecord::new(1u64, "ana@x.com")
            .with_first_name("Ana")
            .with_nickname("");
        assert_eq!(resolve_display_name(&record), "");
    }

    #[test]
    fn test_first_line_name_order() {
        let record = ContactRecord::new(1u64, "ana@x.com");
        assert_eq!(resolve_first_line_name(&record), "ana@x.com");

        let record = record.with_last_name("Lopez");
        assert_eq!(resolve_first_line_name(&record), "Lopez");

        let record = record.with_first_name("Ana");
        assert_eq!(resolve_first_line_name(&record), "Ana");

        let record = record.with_nickname("Annie");
        assert_eq!(resolve_first_line_name(&record), "Annie");
    }

    #[test]
    fn test_first_line_name_skips_empty_nickname() {
        let record = ContactRecord::new(1u64, "ana@x.com")
            .with_first_name("Ana")
            .with_nickname("");
        assert_eq!(resolve_first_line_name(&record), "Ana");

        let record = ContactRecord::new(1u64, "");
        assert_eq!(resolve_first_line_name(&record), "");
    }
}
