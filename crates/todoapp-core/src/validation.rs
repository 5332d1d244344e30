//! Title and due-date checks applied before an item is created or edited.

use chrono::{DateTime, FixedOffset};

use crate::TodoError;

pub fn is_valid_title(title: Option<&str>) -> bool {
    title.is_some_and(|t| !t.trim().is_empty())
}

pub fn validate_title(title: Option<&str>) -> Result<(), TodoError> {
    if is_valid_title(title) {
        Ok(())
    } else {
        Err(TodoError::InvalidTitle)
    }
}

pub fn sanitize_title(title: Option<&str>) -> String {
    title.map(|t| t.trim().to_string()).unwrap_or_default()
}

/// Every due date is accepted, past dates included.
pub fn is_valid_due_date(_due: Option<DateTime<FixedOffset>>) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn blank_titles_are_invalid() {
        assert!(!is_valid_title(None));
        assert!(!is_valid_title(Some("")));
        assert!(!is_valid_title(Some(" \t\n")));
        assert!(is_valid_title(Some(" x ")));
    }

    #[test]
    fn validate_reports_invalid_title() {
        assert_eq!(validate_title(Some("  ")), Err(TodoError::InvalidTitle));
        assert_eq!(validate_title(Some("ok")), Ok(()));
    }

    #[test]
    fn sanitize_trims_and_handles_none() {
        assert_eq!(sanitize_title(Some("  Buy milk  ")), "Buy milk");
        assert_eq!(sanitize_title(None), "");
    }

    #[test]
    fn any_due_date_is_valid() {
        assert!(is_valid_due_date(None));
        let long_ago = Utc::now().fixed_offset() - chrono::Duration::days(3650);
        assert!(is_valid_due_date(Some(long_ago)));
    }
}
