//! Journal logic: everything that turns stored restaurants, dishes and reviews
//! into the views a user sees, and the write workflows that feed them.

pub mod dishes;
pub mod export;
pub mod history;
pub mod ocr_import;
pub mod quick_review;
pub mod restaurants;
pub mod rollup;

use crate::errors::AppError;

/// Empty or whitespace-only text is stored as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A rating of 0 means "not rated". Anything else must be 1 to 5 stars.
pub fn normalize_rating(rating: Option<i16>) -> Result<Option<i16>, AppError> {
    match rating {
        None | Some(0) => Ok(None),
        Some(r @ 1..=5) => Ok(Some(r)),
        Some(r) => Err(AppError::Validation(format!(
            "Rating must be between 1 and 5, got {r}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rating_means_unrated() {
        assert_eq!(normalize_rating(Some(0)).unwrap(), None);
        assert_eq!(normalize_rating(Some(5)).unwrap(), Some(5));
        assert!(normalize_rating(Some(6)).is_err());
        assert!(normalize_rating(Some(-1)).is_err());
    }

    #[test]
    fn blank_text_is_dropped() {
        assert_eq!(non_empty(Some("   ".into())), None);
        assert_eq!(non_empty(Some("crispy".into())), Some("crispy".into()));
    }
}
