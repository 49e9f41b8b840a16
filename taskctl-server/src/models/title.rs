//! Task title validation

use super::{reject_nul, ValidationError};

/// Maximum length for task titles (matches the `VARCHAR(255)` column)
pub const MAX_TITLE_LEN: usize = 255;

/// Validated task title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Create a new task title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 255 characters
    /// - No NUL characters
    ///
    /// # Example
    /// ```
    /// use taskctl_server::models::TaskTitle;
    ///
    /// assert!(TaskTitle::new("Buy milk").is_ok());
    /// assert!(TaskTitle::new("").is_err());
    /// assert!(TaskTitle::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        // Counted in characters, same as Postgres char_length
        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        reject_nul("title", trimmed)?;

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_titles() {
        assert!(TaskTitle::new("Buy milk").is_ok());
        assert!(TaskTitle::new("a").is_ok());
        assert!(TaskTitle::new("  Trimmed  ").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            TaskTitle::new("").unwrap_err(),
            ValidationError::Empty { .. }
        ));
    }

    #[test]
    fn rejects_whitespace_only() {
        assert!(matches!(
            TaskTitle::new(" \t ").unwrap_err(),
            ValidationError::Empty { .. }
        ));
    }

    #[test]
    fn max_length() {
        let title_255 = "a".repeat(255);
        assert!(TaskTitle::new(&title_255).is_ok());

        let title_256 = "a".repeat(256);
        let err = TaskTitle::new(&title_256).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 255, .. }));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 255 two-byte characters is 510 bytes but still fits the column
        let title = "é".repeat(255);
        assert!(TaskTitle::new(&title).is_ok());
    }

    #[test]
    fn rejects_nul() {
        assert!(matches!(
            TaskTitle::new("Buy\0milk").unwrap_err(),
            ValidationError::InvalidFormat { field: "title", .. }
        ));
    }

    #[test]
    fn trims_whitespace() {
        let title = TaskTitle::new("  hello  ").unwrap();
        assert_eq!(title.as_str(), "hello");
    }
}
