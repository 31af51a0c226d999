//! Error types for field construction and configuration.
//!
//! Validation failures are not errors in this crate: they are data stored
//! in [`FieldMeta::error`](crate::store::FieldMeta) and rendered by the
//! field. [`SelectFieldError`] only covers misconfiguration.

use thiserror::Error;

/// Errors raised while building a select field from its configuration.
///
/// # Recovery Strategies
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`MissingName`](SelectFieldError::MissingName) | Supply the form slot name |
/// | [`InvalidListSize`](SelectFieldError::InvalidListSize) | Use a visible-item cap of at least 1 |
/// | [`Config`](SelectFieldError::Config) | Fix the configuration text and reload |
///
/// # Note on Clone and PartialEq
///
/// This type implements `Clone` and `PartialEq` to support testing and
/// comparison, so parser failures are stored as their message string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectFieldError {
    /// The field has no `name`, so it cannot bind to a form slot.
    #[error("field name is required")]
    MissingName,

    /// The visible-item cap of the dropdown list is zero.
    #[error("invalid list size: {0} (must be at least 1)")]
    InvalidListSize(usize),

    /// Configuration text could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl SelectFieldError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns true if the error comes from unparseable configuration text.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if the error describes an invalid field definition
    /// rather than a parse failure.
    pub fn is_definition(&self) -> bool {
        matches!(self, Self::MissingName | Self::InvalidListSize(_))
    }
}

impl From<serde_json::Error> for SelectFieldError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::de::Error> for SelectFieldError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for select field operations.
pub type Result<T> = std::result::Result<T, SelectFieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SelectFieldError::MissingName.to_string(),
            "field name is required"
        );
        assert_eq!(
            SelectFieldError::InvalidListSize(0).to_string(),
            "invalid list size: 0 (must be at least 1)"
        );
        assert_eq!(
            SelectFieldError::config("bad").to_string(),
            "config error: bad"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err: SelectFieldError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.is_config());
        assert!(!err.is_definition());
    }
}
