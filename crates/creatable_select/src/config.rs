//! Serializable field properties.
//!
//! Everything about a select field that is plain data lives here and can
//! be loaded from JSON or TOML. Callbacks (item and value renderers,
//! change notification, validation) are attached to the field itself.
//!
//! ```toml
//! name = "city"
//! label = "fields.city"
//! min_search_length = 3
//! placeholder = "Start typing"
//! max_visible_items = 5
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectFieldError};
use crate::option::COUNT_OF_LIST_ITEMS;

/// Plain-data properties of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectFieldConfig {
    /// Slot name in the form store. Required.
    pub name: String,
    /// Label text or translation key.
    pub label: String,
    /// Minimum typed length before the dropdown toggle is enabled.
    pub min_search_length: usize,
    /// Placeholder of the text input.
    pub placeholder: String,
    /// Extra class name for the text input.
    pub input_class_name: Option<String>,
    /// Test hook attached to the error text.
    pub error_data_qa_locator: Option<String>,
    /// Cap on the number of list rows shown at once.
    pub max_visible_items: usize,
}

impl Default for SelectFieldConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            label: String::new(),
            min_search_length: 0,
            placeholder: String::new(),
            input_class_name: None,
            error_data_qa_locator: None,
            max_visible_items: COUNT_OF_LIST_ITEMS,
        }
    }
}

impl SelectFieldConfig {
    /// Creates a config bound to the slot `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the minimum search length.
    #[must_use]
    pub fn min_search_length(mut self, len: usize) -> Self {
        self.min_search_length = len;
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the input class name.
    #[must_use]
    pub fn input_class_name(mut self, class: impl Into<String>) -> Self {
        self.input_class_name = Some(class.into());
        self
    }

    /// Sets the error test hook.
    #[must_use]
    pub fn error_data_qa_locator(mut self, locator: impl Into<String>) -> Self {
        self.error_data_qa_locator = Some(locator.into());
        self
    }

    /// Sets the visible row cap.
    #[must_use]
    pub fn max_visible_items(mut self, count: usize) -> Self {
        self.max_visible_items = count;
        self
    }

    /// Parses and validates a JSON config.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML config.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the required properties.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SelectFieldError::MissingName);
        }
        if self.max_visible_items == 0 {
            return Err(SelectFieldError::InvalidListSize(0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SelectFieldConfig::new("city");
        assert_eq!(config.placeholder, "");
        assert_eq!(config.max_visible_items, COUNT_OF_LIST_ITEMS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = SelectFieldConfig::from_toml(
            r#"
            name = "city"
            label = "fields.city"
            min_search_length = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.name, "city");
        assert_eq!(config.min_search_length, 3);
        assert_eq!(config.max_visible_items, COUNT_OF_LIST_ITEMS);
    }

    #[test]
    fn test_from_json_requires_name() {
        let err = SelectFieldConfig::from_json(r#"{"label": "City"}"#).unwrap_err();
        assert_eq!(err, SelectFieldError::MissingName);

        let err = SelectFieldConfig::from_json(r#"{"name": "c", "max_visible_items": 0}"#)
            .unwrap_err();
        assert_eq!(err, SelectFieldError::InvalidListSize(0));

        let err = SelectFieldConfig::from_json("{").unwrap_err();
        assert!(err.is_config());
    }
}
