//! Unit tests for the select field error type.
//!
//! Tests verify:
//! - Variant creation and Display formatting
//! - Clone and `PartialEq` derives
//! - Conversions from parser errors
//! - Errors surfaced by field construction

use creatable_select::{
    CreatableSelectField, FieldValue, FormStore, Result, SelectFieldConfig, SelectFieldError,
};
use std::error::Error as StdError;

mod display_tests {
    use super::*;

    #[test]
    fn test_missing_name_display() {
        assert_eq!(
            format!("{}", SelectFieldError::MissingName),
            "field name is required"
        );
    }

    #[test]
    fn test_invalid_list_size_display() {
        let e = SelectFieldError::InvalidListSize(0);
        assert_eq!(e.to_string(), "invalid list size: 0 (must be at least 1)");
    }

    #[test]
    fn test_config_display() {
        let e = SelectFieldError::config("expected `=`");
        assert_eq!(e.to_string(), "config error: expected `=`");
    }
}

mod trait_tests {
    use super::*;

    #[test]
    fn test_is_std_error() {
        let e: Box<dyn StdError> = Box::new(SelectFieldError::MissingName);
        assert!(e.source().is_none());
    }

    #[test]
    fn test_clone_and_eq() {
        let e = SelectFieldError::config("bad");
        assert_eq!(e.clone(), e);
        assert_ne!(e, SelectFieldError::MissingName);
    }

    #[test]
    fn test_predicates() {
        assert!(SelectFieldError::MissingName.is_definition());
        assert!(SelectFieldError::InvalidListSize(0).is_definition());
        assert!(SelectFieldError::config("x").is_config());
        assert!(!SelectFieldError::config("x").is_definition());
    }
}

mod conversion_tests {
    use super::*;

    fn parse_toml(text: &str) -> Result<SelectFieldConfig> {
        SelectFieldConfig::from_toml(text)
    }

    #[test]
    fn test_toml_error_converts() {
        let err = parse_toml("name = ").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_json_error_converts() {
        let err = SelectFieldConfig::from_json(r#"{"name": 3}"#).unwrap_err();
        assert!(err.is_config());
    }
}

mod construction_tests {
    use super::*;

    #[test]
    fn test_bind_rejects_empty_name() {
        let store: FormStore<String> = FormStore::new();
        let result = CreatableSelectField::bind(
            &store,
            SelectFieldConfig::new("  "),
            |s: &String| s.clone(),
            |s: &String, _: &FieldValue<String>, _| s.clone(),
        );
        assert_eq!(result.unwrap_err(), SelectFieldError::MissingName);
        assert!(!store.contains("  "));
    }

    #[test]
    fn test_bind_rejects_zero_visible_items() {
        let store: FormStore<String> = FormStore::new();
        let result = CreatableSelectField::bind(
            &store,
            SelectFieldConfig::new("city").max_visible_items(0),
            |s: &String| s.clone(),
            |s: &String, _: &FieldValue<String>, _| s.clone(),
        );
        assert_eq!(result.unwrap_err(), SelectFieldError::InvalidListSize(0));
    }
}
