#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Creatable Select
//!
//! A searchable select form field that also accepts free text.
//!
//! The field pairs a text input with a dropdown of candidate options:
//! - typing stores the text as the field value and filters nothing itself;
//!   the caller supplies the options it wants offered
//! - picking a row stores the option as the field value
//! - value, touched flag and validation error live in a shared
//!   [`FormStore`] (or any [`ValueBinder`])
//! - validation messages are translation keys shown through a
//!   [`Translator`] once the field has been touched
//!
//! The crate produces a [`FieldView`] view model; drawing it is left to
//! the host.
//!
//! ## Example
//!
//! ```rust
//! use creatable_select::{
//!     Catalog, CreatableSelectField, FieldValue, FormStore, Key, SelectFieldConfig,
//! };
//! use serde::Serialize;
//!
//! #[derive(Debug, Clone, Serialize)]
//! struct City {
//!     name: String,
//!     country: String,
//! }
//!
//! let store = FormStore::new();
//! let mut field = CreatableSelectField::bind(
//!     &store,
//!     SelectFieldConfig::new("city").label("fields.city").min_search_length(3),
//!     |city: &City| city.name.clone(),
//!     |city: &City, _value: &FieldValue<City>, _active| format!("{}, {}", city.name, city.country),
//! )
//! .unwrap()
//! .validate(|value: &FieldValue<City>| match value {
//!     FieldValue::Text { name } if name.trim().is_empty() => Some("errors.required".into()),
//!     _ => None,
//! })
//! .options(Some(vec![City { name: "Oslo".into(), country: "NO".into() }]));
//!
//! let catalog = Catalog::new()
//!     .with("fields.city", "City")
//!     .with("errors.required", "Please enter a city");
//!
//! field.focus();
//! for c in "Osl".chars() {
//!     field.handle_key(Key::Char(c));
//! }
//! assert!(field.is_open());
//! field.handle_key(Key::Enter);
//! assert!(store.value("city").is_selected());
//!
//! let view = field.view(&catalog);
//! assert_eq!(view.label, "City");
//! assert_eq!(view.input.value, "Oslo");
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod i18n;
pub mod key;
pub mod list;
pub mod memo;
pub mod option;
pub mod store;
pub mod view;

pub use config::SelectFieldConfig;
pub use error::{Result, SelectFieldError};
pub use field::{
    ChangeHandler, CreatableSelectField, DropdownState, InteractionState, ItemRenderer,
    ValueRenderer, FOCUS_OPEN_MIN_CHARS,
};
pub use i18n::{Catalog, IdentityTranslator, Translator};
pub use key::{Binding, Key, SelectKeyMap};
pub use list::ListViewport;
pub use memo::Memo;
pub use option::{
    effective_list_size, project, scalar_key, KeyFn, OptionProjector, ProjectedOption,
    COUNT_OF_LIST_ITEMS,
};
pub use store::{FieldBinder, FieldMeta, FieldValue, FormStore, ValueBinder, Validator};
pub use view::FieldView;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Catalog, CreatableSelectField, FieldValue, FormStore, Key, SelectFieldConfig, Translator,
    };
}
