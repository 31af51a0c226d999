//! Form-level field state and the binder the select field talks through.
//!
//! A [`FormStore`] is a cloneable handle to state shared by every field of
//! a form. Each field owns one named slot holding its [`FieldValue`] and
//! [`FieldMeta`]. The select field never touches the store directly: it
//! goes through a [`ValueBinder`], which [`FieldBinder`] implements for a
//! single slot.
//!
//! Validators registered per slot run when the value changes and when the
//! slot is marked touched, and write their result into
//! [`FieldMeta::error`].

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

/// The bound value of a select field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<T> {
    /// Free text typed by the user.
    Text {
        /// The typed text.
        name: String,
    },
    /// An option picked from the list.
    Selected(T),
}

impl<T> Default for FieldValue<T> {
    fn default() -> Self {
        Self::Text {
            name: String::new(),
        }
    }
}

impl<T> FieldValue<T> {
    /// Creates a free-text value.
    pub fn text(name: impl Into<String>) -> Self {
        Self::Text { name: name.into() }
    }

    /// Returns true if the value is a picked option.
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }

    /// Returns the picked option, if any.
    pub fn selected(&self) -> Option<&T> {
        match self {
            Self::Selected(option) => Some(option),
            Self::Text { .. } => None,
        }
    }

    /// The display name of the value: the typed text, or the rendered
    /// form of the picked option.
    pub fn name_with<'a>(&'a self, render: &dyn Fn(&T) -> String) -> Cow<'a, str> {
        match self {
            Self::Text { name } => Cow::Borrowed(name.as_str()),
            Self::Selected(option) => Cow::Owned(render(option)),
        }
    }
}

/// Validation state of a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Validation message or translation key.
    pub error: Option<String>,
    /// Whether the user has interacted with the field.
    pub touched: bool,
}

impl FieldMeta {
    /// True when an error should be shown: touched and a non-empty error.
    pub fn is_validation_error(&self) -> bool {
        self.touched && self.error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Access to one field's slot in an external form store.
///
/// Implementations must read through to the store on every call; values
/// can change between events (for example on a form reset).
pub trait ValueBinder<T> {
    /// Current bound value.
    fn get_value(&self) -> FieldValue<T>;
    /// Replaces the bound value.
    fn set_value(&self, value: FieldValue<T>);
    /// Sets the touched flag.
    fn set_touched(&self, touched: bool);
    /// Current validation state.
    fn get_meta(&self) -> FieldMeta;
}

/// Slot validator: returns an error message or translation key.
pub type Validator<T> = Arc<dyn Fn(&FieldValue<T>) -> Option<String> + Send + Sync>;

struct Slot<T> {
    value: FieldValue<T>,
    meta: FieldMeta,
    validator: Option<Validator<T>>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: FieldValue::default(),
            meta: FieldMeta::default(),
            validator: None,
        }
    }
}

/// Shared, form-level field state.
pub struct FormStore<T> {
    slots: Arc<RwLock<HashMap<String, Slot<T>>>>,
}

impl<T> Clone for FormStore<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<T> Default for FormStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FormStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<&String> = slots.keys().collect();
        names.sort();
        f.debug_struct("FormStore").field("slots", &names).finish()
    }
}

impl<T> FormStore<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a slot, optionally with a validator. An existing slot
    /// keeps its value and meta but takes the new validator.
    pub fn register(&self, name: &str, validator: Option<Validator<T>>) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.entry(name.to_string()).or_default().validator = validator;
        debug!(field.name = name, "field registered");
    }

    /// Returns true if a slot exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Returns a binder for the slot named `name`.
    pub fn binder(&self, name: impl Into<String>) -> FieldBinder<T> {
        FieldBinder {
            store: self.clone(),
            name: name.into(),
        }
    }

    /// Sets a slot's error directly.
    pub fn set_error(&self, name: &str, error: Option<String>) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.entry(name.to_string()).or_default().meta.error = error;
    }

    /// Current validation state of a slot; default for unknown slots.
    pub fn meta(&self, name: &str) -> FieldMeta {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|slot| slot.meta.clone())
            .unwrap_or_default()
    }

    /// Resets every slot to empty text with cleared meta. Validators stay
    /// registered.
    pub fn reset(&self) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        for slot in slots.values_mut() {
            slot.value = FieldValue::default();
            slot.meta = FieldMeta::default();
        }
        debug!(form.fields = slots.len(), "form reset");
    }
}

impl<T: Clone> FormStore<T> {
    /// Current value of a slot; empty text for unknown slots.
    pub fn value(&self, name: &str) -> FieldValue<T> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|slot| slot.value.clone())
            .unwrap_or_default()
    }

    /// Replaces a slot's value and runs its validator.
    pub fn set_value(&self, name: &str, value: FieldValue<T>) {
        {
            let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
            slots.entry(name.to_string()).or_default().value = value;
        }
        self.revalidate(name);
        trace!(field.name = name, field.error = ?self.meta(name).error, "value set");
    }

    /// Sets a slot's touched flag. Marking a slot touched runs its
    /// validator.
    pub fn set_touched(&self, name: &str, touched: bool) {
        {
            let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
            slots.entry(name.to_string()).or_default().meta.touched = touched;
        }
        if touched {
            self.revalidate(name);
        }
        trace!(field.name = name, field.touched = touched, "touched set");
    }

    /// Runs the slot's validator without holding the lock, so validators
    /// may read other slots of the same store.
    fn revalidate(&self, name: &str) {
        let pending = {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            slots.get(name).and_then(|slot| {
                slot.validator
                    .as_ref()
                    .map(|validator| (Arc::clone(validator), slot.value.clone()))
            })
        };
        let Some((validator, value)) = pending else {
            return;
        };
        let error = validator(&value);

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = slots.get_mut(name) {
            slot.meta.error = error;
        }
    }
}

/// A [`ValueBinder`] over one slot of a [`FormStore`].
pub struct FieldBinder<T> {
    store: FormStore<T>,
    name: String,
}

impl<T> fmt::Debug for FieldBinder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinder")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T> FieldBinder<T> {
    /// The slot name this binder writes to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The store behind this binder.
    pub fn store(&self) -> &FormStore<T> {
        &self.store
    }
}

impl<T: Clone> ValueBinder<T> for FieldBinder<T> {
    fn get_value(&self) -> FieldValue<T> {
        self.store.value(&self.name)
    }

    fn set_value(&self, value: FieldValue<T>) {
        self.store.set_value(&self.name, value);
    }

    fn set_touched(&self, touched: bool) {
        self.store.set_touched(&self.name, touched);
    }

    fn get_meta(&self) -> FieldMeta {
        self.store.meta(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> Validator<String> {
        Arc::new(|value: &FieldValue<String>| match value {
            FieldValue::Text { name } if name.trim().is_empty() => Some("required".to_string()),
            _ => None,
        })
    }

    #[test]
    fn test_unknown_slot_defaults() {
        let store: FormStore<String> = FormStore::new();
        assert_eq!(store.value("city"), FieldValue::default());
        assert_eq!(store.meta("city"), FieldMeta::default());
        assert!(!store.contains("city"));
    }

    #[test]
    fn test_validator_runs_on_change_and_touch() {
        let store = FormStore::new();
        store.register("city", Some(required()));

        store.set_touched("city", true);
        assert_eq!(store.meta("city").error.as_deref(), Some("required"));

        store.set_value("city", FieldValue::text("Oslo"));
        assert_eq!(store.meta("city").error, None);
    }

    #[test]
    fn test_validator_reads_other_slots() {
        let store: FormStore<String> = FormStore::new();
        let peek = store.clone();
        let needs_country: Validator<String> = Arc::new(move |value: &FieldValue<String>| {
            let country = peek.value("country");
            (value.is_selected() && country == FieldValue::default())
                .then(|| "country.required".to_string())
        });
        store.register("city", Some(needs_country));

        store.set_value("city", FieldValue::Selected("Oslo".to_string()));
        assert_eq!(store.meta("city").error.as_deref(), Some("country.required"));

        store.set_value("country", FieldValue::text("Norway"));
        store.set_touched("city", true);
        assert_eq!(store.meta("city").error, None);
        assert!(store.meta("city").touched);
    }

    #[test]
    fn test_binders_share_state() {
        let store: FormStore<String> = FormStore::new();
        let a = store.binder("city");
        let b = store.clone().binder("city");

        a.set_value(FieldValue::Selected("Rome".to_string()));
        assert_eq!(b.get_value().selected().map(String::as_str), Some("Rome"));
    }

    #[test]
    fn test_reset_clears_values_and_meta() {
        let store = FormStore::new();
        store.register("city", Some(required()));
        store.set_value("city", FieldValue::text("Oslo"));
        store.set_touched("city", true);

        store.reset();
        assert_eq!(store.value("city"), FieldValue::default());
        assert!(!store.meta("city").touched);

        // validator survives the reset
        store.set_touched("city", true);
        assert!(store.meta("city").is_validation_error());
    }

    #[test]
    fn test_meta_validation_error_needs_both() {
        let mut meta = FieldMeta::default();
        assert!(!meta.is_validation_error());
        meta.error = Some(String::new());
        meta.touched = true;
        assert!(!meta.is_validation_error());
        meta.error = Some("bad".to_string());
        assert!(meta.is_validation_error());
    }
}
