//! The creatable select field.
//!
//! [`CreatableSelectField`] couples a text input with a dropdown of
//! candidate options. The user may type free text (which becomes the
//! field value as-is) or pick an option from the list. Value, touched
//! flag and validation error live in an external form store reached
//! through a [`ValueBinder`]; the field itself only owns the dropdown's
//! interaction state.
//!
//! # Dropdown rules
//!
//! | Event | Condition | Effect |
//! |-------|-----------|--------|
//! | focus | value name longer than 2 chars | open, touched cleared |
//! | focus | otherwise | closed, touched cleared |
//! | toggle | list non-empty and name at least `min_search_length` chars | open ↔ closed |
//! | toggle | otherwise | nothing |
//! | select item | | value set to the option, closed |
//! | hover item | | active item moves |
//! | blur | | touched set, closed, typed text trimmed |
//! | type | | value set to the text, `on_change` called |
//!
//! The focus threshold and `min_search_length` are separate gates and are
//! checked independently.
//!
//! ## Example
//!
//! ```rust
//! use creatable_select::{CreatableSelectField, FormStore, IdentityTranslator, SelectFieldConfig};
//!
//! let store: FormStore<String> = FormStore::new();
//! let mut field = CreatableSelectField::bind(
//!     &store,
//!     SelectFieldConfig::new("city").label("City").min_search_length(2),
//!     |city: &String| city.clone(),
//!     |city: &String, _value, _active| city.clone(),
//! )
//! .unwrap()
//! .options(Some(vec!["Oslo".to_string(), "Rome".to_string()]));
//!
//! field.focus();
//! field.type_text("Osl");
//! assert!(field.is_open());
//! field.select_item(0);
//! assert!(!field.is_open());
//! assert_eq!(store.value("city").selected().map(String::as_str), Some("Oslo"));
//! # let _ = field.view(&IdentityTranslator);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::SelectFieldConfig;
use crate::error::Result;
use crate::i18n::Translator;
use crate::key::{Key, SelectKeyMap};
use crate::list::ListViewport;
use crate::option::{effective_list_size, scalar_key, KeyFn, OptionProjector, ProjectedOption};
use crate::store::{FieldBinder, FieldMeta, FieldValue, FormStore, ValueBinder, Validator};
use crate::view::{
    ClearIndicatorView, DropdownIndicatorView, ErrorView, FieldView, InputView, ListItemView,
    ListView, ERROR_CLASS, ERROR_CLASS_DEFAULT,
};

/// Focus opens the list only when the value name is longer than this.
pub const FOCUS_OPEN_MIN_CHARS: usize = 2;

/// Renders the display string of an option.
pub type ValueRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Renders one list row: `(option, current value, is_active)`.
pub type ItemRenderer<T> = Arc<dyn Fn(&T, &FieldValue<T>, bool) -> String + Send + Sync>;

/// Free-text change notification.
pub type ChangeHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Open/closed state of the dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

/// Snapshot of the field's own interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionState {
    /// Whether the dropdown is shown.
    pub is_open: bool,
    /// Highlighted row; `None` when the list is empty.
    pub active_item: Option<usize>,
    /// Measured row height.
    pub list_item_height: u32,
}

/// A searchable select field that also accepts free text.
pub struct CreatableSelectField<T, B = FieldBinder<T>> {
    config: SelectFieldConfig,
    binder: B,
    projector: OptionProjector<T>,
    state: DropdownState,
    active_item: usize,
    viewport: ListViewport,
    focused: bool,
    keymap: SelectKeyMap,
    render_value: ValueRenderer<T>,
    render_item: ItemRenderer<T>,
    on_change: Option<ChangeHandler>,
}

impl<T, B> fmt::Debug for CreatableSelectField<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatableSelectField")
            .field("name", &self.config.name)
            .field("state", &self.state)
            .field("active_item", &self.active_item)
            .field("focused", &self.focused)
            .field("projector", &self.projector)
            .finish_non_exhaustive()
    }
}

impl<T> CreatableSelectField<T, FieldBinder<T>>
where
    T: Clone + Serialize + 'static,
{
    /// Registers the field's slot in `store` and binds a field to it.
    pub fn bind<V, I>(
        store: &FormStore<T>,
        config: SelectFieldConfig,
        render_value: V,
        render_item: I,
    ) -> Result<Self>
    where
        V: Fn(&T) -> String + Send + Sync + 'static,
        I: Fn(&T, &FieldValue<T>, bool) -> String + Send + Sync + 'static,
    {
        config.validate()?;
        if !store.contains(&config.name) {
            store.register(&config.name, None);
        }
        let binder = store.binder(config.name.clone());
        Self::new(config, binder, render_value, render_item)
    }
}

impl<T: Clone> CreatableSelectField<T, FieldBinder<T>> {
    /// Registers a validator for the field's slot. It runs in the store
    /// whenever the value changes or the field is marked touched.
    #[must_use]
    pub fn validate<F>(self, validate: F) -> Self
    where
        F: Fn(&FieldValue<T>) -> Option<String> + Send + Sync + 'static,
    {
        let validator: Validator<T> = Arc::new(validate);
        self.binder
            .store()
            .register(&self.config.name, Some(validator));
        self
    }
}

impl<T, B> CreatableSelectField<T, B>
where
    T: Clone + Serialize + 'static,
    B: ValueBinder<T>,
{
    /// Creates a field over an arbitrary binder. Option keys default to
    /// [`scalar_key`].
    pub fn new<V, I>(
        config: SelectFieldConfig,
        binder: B,
        render_value: V,
        render_item: I,
    ) -> Result<Self>
    where
        V: Fn(&T) -> String + Send + Sync + 'static,
        I: Fn(&T, &FieldValue<T>, bool) -> String + Send + Sync + 'static,
    {
        config.validate()?;
        let to_key: KeyFn<T> = Arc::new(|option: &T| scalar_key(option));
        debug!(field.name = %config.name, "select field created");
        Ok(Self {
            config,
            binder,
            projector: OptionProjector::new(to_key),
            state: DropdownState::Closed,
            active_item: 0,
            viewport: ListViewport::new(),
            focused: false,
            keymap: SelectKeyMap::default(),
            render_value: Arc::new(render_value),
            render_item: Arc::new(render_item),
            on_change: None,
        })
    }
}

impl<T, B> CreatableSelectField<T, B>
where
    T: Clone + 'static,
    B: ValueBinder<T>,
{
    /// Sets the candidate options. `None` behaves as an empty list.
    #[must_use]
    pub fn options(mut self, options: Option<Vec<T>>) -> Self {
        self.set_options(options);
        self
    }

    /// Sets the free-text change handler.
    #[must_use]
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    /// Replaces the option key derivation.
    #[must_use]
    pub fn key_fn<F>(mut self, to_key: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.projector.set_key_fn(Arc::new(to_key));
        self
    }

    /// Replaces the keybindings.
    #[must_use]
    pub fn keymap(mut self, keymap: SelectKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replaces the candidate options.
    pub fn set_options(&mut self, options: Option<Vec<T>>) {
        self.projector.set_options(options);
    }

    /// Field properties.
    pub fn config(&self) -> &SelectFieldConfig {
        &self.config
    }

    /// The binder this field writes through.
    pub fn binder(&self) -> &B {
        &self.binder
    }

    /// Active keybindings.
    pub fn key_map(&self) -> &SelectKeyMap {
        &self.keymap
    }

    /// Whether the text input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    // -------------------------------------------------------------------------
    // Derived state
    // -------------------------------------------------------------------------

    /// Current bound value, read from the store.
    pub fn value(&self) -> FieldValue<T> {
        self.binder.get_value()
    }

    /// Display name of the current value.
    pub fn value_name(&self) -> String {
        self.binder
            .get_value()
            .name_with(&*self.render_value)
            .into_owned()
    }

    /// Current validation state, read from the store.
    pub fn meta(&self) -> FieldMeta {
        self.binder.get_meta()
    }

    /// Projected options for the current options and value.
    pub fn projected_options(&mut self) -> &[ProjectedOption<T>] {
        let value = self.binder.get_value();
        self.projector.projected(&value)
    }

    fn projected_len(&mut self) -> usize {
        self.projected_options().len()
    }

    /// Whether the dropdown is shown. Never true for an empty list.
    pub fn is_open(&mut self) -> bool {
        self.state == DropdownState::Open && self.projected_len() > 0
    }

    /// Highlighted row, clamped into the list; `None` for an empty list.
    pub fn active_item(&mut self) -> Option<usize> {
        let len = self.projected_len();
        (len > 0).then(|| self.active_item.min(len - 1))
    }

    /// Rows of the list window.
    pub fn effective_list_size(&mut self) -> usize {
        let max = self.config.max_visible_items;
        effective_list_size(self.projected_len(), max)
    }

    /// Whether the dropdown toggle is disabled.
    pub fn is_dropdown_disabled(&mut self) -> bool {
        self.projected_len() == 0
            || self.value_name().chars().count() < self.config.min_search_length
    }

    /// Whether a validation error is shown: touched and a non-empty error.
    pub fn is_validation_error(&self) -> bool {
        self.binder.get_meta().is_validation_error()
    }

    /// Translated error text, empty unless a validation error is shown.
    pub fn error_text(&self, translator: &dyn Translator) -> String {
        let meta = self.binder.get_meta();
        if !meta.is_validation_error() {
            return String::new();
        }
        meta.error
            .as_deref()
            .map(|error| translator.translate(error))
            .unwrap_or_default()
    }

    /// Snapshot of the interaction state.
    pub fn interaction_state(&mut self) -> InteractionState {
        InteractionState {
            is_open: self.is_open(),
            active_item: self.active_item(),
            list_item_height: self.viewport.item_height(),
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// The text input gained focus.
    pub fn focus(&mut self) {
        self.focused = true;
        if self.value_name().chars().count() > FOCUS_OPEN_MIN_CHARS {
            self.open();
        } else {
            self.close();
        }
        self.binder.set_touched(false);
        let open = self.is_open();
        debug!(field.name = %self.config.name, field.open = open, "focus");
    }

    /// The text input lost focus: the field is marked touched, the list
    /// closes and typed text is trimmed.
    ///
    /// A picked option is stored as-is; its rendered name is not trimmed.
    pub fn blur(&mut self) {
        self.focused = false;
        self.binder.set_touched(true);
        self.close();
        self.trim_value();
        debug!(field.name = %self.config.name, "blur");
    }

    /// Trims typed text. Picked options are left untouched.
    fn trim_value(&self) {
        if let FieldValue::Text { name } = self.binder.get_value() {
            let trimmed = name.trim();
            if trimmed.len() != name.len() {
                self.binder.set_value(FieldValue::text(trimmed));
            }
        }
    }

    /// The dropdown toggle was pressed. Returns false when the toggle is
    /// disabled and nothing happened.
    pub fn toggle_dropdown(&mut self) -> bool {
        if self.is_dropdown_disabled() {
            trace!(field.name = %self.config.name, "toggle ignored");
            return false;
        }
        self.binder.set_touched(false);
        match self.state {
            DropdownState::Open => self.close(),
            DropdownState::Closed => self.open(),
        }
        debug!(field.name = %self.config.name, field.state = ?self.state, "dropdown toggled");
        true
    }

    /// Picks the option at `index` of the projected list. Out-of-range
    /// indices are ignored.
    pub fn select_item(&mut self, index: usize) -> bool {
        let Some(option) = self
            .projected_options()
            .get(index)
            .map(|p| p.option.clone())
        else {
            trace!(field.name = %self.config.name, index, "select ignored");
            return false;
        };
        self.active_item = index;
        self.select_option(option);
        true
    }

    /// Picks `option` as the field value and closes the list.
    pub fn select_option(&mut self, option: T) {
        self.binder.set_value(FieldValue::Selected(option));
        self.close();
        debug!(field.name = %self.config.name, "option selected");
    }

    /// Moves the highlight to `index`, clamped into the list.
    pub fn hover_item(&mut self, index: usize) {
        let len = self.projected_len();
        self.active_item = index.min(len.saturating_sub(1));
        self.follow_active();
        trace!(field.name = %self.config.name, active = self.active_item, "hover");
    }

    /// The user typed: `text` becomes the value verbatim.
    ///
    /// The list then opens if the text reaches `min_search_length` and
    /// there is something to show, and closes otherwise.
    pub fn type_text(&mut self, text: &str) {
        self.binder.set_value(FieldValue::text(text));
        if let Some(on_change) = &self.on_change {
            on_change(text);
        }

        self.active_item = 0;
        self.viewport.reset();
        if text.chars().count() >= self.config.min_search_length && self.projected_len() > 0 {
            self.open();
        } else {
            self.close();
        }
        let open = self.is_open();
        trace!(field.name = %self.config.name, field.open = open, "typed");
    }

    /// The clear control was pressed.
    pub fn clear(&mut self) {
        self.type_text("");
        self.close();
    }

    /// The list measured its row height.
    pub fn measure_item_height(&mut self, height: u32) {
        self.viewport.measure(height);
    }

    /// Handles a key pressed in the text input. Returns true if the key
    /// was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let km = &self.keymap;
        if km.down.matches(&key) {
            self.step(1);
        } else if km.up.matches(&key) {
            self.step(-1);
        } else if km.goto_top.matches(&key) {
            if !self.is_open() {
                return false;
            }
            self.hover_item(0);
        } else if km.goto_bottom.matches(&key) {
            if !self.is_open() {
                return false;
            }
            self.hover_item(usize::MAX);
        } else if km.select.matches(&key) {
            if !self.is_open() {
                return false;
            }
            let Some(active) = self.active_item() else {
                return false;
            };
            self.select_item(active);
        } else if km.close.matches(&key) {
            if !self.is_open() {
                return false;
            }
            self.close();
        } else {
            return self.edit_text(key);
        }
        true
    }

    fn edit_text(&mut self, key: Key) -> bool {
        let mut text = self.value_name();
        match key {
            Key::Char(c) => text.push(c),
            Key::Backspace => {
                if text.pop().is_none() {
                    return false;
                }
            }
            _ => return false,
        }
        self.type_text(&text);
        true
    }

    /// Arrow navigation: opens a closed list, otherwise moves by `delta`.
    fn step(&mut self, delta: isize) {
        if !self.is_open() {
            if !self.is_dropdown_disabled() {
                self.open();
            }
            return;
        }
        let current = self.active_item().unwrap_or(0);
        self.hover_item(current.saturating_add_signed(delta));
    }

    fn open(&mut self) {
        self.state = DropdownState::Open;
        self.follow_active();
    }

    fn close(&mut self) {
        self.state = DropdownState::Closed;
    }

    fn follow_active(&mut self) {
        let len = self.projected_len();
        let visible = self.config.max_visible_items;
        self.viewport.follow(self.active_item, len, visible);
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Builds the view model from the current store state.
    pub fn view(&mut self, translator: &dyn Translator) -> FieldView {
        let value = self.binder.get_value();
        let meta = self.binder.get_meta();
        let is_validation_error = meta.is_validation_error();
        let value_name = value.name_with(&*self.render_value).into_owned();

        let count_of_list_items = self.effective_list_size();
        let dropdown = DropdownIndicatorView {
            is_open: self.is_open(),
            disabled: self.is_dropdown_disabled(),
        };

        let list = if dropdown.is_open {
            self.follow_active();
            let active = self.active_item();
            let range = self.viewport.visible_range();
            let scroll_top_px = self.viewport.scroll_top_px();
            let height_px = self.viewport.height_px();
            let render_item = Arc::clone(&self.render_item);
            let options = self.projected_options();
            let total = options.len();
            let items = options
                .iter()
                .skip(range.start)
                .take(range.len())
                .enumerate()
                .map(|(offset, projected)| {
                    let index = range.start + offset;
                    let is_active = active == Some(index);
                    ListItemView {
                        index,
                        key: projected.key.clone(),
                        content: render_item(&projected.option, &value, is_active),
                        is_active,
                    }
                })
                .collect();
            Some(ListView {
                items,
                total,
                count_of_list_items,
                scroll_top_px,
                height_px,
            })
        } else {
            None
        };

        let error = ErrorView {
            text: match &meta.error {
                Some(error) if is_validation_error => translator.translate(error),
                _ => String::new(),
            },
            class_name: if is_validation_error {
                ERROR_CLASS
            } else {
                ERROR_CLASS_DEFAULT
            },
            data_qa_locator: self.config.error_data_qa_locator.clone(),
        };

        FieldView {
            label: translator.translate(&self.config.label),
            input: InputView {
                value: value_name.clone(),
                placeholder: self.config.placeholder.clone(),
                class_name: self.config.input_class_name.clone(),
                is_validation_error,
                list_item_height: self.viewport.item_height(),
                count_of_list_items,
            },
            clear: ClearIndicatorView {
                disabled: value_name.is_empty(),
            },
            dropdown,
            list,
            error,
        }
    }
}
