//! View model of a select field.
//!
//! [`FieldView`] is what a host renders: label, text input, clear and
//! dropdown controls, the visible slice of the list, and the error line.
//! It carries no styling beyond class names; [`FieldView::render_text`]
//! gives a plain-text rendering used for previews and tests.

use std::fmt::Write as _;

/// Class of the error line when a validation error is shown.
pub const ERROR_CLASS: &str = "error-message";
/// Class of the error line otherwise.
pub const ERROR_CLASS_DEFAULT: &str = "error-message-default";

/// The text input sub-widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    /// Display text of the bound value.
    pub value: String,
    /// Shown when `value` is empty.
    pub placeholder: String,
    /// Extra class name.
    pub class_name: Option<String>,
    /// Whether the input is styled as invalid.
    pub is_validation_error: bool,
    /// Measured list row height, for the input's scroll handling.
    pub list_item_height: u32,
    /// Rows of the list window.
    pub count_of_list_items: usize,
}

/// The clear control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearIndicatorView {
    /// Disabled when the value is empty.
    pub disabled: bool,
}

/// The dropdown toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownIndicatorView {
    /// Whether the list is shown.
    pub is_open: bool,
    /// Disabled when there is nothing to show or too little was typed.
    pub disabled: bool,
}

/// One row of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemView {
    /// Row index in the full list.
    pub index: usize,
    /// Rendering key.
    pub key: String,
    /// Rendered row content.
    pub content: String,
    /// Whether this row is the active one.
    pub is_active: bool,
}

/// The open list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Rows inside the scroll window.
    pub items: Vec<ListItemView>,
    /// Total number of rows.
    pub total: usize,
    /// Rows of the window.
    pub count_of_list_items: usize,
    /// Scroll offset in pixels.
    pub scroll_top_px: u64,
    /// Window height in pixels.
    pub height_px: u64,
}

/// The error line under the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    /// Translated error, empty unless a validation error is shown.
    pub text: String,
    /// [`ERROR_CLASS`] or [`ERROR_CLASS_DEFAULT`].
    pub class_name: &'static str,
    /// Test hook.
    pub data_qa_locator: Option<String>,
}

/// Everything a host needs to draw the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub input: InputView,
    pub clear: ClearIndicatorView,
    pub dropdown: DropdownIndicatorView,
    /// Present only while the list is open.
    pub list: Option<ListView>,
    pub error: ErrorView,
}

impl FieldView {
    /// Renders the view as plain text.
    ///
    /// ```text
    /// City
    /// [Osl] × ▴
    /// › Oslo
    ///   Oslofjord
    /// ```
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if !self.label.is_empty() {
            out.push_str(&self.label);
            out.push('\n');
        }

        let shown = if self.input.value.is_empty() {
            &self.input.placeholder
        } else {
            &self.input.value
        };
        let _ = write!(out, "[{shown}]");
        if !self.clear.disabled {
            out.push_str(" ×");
        }
        if !self.dropdown.disabled {
            out.push_str(if self.dropdown.is_open { " ▴" } else { " ▾" });
        }

        if let Some(list) = &self.list {
            for item in &list.items {
                let marker = if item.is_active { "›" } else { " " };
                let _ = write!(out, "\n{marker} {}", item.content);
            }
        }

        if !self.error.text.is_empty() {
            out.push('\n');
            out.push_str(&self.error.text);
        }

        out
    }
}
