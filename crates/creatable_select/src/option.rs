//! Option projection.
//!
//! Raw caller options are wrapped into [`ProjectedOption`]s carrying a
//! rendering key. Keys identify list rows for display only; two options
//! with the same content share a key and both stay in the list.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::memo::Memo;
use crate::store::FieldValue;

/// Default cap on the number of list rows shown at once.
pub const COUNT_OF_LIST_ITEMS: usize = 5;

/// Separator placed between scalar values in a derived key.
pub const KEY_SEPARATOR: &str = "-";

/// A display-ready wrapper around a raw option.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedOption<T> {
    /// Rendering key. Not guaranteed unique.
    pub key: String,
    /// The raw option.
    pub option: T,
}

impl<T> ProjectedOption<T> {
    /// Creates a projected option.
    pub fn new(key: impl Into<String>, option: T) -> Self {
        Self {
            key: key.into(),
            option,
        }
    }
}

/// Caller-supplied key derivation.
pub type KeyFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Projects raw options into keyed options.
///
/// `None` and empty input both yield an empty list.
pub fn project<T: Clone>(
    options: Option<&[T]>,
    to_key: &dyn Fn(&T) -> String,
) -> Vec<ProjectedOption<T>> {
    options
        .unwrap_or_default()
        .iter()
        .map(|option| ProjectedOption::new(to_key(option), option.clone()))
        .collect()
}

/// Number of rows the list window shows: `min(len, max_visible)`.
pub fn effective_list_size(len: usize, max_visible: usize) -> usize {
    len.min(max_visible)
}

/// Derives a key from every scalar value of the serialized option.
///
/// Objects contribute their scalar fields in declaration order; a bare
/// scalar option keys as itself. Nested arrays and objects are skipped
/// and `null` contributes an empty segment.
pub fn scalar_key<T: Serialize>(option: &T) -> String {
    match serde_json::to_value(option) {
        Ok(Value::Object(fields)) => fields
            .values()
            .filter_map(scalar_segment)
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR),
        Ok(value) => scalar_segment(&value).unwrap_or_default(),
        Err(err) => {
            warn!(error = %err, "option could not be serialized for key derivation");
            String::new()
        }
    }
}

fn scalar_segment(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// What the projection remembers of the bound value: typed text, or the
/// key of the picked option.
#[derive(Debug, Clone, PartialEq)]
enum ValueIdentity {
    Text(String),
    Selected(String),
}

/// Identity of the inputs a projection was computed from.
#[derive(Debug, Clone, PartialEq)]
struct ProjectionDeps {
    revision: u64,
    value: ValueIdentity,
}

/// Holds the raw options and a memoized projection of them.
///
/// The projection is recomputed when the option list is replaced (its
/// revision changes) and also whenever the bound value changes,
/// so the list stays fresh against edits that came from the same source
/// as the options.
pub struct OptionProjector<T> {
    options: Option<Vec<T>>,
    revision: u64,
    to_key: KeyFn<T>,
    memo: Memo<ProjectionDeps, Vec<ProjectedOption<T>>>,
}

impl<T> fmt::Debug for OptionProjector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionProjector")
            .field("options", &self.options.as_ref().map(Vec::len))
            .field("revision", &self.revision)
            .field("computations", &self.memo.computations())
            .finish_non_exhaustive()
    }
}

impl<T: Clone> OptionProjector<T> {
    /// Creates a projector with no options.
    pub fn new(to_key: KeyFn<T>) -> Self {
        Self {
            options: None,
            revision: 0,
            to_key,
            memo: Memo::new(),
        }
    }

    /// Replaces the raw option list.
    pub fn set_options(&mut self, options: Option<Vec<T>>) {
        self.options = options;
        self.revision += 1;
        debug!(
            options.revision = self.revision,
            options.len = self.options.as_ref().map_or(0, Vec::len),
            "options replaced"
        );
    }

    /// Replaces the key derivation; forces a re-projection.
    pub fn set_key_fn(&mut self, to_key: KeyFn<T>) {
        self.to_key = to_key;
        self.memo.invalidate();
    }

    /// Raw options as last supplied.
    pub fn raw(&self) -> Option<&[T]> {
        self.options.as_deref()
    }

    /// Returns the projection for the current options and bound value.
    pub fn projected(&mut self, value: &FieldValue<T>) -> &[ProjectedOption<T>] {
        let value = match value {
            FieldValue::Text { name } => ValueIdentity::Text(name.clone()),
            FieldValue::Selected(option) => ValueIdentity::Selected((self.to_key)(option)),
        };
        let deps = ProjectionDeps {
            revision: self.revision,
            value,
        };
        let options = self.options.as_deref();
        let to_key = &self.to_key;
        self.memo
            .get_or_compute(deps, |_| project(options, &**to_key))
    }

    /// Number of times the options were projected.
    pub fn computations(&self) -> usize {
        self.memo.computations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Clone, Serialize, PartialEq)]
    struct City {
        name: String,
        code: u32,
    }

    fn city(name: &str, code: u32) -> City {
        City {
            name: name.to_string(),
            code,
        }
    }

    #[test]
    fn test_project_none_and_empty() {
        let to_key = |c: &City| scalar_key(c);
        assert!(project::<City>(None, &to_key).is_empty());
        assert!(project::<City>(Some(&[]), &to_key).is_empty());
    }

    #[test]
    fn test_scalar_key_field_order() {
        assert_eq!(scalar_key(&city("Oslo", 47)), "Oslo-47");
        assert_eq!(scalar_key(&"plain"), "plain");
        assert_eq!(scalar_key(&12), "12");
    }

    #[test]
    fn test_scalar_key_skips_nested() {
        #[derive(Serialize)]
        struct Nested {
            a: u8,
            inner: Vec<u8>,
            b: Option<String>,
        }
        let key = scalar_key(&Nested {
            a: 1,
            inner: vec![1, 2],
            b: None,
        });
        assert_eq!(key, "1-");
    }

    #[test]
    fn test_effective_list_size() {
        assert_eq!(effective_list_size(0, COUNT_OF_LIST_ITEMS), 0);
        assert_eq!(effective_list_size(3, COUNT_OF_LIST_ITEMS), 3);
        assert_eq!(effective_list_size(500, COUNT_OF_LIST_ITEMS), 5);
    }

    #[test]
    fn test_projector_recomputes_on_value_change() {
        let mut projector = OptionProjector::<City>::new(Arc::new(|c: &City| scalar_key(c)));
        projector.set_options(Some(vec![city("Oslo", 1), city("Rome", 2)]));

        assert_eq!(projector.projected(&FieldValue::text("")).len(), 2);
        projector.projected(&FieldValue::text(""));
        assert_eq!(projector.computations(), 1);

        projector.projected(&FieldValue::text("Os"));
        assert_eq!(projector.computations(), 2);

        projector.set_options(None);
        assert!(projector.projected(&FieldValue::text("Os")).is_empty());
        assert_eq!(projector.computations(), 3);
    }

    #[test]
    fn test_projector_tells_picked_option_from_same_text() {
        let mut projector = OptionProjector::<City>::new(Arc::new(|c: &City| scalar_key(c)));
        projector.set_options(Some(vec![city("Oslo", 1), city("Oslo", 2)]));

        projector.projected(&FieldValue::text("Oslo"));
        projector.projected(&FieldValue::Selected(city("Oslo", 1)));
        assert_eq!(projector.computations(), 2);

        projector.projected(&FieldValue::Selected(city("Oslo", 2)));
        assert_eq!(projector.computations(), 3);

        projector.projected(&FieldValue::Selected(city("Oslo", 2)));
        assert_eq!(projector.computations(), 3);
    }
}
