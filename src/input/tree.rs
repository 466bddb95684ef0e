//! Nested translation tree input definitions

use indexmap::IndexMap;
use serde_json::{
    Map,
    Value,
};

use super::TreeError;

/// Default marker that turns a JSON string into an alias reference (e.g. `":errors.404"`).
pub const DEFAULT_ALIAS_PREFIX: &str = ":";

/// A single node of a translation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationValue {
    /// Plain translation text.
    Text(String),
    /// Reference to another key whose value stands in for this one.
    Alias(String),
    /// Any other primitive translation value (number, boolean, null, array).
    Literal(Value),
    /// Nested subtree.
    Tree(TranslationTree),
}

impl TranslationValue {
    /// Returns `true` for nested subtrees.
    #[must_use]
    pub const fn is_subtree(&self) -> bool {
        matches!(self, Self::Tree(_))
    }

    /// Returns the alias target if this value is an alias reference.
    #[must_use]
    pub const fn as_alias(&self) -> Option<&str> {
        match self {
            Self::Alias(target) => Some(target.as_str()),
            _ => None,
        }
    }

    /// Render back to JSON, writing aliases with `alias_prefix`.
    #[must_use]
    pub fn to_json(&self, alias_prefix: &str) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Alias(target) => Value::String(format!("{alias_prefix}{target}")),
            Self::Literal(value) => value.clone(),
            Self::Tree(tree) => Value::Object(
                tree.iter()
                    .map(|(segment, value)| (segment.to_string(), value.to_json(alias_prefix)))
                    .collect(),
            ),
        }
    }

    /// Convert a JSON node, treating strings that start with `alias_prefix` as aliases.
    fn from_json_value(value: &Value, alias_prefix: Option<&str>) -> Self {
        match value {
            Value::Object(map) => Self::Tree(TranslationTree::from_json_map(map, alias_prefix)),
            Value::String(s) => alias_prefix
                .filter(|prefix| !prefix.is_empty())
                .and_then(|prefix| s.strip_prefix(prefix))
                .map_or_else(|| Self::Text(s.clone()), |target| Self::Alias(target.to_string())),
            other => Self::Literal(other.clone()),
        }
    }
}

impl From<&str> for TranslationValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TranslationValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<TranslationTree> for TranslationValue {
    fn from(tree: TranslationTree) -> Self {
        Self::Tree(tree)
    }
}

/// Ordered mapping from key segment to [`TranslationValue`].
///
/// Iteration follows insertion order. Inserting an existing segment replaces
/// its value without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationTree {
    /// Entries in insertion order.
    entries: IndexMap<String, TranslationValue>,
}

impl TranslationTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for the same segment.
    pub fn insert(
        &mut self,
        segment: impl Into<String>,
        value: impl Into<TranslationValue>,
    ) -> Option<TranslationValue> {
        self.entries.insert(segment.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, segment: impl Into<String>, value: impl Into<TranslationValue>) -> Self {
        self.insert(segment, value);
        self
    }

    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&TranslationValue> {
        self.entries.get(segment)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationValue)> {
        self.entries.iter().map(|(segment, value)| (segment.as_str(), value))
    }

    /// Raw entries, walked by the flattener's explicit stack.
    pub(crate) const fn entries(&self) -> &IndexMap<String, TranslationValue> {
        &self.entries
    }

    /// Build a tree from an already-parsed JSON document.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use i18n_flatten::input::{TranslationTree, TranslationValue};
    ///
    /// let json = json!({
    ///     "errors": {
    ///         "not_found": ":errors.404",
    ///         "404": "Not found"
    ///     }
    /// });
    ///
    /// let tree = TranslationTree::from_json(&json, Some(":")).unwrap();
    /// let Some(TranslationValue::Tree(errors)) = tree.get("errors") else { panic!() };
    /// assert_eq!(errors.get("not_found"), Some(&TranslationValue::Alias("errors.404".into())));
    /// ```
    ///
    /// # Errors
    /// Returns [`TreeError::NotAnObject`] when the document root is not an object.
    pub fn from_json(json: &Value, alias_prefix: Option<&str>) -> Result<Self, TreeError> {
        match json {
            Value::Object(map) => Ok(Self::from_json_map(map, alias_prefix)),
            other => Err(TreeError::NotAnObject(json_type_name(other))),
        }
    }

    /// Convert every member of a JSON object, keeping document order.
    fn from_json_map(map: &Map<String, Value>, alias_prefix: Option<&str>) -> Self {
        let mut entries = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            entries.insert(key.clone(), TranslationValue::from_json_value(value, alias_prefix));
        }
        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationTree
where
    K: Into<String>,
    V: Into<TranslationValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(segment, value)| (segment.into(), value.into()))
                .collect(),
        }
    }
}

/// JSON type name used in error messages.
const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
