//! Encoder input model: a nested configuration value tree.
//!
//! A distribution configuration is handed to the XML encoder as a
//! [`ConfigValue`] tree rather than a fixed struct, because the set of
//! configuration fields the remote service accepts evolves faster than
//! this client. Mappings keep key insertion order: the remote schema
//! is order-sensitive, and the encoder never reorders fields on its
//! own.

use serde::{Deserialize, Serialize};

/// A nested configuration value: scalar, sequence, or ordered mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigValue {
    /// A boolean scalar, serialized as lowercase `true`/`false`.
    Bool(bool),
    /// An integer scalar.
    Int(i64),
    /// A string scalar.
    String(String),
    /// An ordered sequence of values.
    List(Vec<ConfigValue>),
    /// An insertion-ordered mapping from field name to value.
    Map(ConfigMap),
}

impl ConfigValue {
    /// Returns the mapping if this value is one.
    #[must_use]
    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the sequence if this value is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Text representation of a scalar, or `None` for sequences and
    /// mappings.
    #[must_use]
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
            Self::Int(n) => Some(n.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::List(_) | Self::Map(_) => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        Self::List(items)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        Self::Map(map)
    }
}

/// A mapping from field name to [`ConfigValue`] that preserves
/// insertion order.
///
/// Backed by a `Vec` of pairs: configurations are small, and order
/// fidelity matters more than lookup speed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMap(Vec<(String, ConfigValue)>);

impl ConfigMap {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field. An existing field with the same name is
    /// replaced in place, keeping its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes a field by name and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        let pos = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(pos).1)
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields in the mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a> IntoIterator for &'a ConfigMap {
    type Item = (&'a str, &'a ConfigValue);
    type IntoIter = std::vec::IntoIter<(&'a str, &'a ConfigValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_preserve_insertion_order() {
        let mut map = ConfigMap::new();
        map.insert("Comment", "first");
        map.insert("Enabled", true);
        map.insert("MaxItems", 100);

        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Comment", "Enabled", "MaxItems"]);
    }

    #[test]
    fn test_should_replace_in_place_on_duplicate_insert() {
        let mut map = ConfigMap::new();
        map.insert("Comment", "old");
        map.insert("Enabled", true);
        map.insert("Comment", "new");

        assert_eq!(map.len(), 2);
        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Comment", "Enabled"]);
        assert_eq!(map.get("Comment"), Some(&ConfigValue::from("new")));
    }

    #[test]
    fn test_should_remove_by_name() {
        let mut map = ConfigMap::new();
        map.insert("Comment", "text");
        map.insert("Enabled", false);

        assert_eq!(map.remove("Comment"), Some(ConfigValue::from("text")));
        assert_eq!(map.remove("Comment"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_should_render_scalar_text() {
        assert_eq!(ConfigValue::Bool(true).scalar_text().as_deref(), Some("true"));
        assert_eq!(
            ConfigValue::Bool(false).scalar_text().as_deref(),
            Some("false")
        );
        assert_eq!(ConfigValue::Int(8080).scalar_text().as_deref(), Some("8080"));
        assert_eq!(
            ConfigValue::from("text").scalar_text().as_deref(),
            Some("text")
        );
        assert_eq!(ConfigValue::List(Vec::new()).scalar_text(), None);
        assert_eq!(ConfigValue::Map(ConfigMap::new()).scalar_text(), None);
    }
}
