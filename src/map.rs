//! Dictionary type for `<< /Key value ... >>` objects.
//!
//! [`Dictionary`] wraps an [`IndexMap`] keyed by [`Name`]. Keys are unique and
//! equality ignores entry order, but iteration follows insertion order so
//! serialization is deterministic.
//!
//! ## Examples
//!
//! ```rust
//! use pdf_graph::{Dictionary, Name, Object};
//!
//! let mut dict = Dictionary::new();
//! dict.insert("Type", Name::new("Page"));
//! dict.insert("Rotate", 90);
//!
//! assert_eq!(dict.len(), 2);
//! assert_eq!(dict.get("Rotate").and_then(Object::as_i64), Some(90));
//! assert_eq!(dict.type_name(), Some("Page"));
//! ```

use crate::{Name, Object};
use indexmap::IndexMap;

/// An insertion-ordered map of names to objects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary(IndexMap<Name, Object>);

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Dictionary(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Dictionary(IndexMap::with_capacity(capacity))
    }

    /// Inserts an entry, returning the previous value for the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::Dictionary;
    ///
    /// let mut dict = Dictionary::new();
    /// assert!(dict.insert("Count", 1).is_none());
    /// assert!(dict.insert("Count", 2).is_some());
    /// ```
    pub fn insert(&mut self, key: impl Into<Name>, value: impl Into<crate::Object>) -> Option<Object> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Object> {
        self.0.get_mut(key)
    }

    /// Removes an entry, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Object> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `/Type` entry, if it is a name.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.get("Type").and_then(Object::as_name).map(Name::as_str)
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Name, Object> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Name, Object> {
        self.0.values()
    }

    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, Name, Object> {
        self.0.values_mut()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Name, Object> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, Name, Object> {
        self.0.iter_mut()
    }
}

impl IntoIterator for Dictionary {
    type Item = (Name, Object);
    type IntoIter = indexmap::map::IntoIter<Name, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a Name, &'a Object);
    type IntoIter = indexmap::map::Iter<'a, Name, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Name, Object)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (Name, Object)>>(iter: T) -> Self {
        Dictionary(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_order() {
        let mut a = Dictionary::new();
        a.insert("A", 1);
        a.insert("B", 2);
        let mut b = Dictionary::new();
        b.insert("B", 2);
        b.insert("A", 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut dict = Dictionary::new();
        dict.insert("A", 1);
        dict.insert("B", 2);
        dict.insert("C", 3);
        dict.remove("B");
        let keys: Vec<&str> = dict.keys().map(Name::as_str).collect();
        assert_eq!(keys, vec!["A", "C"]);
    }
}
