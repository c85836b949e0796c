//! Ordered map type for TOON objects.
//!
//! [`Map`] is the object representation both halves of the codec share. It
//! keeps fields in insertion order (on top of [`IndexMap`]) because field
//! order is observable on the wire: the first object of a tabular array
//! fixes the column order, and `encode(decode(text))` must reproduce `text`
//! byte for byte. Beyond ordered storage it knows how to merge entries,
//! which dotted-key expansion leans on.
//!
//! ## Examples
//!
//! ```rust
//! use toon::{Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! let fields: Vec<&str> = map.iter().map(|(key, _)| key.as_str()).collect();
//! assert_eq!(fields, ["name", "age"]);
//! ```

use crate::{Error, Result, Value};
use indexmap::IndexMap;

/// An ordered map of string keys to TOON values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(IndexMap<String, Value>);

impl Map {
    /// Creates an empty `Map`.
    #[must_use]
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    /// Creates an empty `Map` sized for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair.
    ///
    /// A duplicate key replaces the value in place: the key keeps its
    /// original position and the old value is returned. This is the
    /// last-write-wins behavior decoded documents rely on.
    ///
    /// ```rust
    /// use toon::{Map, Value};
    ///
    /// let mut map = Map::new();
    /// map.insert("n".to_string(), Value::Int(1));
    /// let old = map.insert("n".to_string(), Value::Int(2));
    /// assert_eq!(old, Some(Value::Int(1)));
    /// assert_eq!(map.get("n"), Some(&Value::Int(2)));
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns the value under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value under `key`, if any.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Inserts under `key`, combining with an existing entry instead of
    /// always replacing it: two objects merge recursively (the existing
    /// entry keeps its position and field order), two non-objects are
    /// last-write-wins, and a disagreement on object-ness is an expansion
    /// conflict when `strict`.
    pub(crate) fn merge(&mut self, key: String, value: Value, strict: bool) -> Result<()> {
        let existing_is_object = match self.get(&key) {
            None => {
                self.insert(key, value);
                return Ok(());
            }
            Some(existing) => existing.is_object(),
        };

        match value {
            Value::Object(incoming) if existing_is_object => {
                if let Some(Value::Object(existing)) = self.get_mut(&key) {
                    for (k, v) in incoming {
                        existing.merge(k, v, strict)?;
                    }
                }
                Ok(())
            }
            value => {
                if existing_is_object != value.is_object() && strict {
                    return Err(Error::ExpansionConflict { key });
                }
                self.insert(key, value);
                Ok(())
            }
        }
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    fn as_map(value: Value) -> Map {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_into_vacant_key() {
        let mut map = Map::new();
        map.merge("a".to_string(), Value::Int(1), true).unwrap();
        assert_eq!(map.get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_merge_objects_keeps_existing_order() {
        let mut map = as_map(toon!({ "user": { "id": 1, "name": "Ada" } }));
        let incoming = toon!({ "name": "Grace", "role": "admin" });
        map.merge("user".to_string(), incoming, true).unwrap();

        let user = map.get("user").unwrap().as_object().unwrap();
        let fields: Vec<&str> = user.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(fields, ["id", "name", "role"]);
        assert_eq!(user.get("name"), Some(&Value::Str("Grace".to_string())));
    }

    #[test]
    fn test_merge_non_objects_last_write_wins() {
        let mut map = Map::new();
        map.merge("n".to_string(), Value::Int(1), true).unwrap();
        map.merge("n".to_string(), Value::Int(2), true).unwrap();
        assert_eq!(map.get("n"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_merge_object_mismatch_is_conflict_in_strict_mode() {
        let mut map = as_map(toon!({ "a": 1 }));
        let err = map
            .merge("a".to_string(), toon!({ "b": 2 }), true)
            .unwrap_err();
        assert_eq!(err, Error::ExpansionConflict { key: "a".to_string() });
    }

    #[test]
    fn test_merge_object_mismatch_replaces_when_lenient() {
        let mut map = as_map(toon!({ "a": { "b": 1 } }));
        map.merge("a".to_string(), Value::Int(5), false).unwrap();
        assert_eq!(map.get("a"), Some(&Value::Int(5)));
    }
}
