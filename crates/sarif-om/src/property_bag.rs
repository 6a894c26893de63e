//! The `properties` extension point carried by every node.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{error::Error, hash::ValueHash};

/// The property that holds a bag's tags.
pub const TAGS: &str = "tags";

/// Key/value pairs that provide additional information about a node.
///
/// Values are arbitrary JSON. Equality and hashing are independent of
/// insertion order. The conventional `tags` entry (an array of unique
/// strings) has dedicated accessors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct PropertyBag(IndexMap<String, Value>);

impl PropertyBag {
    /// Creates an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of properties, counting `tags` if present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the bag holds no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether a property named `name` is present.
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the raw JSON value of a property.
    pub fn get_raw(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns a property converted to `T`.
    ///
    /// Returns `Ok(None)` if the property is absent, and an error if it is
    /// present but doesn't have `T`'s shape.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, Error> {
        self.0
            .get(name)
            .map(|value| {
                T::deserialize(value).map_err(|source| Error::Property {
                    name: name.into(),
                    source,
                })
            })
            .transpose()
    }

    /// Sets a property, returning the raw value it replaced.
    pub fn set<T: Serialize>(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) -> Result<Option<Value>, Error> {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|source| Error::Property {
            name: name.clone(),
            source,
        })?;
        Ok(self.0.insert(name, value))
    }

    /// Sets a property from a raw JSON value, returning the value it replaced.
    pub fn set_raw(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    /// Removes a property, returning its raw value.
    ///
    /// The relative order of the remaining properties is preserved.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    /// Iterates over every property, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the bag's tags, in order. Non-string entries are skipped.
    pub fn tags(&self) -> Vec<&str> {
        match self.0.get(TAGS) {
            Some(Value::Array(tags)) => tags.iter().filter_map(Value::as_str).collect(),
            _ => vec![],
        }
    }

    /// Returns whether the bag carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().contains(&tag)
    }

    /// Adds `tag`, returning `false` if it was already present.
    ///
    /// A non-array `tags` entry is replaced.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        let entry = self
            .0
            .entry(TAGS.into())
            .or_insert_with(|| Value::Array(vec![]));

        if !entry.is_array() {
            tracing::debug!("replacing non-array `tags` property");
            *entry = Value::Array(vec![]);
        }

        match entry {
            Value::Array(tags) if !tags.iter().any(|t| t.as_str() == Some(tag.as_str())) => {
                tags.push(Value::String(tag));
                true
            }
            _ => false,
        }
    }

    /// Removes `tag`, returning whether it was present.
    ///
    /// The `tags` entry itself is dropped once it becomes empty.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let Some(Value::Array(tags)) = self.0.get_mut(TAGS) else {
            return false;
        };

        let before = tags.len();
        tags.retain(|t| t.as_str() != Some(tag));
        let removed = tags.len() != before;

        if tags.is_empty() {
            self.0.shift_remove(TAGS);
        }

        removed
    }
}

impl<K: Into<String>, const N: usize> From<[(K, Value); N]> for PropertyBag {
    fn from(entries: [(K, Value); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl ValueHash for PropertyBag {
    fn value_hash(&self) -> i32 {
        self.0.value_hash()
    }
}
