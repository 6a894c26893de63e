//! Wire-format policies shared by every node.
//!
//! Nothing in here parses or emits SARIF text; these are the hooks the
//! `serde` derives on each node call into so that a serializer can
//! round-trip a log field by field.

use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{
    error::Error,
    hash::ValueHash,
    list::NodeList,
    property_bag::PropertyBag,
};

/// Whether a field should be left out of the serialized form.
///
/// Every node field carries `skip_serializing_if = "Absent::is_absent"`.
/// Optional fields are omitted when `None` and sentinel integers when unset;
/// everything else is always written.
pub trait Absent {
    /// Returns `true` if this value has no wire representation.
    fn is_absent(&self) -> bool {
        false
    }
}

impl<T> Absent for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl Absent for String {}
impl Absent for bool {}
impl Absent for i64 {}
impl Absent for f64 {}
impl Absent for DateTime<Utc> {}
impl Absent for PropertyBag {}
impl<T> Absent for Vec<T> {}
impl<T> Absent for NodeList<T> {}
impl<K, V, S> Absent for IndexMap<K, V, S> {}

/// Wraps a `de::Error::custom` call to log the same error as
/// a `tracing::error!` event.
pub(crate) fn custom_error<'de, D>(msg: impl Display) -> D::Error
where
    D: Deserializer<'de>,
{
    let msg = msg.to_string();
    tracing::error!(msg);
    de::Error::custom(msg)
}

/// An integer field whose "unset" value is `-1` rather than zero.
///
/// SARIF uses `-1` for array indices, counts and offsets that haven't been
/// populated. This type keeps that exact value on the wire while exposing
/// the field as an optional non-negative integer in Rust.
///
/// The default is [`Sentinel::UNSET`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sentinel(i64);

impl Sentinel {
    /// The unset value, serialized as `-1`.
    pub const UNSET: Sentinel = Sentinel(-1);

    /// Creates a set sentinel holding `value`.
    pub fn new(value: u64) -> Self {
        Self(i64::try_from(value).unwrap_or(i64::MAX))
    }

    /// Creates a sentinel from its wire value, rejecting anything below `-1`.
    pub fn from_raw(raw: i64) -> Result<Self, Error> {
        if raw < -1 {
            Err(Error::InvalidSentinel(raw))
        } else {
            Ok(Self(raw))
        }
    }

    /// Returns the wire value: `-1` when unset.
    pub fn raw(self) -> i64 {
        self.0
    }

    /// Returns the value, or `None` when unset.
    pub fn get(self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }

    /// Returns the value as a slice index, or `None` when unset.
    pub fn as_index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// Returns whether this sentinel holds the unset value.
    pub fn is_unset(self) -> bool {
        self.0 == -1
    }
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::UNSET
    }
}

impl From<usize> for Sentinel {
    fn from(value: usize) -> Self {
        Self::new(value as u64)
    }
}

impl From<Option<usize>> for Sentinel {
    fn from(value: Option<usize>) -> Self {
        value.map_or(Self::UNSET, Self::from)
    }
}

impl PartialEq<i64> for Sentinel {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Absent for Sentinel {
    fn is_absent(&self) -> bool {
        self.is_unset()
    }
}

impl ValueHash for Sentinel {
    fn value_hash(&self) -> i32 {
        self.0.value_hash()
    }
}

impl Serialize for Sentinel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for Sentinel {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(de)?;
        Sentinel::from_raw(raw).map_err(custom_error::<D>)
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for Sentinel {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Sentinel".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "integer",
            "minimum": -1,
            "default": -1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Absent, Sentinel};

    #[test]
    fn test_sentinel_default_is_unset() {
        let sentinel = Sentinel::default();
        assert!(sentinel.is_unset());
        assert_eq!(sentinel.raw(), -1);
        assert_eq!(sentinel.get(), None);
        assert!(sentinel.is_absent());
    }

    #[test]
    fn test_sentinel_roundtrip() {
        let sentinel: Sentinel = serde_json::from_str("3").unwrap();
        assert_eq!(sentinel.as_index(), Some(3));
        assert_eq!(serde_json::to_string(&sentinel).unwrap(), "3");

        let unset: Sentinel = serde_json::from_str("-1").unwrap();
        assert_eq!(unset, Sentinel::UNSET);
    }

    #[test]
    fn test_sentinel_rejects_below_unset() {
        let err = serde_json::from_str::<Sentinel>("-2").unwrap_err();
        assert!(err.to_string().contains("-2"));
    }

    #[test]
    fn test_sentinel_from_option() {
        assert_eq!(Sentinel::from(Some(4)), 4);
        assert_eq!(Sentinel::from(None::<usize>), Sentinel::UNSET);
    }
}
