//! Structural hashing for SARIF nodes.
//!
//! Every node hashes the same way: start from `17`, then fold in each field
//! in declaration order with `hash * 31 + field_hash`, using wrapping
//! arithmetic throughout. Absent fields are skipped entirely.
//!
//! Ordered sequences fold their elements position by position, so permuting
//! a sequence changes its hash. Maps instead XOR together
//! `key_hash ^ value_hash` for every entry, which makes the result
//! independent of enumeration order. This is what lets two maps that compare
//! equal (regardless of insertion order) hash equal too.

use std::hash::{DefaultHasher, Hash, Hasher};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// The seed every node hash starts from.
pub const SEED: i32 = 17;

/// Folds `value` into `acc` with the position-sensitive `acc * 31 + value` rule.
#[inline]
pub fn combine(acc: i32, value: i32) -> i32 {
    acc.wrapping_mul(31).wrapping_add(value)
}

/// Hashes `value` with the standard library's keyless SipHash, truncated to 32 bits.
///
/// Only used for leaves (strings, enum tags) whose structural hash has no
/// defined arithmetic form. The result is stable within a process, which is
/// all the equality contract needs.
pub(crate) fn std_hash<T: Hash + ?Sized>(value: &T) -> i32 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish() as i32
}

/// A structural hash that is consistent with structural equality:
/// `a == b` implies `a.value_hash() == b.value_hash()`.
pub trait ValueHash {
    /// Computes this value's structural hash.
    fn value_hash(&self) -> i32;

    /// Folds this value into an enclosing node's running hash.
    ///
    /// The default applies [`combine`]. Absent values and sequences
    /// override this to skip or to fold element by element.
    #[inline]
    fn fold_hash(&self, acc: i32) -> i32 {
        combine(acc, self.value_hash())
    }
}

impl<T: ValueHash + ?Sized> ValueHash for &T {
    fn value_hash(&self) -> i32 {
        (**self).value_hash()
    }

    fn fold_hash(&self, acc: i32) -> i32 {
        (**self).fold_hash(acc)
    }
}

impl<T: ValueHash + ?Sized> ValueHash for Box<T> {
    fn value_hash(&self) -> i32 {
        (**self).value_hash()
    }

    fn fold_hash(&self, acc: i32) -> i32 {
        (**self).fold_hash(acc)
    }
}

impl<T: ValueHash> ValueHash for Option<T> {
    /// Absent values hash to `0`.
    fn value_hash(&self) -> i32 {
        self.as_ref().map_or(0, ValueHash::value_hash)
    }

    /// Absent fields don't contribute to the enclosing hash at all.
    fn fold_hash(&self, acc: i32) -> i32 {
        match self {
            Some(value) => value.fold_hash(acc),
            None => acc,
        }
    }
}

/// Folds an ordered sequence of possibly-absent elements into `acc`.
///
/// Each slot first shifts the accumulator, so a missing element still
/// occupies its position; present elements are then combined in.
pub(crate) fn fold_sequence<'a, T, I>(acc: i32, items: I) -> i32
where
    T: ValueHash + 'a,
    I: IntoIterator<Item = Option<&'a T>>,
{
    items.into_iter().fold(acc, |acc, item| {
        let acc = acc.wrapping_mul(31);
        match item {
            Some(item) => combine(acc, item.value_hash()),
            None => acc,
        }
    })
}

impl<T: ValueHash> ValueHash for Vec<T> {
    fn value_hash(&self) -> i32 {
        self.fold_hash(SEED)
    }

    fn fold_hash(&self, acc: i32) -> i32 {
        fold_sequence(acc, self.iter().map(Some))
    }
}

impl<K: ValueHash, V: ValueHash, S> ValueHash for IndexMap<K, V, S> {
    fn value_hash(&self) -> i32 {
        self.iter()
            .fold(0, |xor, (k, v)| xor ^ k.value_hash() ^ v.value_hash())
    }
}

impl ValueHash for str {
    fn value_hash(&self) -> i32 {
        std_hash(self)
    }
}

impl ValueHash for String {
    fn value_hash(&self) -> i32 {
        self.as_str().value_hash()
    }
}

impl ValueHash for bool {
    fn value_hash(&self) -> i32 {
        i32::from(*self)
    }
}

impl ValueHash for i32 {
    fn value_hash(&self) -> i32 {
        *self
    }
}

impl ValueHash for i64 {
    fn value_hash(&self) -> i32 {
        let bits = *self as u64;
        (bits ^ (bits >> 32)) as i32
    }
}

impl ValueHash for u64 {
    fn value_hash(&self) -> i32 {
        (*self ^ (*self >> 32)) as i32
    }
}

impl ValueHash for f64 {
    fn value_hash(&self) -> i32 {
        // -0.0 == 0.0, so both must land on the same bits.
        let normalized = if *self == 0.0 { 0.0_f64 } else { *self };
        normalized.to_bits().value_hash()
    }
}

impl ValueHash for DateTime<Utc> {
    fn value_hash(&self) -> i32 {
        combine(
            self.timestamp().value_hash(),
            i64::from(self.timestamp_subsec_nanos()).value_hash(),
        )
    }
}

impl ValueHash for serde_json::Value {
    fn value_hash(&self) -> i32 {
        use serde_json::Value;

        match self {
            Value::Null => 0,
            Value::Bool(b) => b.value_hash(),
            // `Number` equality is representation-sensitive (1 != 1.0), and
            // so is its `Display`.
            Value::Number(n) => std_hash(&n.to_string()),
            Value::String(s) => s.value_hash(),
            Value::Array(items) => items.value_hash(),
            Value::Object(map) => map
                .iter()
                .fold(0, |xor, (k, v)| xor ^ k.value_hash() ^ v.value_hash()),
        }
    }
}
