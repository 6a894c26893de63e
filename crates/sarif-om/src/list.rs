//! Ordered lists of child nodes.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::hash::{SEED, ValueHash, fold_sequence};

/// An ordered list of owned child nodes.
///
/// SARIF producers occasionally emit `null` inside arrays of objects, and a
/// sparse log has to survive a load/clone/store cycle unchanged. So unlike a
/// plain `Vec<T>`, each slot here may be empty, and empty slots keep their
/// position through cloning, equality and hashing.
///
/// Most consumers only care about the populated slots: [`NodeList::iter`]
/// skips empty ones, while [`NodeList::slots`] yields every position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct NodeList<T>(Vec<Option<T>>);

impl<T> NodeList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of slots, including empty ones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the list has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a node.
    pub fn push(&mut self, node: T) {
        self.0.push(Some(node));
    }

    /// Appends an empty slot.
    pub fn push_null(&mut self) {
        self.0.push(None);
    }

    /// Returns the node at `index`, or `None` if the index is out of bounds
    /// or the slot is empty.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index).and_then(Option::as_ref)
    }

    /// Mutable variant of [`NodeList::get`].
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.0.get_mut(index).and_then(Option::as_mut)
    }

    /// Returns whether the slot at `index` exists and is empty.
    pub fn is_null(&self, index: usize) -> bool {
        matches!(self.0.get(index), Some(None))
    }

    /// Iterates over the populated slots, in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter().flatten()
    }

    /// Mutable variant of [`NodeList::iter`].
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut().flatten()
    }

    /// Iterates over every slot, in order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&T>> {
        self.0.iter().map(Option::as_ref)
    }

    /// Returns the position of the first populated slot matching `pred`.
    pub fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.0
            .iter()
            .position(|slot| slot.as_ref().is_some_and(&mut pred))
    }

    /// Consumes the list, returning its raw slots.
    pub fn into_slots(self) -> Vec<Option<T>> {
        self.0
    }
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for NodeList<T> {
    type Output = Option<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> IndexMut<usize> for NodeList<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl<T> From<Vec<T>> for NodeList<T> {
    fn from(nodes: Vec<T>) -> Self {
        nodes.into_iter().collect()
    }
}

impl<T> From<Vec<Option<T>>> for NodeList<T> {
    fn from(slots: Vec<Option<T>>) -> Self {
        Self(slots)
    }
}

impl<T, const N: usize> From<[T; N]> for NodeList<T> {
    fn from(nodes: [T; N]) -> Self {
        nodes.into_iter().collect()
    }
}

impl<T> FromIterator<T> for NodeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Some).collect())
    }
}

impl<T> FromIterator<Option<T>> for NodeList<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for NodeList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Some));
    }
}

impl<'a, T> IntoIterator for &'a NodeList<T> {
    type Item = &'a T;
    type IntoIter = std::iter::Flatten<std::slice::Iter<'a, Option<T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().flatten()
    }
}

impl<'a, T> IntoIterator for &'a mut NodeList<T> {
    type Item = &'a mut T;
    type IntoIter = std::iter::Flatten<std::slice::IterMut<'a, Option<T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut().flatten()
    }
}

impl<T: ValueHash> ValueHash for NodeList<T> {
    fn value_hash(&self) -> i32 {
        self.fold_hash(SEED)
    }

    fn fold_hash(&self, acc: i32) -> i32 {
        fold_sequence(acc, self.slots())
    }
}
