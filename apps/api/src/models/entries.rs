//! Ordered, never-empty entry sequences (work experience, education).
//!
//! The minimum-one rule lives in the type: there is no constructor, mutator, or
//! deserialization path that yields an empty list.

use std::collections::HashSet;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Opaque, stable identity of an entry within its list.
pub type EntryId = Uuid;

/// Implemented by every item that can live in an `EntryList`.
pub trait Entry: Clone {
    fn id(&self) -> EntryId;

    /// A blank entry carrying the given id.
    fn blank(id: EntryId) -> Self;
}

/// Outcome of a removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Removal {
    Removed,
    /// The list held a single entry; nothing was removed.
    LastEntryKept,
    NotFound,
}

#[derive(Debug, Error, PartialEq)]
pub enum EntryListError {
    #[error("entry list must contain at least one entry")]
    Empty,

    #[error("duplicate entry id {0}")]
    DuplicateId(EntryId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<T>", into = "Vec<T>")]
#[serde(bound(
    serialize = "T: Entry + Serialize",
    deserialize = "T: Entry + Deserialize<'de>"
))]
pub struct EntryList<T: Entry> {
    items: Vec<T>,
}

impl<T: Entry> EntryList<T> {
    /// A list holding one blank entry.
    pub fn new() -> Self {
        Self {
            items: vec![T::blank(Uuid::new_v4())],
        }
    }

    /// Appends a blank entry and returns its freshly assigned id.
    pub fn push_blank(&mut self) -> EntryId {
        let id = self.fresh_id();
        self.items.push(T::blank(id));
        id
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.items.iter_mut().find(|e| e.id() == id)
    }

    pub fn remove(&mut self, id: EntryId) -> Removal {
        let Some(pos) = self.items.iter().position(|e| e.id() == id) else {
            return Removal::NotFound;
        };
        if self.items.len() == 1 {
            return Removal::LastEntryKept;
        }
        self.items.remove(pos);
        Removal::Removed
    }

    fn fresh_id(&self) -> EntryId {
        loop {
            let candidate = Uuid::new_v4();
            if !self.items.iter().any(|e| e.id() == candidate) {
                return candidate;
            }
        }
    }
}

impl<T: Entry> Default for EntryList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entry> Deref for EntryList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: Entry> TryFrom<Vec<T>> for EntryList<T> {
    type Error = EntryListError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        if items.is_empty() {
            return Err(EntryListError::Empty);
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(EntryListError::DuplicateId(item.id()));
            }
        }
        Ok(Self { items })
    }
}

impl<T: Entry> From<EntryList<T>> for Vec<T> {
    fn from(list: EntryList<T>) -> Self {
        list.items
    }
}
