//! In-memory list state with provisional rows
//!
//! After a mutation the server's returned object is the canonical row. When
//! the server returns nothing usable, a narrow local patch is applied instead
//! and the row is flagged provisional until the next full refetch replaces
//! the list.

use shared::models::{CatalogEntry, Category, Store};

/// Records addressable by a stable key
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for CatalogEntry {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Store {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Category {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    pub item: T,
    /// Locally patched; not yet confirmed by a refetch
    pub provisional: bool,
}

/// Result of [`Listing::apply_update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowUpdate {
    /// Replaced with the server's object
    Canonical,
    /// Patched locally and marked provisional
    Provisional,
    /// No row with that key
    Missing,
}

#[derive(Debug, Clone)]
pub struct Listing<T> {
    rows: Vec<Row<T>>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Keyed> Listing<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full refetch: every row becomes canonical
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.rows = items
            .into_iter()
            .map(|item| Row {
                item,
                provisional: false,
            })
            .collect();
    }

    /// Apply a mutation result to one row.
    ///
    /// `canonical` is the object the server returned, if any; `patch` is used
    /// only when it is absent.
    pub fn apply_update<F>(&mut self, key: &str, canonical: Option<T>, patch: F) -> RowUpdate
    where
        F: FnOnce(&mut T),
    {
        let Some(row) = self.rows.iter_mut().find(|r| r.item.key() == key) else {
            return RowUpdate::Missing;
        };
        match canonical {
            Some(item) => {
                row.item = item;
                row.provisional = false;
                RowUpdate::Canonical
            }
            None => {
                patch(&mut row.item);
                row.provisional = true;
                RowUpdate::Provisional
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.rows.iter().find(|r| r.item.key() == key).map(|r| &r.item)
    }

    pub fn is_provisional(&self, key: &str) -> bool {
        self.rows
            .iter()
            .any(|r| r.item.key() == key && r.provisional)
    }

    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(|r| &r.item)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
