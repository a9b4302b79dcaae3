//! The in-memory ordered collection of gallery entries and the viewer
//! selection that navigates it.
//!
//! The collection is the single source of truth for what the gallery
//! shows. Updates replace the ordered sequence as a whole: new items are
//! prepended (newest first), batches are inserted as a block at the front
//! with their input order preserved. Entries are never mutated or removed
//! individually; the collection only disappears with the process.
use serde::Serialize;

use crate::gallery::entry::ImageEntry;

#[derive(Debug, Default, Serialize)]
pub struct ImageCollection {
    entries: Vec<ImageEntry>,
}

impl ImageCollection {
    pub fn new() -> Self {
        ImageCollection { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Swap in a whole new sequence. Used by the initial import.
    pub fn replace_all(&mut self, entries: Vec<ImageEntry>) {
        self.entries = entries;
    }

    /// Put one new entry at the front.
    pub fn prepend(&mut self, entry: ImageEntry) {
        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(entry);
        next.append(&mut self.entries);
        self.entries = next;
    }

    /// Put a batch at the front as one block, keeping its input order.
    pub fn prepend_batch(&mut self, batch: Vec<ImageEntry>) {
        let mut next = batch;
        next.append(&mut self.entries);
        self.entries = next;
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&ImageEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }
}

/// Currently viewed entry, tracked by id, independent of the collection.
///
/// A selection can outlive the entry it points at (the collection may be
/// replaced wholesale), so every read validates the id and clears a
/// dangling selection instead of exposing it.
#[derive(Debug, Default)]
pub struct Selection {
    current: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Selection { current: None }
    }

    /// Select an entry by id. Refuses ids not present in the collection.
    pub fn select(&mut self, id: &str, collection: &ImageCollection) -> bool {
        if collection.index_of(id).is_some() {
            self.current = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Index of the current selection; clears and returns `None` when the
    /// selected id no longer exists.
    pub fn current_index(&mut self, collection: &ImageCollection) -> Option<usize> {
        let id = self.current.as_deref()?;
        match collection.index_of(id) {
            Some(index) => Some(index),
            None => {
                self.current = None;
                None
            }
        }
    }

    pub fn current<'c>(&mut self, collection: &'c ImageCollection) -> Option<&'c ImageEntry> {
        let index = self.current_index(collection)?;
        collection.at(index)
    }

    /// Move toward the front of the collection (the newest entry).
    pub fn next<'c>(&mut self, collection: &'c ImageCollection) -> Option<&'c ImageEntry> {
        let index = self.current_index(collection)?;
        if index == 0 {
            return None;
        }
        let entry = collection.at(index - 1)?;
        self.current = Some(entry.id.clone());
        Some(entry)
    }

    /// Move toward the back of the collection (older entries).
    pub fn prev<'c>(&mut self, collection: &'c ImageCollection) -> Option<&'c ImageEntry> {
        let index = self.current_index(collection)?;
        let entry = collection.at(index + 1)?;
        self.current = Some(entry.id.clone());
        Some(entry)
    }
}
