//! In-memory note collection.
//!
//! # Responsibility
//! - Hold the currently displayed set of notes keyed by id, in arrival
//!   order.
//! - Provide the three event-application primitives: upsert, amend,
//!   remove.
//!
//! # Invariants
//! - No two entries share an id.
//! - `order` contains exactly the keys of `entries`, each once.
//! - Lookups are map-keyed; there is no linear scan with an unguarded
//!   index write.

use crate::model::note::{Note, NoteId};
use std::collections::HashMap;

/// Insertion-ordered note set keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: HashMap<NoteId, Note>,
    order: Vec<NoteId>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection with a freshly fetched page.
    ///
    /// Duplicate ids in the input collapse last-write-wins, matching
    /// event-arrival semantics.
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.entries.clear();
        self.order.clear();
        for note in notes {
            self.upsert(note);
        }
    }

    /// Insert-or-replace by id; a replaced entry moves to the end.
    ///
    /// This is the Created-event semantic: update-via-recreate changes
    /// display order on purpose.
    pub fn upsert(&mut self, note: Note) {
        let id = note.id;
        if self.entries.insert(id, note).is_some() {
            self.order.retain(|existing| *existing != id);
        }
        self.order.push(id);
    }

    /// Replaces an existing entry in place, preserving its position.
    ///
    /// Returns `false` when the id is absent; the caller treats that as
    /// an expected race, not an error.
    pub fn amend(&mut self, note: Note) -> bool {
        match self.entries.get_mut(&note.id) {
            Some(existing) => {
                *existing = note;
                true
            }
            None => false,
        }
    }

    /// Removes an entry by id; absent ids return `None`.
    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        let removed = self.entries.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        Some(removed)
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Iterates notes in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Collection;
    use crate::model::note::Note;
    use uuid::Uuid;

    fn note(title: &str) -> Note {
        Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            owner: "ada".to_string(),
        }
    }

    fn titles(collection: &Collection) -> Vec<&str> {
        collection.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn upsert_keeps_one_entry_per_id_with_latest_payload() {
        let mut collection = Collection::new();
        let first = note("a");
        let mut replacement = first.clone();
        replacement.title = "a2".to_string();

        collection.upsert(note("other"));
        collection.upsert(first);
        collection.upsert(replacement);

        assert_eq!(collection.len(), 2);
        // Replaced entry moves to the end: all other entries, then the
        // new one.
        assert_eq!(titles(&collection), vec!["other", "a2"]);
    }

    #[test]
    fn amend_replaces_in_place_and_preserves_position() {
        let mut collection = Collection::new();
        let target = note("b");
        collection.upsert(note("a"));
        collection.upsert(target.clone());
        collection.upsert(note("c"));

        let mut changed = target.clone();
        changed.title = "b2".to_string();
        assert!(collection.amend(changed));
        assert_eq!(titles(&collection), vec!["a", "b2", "c"]);
    }

    #[test]
    fn amend_of_absent_id_is_a_noop() {
        let mut collection = Collection::new();
        collection.upsert(note("a"));
        assert!(!collection.amend(note("ghost")));
        assert_eq!(titles(&collection), vec!["a"]);
    }

    #[test]
    fn remove_takes_out_exactly_one_matching_entry() {
        let mut collection = Collection::new();
        let target = note("a");
        collection.upsert(target.clone());
        collection.upsert(note("b"));

        let removed = collection.remove(target.id);
        assert_eq!(removed.map(|n| n.title), Some("a".to_string()));
        assert_eq!(collection.len(), 1);
        assert!(collection.remove(target.id).is_none());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn replace_all_collapses_duplicate_ids_last_write_wins() {
        let mut collection = Collection::new();
        collection.upsert(note("stale"));

        let twin = note("v1");
        let mut newer = twin.clone();
        newer.title = "v2".to_string();
        collection.replace_all(vec![twin, newer]);

        assert_eq!(titles(&collection), vec!["v2"]);
    }
}
