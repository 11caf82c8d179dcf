use std::collections::HashMap;
use std::hash::Hash;

use crate::schema::FormValues;

/// What a single row is doing right now. Rows not tracked are just being viewed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowMode {
    Editing { draft: FormValues },
    Deleting { choice: String },
    Marking,
}

/// Per-row UI state, keyed by entity key.
#[derive(Clone, Debug)]
pub struct Rows<K> {
    modes: HashMap<K, RowMode>,
}

impl<K> Default for Rows<K> {
    fn default() -> Self {
        Self {
            modes: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Rows<K> {
    pub fn mode(&self, key: &K) -> Option<&RowMode> {
        self.modes.get(key)
    }

    pub fn is_busy(&self) -> bool {
        !self.modes.is_empty()
    }

    pub fn begin_edit(&mut self, key: K, draft: FormValues) {
        self.modes.insert(key, RowMode::Editing { draft });
    }

    /// Draft of a row in edit mode.
    pub fn draft_mut(&mut self, key: &K) -> Option<&mut FormValues> {
        match self.modes.get_mut(key) {
            Some(RowMode::Editing { draft }) => Some(draft),
            _ => None,
        }
    }

    pub fn begin_delete(&mut self, key: K) {
        self.modes.insert(
            key,
            RowMode::Deleting {
                choice: String::new(),
            },
        );
    }

    pub fn set_delete_choice(&mut self, key: &K, value: &str) {
        if let Some(RowMode::Deleting { choice }) = self.modes.get_mut(key) {
            *choice = value.to_string();
        }
    }

    pub fn begin_mark(&mut self, key: K) {
        self.modes.insert(key, RowMode::Marking);
    }

    /// Leave whatever mode the row was in; returns the mode that was dropped.
    pub fn finish(&mut self, key: &K) -> Option<RowMode> {
        self.modes.remove(key)
    }

    pub fn clear(&mut self) {
        self.modes.clear();
    }

    /// Keep state only for rows whose entity came back from the store with the
    /// same key and the same content. Anything else is a different entity now.
    pub(super) fn retain_unchanged<E: PartialEq>(
        &mut self,
        before: &[E],
        after: &[E],
        key: impl Fn(&E) -> K,
    ) {
        if self.modes.is_empty() {
            return;
        }
        let before: HashMap<K, &E> = before.iter().map(|e| (key(e), e)).collect();
        let after: HashMap<K, &E> = after.iter().map(|e| (key(e), e)).collect();
        self.modes
            .retain(|k, _| matches!((before.get(k), after.get(k)), (Some(a), Some(b)) if a == b));
    }
}
