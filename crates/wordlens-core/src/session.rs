use std::collections::HashMap;

use crate::types::Definition;

/// Words seen this session, in first-resolved order.
///
/// Append-only and deduplicating: re-resolving a known word changes nothing,
/// so the visible list position of every word is stable for the life of the
/// process.
#[derive(Default)]
pub struct SessionCache {
    entries: HashMap<String, Vec<Definition>>,
    order: Vec<String>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved word. No-op when the word is already known; the
    /// first-seen definitions and list position win.
    pub fn upsert(&mut self, word: &str, definitions: Vec<Definition>) {
        if self.entries.contains_key(word) {
            return;
        }
        self.order.push(word.to_string());
        self.entries.insert(word.to_string(), definitions);
    }

    pub fn get(&self, word: &str) -> Option<&[Definition]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// Insertion-ordered word list driving the selection menu.
    pub fn ordered_words(&self) -> &[String] {
        &self.order
    }

    /// Word at a menu position, for mapping a selection index back to a key.
    pub fn word_at(&self, index: usize) -> Option<&str> {
        self.order.get(index).map(String::as_str)
    }

    pub fn position_of(&self, word: &str) -> Option<usize> {
        self.order.iter().position(|w| w == word)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
