//! Link-reference store consulted by reference-style link and image parsers.
//!
//! How definitions get registered is up to the caller; the parsers only
//! query a [`ReferenceLookup`] by normalized label.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::inline::types::LinkDefinition;

/// Read-only lookup of link definitions by normalized label.
pub trait ReferenceLookup: Send + Sync {
    fn lookup(&self, key: &str) -> Option<&LinkDefinition>;
}

/// A `HashMap`-backed reference store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceMap {
    map: HashMap<String, LinkDefinition>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `definition` under `label`. The first definition of a
    /// label wins; returns false if the label was already defined or
    /// normalizes to nothing.
    pub fn insert(&mut self, label: &str, definition: LinkDefinition) -> bool {
        let key = normalize_label(label);
        if key.is_empty() || self.map.contains_key(&key) {
            return false;
        }
        self.map.insert(key, definition);
        true
    }

    /// Looks up an unnormalized label.
    pub fn get(&self, label: &str) -> Option<&LinkDefinition> {
        self.map.get(&normalize_label(label))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl ReferenceLookup for ReferenceMap {
    fn lookup(&self, key: &str) -> Option<&LinkDefinition> {
        self.map.get(key)
    }
}

/// Normalizes a reference label: trimmed, internal whitespace collapsed to
/// a single space, lowercased.
pub fn normalize_label(label: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let ws = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));
    ws.replace_all(label.trim(), " ").to_lowercase()
}
