//! Anchor map construction from article markup.
//!
//! Every `[[entity]]` / `[[entity|anchor]]` reference in the source markup
//! contributes an `anchor -> entity` pair. The article title is always seeded
//! first as a self-reference. Insertion is first-write-wins: a later reference
//! reusing an anchor never replaces the target registered earlier.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::cmp::Reverse;

/// Wikilinks without a namespace colon (`[[Category:..]]`, `[[File:..]]` never match).
pub static HYPERLINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^:]+?)\]\]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Surface text as it appears in the article body
    pub anchor: String,
    /// Canonical target name
    pub entity: String,
}

/// Insertion-ordered `anchor -> entity` map with insert-if-absent semantics.
#[derive(Debug, Clone, Default)]
pub struct AnchorMap {
    entries: Vec<Anchor>,
    positions: FxHashMap<String, usize>,
}

impl AnchorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map for one article: the title first, then every
    /// hyperlink reference in markup order.
    pub fn build(title: &str, source_text: &str) -> Self {
        let mut map = Self::new();
        map.insert(title, title);

        for caps in HYPERLINK_REGEX.captures_iter(source_text) {
            if let Some((entity, anchor)) = parse_reference(&caps[1]) {
                map.insert(anchor, entity);
            }
        }

        map
    }

    /// Inserts `anchor -> entity` unless the anchor is already registered.
    /// Returns `false` for duplicates and for blank anchors or entities.
    pub fn insert(&mut self, anchor: &str, entity: &str) -> bool {
        if anchor.trim().is_empty() || entity.trim().is_empty() {
            return false;
        }
        if self.positions.contains_key(anchor) {
            return false;
        }
        self.positions.insert(anchor.to_string(), self.entries.len());
        self.entries.push(Anchor {
            anchor: anchor.to_string(),
            entity: entity.to_string(),
        });
        true
    }

    pub fn get(&self, anchor: &str) -> Option<&str> {
        self.positions
            .get(anchor)
            .map(|&i| self.entries[i].entity.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Anchor> {
        self.entries.iter()
    }

    /// Entries ordered by anchor length (in characters), longest first.
    /// The sort is stable, so equal lengths keep insertion order. The
    /// position in this view is the placeholder index of the entry.
    pub fn by_length(&self) -> Vec<&Anchor> {
        let mut sorted: Vec<&Anchor> = self.entries.iter().collect();
        sorted.sort_by_key(|a| Reverse(a.anchor.chars().count()));
        sorted
    }
}

/// Splits the inner text of a `[[...]]` reference into `(entity, anchor)`.
///
/// Only the first `|` separates entity from anchor. A `#section` fragment is
/// cut from the entity. Returns `None` when either side is blank.
pub fn parse_reference(inner: &str) -> Option<(&str, &str)> {
    let (entity, anchor) = inner.split_once('|').unwrap_or((inner, inner));

    let entity = match entity.find('#') {
        Some(pos) => &entity[..pos],
        None => entity,
    };

    let (entity, anchor) = (entity.trim(), anchor.trim());
    if entity.is_empty() || anchor.is_empty() {
        return None;
    }
    Some((entity, anchor))
}
