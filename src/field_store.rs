//! The tagged, levelled field store shared by every reference.
//!
//! A [`FieldStore`] is an ordered sequence of [`FieldEntry`] values — the
//! Rust re-expression of the source's `fields` ADT. Unlike the teacher
//! crate's MARC [`Record`](https://docs.rs/mrrc), which keys fields by a
//! closed tag vocabulary into an `IndexMap<String, Vec<Field>>`, this store
//! is deliberately flat and insertion-ordered: across a dozen exchange
//! formats the tag vocabulary is open-ended and the same tag frequently
//! repeats at different container [`Level`]s (a `TITLE` at the work level
//! and another at the series level), so a flat `Vec` with linear scans is
//! both simpler and matches the source's actual access pattern (most
//! lookups are "does this reference have an X", not "give me the map").

use serde::{Deserialize, Serialize};

/// Container depth for a field entry.
pub mod level {
    /// The work itself (an article, a book, a thesis).
    pub const MAIN: i32 = 0;
    /// The immediate container (journal, proceedings, containing book).
    pub const HOST: i32 = 1;
    /// The series containing the host.
    pub const SERIES: i32 = 2;
    /// The original work, for a reprint's "original of" fields.
    pub const ORIG: i32 = -1;
    /// Wildcard: matches any level in a query. Never stored on an entry.
    pub const ANY: i32 = -9999;
}

/// One (tag, value, level) triple plus the converter's `used` bookkeeping
/// flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    /// Internal canonical tag, e.g. `AUTHOR`, `PAGES:START`, `DATE:YEAR`.
    pub tag: String,
    /// The text value. May be empty; writers skip empty values.
    pub value: String,
    /// Container depth (see [`level`]). Never [`level::ANY`] on a stored
    /// entry — that constant is a query wildcard only.
    pub level: i32,
    /// Set by the converter once this entry has been consumed, so later
    /// passes (title assembly, cross-reference copy) don't double-emit it.
    pub used: bool,
}

impl FieldEntry {
    fn new(tag: impl Into<String>, value: impl Into<String>, level: i32) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
            level,
            used: false,
        }
    }

    fn tag_eq(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    fn level_matches(&self, level: i32) -> bool {
        level == self::level::ANY || self.level == level
    }
}

/// An ordered, tagged, levelled sequence of fields for one reference.
///
/// Insertion order is preserved. Duplicate `(tag, level)` pairs are
/// permitted — callers that want "last write wins" use
/// [`FieldStore::replace_or_add`]. Tag comparison is always
/// case-insensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldStore {
    entries: Vec<FieldEntry>,
}

impl FieldStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry unconditionally.
    pub fn add(&mut self, tag: impl Into<String>, value: impl Into<String>, level: i32) -> usize {
        self.entries.push(FieldEntry::new(tag, value, level));
        self.entries.len() - 1
    }

    /// Append a new entry, with no uniqueness pre-check. Identical to
    /// [`FieldStore::add`] in this implementation — the distinction in the
    /// source API documents intent (name lists always "can dup") rather
    /// than a different code path, since `add` never deduplicates either.
    pub fn add_can_dup(
        &mut self,
        tag: impl Into<String>,
        value: impl Into<String>,
        level: i32,
    ) -> usize {
        self.add(tag, value, level)
    }

    /// Overwrite the most recently added entry with the same `(tag, level)`,
    /// or append a new one if none exists.
    pub fn replace_or_add(&mut self, tag: impl Into<String>, value: impl Into<String>, level: i32) {
        let tag = tag.into();
        let value = value.into();
        if let Some(entry) = self
            .entries
            .iter_mut()
            .rev()
            .find(|e| e.tag_eq(&tag) && e.level == level)
        {
            entry.value = value;
        } else {
            self.entries.push(FieldEntry::new(tag, value, level));
        }
    }

    /// Find the index of the first entry matching `tag` at `level`
    /// (`level::ANY` matches any level). Tag comparison is case-insensitive.
    #[must_use]
    pub fn find(&self, tag: &str, level: i32) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.tag_eq(tag) && e.level_matches(level))
    }

    /// Value of the first entry matching `tag` at `level`, if any.
    #[must_use]
    pub fn findv(&self, level: i32, tag: &str) -> Option<&str> {
        self.find(tag, level).map(|i| self.entries[i].value.as_str())
    }

    /// Value of the first entry, at `level`, matching the first of `tags`
    /// that has any value there.
    #[must_use]
    pub fn findv_firstof(&self, level: i32, tags: &[&str]) -> Option<&str> {
        tags.iter().find_map(|t| self.findv(level, t))
    }

    /// All values matching `tag` at `level`, in insertion order.
    #[must_use]
    pub fn findv_each(&self, level: i32, tag: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.tag_eq(tag) && e.level_matches(level))
            .map(|e| e.value.as_str())
            .collect()
    }

    /// Tag at index `i`.
    #[must_use]
    pub fn tag(&self, i: usize) -> &str {
        &self.entries[i].tag
    }

    /// Value at index `i`.
    #[must_use]
    pub fn value(&self, i: usize) -> &str {
        &self.entries[i].value
    }

    /// Level at index `i`.
    #[must_use]
    pub fn level(&self, i: usize) -> i32 {
        self.entries[i].level
    }

    /// Number of entries.
    #[must_use]
    pub fn num(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest level present, or `None` if the store is empty.
    #[must_use]
    pub fn max_level(&self) -> Option<i32> {
        self.entries.iter().map(|e| e.level).max()
    }

    /// Mark entry `i` as consumed.
    pub fn set_used(&mut self, i: usize) {
        self.entries[i].used = true;
    }

    /// Whether entry `i` has been consumed.
    #[must_use]
    pub fn used(&self, i: usize) -> bool {
        self.entries[i].used
    }

    /// Clear the `used` flag on every entry.
    pub fn clear_used_all(&mut self) {
        for e in &mut self.entries {
            e.used = false;
        }
    }

    /// Iterate over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldEntry> {
        self.entries.iter()
    }

    /// Iterate over `(index, entry)` pairs, useful when a caller needs to
    /// call [`FieldStore::set_used`] while walking.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &FieldEntry)> {
        self.entries.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_store::level::{ANY, HOST, MAIN};

    #[test]
    fn add_and_find_case_insensitive() {
        let mut s = FieldStore::new();
        s.add("AUTHOR", "Smith|John", MAIN);
        assert_eq!(s.find("author", ANY), Some(0));
        assert_eq!(s.findv(MAIN, "Author"), Some("Smith|John"));
    }

    #[test]
    fn level_any_is_wildcard_only_in_queries() {
        let mut s = FieldStore::new();
        s.add("TITLE", "A", MAIN);
        s.add("TITLE", "B", HOST);
        assert_eq!(s.findv(ANY, "TITLE"), Some("A"));
        assert_eq!(s.findv_each(ANY, "TITLE"), vec!["A", "B"]);
        assert_eq!(s.findv_each(HOST, "TITLE"), vec!["B"]);
    }

    #[test]
    fn duplicate_tag_level_permitted() {
        let mut s = FieldStore::new();
        s.add_can_dup("AUTHOR", "Jones|Alice", MAIN);
        s.add_can_dup("AUTHOR", "Lee|Bob", MAIN);
        assert_eq!(s.findv_each(MAIN, "AUTHOR"), vec!["Jones|Alice", "Lee|Bob"]);
    }

    #[test]
    fn replace_or_add_overwrites_last_matching() {
        let mut s = FieldStore::new();
        s.add("YEAR", "2019", MAIN);
        s.replace_or_add("YEAR", "2020", MAIN);
        assert_eq!(s.num(), 1);
        assert_eq!(s.findv(MAIN, "YEAR"), Some("2020"));
    }

    #[test]
    fn replace_or_add_appends_when_absent() {
        let mut s = FieldStore::new();
        s.replace_or_add("YEAR", "2020", MAIN);
        assert_eq!(s.num(), 1);
    }

    #[test]
    fn used_flag_roundtrip() {
        let mut s = FieldStore::new();
        let i = s.add("TITLE", "A", MAIN);
        assert!(!s.used(i));
        s.set_used(i);
        assert!(s.used(i));
        s.clear_used_all();
        assert!(!s.used(i));
    }

    #[test]
    fn max_level_of_empty_store_is_none() {
        assert_eq!(FieldStore::new().max_level(), None);
    }

    #[test]
    fn findv_firstof_priority_order() {
        let mut s = FieldStore::new();
        s.add("NUMBER", "5", MAIN);
        assert_eq!(s.findv_firstof(MAIN, &["ISSUE", "NUMBER"]), Some("5"));
        s.add("ISSUE", "3", MAIN);
        // ISSUE was added after NUMBER but is still listed first in priority.
        assert_eq!(s.findv_firstof(MAIN, &["ISSUE", "NUMBER"]), Some("3"));
    }
}
