//! A single bibliographic reference and the collection that owns them.
//!
//! Mirrors the teacher's `Record`/collection split (`record.rs`'s `Record`,
//! `bibl.h`'s `bibl`): a reference owns one [`FieldStore`] plus the two
//! pseudo-tags every reader may populate (`INTERNAL_TYPE`, `REFNUM`), and a
//! [`ReferenceCollection`] is an ordinary growable `Vec` that owns its
//! references and drops them when it is dropped — there is no
//! reference-counted sharing anywhere in the core (spec §5).

use crate::field_store::{level, FieldStore};
use serde::{Deserialize, Serialize};

/// Pseudo-tag carrying the source format's raw type string (e.g. BibTeX's
/// `@article`, EndNote's `Journal Article`), before the typer resolves it
/// to a [`crate::reftypes::Reftype`].
pub const INTERNAL_TYPE: &str = "INTERNAL_TYPE";

/// Pseudo-tag carrying the source's citation key / record id, used by
/// cross-reference resolution to match children to parents.
pub const REFNUM: &str = "REFNUM";

/// Pseudo-tag carrying the resolved [`crate::reftypes::Reftype`]'s stable
/// tag (`Reftype::as_tag`), set once per reference after typing so writers
/// can translate it into their own output format's type vocabulary instead
/// of assuming `INTERNAL_TYPE` is already in that vocabulary.
pub const REFTYPE: &str = "REFTYPE";

/// One bibliographic reference: a field store plus convenience accessors
/// for the two pseudo-tags every reader may populate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reference {
    /// The reference's tagged, levelled fields.
    pub fields: FieldStore,
}

impl Reference {
    /// Create an empty reference.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw type string from the source format, if the reader provided
    /// one.
    #[must_use]
    pub fn internal_type(&self) -> Option<&str> {
        self.fields.findv(level::MAIN, INTERNAL_TYPE)
    }

    /// Set the raw type string.
    pub fn set_internal_type(&mut self, raw_type: impl Into<String>) {
        self.fields.replace_or_add(INTERNAL_TYPE, raw_type, level::MAIN);
    }

    /// The source citation key / record id, if any.
    #[must_use]
    pub fn refnum(&self) -> Option<&str> {
        self.fields.findv(level::MAIN, REFNUM)
    }

    /// Set the citation key / record id.
    pub fn set_refnum(&mut self, refnum: impl Into<String>) {
        self.fields.replace_or_add(REFNUM, refnum, level::MAIN);
    }

    /// The resolved canonical reference type, if the driver has typed this
    /// reference yet.
    #[must_use]
    pub fn reftype(&self) -> Option<crate::reftypes::Reftype> {
        self.fields.findv(level::MAIN, REFTYPE).map(crate::reftypes::Reftype::from_tag)
    }

    /// Set the resolved canonical reference type.
    pub fn set_reftype(&mut self, reftype: crate::reftypes::Reftype) {
        self.fields.replace_or_add(REFTYPE, reftype.as_tag(), level::MAIN);
    }
}

/// An ordered, growable collection of references.
///
/// Ownership is transferred into the collection on append (`Vec::push`) and
/// released when the collection is dropped, same as the source's `bibl`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceCollection {
    refs: Vec<Reference>,
}

impl ReferenceCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reference, taking ownership of it.
    pub fn add(&mut self, reference: Reference) {
        self.refs.push(reference);
    }

    /// Number of references in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// True if the collection holds no references.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Reference at position `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&Reference> {
        self.refs.get(i)
    }

    /// Mutable reference at position `i`.
    pub fn get_mut(&mut self, i: usize) -> Option<&mut Reference> {
        self.refs.get_mut(i)
    }

    /// Find the index of the reference whose `REFNUM` equals `refnum`.
    #[must_use]
    pub fn find_by_refnum(&self, refnum: &str) -> Option<usize> {
        self.refs.iter().position(|r| r.refnum() == Some(refnum))
    }

    /// Iterate over all references.
    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.refs.iter()
    }

    /// Iterate over all references mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Reference> {
        self.refs.iter_mut()
    }
}

impl std::ops::Index<usize> for ReferenceCollection {
    type Output = Reference;

    fn index(&self, index: usize) -> &Self::Output {
        &self.refs[index]
    }
}

impl FromIterator<Reference> for ReferenceCollection {
    fn from_iter<T: IntoIterator<Item = Reference>>(iter: T) -> Self {
        Self {
            refs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pseudo_tags_roundtrip() {
        let mut r = Reference::new();
        r.set_internal_type("article");
        r.set_refnum("key1");
        assert_eq!(r.internal_type(), Some("article"));
        assert_eq!(r.refnum(), Some("key1"));
    }

    #[test]
    fn collection_find_by_refnum() {
        let mut c = ReferenceCollection::new();
        let mut parent = Reference::new();
        parent.set_refnum("p");
        c.add(parent);
        let mut child = Reference::new();
        child.set_refnum("c");
        c.add(child);
        assert_eq!(c.find_by_refnum("p"), Some(0));
        assert_eq!(c.find_by_refnum("missing"), None);
    }
}
