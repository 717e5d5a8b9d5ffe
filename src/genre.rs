//! Genre authority lookup.
//!
//! The source consults the full MARC/bibutils genre authority lists; this
//! crate's Non-goal §1 scopes out maintaining that list and instead exposes
//! the same `is_known_genre(kind, name)` predicate backed by a small
//! embedded table covering the genres the bundled readers/writers actually
//! emit.

/// Which authority a genre string is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreAuthority {
    /// The Library of Congress MARC genre/form authority.
    Marc,
    /// The bibutils-local extension vocabulary.
    Bibutils,
}

const MARC_GENRES: &[&str] = &[
    "periodical",
    "thesis",
    "conference publication",
    "technical report",
    "festschrift",
    "government publication",
];

const BIBUTILS_GENRES: &[&str] = &[
    "academic journal",
    "magazine",
    "book chapter",
    "white paper",
    "preprint",
];

/// True if `name` is a recognised genre string under `authority`, checked
/// case-insensitively.
#[must_use]
pub fn is_known_genre(kind: GenreAuthority, name: &str) -> bool {
    let table = match kind {
        GenreAuthority::Marc => MARC_GENRES,
        GenreAuthority::Bibutils => BIBUTILS_GENRES,
    };
    table.iter().any(|g| g.eq_ignore_ascii_case(name))
}

/// Tag to store a genre value under, given which authority recognised it
/// (or `GENRE:UNKNOWN` if neither did).
#[must_use]
pub fn genre_tag(name: &str) -> &'static str {
    if is_known_genre(GenreAuthority::Marc, name) {
        "GENRE:MARC"
    } else if is_known_genre(GenreAuthority::Bibutils, name) {
        "GENRE:BIBUTILS"
    } else {
        "GENRE:UNKNOWN"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_marc_genre_case_insensitively() {
        assert!(is_known_genre(GenreAuthority::Marc, "Thesis"));
        assert!(!is_known_genre(GenreAuthority::Marc, "unicorn sighting"));
    }

    #[test]
    fn genre_tag_prefers_marc_then_bibutils_then_unknown() {
        assert_eq!(genre_tag("thesis"), "GENRE:MARC");
        assert_eq!(genre_tag("preprint"), "GENRE:BIBUTILS");
        assert_eq!(genre_tag("nonsense"), "GENRE:UNKNOWN");
    }
}
