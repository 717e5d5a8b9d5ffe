//! Per-format reference writers.
//!
//! Mirrors the teacher's `FormatWriter` trait shape: one method
//! (`write_all`) that streams a header, one reference body per entry, and a
//! footer. Writer-side options ([`crate::params::WriterOptions`]) are
//! threaded through rather than baked into each writer, since the same
//! `ReferenceCollection` may be written more than once with different
//! formatting flags.

pub mod adsabs;
pub mod bibtex;
pub mod endnote;
pub mod isi;
pub mod mods;
pub mod nbib;
pub mod ris;
pub mod word2007;

use crate::error::Result;
use crate::params::WriterOptions;
use crate::reference::ReferenceCollection;

/// A format-specific reference writer producing a complete in-memory
/// document (not streaming, matching [`crate::readers::FormatReader`]'s
/// batch orientation).
pub trait FormatWriter {
    /// Render every reference in `collection` as one complete document.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing itself fails (this crate's writers
    /// are infallible string builders in practice, but the trait keeps the
    /// `Result` for parity with a future streaming sink).
    fn write_all(&self, collection: &ReferenceCollection, options: &WriterOptions) -> Result<String>;
}

/// Escape `&`, `<`, `>`, `"` for inclusion in XML text/attribute content.
#[must_use]
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reconstruct a `Family, Given M.`-style display name from the store's
/// `Family|Given1|Given2||Suffix` encoding, for writers that render a
/// single joined name string rather than structured name parts.
#[must_use]
pub fn display_name(encoded: &str) -> String {
    crate::name::build_with_comma(encoded)
}

/// Split an encoded `Family|Given1|Given2||Suffix` name into
/// `(family, given_joined)` for writers (Word 2007, some XML formats) that
/// need family/given as separate elements rather than one joined string.
#[must_use]
pub fn split_name_parts(encoded: &str) -> (String, String) {
    let (name_part, _suffix) = match encoded.split_once("||") {
        Some((n, s)) => (n, Some(s)),
        None => (encoded, None),
    };
    let mut parts = name_part.split('|');
    let family = parts.next().unwrap_or_default().to_string();
    let given = parts.collect::<Vec<_>>().join(" ");
    (family, given)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_reserved_xml_characters() {
        assert_eq!(escape_xml("A & B <tag>"), "A &amp; B &lt;tag&gt;");
    }

    #[test]
    fn splits_encoded_name_into_family_and_given() {
        assert_eq!(split_name_parts("Smith|John|Q"), ("Smith".to_string(), "John Q".to_string()));
    }
}
