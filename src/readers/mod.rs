//! Per-format reference readers.
//!
//! Mirrors the teacher's `FormatReader` trait shape (`formats/traits.rs`):
//! one method that must be implemented (`read_reference`), with a default
//! batch method (`read_all`) layered on top. Unlike the teacher, a read
//! also threads a [`Diagnostics`] collector through, since malformed input
//! here is reported rather than aborting the batch (spec §7).

pub mod bibtex;
pub mod biblatex;
pub mod copac;
pub mod ebi;
pub mod endnote;
pub mod endnote_xml;
pub mod isi;
pub mod medline;
pub mod mods;
pub mod nbib;
pub mod ris;
pub mod word;

use crate::charset::Charset;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::reference::Reference;

/// Outcome of attempting to carve and parse one reference out of a source.
#[derive(Debug)]
pub enum ReadOutcome {
    /// No more input; nothing was read.
    Eof,
    /// A reference was produced and the source is now exhausted.
    Done(Reference),
    /// A reference was produced and more may follow.
    More(Reference),
}

/// A format-specific reference reader over a complete in-memory source
/// buffer. Readers are not streaming: every supported format's documents
/// are small enough in practice to hold entirely in memory, matching the
/// teacher's batch-oriented `read_all` default and this crate's explicit
/// single-threaded, synchronous pipeline (spec §5).
pub trait FormatReader {
    /// Parse every reference out of `source`, appending diagnostics for any
    /// recoverable structural problems encountered.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures that make the *entire* source
    /// unreadable (e.g. an encoding that cannot be decoded at all);
    /// per-reference structural problems are reported via `diagnostics`
    /// instead.
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>>;

    /// Charset detected in the source, if discoverable from a BOM or an
    /// XML declaration. Text formats with no such signal return
    /// [`Charset::Unknown`].
    fn detect_charset(&self, _source_bytes: &[u8]) -> Charset {
        Charset::Unknown
    }
}
