//! NBIB (PubMed) tagged-text reader.
//!
//! Same dashed grammar and blank-line termination as Medline (NBIB is
//! PubMed's export dialect of the Medline tagged format), per
//! `bibutils_sys/src/nbibin.c`.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::field_store::level::MAIN;
use crate::reference::Reference;
use crate::readers::ris::{split_tagged_references, LineStyle, Terminator};
use crate::readers::FormatReader;

/// NBIB reader.
#[derive(Debug, Default)]
pub struct NbibReader;

impl FormatReader for NbibReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let blocks = split_tagged_references(source, Terminator::BlankLine, LineStyle::Dashed);
        Ok(blocks
            .into_iter()
            .enumerate()
            .map(|(i, lines)| {
                let mut r = Reference::new();
                let mut has_pt = false;
                for (tag, value) in lines {
                    if tag.eq_ignore_ascii_case("PT") {
                        r.set_internal_type(value);
                        has_pt = true;
                    } else if tag.eq_ignore_ascii_case("PMID") {
                        r.set_refnum(value.clone());
                        r.fields.add("PMID", value, MAIN);
                    } else {
                        r.fields.add(tag.to_ascii_uppercase(), value, MAIN);
                    }
                }
                if !has_pt {
                    r.set_internal_type("Journal Article");
                    diagnostics.warn_reference(i, "no PT tag; defaulting to Journal Article");
                }
                r
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nbib_reference() {
        let src = "PMID- 999\nTI  - Some Title\n\nPMID- 1000\nTI  - Other\n";
        let mut diag = Diagnostics::new();
        let refs = NbibReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].refnum(), Some("999"));
        assert_eq!(refs[0].internal_type(), Some("Journal Article"));
    }
}
