//! Medline tagged-text reader.
//!
//! Dashed grammar, blank-line termination, per
//! `bibutils_sys/src/medin.c`. All Medline references are journal
//! articles, so there is no per-reference type tag — `type_of` resolves
//! to the format's single default entry regardless of input.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::field_store::level::MAIN;
use crate::reference::Reference;
use crate::readers::ris::{split_tagged_references, LineStyle, Terminator};
use crate::readers::FormatReader;

/// Medline reader.
#[derive(Debug, Default)]
pub struct MedlineReader;

impl FormatReader for MedlineReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let blocks = split_tagged_references(source, Terminator::BlankLine, LineStyle::Dashed);
        Ok(blocks
            .into_iter()
            .enumerate()
            .map(|(i, lines)| {
                let mut r = Reference::new();
                r.set_internal_type("Journal Article");
                let mut found_id = false;
                for (tag, value) in lines {
                    if tag.eq_ignore_ascii_case("PMID") && !found_id {
                        r.set_refnum(value.clone());
                        found_id = true;
                    }
                    r.fields.add(tag.to_ascii_uppercase(), value, MAIN);
                }
                if !found_id {
                    diagnostics.warn_reference(i, "no PMID found");
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
    fn parses_medline_reference_with_pmid() {
        let src = "PMID- 12345\nTI  - A Title\n\nPMID- 67890\nTI  - Another\n";
        let mut diag = Diagnostics::new();
        let refs = MedlineReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].refnum(), Some("12345"));
        assert_eq!(refs[0].internal_type(), Some("Journal Article"));
    }
}
