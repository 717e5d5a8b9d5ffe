//! ISI / Web of Science tagged-text reader.
//!
//! Same dashed grammar and `ER` sentinel as RIS, per
//! `bibutils_sys/vendor/isiout.c`'s companion reader, but with ISI's own
//! two-letter tag vocabulary (`PT`, `TI`, `AU`, …).

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::reference::Reference;
use crate::readers::ris::{build_reference, split_tagged_references, LineStyle, Terminator};
use crate::readers::FormatReader;

/// ISI reader.
#[derive(Debug, Default)]
pub struct IsiReader;

impl FormatReader for IsiReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let blocks = split_tagged_references(source, Terminator::SentinelTag("ER"), LineStyle::Dashed);
        Ok(blocks
            .into_iter()
            .enumerate()
            .map(|(i, lines)| build_reference(lines, "PT", diagnostics, i))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_store::level::MAIN;

    #[test]
    fn parses_isi_reference() {
        let src = "PT - J\nTI - A Title\nAU - Smith, John\nER -\n";
        let mut diag = Diagnostics::new();
        let refs = IsiReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].internal_type(), Some("J"));
        assert_eq!(refs[0].fields.findv(MAIN, "TI"), Some("A Title"));
    }
}
