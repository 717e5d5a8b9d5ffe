//! Copac tagged-text reader.
//!
//! Dash-separated tag grammar like RIS, but references terminate on a
//! blank line rather than an `ER` sentinel, per `bibutils_sys/src/copacin.c`.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::reference::Reference;
use crate::readers::ris::{build_reference, split_tagged_references, LineStyle, Terminator};
use crate::readers::FormatReader;

/// Copac reader.
#[derive(Debug, Default)]
pub struct CopacReader;

impl FormatReader for CopacReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let blocks = split_tagged_references(source, Terminator::BlankLine, LineStyle::Dashed);
        Ok(blocks
            .into_iter()
            .enumerate()
            .map(|(i, lines)| build_reference(lines, "Type", diagnostics, i))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_store::level::MAIN;

    #[test]
    fn blank_line_terminates_copac_reference() {
        let src = "Type - Book\nTitle - A Title\n\nType - Article\nTitle - B Title\n";
        let mut diag = Diagnostics::new();
        let refs = CopacReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].fields.findv(MAIN, "TITLE"), Some("A Title"));
    }
}
