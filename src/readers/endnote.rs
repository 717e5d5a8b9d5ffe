//! EndNote tagged-text reader.
//!
//! Same tagged-line grammar as RIS, but a reference terminates on a blank
//! line rather than an `ER` sentinel, per `bibutils_sys/src/endin.c`.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::reference::Reference;
use crate::readers::ris::{build_reference, split_tagged_references, LineStyle, Terminator};
use crate::readers::FormatReader;

/// EndNote reader.
#[derive(Debug, Default)]
pub struct EndNoteReader;

impl FormatReader for EndNoteReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let blocks = split_tagged_references(source, Terminator::BlankLine, LineStyle::Percent);
        Ok(blocks
            .into_iter()
            .enumerate()
            .map(|(i, lines)| build_reference(lines, "%0", diagnostics, i))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_store::level::MAIN;

    #[test]
    fn blank_line_terminates_reference() {
        let src = "%0 Journal Article\n%T A Title\n%D 2020\n\n%0 Book\n%T Other\n";
        let mut diag = Diagnostics::new();
        let refs = EndNoteReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].internal_type(), Some("Journal Article"));
        assert_eq!(refs[0].fields.findv(MAIN, "%T"), Some("A Title"));
    }
}
