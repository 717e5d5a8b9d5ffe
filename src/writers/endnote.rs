//! EndNote tagged-text writer.
//!
//! Percent-tag vocabulary (`%0`, `%T`, `%A`, …), blank-line terminated, per
//! `bibutils_sys/src/endout.c`. Reuses the `append_*` assembly helpers from
//! [`crate::writers::ris`].

use crate::error::Result;
use crate::field_store::level;
use crate::params::{OutputFormat, WriterOptions};
use crate::reference::ReferenceCollection;
use crate::reftypes::{type_name_for, Reftype};
use crate::writers::ris::{append_date, append_easy, append_pages, append_people};
use crate::writers::FormatWriter;

/// EndNote writer.
#[derive(Debug, Default)]
pub struct EndNoteWriter;

impl FormatWriter for EndNoteWriter {
    fn write_all(&self, collection: &ReferenceCollection, _options: &WriterOptions) -> Result<String> {
        let mut out = String::new();
        for reference in collection.iter() {
            out.push_str("%0 ");
            out.push_str(type_name_for(OutputFormat::EndNote, reference.reftype().unwrap_or(Reftype::Misc)));
            out.push('\n');
            let mut lines = Vec::new();
            append_easy(&reference.fields, "TITLE", "%T", level::MAIN, &mut lines);
            append_people(&reference.fields, "AUTHOR", "%A", level::MAIN, &mut lines);
            append_easy(&reference.fields, "TITLE", "%J", level::HOST, &mut lines);
            append_date(&reference.fields, "%D", level::MAIN, &mut lines);
            append_pages(&reference.fields, "%P", level::ANY, &mut lines);
            for (tag, value) in lines {
                out.push_str(&format!("{tag} {value}\n"));
            }
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_store::level::MAIN;
    use crate::reference::Reference;

    #[test]
    fn writes_endnote_percent_tags() {
        let mut r = Reference::new();
        r.set_reftype(Reftype::Article);
        r.fields.add("TITLE", "A Title", MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);
        let out = EndNoteWriter.write_all(&c, &WriterOptions::default()).unwrap();
        assert!(out.starts_with("%0 Journal Article\n"));
        assert!(out.contains("%T A Title\n"));
    }
}
