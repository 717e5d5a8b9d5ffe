//! ISI / Web of Science writer.
//!
//! Reuses the `append_*` helpers from [`crate::writers::ris`]; ISI's tag
//! vocabulary and `PT`-style type tag differ from RIS's `TY`, per
//! `bibutils_sys/vendor/isiout.c`.

use crate::error::Result;
use crate::field_store::level;
use crate::params::WriterOptions;
use crate::reference::ReferenceCollection;
use crate::writers::ris::{append_date, append_easy, append_easyall, append_pages, append_people};
use crate::writers::FormatWriter;

/// ISI writer.
#[derive(Debug, Default)]
pub struct IsiWriter;

impl FormatWriter for IsiWriter {
    fn write_all(&self, collection: &ReferenceCollection, _options: &WriterOptions) -> Result<String> {
        let mut out = String::new();
        for reference in collection.iter() {
            out.push_str("PT J\n");
            let mut lines = Vec::new();
            append_easy(&reference.fields, "TITLE", "TI", level::MAIN, &mut lines);
            append_people(&reference.fields, "AUTHOR", "AU", level::MAIN, &mut lines);
            append_easy(&reference.fields, "TITLE", "SO", level::HOST, &mut lines);
            append_date(&reference.fields, "PY", level::MAIN, &mut lines);
            append_pages(&reference.fields, "BP", level::ANY, &mut lines);
            append_easyall(&reference.fields, "URL", "UR", level::ANY, &mut lines);
            for (tag, value) in lines {
                out.push_str(&format!("{tag} {value}\n"));
            }
            out.push_str("ER\n\n");
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
    fn writes_isi_style_tags() {
        let mut r = Reference::new();
        r.fields.add("TITLE", "A Title", MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);
        let out = IsiWriter.write_all(&c, &WriterOptions::default()).unwrap();
        assert!(out.starts_with("PT J\n"));
        assert!(out.contains("TI A Title\n"));
        assert!(out.trim_end().ends_with("ER"));
    }
}
