//! ADS abstract service writer.
//!
//! Tagged-line format close to RIS/ISI, per `bibutils_sys/src/adsout.c`;
//! reuses the [`crate::writers::ris`] assembly helpers with ADS's own
//! single-letter tag vocabulary.

use crate::error::Result;
use crate::field_store::level;
use crate::params::WriterOptions;
use crate::reference::ReferenceCollection;
use crate::writers::ris::{append_date, append_easy, append_pages, append_people};
use crate::writers::FormatWriter;

/// ADS-abs writer.
#[derive(Debug, Default)]
pub struct AdsAbsWriter;

impl FormatWriter for AdsAbsWriter {
    fn write_all(&self, collection: &ReferenceCollection, _options: &WriterOptions) -> Result<String> {
        let mut out = String::new();
        for reference in collection.iter() {
            let mut lines = Vec::new();
            append_easy(&reference.fields, "TITLE", "%T", level::MAIN, &mut lines);
            append_people(&reference.fields, "AUTHOR", "%A", level::MAIN, &mut lines);
            append_date(&reference.fields, "%D", level::MAIN, &mut lines);
            append_pages(&reference.fields, "%P", level::ANY, &mut lines);
            append_easy(&reference.fields, "ABSTRACT", "%B", level::MAIN, &mut lines);
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
    fn writes_title_and_author_lines() {
        let mut r = Reference::new();
        r.fields.add("TITLE", "Star Formation", MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);
        let out = AdsAbsWriter.write_all(&c, &WriterOptions::default()).unwrap();
        assert!(out.contains("%T Star Formation\n"));
    }
}
