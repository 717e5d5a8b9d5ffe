//! RIS writer, plus the tagged-line emission helper shared by ISI, EndNote,
//! and ADS-abs writers.
//!
//! Grounded in `bibutils_sys/vendor/isiout.c`'s `append_*` family: each
//! writer assembles a temporary output field store via small composable
//! `append_*` helpers, then streams `TAG  - value\n` lines, terminating
//! with `ER  -\n`.

use crate::error::Result;
use crate::field_store::{level, FieldStore};
use crate::params::{OutputFormat, WriterOptions};
use crate::reference::ReferenceCollection;
use crate::reftypes::{type_name_for, Reftype};
use crate::writers::{display_name, FormatWriter};

/// Append every value of `tag` at `level` under `out_tag`, unconditionally.
pub fn append_easyall(fields: &FieldStore, tag: &str, out_tag: &str, lvl: i32, out: &mut Vec<(String, String)>) {
    for v in fields.findv_each(lvl, tag) {
        out.push((out_tag.to_string(), v.to_string()));
    }
}

/// Append the first value of `tag` at `level` under `out_tag`, if present.
pub fn append_easy(fields: &FieldStore, tag: &str, out_tag: &str, lvl: i32, out: &mut Vec<(String, String)>) {
    if let Some(v) = fields.findv(lvl, tag) {
        out.push((out_tag.to_string(), v.to_string()));
    }
}

/// Append one tagged line per person-name entry, display-formatted.
pub fn append_people(fields: &FieldStore, tag: &str, out_tag: &str, lvl: i32, out: &mut Vec<(String, String)>) {
    for v in fields.findv_each(lvl, tag) {
        out.push((out_tag.to_string(), display_name(v)));
    }
}

/// Append a `PAGES:START`/`PAGES:STOP` pair as one `start-stop` line under
/// `out_tag`, falling back to `ARTICLENUMBER`.
pub fn append_pages(fields: &FieldStore, out_tag: &str, lvl: i32, out: &mut Vec<(String, String)>) {
    let start = fields.findv(lvl, "PAGES:START");
    let stop = fields.findv(lvl, "PAGES:STOP");
    match (start, stop) {
        (Some(s), Some(e)) => out.push((out_tag.to_string(), format!("{s}-{e}"))),
        (Some(s), None) => out.push((out_tag.to_string(), s.to_string())),
        _ => {
            if let Some(an) = fields.findv(lvl, "ARTICLENUMBER") {
                out.push((out_tag.to_string(), an.to_string()));
            }
        }
    }
}

/// Append `PAGES:START`/`PAGES:STOP` as two separate lines under distinct
/// tags, for formats (RIS's `SP`/`EP`) that keep start and end page on their
/// own tags rather than combining them into one `start-stop` value.
pub fn append_pages_split(fields: &FieldStore, start_tag: &str, end_tag: &str, lvl: i32, out: &mut Vec<(String, String)>) {
    match (fields.findv(lvl, "PAGES:START"), fields.findv(lvl, "PAGES:STOP")) {
        (Some(s), Some(e)) => {
            out.push((start_tag.to_string(), s.to_string()));
            out.push((end_tag.to_string(), e.to_string()));
        }
        (Some(s), None) => out.push((start_tag.to_string(), s.to_string())),
        _ => {
            if let Some(an) = fields.findv(lvl, "ARTICLENUMBER") {
                out.push((start_tag.to_string(), an.to_string()));
            }
        }
    }
}

/// Append a `YEAR[/MONTH[/DAY]]` date line.
pub fn append_date(fields: &FieldStore, out_tag: &str, lvl: i32, out: &mut Vec<(String, String)>) {
    let year = fields.findv(lvl, "DATE:YEAR");
    let Some(year) = year else { return };
    let mut s = year.to_string();
    if let Some(month) = fields.findv(lvl, "DATE:MONTH") {
        s.push('/');
        s.push_str(month);
        if let Some(day) = fields.findv(lvl, "DATE:DAY") {
            s.push('/');
            s.push_str(day);
        }
    }
    out.push((out_tag.to_string(), s));
}

fn assemble_ris(fields: &FieldStore) -> Vec<(String, String)> {
    let mut out = Vec::new();
    append_easy(fields, "TITLE", "TI", level::MAIN, &mut out);
    append_people(fields, "AUTHOR", "AU", level::MAIN, &mut out);
    append_easyall(fields, "AUTHOR:CORP", "AU", level::MAIN, &mut out);
    append_date(fields, "PY", level::MAIN, &mut out);
    append_easy(fields, "TITLE", "JO", level::HOST, &mut out);
    append_easy(fields, "VOLUME", "VL", level::ANY, &mut out);
    append_easy(fields, "ISSUE", "IS", level::ANY, &mut out);
    append_pages_split(fields, "SP", "EP", level::ANY, &mut out);
    append_easy(fields, "PUBLISHER", "PB", level::MAIN, &mut out);
    append_easy(fields, "ABSTRACT", "AB", level::MAIN, &mut out);
    append_easyall(fields, "URL", "UR", level::ANY, &mut out);
    append_easy(fields, "DOI", "DO", level::ANY, &mut out);
    out
}

fn type_tag_value(reference: &crate::reference::Reference) -> &'static str {
    type_name_for(OutputFormat::Ris, reference.reftype().unwrap_or(Reftype::Misc))
}

/// RIS writer.
#[derive(Debug, Default)]
pub struct RisWriter;

impl FormatWriter for RisWriter {
    fn write_all(&self, collection: &ReferenceCollection, _options: &WriterOptions) -> Result<String> {
        let mut out = String::new();
        for reference in collection.iter() {
            out.push_str("TY  - ");
            out.push_str(type_tag_value(reference));
            out.push('\n');
            for (tag, value) in assemble_ris(&reference.fields) {
                out.push_str(&format!("{tag:<2}  - {value}\n"));
            }
            out.push_str("ER  - \n\n");
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
    fn writes_title_author_and_terminator() {
        let mut r = Reference::new();
        r.set_reftype(Reftype::Article);
        r.fields.add("TITLE", "A Title", MAIN);
        r.fields.add("AUTHOR", "Smith|John", MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);

        let out = RisWriter.write_all(&c, &WriterOptions::default()).unwrap();
        assert!(out.starts_with("TY  - JOUR\n"));
        assert!(out.contains("TI  - A Title\n"));
        assert!(out.contains("AU  - Smith, John\n"));
        assert!(out.trim_end().ends_with("ER  -"));
    }

    #[test]
    fn writes_start_and_end_page_on_separate_tags() {
        let mut r = Reference::new();
        r.set_reftype(Reftype::Article);
        r.fields.add("PAGES:START", "12", MAIN);
        r.fields.add("PAGES:STOP", "34", MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);

        let out = RisWriter.write_all(&c, &WriterOptions::default()).unwrap();
        assert!(out.contains("SP  - 12\n"));
        assert!(out.contains("EP  - 34\n"));
    }
}
