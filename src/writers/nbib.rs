//! NBIB (PubMed) writer.
//!
//! Grounded in `bibutils_sys/src/nbibout.c`'s `output_tag`/`output_value`:
//! each `TAG- value` line wraps at 82 columns, continuation lines indented
//! with six spaces, matching PubMed's own export format.

use crate::error::Result;
use crate::field_store::level;
use crate::params::{OutputFormat, WriterOptions};
use crate::reference::ReferenceCollection;
use crate::reftypes::{type_name_for, Reftype};
use crate::writers::ris::{append_date, append_easy, append_easyall, append_pages, append_people};
use crate::writers::FormatWriter;

const WRAP_COLUMN: usize = 82;
const CONTINUATION_INDENT: &str = "      ";

fn write_wrapped(out: &mut String, tag: &str, value: &str) {
    let prefix = format!("{tag:<4}- ");
    let mut line = prefix.clone();
    let mut first = true;
    for word in value.split_whitespace() {
        let would_be = if line.chars().count() + word.chars().count() + 1 > WRAP_COLUMN && !first {
            true
        } else {
            false
        };
        if would_be {
            out.push_str(line.trim_end());
            out.push('\n');
            line = CONTINUATION_INDENT.to_string();
            line.push_str(word);
        } else {
            if !first {
                line.push(' ');
            }
            line.push_str(word);
        }
        first = false;
    }
    out.push_str(&line);
    out.push('\n');
}

fn assemble(fields: &crate::field_store::FieldStore) -> Vec<(String, String)> {
    let mut lines = Vec::new();
    append_easy(fields, "PMID", "PMID", level::ANY, &mut lines);
    append_easyall(fields, "ISSN", "IS", level::ANY, &mut lines);
    append_easy(fields, "VOLUME", "VI", level::ANY, &mut lines);
    append_easy(fields, "ISSUE", "IP", level::ANY, &mut lines);
    append_date(fields, "DP", level::ANY, &mut lines);
    append_easy(fields, "TITLE", "TI", level::MAIN, &mut lines);
    append_pages(fields, "PG", level::ANY, &mut lines);
    append_easy(fields, "ABSTRACT", "AB", level::MAIN, &mut lines);
    append_people(fields, "AUTHOR", "FAU", level::MAIN, &mut lines);
    append_easy(fields, "TITLE", "JT", level::HOST, &mut lines);
    lines
}

/// NBIB writer.
#[derive(Debug, Default)]
pub struct NbibWriter;

impl FormatWriter for NbibWriter {
    fn write_all(&self, collection: &ReferenceCollection, _options: &WriterOptions) -> Result<String> {
        let mut out = String::new();
        for reference in collection.iter() {
            write_wrapped(&mut out, "PT", type_name_for(OutputFormat::Nbib, reference.reftype().unwrap_or(Reftype::Misc)));
            for (tag, value) in assemble(&reference.fields) {
                write_wrapped(&mut out, &tag, &value);
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
    fn wraps_long_title_with_continuation_indent() {
        let mut r = Reference::new();
        let long = "word ".repeat(25);
        r.fields.add("TITLE", long.trim(), MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);
        let out = NbibWriter.write_all(&c, &WriterOptions::default()).unwrap();
        let ti_line_count = out.lines().filter(|l| l.starts_with("TI  -") || l.starts_with(CONTINUATION_INDENT)).count();
        assert!(ti_line_count >= 2, "expected wrapped title across multiple lines, got:\n{out}");
        for line in out.lines() {
            assert!(line.chars().count() <= WRAP_COLUMN, "line too long: {line:?}");
        }
    }

    #[test]
    fn short_title_fits_one_line() {
        let mut r = Reference::new();
        r.fields.add("TITLE", "Short", MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);
        let out = NbibWriter.write_all(&c, &WriterOptions::default()).unwrap();
        assert!(out.contains("TI  - Short\n"));
    }
}
