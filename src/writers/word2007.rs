//! Word 2007 bibliography XML writer.
//!
//! Emits `<b:Source>` elements with a genre→`SourceType` mapping and
//! `<b:Person>` lists, per `bibutils_sys/src/wordout.c`.

use crate::error::Result;
use crate::field_store::level::MAIN;
use crate::params::WriterOptions;
use crate::reference::{Reference, ReferenceCollection};
use crate::writers::{escape_xml, split_name_parts, FormatWriter};
use std::fmt::Write as _;

fn source_type(genre: &str) -> &'static str {
    match genre.to_ascii_lowercase().as_str() {
        "academic journal" | "journal article" => "JournalArticle",
        "book" => "Book",
        "book chapter" | "book section" => "BookSection",
        "conference publication" | "inproceedings" => "Conference",
        "thesis" => "Report",
        "magazine" | "magazine article" => "ArticleInAPeriodical",
        _ => "Misc",
    }
}

fn write_person_list(xml: &mut String, tag: &str, names: &[&str]) {
    if names.is_empty() {
        return;
    }
    let _ = writeln!(xml, "    <b:{tag}><b:NameList>");
    for name in names {
        let (family, given) = split_name_parts(name);
        xml.push_str("      <b:Person>\n");
        let _ = writeln!(xml, "        <b:Last>{}</b:Last>", escape_xml(&family));
        if !given.is_empty() {
            let _ = writeln!(xml, "        <b:First>{}</b:First>", escape_xml(&given));
        }
        xml.push_str("      </b:Person>\n");
    }
    let _ = writeln!(xml, "    </b:NameList></b:{tag}>");
}

fn write_reference(xml: &mut String, reference: &Reference) {
    xml.push_str("  <b:Source>\n");
    let genre = reference.internal_type().unwrap_or("");
    let _ = writeln!(xml, "    <b:SourceType>{}</b:SourceType>", source_type(genre));
    if let Some(refnum) = reference.refnum() {
        let _ = writeln!(xml, "    <b:Tag>{}</b:Tag>", escape_xml(refnum));
    }
    if let Some(title) = reference.fields.findv(MAIN, "TITLE") {
        let _ = writeln!(xml, "    <b:Title>{}</b:Title>", escape_xml(title));
    }
    if let Some(year) = reference.fields.findv(MAIN, "DATE:YEAR") {
        let _ = writeln!(xml, "    <b:Year>{}</b:Year>", escape_xml(year));
    }
    let authors = reference.fields.findv_each(MAIN, "AUTHOR");
    write_person_list(xml, "Author", &authors);
    let editors = reference.fields.findv_each(MAIN, "editor");
    write_person_list(xml, "Editor", &editors);
    if let Some(publisher) = reference.fields.findv(MAIN, "PUBLISHER") {
        let _ = writeln!(xml, "    <b:Publisher>{}</b:Publisher>", escape_xml(publisher));
    }
    xml.push_str("  </b:Source>\n");
}

/// Word 2007 writer.
#[derive(Debug, Default)]
pub struct Word2007Writer;

impl FormatWriter for Word2007Writer {
    fn write_all(&self, collection: &ReferenceCollection, _options: &WriterOptions) -> Result<String> {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<b:Sources xmlns:b=\"http://schemas.openxmlformats.org/officeDocument/2006/bibliography\">\n");
        for reference in collection.iter() {
            write_reference(&mut xml, reference);
        }
        xml.push_str("</b:Sources>\n");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Reference;

    #[test]
    fn maps_genre_to_source_type_and_emits_authors() {
        let mut r = Reference::new();
        r.set_internal_type("academic journal");
        r.fields.add("TITLE", "A Title", MAIN);
        r.fields.add("AUTHOR", "Smith|John", MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);
        let xml = Word2007Writer.write_all(&c, &WriterOptions::default()).unwrap();
        assert!(xml.contains("<b:SourceType>JournalArticle</b:SourceType>"));
        assert!(xml.contains("<b:Last>Smith</b:Last>"));
        assert!(xml.contains("<b:First>John</b:First>"));
    }
}
