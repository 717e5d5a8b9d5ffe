//! MODS XML writer.
//!
//! String-template assembly in the teacher's `mods.rs` `record_to_mods_xml`
//! style: push pre-formatted XML fragments into a growing `String` rather
//! than building a DOM, escaping text content via [`crate::writers::escape_xml`].

use crate::error::Result;
use crate::field_store::level::{HOST, MAIN};
use crate::params::WriterOptions;
use crate::reference::{Reference, ReferenceCollection};
use crate::writers::{escape_xml, split_name_parts, FormatWriter};
use std::fmt::Write as _;

fn write_reference(xml: &mut String, reference: &Reference) {
    xml.push_str("  <mods>\n");
    if let Some(genre) = reference.internal_type() {
        let _ = writeln!(xml, "    <genre>{}</genre>", escape_xml(genre));
    }

    if let Some(title) = reference.fields.findv(MAIN, "TITLE") {
        xml.push_str("    <titleInfo>\n");
        let _ = writeln!(xml, "      <title>{}</title>", escape_xml(title));
        if let Some(sub) = reference.fields.findv(MAIN, "SUBTITLE") {
            let _ = writeln!(xml, "      <subTitle>{}</subTitle>", escape_xml(sub));
        }
        xml.push_str("    </titleInfo>\n");
    }

    for author in reference.fields.findv_each(MAIN, "AUTHOR") {
        let (family, given) = split_name_parts(author);
        xml.push_str("    <name type=\"personal\">\n");
        let _ = writeln!(xml, "      <namePart>{} {}</namePart>", escape_xml(&family), escape_xml(&given));
        xml.push_str("    </name>\n");
    }

    if let Some(host_title) = reference.fields.findv(HOST, "TITLE") {
        xml.push_str("    <relatedItem type=\"host\">\n");
        xml.push_str("      <titleInfo>\n");
        let _ = writeln!(xml, "        <title>{}</title>", escape_xml(host_title));
        xml.push_str("      </titleInfo>\n");
        xml.push_str("    </relatedItem>\n");
    }

    if reference.fields.findv(MAIN, "DATE:YEAR").is_some() || reference.fields.findv(MAIN, "PUBLISHER").is_some() {
        xml.push_str("    <originInfo>\n");
        if let Some(year) = reference.fields.findv(MAIN, "DATE:YEAR") {
            let _ = writeln!(xml, "      <dateIssued>{}</dateIssued>", escape_xml(year));
        }
        if let Some(publisher) = reference.fields.findv(MAIN, "PUBLISHER") {
            let _ = writeln!(xml, "      <publisher>{}</publisher>", escape_xml(publisher));
        }
        xml.push_str("    </originInfo>\n");
    }

    if let Some(abs) = reference.fields.findv(MAIN, "ABSTRACT") {
        let _ = writeln!(xml, "    <abstract>{}</abstract>", escape_xml(abs));
    }

    xml.push_str("  </mods>\n");
}

/// MODS writer.
#[derive(Debug, Default)]
pub struct ModsWriter;

impl FormatWriter for ModsWriter {
    fn write_all(&self, collection: &ReferenceCollection, _options: &WriterOptions) -> Result<String> {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<modsCollection xmlns=\"http://www.loc.gov/mods/v3\">\n");
        for reference in collection.iter() {
            write_reference(&mut xml, reference);
        }
        xml.push_str("</modsCollection>\n");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Reference;

    #[test]
    fn writes_genre_title_and_author() {
        let mut r = Reference::new();
        r.set_internal_type("academic journal");
        r.fields.add("TITLE", "A Title", MAIN);
        r.fields.add("AUTHOR", "Smith|John", MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);
        let xml = ModsWriter.write_all(&c, &WriterOptions::default()).unwrap();
        assert!(xml.contains("<genre>academic journal</genre>"));
        assert!(xml.contains("<title>A Title</title>"));
        assert!(xml.contains("<namePart>Smith John</namePart>"));
    }

    #[test]
    fn escapes_ampersand_in_title() {
        let mut r = Reference::new();
        r.fields.add("TITLE", "Salt & Pepper", MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);
        let xml = ModsWriter.write_all(&c, &WriterOptions::default()).unwrap();
        assert!(xml.contains("Salt &amp; Pepper"));
    }
}
