//! Word 2007 bibliography XML reader.
//!
//! Walks `<b:Source>` elements per `bibutils_sys/src/wordin.c`'s crosswalk:
//! `<b:SourceType>` resolves to a genre string, persons are
//! `<b:Person><b:Last/><b:First/></b:Person>` lists under `<b:Author>`.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::field_store::level::MAIN;
use crate::reference::Reference;
use crate::readers::FormatReader;
use crate::xmltree::{parse_all, XmlNode};

/// Word 2007 reader.
#[derive(Debug, Default)]
pub struct WordReader;

fn extract_person_list(node: &XmlNode) -> Vec<String> {
    node.child("NameList")
        .map(|list| {
            list.children_named("Person")
                .filter_map(|p| {
                    let last = p.child_text("Last")?;
                    let first = p.child_text("First").unwrap_or_default();
                    Some(if first.is_empty() {
                        last.to_string()
                    } else {
                        format!("{last}, {first}")
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn extract(node: &XmlNode, ref_index: usize, diagnostics: &mut Diagnostics) -> Reference {
    let mut r = Reference::new();
    if let Some(source_type) = node.child_text("SourceType") {
        r.set_internal_type(source_type.to_string());
    } else {
        diagnostics.warn_reference(ref_index, "no SourceType element");
    }
    if let Some(tag) = node.child_text("Tag") {
        r.set_refnum(tag.to_string());
    }
    if let Some(title) = node.child_text("Title") {
        r.fields.add("title", title, MAIN);
    }
    if let Some(year) = node.child_text("Year") {
        r.fields.add("DATE:YEAR", year, MAIN);
    }
    if let Some(author) = node.child("Author") {
        for person in extract_person_list(author) {
            r.fields.add("author", person, MAIN);
        }
    }
    if let Some(editor) = node.child("Editor") {
        for person in extract_person_list(editor) {
            r.fields.add("editor", person, MAIN);
        }
    }
    if let Some(pub_name) = node.child_text("Publisher") {
        r.fields.add("PUBLISHER", pub_name, MAIN);
    }
    r
}

impl FormatReader for WordReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let nodes = parse_all(source, "Source")?;
        Ok(nodes
            .iter()
            .enumerate()
            .map(|(i, n)| extract(n, i, diagnostics))
            .collect())
    }
}
