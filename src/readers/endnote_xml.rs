//! EndNote XML reader.
//!
//! Walks `<record>` elements inside an EndNote `<xml><records>` export, per
//! `bibutils_sys/src/enxmlin.c`. A `<style>` element's contents are
//! preserved verbatim by the underlying tree parser (spec §4.2), since
//! EndNote XML embeds rich-text fragments there whose surrounding
//! whitespace is significant.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::field_store::level::MAIN;
use crate::reference::Reference;
use crate::readers::FormatReader;
use crate::xmltree::{parse_all, XmlNode};

/// EndNote XML reader.
#[derive(Debug, Default)]
pub struct EndNoteXmlReader;

fn style_text(node: &XmlNode) -> Option<String> {
    node.child("style").map(|s| s.text.clone())
}

fn extract(node: &XmlNode, ref_index: usize, diagnostics: &mut Diagnostics) -> Reference {
    let mut r = Reference::new();
    if let Some(ref_type) = node.child("ref-type") {
        let name = ref_type.attr("name").unwrap_or(ref_type.text.trim());
        r.set_internal_type(name.to_string());
    } else {
        diagnostics.warn_reference(ref_index, "no ref-type element");
    }

    if let Some(titles) = node.child("titles") {
        if let Some(title) = titles.child("title").and_then(style_text) {
            r.fields.add("title", title.trim(), MAIN);
        }
    }

    if let Some(contributors) = node.child("contributors") {
        if let Some(authors) = contributors.child("authors") {
            for author in authors.children_named("author") {
                if let Some(name) = style_text(author) {
                    r.fields.add("author", name.trim(), MAIN);
                }
            }
        }
    }

    if let Some(dates) = node.child("dates") {
        if let Some(year) = dates.child("year").and_then(style_text) {
            r.fields.add("DATE:YEAR", year.trim(), MAIN);
        }
    }

    r
}

impl FormatReader for EndNoteXmlReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let nodes = parse_all(source, "record")?;
        Ok(nodes
            .iter()
            .enumerate()
            .map(|(i, n)| extract(n, i, diagnostics))
            .collect())
    }
}
