//! MODS XML reader.
//!
//! Walks the generic [`crate::xmltree`] tree built over one `<mods>` (or
//! `<modsCollection>` of many) document, mapping well-known element paths
//! to internal tags per `bibutils_sys/src/modsin.c`'s crosswalk. Unknown
//! elements are silently ignored, matching the source's tolerant walk.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::field_store::level::{HOST, MAIN};
use crate::reference::Reference;
use crate::readers::FormatReader;
use crate::xmltree::{parse_all, XmlNode};

/// MODS reader.
#[derive(Debug, Default)]
pub struct ModsReader;

fn genre_of(node: &XmlNode) -> Option<&str> {
    node.child_text("genre")
}

fn extract_mods(node: &XmlNode, diagnostics: &mut Diagnostics, ref_index: usize) -> Reference {
    let mut r = Reference::new();
    if let Some(genre) = genre_of(node) {
        r.set_internal_type(genre.to_string());
    } else {
        diagnostics.warn_reference(ref_index, "no <genre> element; type unresolved");
    }
    if let Some(id) = node.attr("ID") {
        r.set_refnum(id.to_string());
    }

    for title_info in node.children_named("titleInfo") {
        if let Some(title) = title_info.child_text("title") {
            r.fields.add("title", title, MAIN);
        }
        if let Some(sub) = title_info.child_text("subTitle") {
            r.fields.add("subtitle", sub, MAIN);
        }
    }

    for name in node.children_named("name") {
        let parts: Vec<&str> = name
            .children_named("namePart")
            .map(|p| p.text.trim())
            .filter(|t| !t.is_empty())
            .collect();
        if parts.is_empty() {
            continue;
        }
        let is_personal = name.attr("type") == Some("personal") || name.attr("type").is_none();
        let joined = parts.join(" ");
        let tag = if is_personal { "author" } else { "author:corp" };
        r.fields.add(tag, joined, MAIN);
    }

    if let Some(related) = node.child("relatedItem") {
        if let Some(host_title) = related
            .children_named("titleInfo")
            .next()
            .and_then(|t| t.child_text("title"))
        {
            r.fields.add("title", host_title, HOST);
        }
    }

    if let Some(origin) = node.child("originInfo") {
        if let Some(date) = origin.child_text("dateIssued") {
            r.fields.add("DATE:YEAR", date, MAIN);
        }
        if let Some(publisher) = origin.child_text("publisher") {
            r.fields.add("PUBLISHER", publisher, MAIN);
        }
    }

    if let Some(abs) = node.child_text("abstract") {
        r.fields.add("ABSTRACT", abs, MAIN);
    }

    for id in node.children_named("identifier") {
        let idtype = id.attr("type").unwrap_or("identifier");
        r.fields.add(format!("IDENTIFIER:{}", idtype.to_ascii_uppercase()), id.text.trim(), MAIN);
    }

    r
}

impl FormatReader for ModsReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let nodes = parse_all(source, "mods")?;
        let nodes = if nodes.is_empty() {
            crate::xmltree::parse(source).map(|n| vec![n]).unwrap_or_default()
        } else {
            nodes
        };
        Ok(nodes
            .iter()
            .enumerate()
            .map(|(i, n)| extract_mods(n, diagnostics, i))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_title_and_genre_and_author() {
        let xml = r#"<mods ID="ref1">
            <genre>academic journal</genre>
            <titleInfo><title>A Paper</title></titleInfo>
            <name type="personal"><namePart>Smith, John</namePart></name>
        </mods>"#;
        let mut diag = Diagnostics::new();
        let refs = ModsReader.read_all(xml, &mut diag).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].internal_type(), Some("academic journal"));
        assert_eq!(refs[0].refnum(), Some("ref1"));
        assert_eq!(refs[0].fields.findv(MAIN, "title"), Some("A Paper"));
        assert_eq!(refs[0].fields.findv(MAIN, "author"), Some("Smith, John"));
    }
}
