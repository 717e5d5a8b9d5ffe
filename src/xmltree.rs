//! A generic, format-agnostic XML tree.
//!
//! The MODS, EndNote XML, ISI, Medline/EBI and Word 2007 readers all walk an
//! XML document, but unlike the teacher's `mods.rs` (which hand-writes one
//! `quick_xml::Reader` event loop per MODS element), none of those readers
//! know each other's element vocabulary ahead of time. This module builds
//! one generic [`XmlNode`] tree from the same low-level `quick_xml::Reader`
//! / `Event` event loop the teacher uses, and each reader then walks the
//! resulting tree with its own element-name matching.
//!
//! Namespace prefixes (`mods:title`, `dc:creator`) are stripped from element
//! names at parse time into a parser-scoped `strip_ns` flag — scoped to one
//! [`parse`] call, not a process-wide global, since a batch conversion may
//! interleave documents from different formats with different prefix
//! conventions.

use crate::error::{BiblError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// One element of a parsed XML document.
#[derive(Debug, Clone, Default)]
pub struct XmlNode {
    /// Local element name, namespace prefix already stripped.
    pub name: String,
    /// Attributes in document order, local names with prefixes stripped.
    pub attributes: Vec<(String, String)>,
    /// Concatenated text/CDATA content directly under this element (not
    /// under a child element).
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Attribute value by local name, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first direct child with the given local name, trimmed.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.trim())
    }
}

fn strip_ns(name: &[u8]) -> String {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => String::from_utf8_lossy(&name[pos + 1..]).into_owned(),
        None => String::from_utf8_lossy(name).into_owned(),
    }
}

/// Parse a complete XML document into a tree rooted at its single root
/// element. Namespace prefixes are always stripped, matching the teacher's
/// `strip_ns_owned` MODS handling (consumers match on `mods:title` and
/// `title` identically).
///
/// # Errors
///
/// Returns [`BiblError::ParseError`] on malformed XML or if the document has
/// no root element.
pub fn parse(xml: &str) -> Result<XmlNode> {
    // Whitespace-only inter-element text is left untrimmed here (unlike the
    // teacher's `mods.rs` reader) so a `<style>` element's rich-text
    // fragment keeps its significant leading/trailing spaces (spec §4.2);
    // callers that want trimmed text already call `.trim()` themselves
    // (`child_text`, `mods.rs`, `endnote_xml.rs`).
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let node = parse_element(&mut reader, e, &mut buf)?;
                return Ok(node);
            }
            Ok(Event::Empty(ref e)) => {
                return Ok(XmlNode {
                    name: strip_ns(e.name().as_ref()),
                    attributes: read_attrs(e),
                    text: String::new(),
                    children: Vec::new(),
                });
            }
            Ok(Event::Eof) => {
                return Err(BiblError::ParseError("no root element found".to_string()));
            }
            Err(e) => return Err(BiblError::ParseError(format!("XML read: {e}"))),
            _ => {}
        }
        buf.clear();
    }
}

/// Parse every top-level `<root_name>` element in a document containing a
/// collection wrapper (e.g. `<modsCollection>`, `<xml><records>...`),
/// returning one tree per occurrence.
///
/// # Errors
///
/// Returns [`BiblError::ParseError`] on malformed XML.
pub fn parse_all(xml: &str, element_name: &str) -> Result<Vec<XmlNode>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut nodes = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if strip_ns(e.name().as_ref()) == element_name {
                    nodes.push(parse_element(&mut reader, e, &mut buf)?);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(BiblError::ParseError(format!("XML read: {e}"))),
            _ => {}
        }
        buf.clear();
    }
    Ok(nodes)
}

fn read_attrs(e: &quick_xml::events::BytesStart) -> Vec<(String, String)> {
    e.attributes()
        .filter_map(std::result::Result::ok)
        .map(|a| {
            let key = strip_ns(a.key.as_ref());
            let value = a.unescape_value().unwrap_or_default().into_owned();
            (key, value)
        })
        .collect()
}

fn parse_element(
    reader: &mut Reader<&[u8]>,
    start: &quick_xml::events::BytesStart,
    buf: &mut Vec<u8>,
) -> Result<XmlNode> {
    let mut node = XmlNode {
        name: strip_ns(start.name().as_ref()),
        attributes: read_attrs(start),
        text: String::new(),
        children: Vec::new(),
    };
    buf.clear();

    loop {
        match reader.read_event_into(buf) {
            Ok(Event::Start(ref e)) => {
                let child = parse_element(reader, e, &mut Vec::new())?;
                node.children.push(child);
            }
            Ok(Event::Empty(ref e)) => {
                node.children.push(XmlNode {
                    name: strip_ns(e.name().as_ref()),
                    attributes: read_attrs(e),
                    text: String::new(),
                    children: Vec::new(),
                });
            }
            Ok(Event::Text(e)) => {
                node.text.push_str(
                    &e.unescape()
                        .map_err(|err| BiblError::ParseError(format!("XML unescape: {err}")))?,
                );
            }
            Ok(Event::CData(e)) => {
                node.text.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::End(_) | Event::Eof) => break,
            Err(e) => return Err(BiblError::ParseError(format!("XML read: {e}"))),
            _ => {}
        }
        buf.clear();
    }
    Ok(node)
}

/// Locate the byte offset just after the first occurrence of `needle` in
/// `haystack`, via [`memchr::memmem`], matching the source's blob-carving
/// `find_start`/`find_end` used before a full-document parse is available
/// (e.g. to isolate one `<REC>`..`</REC>` span out of an ISI/RIS-adjacent
/// stream before XML-parsing it).
#[must_use]
pub fn find_start(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    memchr::memmem::find(haystack, needle).map(|pos| pos + needle.len())
}

/// Locate the byte offset of the first occurrence of `needle` in `haystack`
/// at or after `from`.
#[must_use]
pub fn find_end(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    memchr::memmem::find(&haystack[from..], needle).map(|pos| from + pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_with_namespace_stripped() {
        let xml = r#"<mods:mods xmlns:mods="http://www.loc.gov/mods/v3">
            <mods:titleInfo><mods:title>A Book</mods:title></mods:titleInfo>
        </mods:mods>"#;
        let root = parse(xml).unwrap();
        assert_eq!(root.name, "mods");
        let title_info = root.child("titleInfo").unwrap();
        assert_eq!(title_info.child_text("title"), Some("A Book"));
    }

    #[test]
    fn attributes_stripped_of_namespace_prefix() {
        let xml = r#"<root xlink:href="x"><a/></root>"#;
        let root = parse(xml).unwrap();
        assert_eq!(root.attr("href"), Some("x"));
    }

    #[test]
    fn parse_all_collects_each_record_element() {
        let xml = "<wrap><mods><a>1</a></mods><mods><a>2</a></mods></wrap>";
        let nodes = parse_all(xml, "mods").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].child_text("a"), Some("1"));
        assert_eq!(nodes[1].child_text("a"), Some("2"));
    }

    #[test]
    fn empty_document_is_parse_error() {
        assert!(parse("").is_err());
    }

    #[test]
    fn style_element_text_keeps_significant_whitespace() {
        let xml = "<style>  rich  text  </style>";
        let root = parse(xml).unwrap();
        assert_eq!(root.text, "  rich  text  ");
    }

    #[test]
    fn find_start_end_carve_blob_span() {
        let hay = b"junk<REC>BODY</REC>more";
        let start = find_start(hay, b"<REC>").unwrap();
        let end = find_end(hay, start, b"</REC>").unwrap();
        assert_eq!(&hay[start..end], b"BODY");
    }
}
