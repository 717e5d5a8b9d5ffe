//! Tagged-line reference reader/helpers shared by RIS, EndNote, ISI,
//! Medline, NBIB, and Copac.
//!
//! Grounded in `bibutils_sys/src/risin.c`/`isiin.c`: each reference is a
//! run of `TAG  - value` lines, continuation lines are indent-only
//! (no tag, leading whitespace), and the reference terminates on a
//! sentinel line (`ER  -` for RIS/ISI) or a blank line (EndNote, Copac,
//! NBIB).

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::field_store::level::MAIN;
use crate::reference::Reference;
use crate::readers::FormatReader;

/// How a tagged-text source decides a reference has ended.
#[derive(Debug, Clone, Copy)]
pub enum Terminator {
    /// An explicit sentinel tag line (e.g. `ER  -`).
    SentinelTag(&'static str),
    /// A blank line.
    BlankLine,
}

/// The per-format tag/value line grammar.
#[derive(Debug, Clone, Copy)]
pub enum LineStyle {
    /// RIS/ISI/Medline/NBIB/Copac: `TAG  - value` (dash-separated, tag up
    /// to a handful of alphanumerics).
    Dashed,
    /// EndNote: `%X value` (percent-prefixed single-character tag,
    /// space-separated).
    Percent,
}

/// One raw `(tag, value)` pair extracted from a tagged-text reference.
pub type TaggedLine = (String, String);

/// Split `source` into references, returning the raw tagged lines for
/// each. Indented continuation lines with no recognisable tag append to
/// the previous field's value with a space.
#[must_use]
pub fn split_tagged_references(
    source: &str,
    terminator: Terminator,
    style: LineStyle,
) -> Vec<Vec<TaggedLine>> {
    let mut refs = Vec::new();
    let mut current: Vec<TaggedLine> = Vec::new();

    for raw_line in source.lines() {
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if let Terminator::BlankLine = terminator {
                if !current.is_empty() {
                    refs.push(std::mem::take(&mut current));
                }
                continue;
            }
        }

        if let Some((tag, value)) = parse_tagged_line(line, style) {
            if let Terminator::SentinelTag(sentinel) = terminator {
                if tag.eq_ignore_ascii_case(sentinel) {
                    if !current.is_empty() {
                        refs.push(std::mem::take(&mut current));
                    }
                    continue;
                }
            }
            current.push((tag, value));
        } else if let Some(last) = current.last_mut() {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                last.1.push(' ');
                last.1.push_str(trimmed);
            }
        }
    }
    if !current.is_empty() {
        refs.push(current);
    }
    refs
}

fn parse_tagged_line(line: &str, style: LineStyle) -> Option<TaggedLine> {
    match style {
        LineStyle::Dashed => {
            if line.len() < 2 || !line.chars().next()?.is_ascii_alphabetic() {
                return None;
            }
            let dash = line.find('-')?;
            let tag = line[..dash].trim();
            if tag.is_empty() || tag.len() > 6 || !tag.chars().all(char::is_alphanumeric) {
                return None;
            }
            let value = line[dash + 1..].trim();
            Some((tag.to_string(), value.to_string()))
        }
        LineStyle::Percent => {
            let mut chars = line.chars();
            if chars.next()? != '%' {
                return None;
            }
            let tag_char = chars.next()?;
            if !tag_char.is_ascii_alphanumeric() {
                return None;
            }
            let rest = &line[2..];
            let value = rest.trim_start();
            Some((format!("%{tag_char}"), value.to_string()))
        }
    }
}

/// RIS reader.
#[derive(Debug, Default)]
pub struct RisReader;

impl FormatReader for RisReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let blocks = split_tagged_references(source, Terminator::SentinelTag("ER"), LineStyle::Dashed);
        Ok(blocks
            .into_iter()
            .enumerate()
            .map(|(i, lines)| build_reference(lines, "TY", diagnostics, i))
            .collect())
    }
}

/// Build a [`Reference`] from raw tagged lines, promoting `type_tag`'s
/// value to `INTERNAL_TYPE` and `ID`/`UID`/`AN`-style record-id tags to
/// `REFNUM` when present.
pub fn build_reference(
    lines: Vec<TaggedLine>,
    type_tag: &str,
    diagnostics: &mut Diagnostics,
    ref_index: usize,
) -> Reference {
    let mut r = Reference::new();
    let mut has_type = false;
    for (tag, value) in lines {
        if tag.eq_ignore_ascii_case(type_tag) {
            r.set_internal_type(value);
            has_type = true;
        } else if tag.eq_ignore_ascii_case("ID") {
            r.set_refnum(value);
        } else {
            r.fields.add(tag.to_ascii_uppercase(), value, MAIN);
        }
    }
    if !has_type {
        diagnostics.warn_reference(ref_index, "no type tag found; defaulting to generic");
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_er_sentinel() {
        let src = "TY  - JOUR\nTI  - A Title\nPY  - 2020\nER  -\n\nTY  - BOOK\nTI  - Another\nER  -\n";
        let mut diag = Diagnostics::new();
        let refs = RisReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].internal_type(), Some("JOUR"));
        assert_eq!(refs[0].fields.findv(MAIN, "TI"), Some("A Title"));
        assert_eq!(refs[1].internal_type(), Some("BOOK"));
    }

    #[test]
    fn continuation_line_appends_with_space() {
        let src = "TY  - JOUR\nAB  - First part\n   of the abstract\nER  -\n";
        let mut diag = Diagnostics::new();
        let refs = RisReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs[0].fields.findv(MAIN, "AB"), Some("First part of the abstract"));
    }
}
