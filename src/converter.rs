//! The tag-translation converter: the heart of the conversion pipeline.
//!
//! For each field in a parsed reference, looks up `(input_tag, reftype) ->
//! (output_tag, Process, level_offset)` and dispatches to one of a fixed
//! set of semantic actions. Grounded in `bibutils_sys/src/bibtexin.c`'s
//! `bibtex_assignment`/`process_*` family and `biblatexin.c`'s
//! `process_combined_title` / `process_bltsubtype` / `process_url`.

use crate::field_store::{level, FieldStore};
use crate::genre::genre_tag;
use crate::name::{parse_name, split_author_list};
use crate::reftypes::Reftype;

/// The semantic action a tag-translation table entry dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Process {
    /// Copy the value verbatim under the translated tag.
    Simple,
    /// Split into `PAGES:START`/`PAGES:STOP`.
    Pages,
    /// Append to a free-text `NOTES` field, collapsing newlines.
    Notes,
    /// Parse a ` and `-joined name list, one output entry per person.
    Person,
    /// Select the output tag from an accompanying editor-type hint.
    BltEditor,
    /// `howpublished`: thesis-type prefix or `PUBLISHER` fallback.
    Howpublished,
    /// Split on whitespace into one or more `URL` entries.
    Url,
    /// Emit under the genre-authority-resolved tag.
    Genre,
    /// Combine `eprint`+`eprinttype` into a typed identifier.
    BtEprint,
    /// Recognise a BibLaTeX thesis-type prefix.
    BltThesisType,
    /// Drop if `institution` is already present.
    BltSchool,
    /// `magazine`/`newspaper` BibLaTeX entrysubtype handling.
    BltSubtype,
    /// Discard the field silently.
    BltSkip,
    /// Deferred to the post-loop title assembly pass.
    Title,
}

/// One entry of a per-format tag translation table.
#[derive(Debug, Clone, Copy)]
pub struct TranslateEntry {
    /// Raw input tag, matched case-insensitively.
    pub input_tag: &'static str,
    /// Output tag to emit under (ignored by processes that compute their
    /// own, e.g. `Person`, `Title`).
    pub output_tag: &'static str,
    /// Dispatch action.
    pub process: Process,
    /// Added to the source entry's level to get the output level.
    pub level_offset: i32,
}

/// Look up a translation entry for `input_tag` within `table`, matched
/// case-insensitively. Callers fall back to the editor/person handling
/// outside the table for tags the table doesn't cover, when appropriate.
#[must_use]
pub fn translate_oldtag<'a>(
    table: &'a [TranslateEntry],
    input_tag: &str,
) -> Option<&'a TranslateEntry> {
    table.iter().find(|e| e.input_tag.eq_ignore_ascii_case(input_tag))
}

/// Split a pages value into start/stop on `-`, em-dash, en-dash, or
/// whitespace, collapsing multiple/mixed separators.
fn split_pages(value: &str) -> (String, String) {
    let seps: &[char] = &['-', '\u{2013}', '\u{2014}'];
    let trimmed = value.trim();
    if let Some(pos) = trimmed.find(|c: char| seps.contains(&c) || c.is_whitespace()) {
        let start = trimmed[..pos].trim();
        let rest = trimmed[pos..].trim_start_matches(|c: char| seps.contains(&c) || c.is_whitespace());
        (start.to_string(), rest.trim().to_string())
    } else {
        (trimmed.to_string(), String::new())
    }
}

fn reconstruct_stop(start: &str, stop: &str) -> String {
    if stop.len() >= start.len() || stop.is_empty() {
        return stop.to_string();
    }
    let prefix_len = start.len() - stop.len();
    format!("{}{}", &start[..prefix_len], stop)
}

/// Apply one translation table entry to one (tag, value, level) triple,
/// writing into `out`. Returns `false` if the process produced a warning
/// worth surfacing to the caller (missing editor type, unresolved eprint
/// type), `true` otherwise.
pub fn apply_process(
    entry: &TranslateEntry,
    value: &str,
    source_level: i32,
    out: &mut FieldStore,
    asis: &[&str],
    corps: &[&str],
    editortype_hint: Option<&str>,
) -> bool {
    let out_level = source_level + entry.level_offset;
    match entry.process {
        Process::Simple => {
            out.add(entry.output_tag, value, out_level);
            true
        }
        Process::Notes => {
            let collapsed = value.replace(['\n', '\r'], " ");
            out.add("NOTES", collapsed, out_level);
            true
        }
        Process::Pages => {
            let (mut start, mut stop) = split_pages(value);
            if !stop.is_empty() {
                stop = reconstruct_stop(&start, &stop);
            }
            if start.is_empty() && stop.is_empty() {
                out.add("ARTICLENUMBER", value, out_level);
            } else {
                if !start.is_empty() {
                    out.add("PAGES:START", std::mem::take(&mut start), out_level);
                }
                if !stop.is_empty() {
                    out.add("PAGES:STOP", stop, out_level);
                }
            }
            true
        }
        Process::Person => {
            let (names, _et_al) = split_author_list(value);
            for name in names {
                match parse_name(&name, asis, corps) {
                    crate::name::ParsedName::Person(encoded) => {
                        out.add(entry.output_tag, encoded, out_level);
                    }
                    crate::name::ParsedName::AsIs(s) | crate::name::ParsedName::Corp(s) => {
                        out.add(entry.output_tag, s, out_level);
                    }
                }
            }
            true
        }
        Process::BltEditor => {
            let tag = match editortype_hint {
                Some("collaborator") => "collaborator",
                Some("compiler") => "compiler",
                Some("redactor") => "redactor",
                Some("director") => "director",
                Some("producer") => "producer",
                Some("performer") => "performer",
                _ => "editor",
            };
            let (names, _) = split_author_list(value);
            for name in names {
                match parse_name(&name, asis, corps) {
                    crate::name::ParsedName::Person(encoded) => out.add(tag, encoded, out_level),
                    crate::name::ParsedName::AsIs(s) | crate::name::ParsedName::Corp(s) => {
                        out.add(tag, s, out_level)
                    }
                };
            }
            true
        }
        Process::Howpublished => {
            let lower = value.to_ascii_lowercase();
            if lower.starts_with("diploma") {
                out.add("GENRE:BIBUTILS", "thesis", level::MAIN);
            } else if lower.starts_with("habilitation") {
                out.add("GENRE:BIBUTILS", "habilitation thesis", level::MAIN);
            } else {
                out.add("PUBLISHER", value, out_level);
            }
            true
        }
        Process::Url => {
            for url in value.split_whitespace() {
                out.add("URL", url, out_level);
            }
            true
        }
        Process::Genre => {
            out.add(genre_tag(value), value, out_level);
            true
        }
        Process::BtEprint => {
            let tag = match editortype_hint.map(str::to_ascii_lowercase).as_deref() {
                Some("arxiv") => "ARXIV",
                Some("jstor") => "JSTOR",
                Some("pmid") => "PMID",
                Some("medline") => "MEDLINE",
                _ => {
                    out.add("EPRINT", value, out_level);
                    if let Some(t) = editortype_hint {
                        out.add("EPRINTTYPE", t, out_level);
                    }
                    return true;
                }
            };
            out.add(tag, value, out_level);
            true
        }
        Process::BltThesisType => {
            let lower = value.to_ascii_lowercase();
            let recognised = ["phdthesis", "mastersthesis", "diploma", "habilitation"]
                .iter()
                .any(|p| lower.starts_with(p));
            if recognised {
                out.add("GENRE:BIBUTILS", value, level::MAIN);
            } else {
                out.add(entry.output_tag, value, out_level);
            }
            true
        }
        Process::BltSchool => {
            if out.find("SCHOOL", level::MAIN).is_none() {
                out.add("SCHOOL", value, out_level);
            }
            true
        }
        Process::BltSubtype => {
            let lower = value.to_ascii_lowercase();
            if lower == "magazine" {
                out.add("GENRE:BIBUTILS", "magazine article", level::MAIN);
                out.add("GENRE:BIBUTILS", "magazine", level::HOST);
            } else if lower == "newspaper" {
                out.add("GENRE:BIBUTILS", "newspaper article", level::MAIN);
                out.add("GENRE:BIBUTILS", "newspaper", level::HOST);
            }
            true
        }
        Process::BltSkip => true,
        Process::Title => true,
    }
}

/// Post-field-loop title assembly: gather `title`/`subtitle`/`titleaddon`
/// at every level present and combine them into `TITLE`/`SUBTITLE`.
///
/// Per the resolved open question, the combined-title assembly's success
/// path is treated as a plain `Ok`, not inverted.
pub fn process_title_all(input: &FieldStore, out: &mut FieldStore, nosplittitle: bool) {
    let levels: std::collections::BTreeSet<i32> = input.iter().map(|e| e.level).collect();
    for lvl in levels {
        let title = input.findv(lvl, "title");
        let subtitle = input.findv(lvl, "subtitle");
        let addon = input.findv(lvl, "titleaddon");
        if title.is_none() && subtitle.is_none() && addon.is_none() {
            continue;
        }
        let Some(main) = title else { continue };

        if nosplittitle {
            let mut combined = main.to_string();
            if let Some(sub) = subtitle {
                if !main.ends_with('?') && !main.ends_with(':') {
                    combined.push(':');
                }
                combined.push(' ');
                combined.push_str(sub);
            }
            if let Some(addon) = addon {
                if !combined.ends_with('.') {
                    combined.push('.');
                }
                combined.push(' ');
                combined.push_str(addon);
            }
            out.add("TITLE", combined, lvl);
        } else {
            let mut title_out = main.to_string();
            if let Some(addon) = addon {
                if subtitle.is_none() {
                    if !title_out.ends_with('.') {
                        title_out.push('.');
                    }
                    title_out.push(' ');
                    title_out.push_str(addon);
                }
            }
            out.add("TITLE", title_out, lvl);
            if let Some(sub) = subtitle {
                let mut sub_out = sub.to_string();
                if let Some(addon) = addon {
                    if !sub_out.ends_with('.') {
                        sub_out.push('.');
                    }
                    sub_out.push(' ');
                    sub_out.push_str(addon);
                }
                out.add("SUBTITLE", sub_out, lvl);
            }
        }
    }
}

/// True if `reftype` is a collection-level type whose inherited parent
/// title should be renamed to `booktitle` (used by [`crate::crossref`]).
#[must_use]
pub fn wants_booktitle_rename(reftype: Reftype) -> bool {
    matches!(reftype, Reftype::Inproceedings | Reftype::Inbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_store::level::MAIN;

    #[test]
    fn pages_split_handles_en_dash() {
        let entry = TranslateEntry {
            input_tag: "pages",
            output_tag: "",
            process: Process::Pages,
            level_offset: 0,
        };
        let mut out = FieldStore::new();
        apply_process(&entry, "101\u{2013}9", MAIN, &mut out, &[], &[], None);
        assert_eq!(out.findv(MAIN, "PAGES:START"), Some("101"));
        assert_eq!(out.findv(MAIN, "PAGES:STOP"), Some("109"));
    }

    #[test]
    fn person_splits_and_names() {
        let entry = TranslateEntry {
            input_tag: "author",
            output_tag: "AUTHOR",
            process: Process::Person,
            level_offset: 0,
        };
        let mut out = FieldStore::new();
        apply_process(
            &entry,
            "Alice Jones and Bob Lee",
            MAIN,
            &mut out,
            &[],
            &[],
            None,
        );
        assert_eq!(out.findv_each(MAIN, "AUTHOR"), vec!["Jones|Alice", "Lee|Bob"]);
    }

    #[test]
    fn title_all_joins_title_and_subtitle_with_colon() {
        let mut input = FieldStore::new();
        input.add("title", "Main Title", MAIN);
        input.add("subtitle", "A Subtitle", MAIN);
        let mut out = FieldStore::new();
        process_title_all(&input, &mut out, false);
        assert_eq!(out.findv(MAIN, "TITLE"), Some("Main Title"));
        assert_eq!(out.findv(MAIN, "SUBTITLE"), Some("A Subtitle"));
    }

    #[test]
    fn title_all_nosplit_concatenates_single_field() {
        let mut input = FieldStore::new();
        input.add("title", "Main Title", MAIN);
        input.add("subtitle", "A Subtitle", MAIN);
        let mut out = FieldStore::new();
        process_title_all(&input, &mut out, true);
        assert_eq!(out.findv(MAIN, "TITLE"), Some("Main Title: A Subtitle"));
    }

    #[test]
    fn howpublished_diploma_becomes_thesis_genre() {
        let entry = TranslateEntry {
            input_tag: "howpublished",
            output_tag: "PUBLISHER",
            process: Process::Howpublished,
            level_offset: 0,
        };
        let mut out = FieldStore::new();
        apply_process(&entry, "Diploma thesis", MAIN, &mut out, &[], &[], None);
        assert_eq!(out.findv(MAIN, "GENRE:BIBUTILS"), Some("thesis"));
    }
}
