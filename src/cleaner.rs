//! Post-parse field cleanup, run once per reference before typing.
//!
//! Grounded in `bibutils_sys/src/bibtexin.c`'s LaTeX-stripping pass
//! (`bibtex_cleanvalue`/`bibtex_cleantoken`), re-expressed with `regex`
//! since the teacher crate already depends on it for MARC tag validation.

use crate::field_store::FieldStore;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"[ \t]+").unwrap();
    static ref LATEX_STYLE: Regex = Regex::new(
        r"\\(textit|textbf|emph|url|textsubscript|textsuperscript|it|em)\s*\{([^{}]*)\}"
    )
    .unwrap();
}

/// Tags whose values are treated as name lists and left untouched by LaTeX
/// stripping (the reader/converter's `Person` process tokenises them
/// separately). Matched per §9's documented substring rule: case-
/// insensitive containment, not exact equality.
const NAME_LIKE_SUBSTRINGS: &[&str] = &["AUTHOR", "EDITOR", "DIRECTOR", "PRODUCER", "TRANSLATOR"];

/// Tags whose values are passed through untouched (URLs must not have their
/// escapes stripped).
const VERBATIM_SUBSTRINGS: &[&str] = &["URL", "DOI"];

fn matches_any(tag: &str, substrings: &[&str]) -> bool {
    let upper = tag.to_ascii_uppercase();
    substrings.iter().any(|s| upper.contains(s))
}

/// True if `tag` is one of the free-text fields whose newlines collapse to
/// spaces rather than being preserved (per §9's documented substring rule
/// for `AUTHOR`/`ABSTRACT`/`SUMMARY`/`NOTE`, reproduced here verbatim).
fn is_single_line_field(tag: &str) -> bool {
    matches_any(tag, &["AUTHOR", "ABSTRACT", "SUMMARY", "NOTE"])
}

/// Strip LaTeX styling macros and normalise common escape sequences in one
/// value. Safe to call on any free-text field.
#[must_use]
pub fn strip_latex(value: &str) -> String {
    let mut s = value.replace("\\~", "\u{1}");
    s = s.replace('~', " ");
    s = s.replace('\u{1}', "~");
    s = LATEX_STYLE.replace_all(&s, "$2").to_string();
    s = s.replace("\\%", "%");
    s = s.replace("\\$", "$");
    s = s.replace("\\textdollar", "$");
    s = s.replace("\\textunderscore", "_");
    strip_unmatched_braces(&s)
}

fn strip_unmatched_braces(s: &str) -> String {
    let mut depth: i32 = 0;
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '{' => {
                depth += 1;
                out.push(ch);
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    out.push(ch);
                }
                // else: unmatched closing brace, drop it
            }
            _ => out.push(ch),
        }
    }
    out
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").to_string()
}

/// Run the BibTeX/BibLaTeX cleaning pass over every field in `fields`,
/// mutating values in place.
pub fn clean_bibtex_fields(fields: &mut FieldStore) {
    let entries: Vec<(usize, String, String)> = fields
        .iter_indexed()
        .map(|(i, e)| (i, e.tag.clone(), e.value.clone()))
        .collect();

    for (i, tag, value) in entries {
        if matches_any(&tag, NAME_LIKE_SUBSTRINGS) || matches_any(&tag, VERBATIM_SUBSTRINGS) {
            let cleaned = if is_single_line_field(&tag) {
                value.replace(['\n', '\r'], " ")
            } else {
                value
            };
            let cleaned = collapse_whitespace(&cleaned);
            replace_value(fields, i, cleaned);
            continue;
        }

        let mut cleaned = strip_latex(&value);
        if is_single_line_field(&tag) {
            cleaned = cleaned.replace(['\n', '\r'], " ");
        }
        let cleaned = collapse_whitespace(&cleaned);
        replace_value(fields, i, cleaned);
    }
}

fn replace_value(fields: &mut FieldStore, index: usize, value: String) {
    let tag = fields.tag(index).to_string();
    let level = fields.level(index);
    fields.replace_or_add(tag, value, level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_store::level::MAIN;

    #[test]
    fn strips_text_style_macros() {
        assert_eq!(strip_latex(r"\textit{Some Title}"), "Some Title");
        assert_eq!(strip_latex(r"\emph{word}"), "word");
    }

    #[test]
    fn tilde_and_escaped_tilde() {
        assert_eq!(strip_latex("A~B"), "A B");
        assert_eq!(strip_latex(r"A\~B"), "A~B");
    }

    #[test]
    fn drops_unmatched_closing_brace() {
        assert_eq!(strip_latex("A}B"), "AB");
        assert_eq!(strip_latex("{A}"), "{A}");
    }

    #[test]
    fn abstract_newlines_collapse_via_substring_match() {
        let mut fields = FieldStore::new();
        fields.add("LONGABSTRACT", "line one\nline two", MAIN);
        clean_bibtex_fields(&mut fields);
        assert_eq!(fields.findv(MAIN, "LONGABSTRACT"), Some("line one line two"));
    }

    #[test]
    fn url_passes_through_without_latex_stripping() {
        let mut fields = FieldStore::new();
        fields.add("URL", r"http://x/\~user", MAIN);
        clean_bibtex_fields(&mut fields);
        assert_eq!(fields.findv(MAIN, "URL"), Some(r"http://x/\~user"));
    }
}
