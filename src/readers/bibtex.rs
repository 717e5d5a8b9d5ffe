//! BibTeX reader.
//!
//! Grounded in `bibutils_sys/src/bibtexin.c`: a reference begins at the
//! first unescaped `@` on a line (ignoring `%`-commented lines) and runs to
//! the matching closing brace/paren, honouring nested braces and quoted
//! strings. `@STRING{…}` defines a macro consulted when resolving bare,
//! non-numeric value tokens.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::field_store::level::MAIN;
use crate::reference::Reference;
use crate::readers::FormatReader;
use std::collections::HashMap;

/// BibTeX reader. Also backs the BibLaTeX reader, which reuses
/// [`parse_entries`] and adds its own author/`\href` post-processing on top
/// (see [`crate::readers::biblatex`]).
#[derive(Debug, Default)]
pub struct BibtexReader;

struct RawEntry {
    entry_type: String,
    key: String,
    fields: Vec<(String, String)>,
}

/// Split `source` into raw `(type, key, fields)` entries and resolved
/// `@STRING` macros. Shared by the BibTeX and BibLaTeX readers.
fn parse_entries(source: &str, diagnostics: &mut Diagnostics) -> Vec<RawEntry> {
    let mut macros: HashMap<String, String> = HashMap::new();
    let mut entries = Vec::new();
    let bytes: Vec<char> = source.chars().collect();
    let mut i = 0;
    let mut ref_index = 0;

    while i < bytes.len() {
        if bytes[i] == '%' {
            while i < bytes.len() && bytes[i] != '\n' {
                i += 1;
            }
            continue;
        }
        if bytes[i] != '@' {
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        let type_start = i;
        while i < bytes.len() && (bytes[i].is_alphanumeric()) {
            i += 1;
        }
        let entry_type: String = bytes[type_start..i].iter().collect();
        while i < bytes.len() && bytes[i].is_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || (bytes[i] != '{' && bytes[i] != '(') {
            continue;
        }
        let close = if bytes[i] == '{' { '}' } else { ')' };
        let open = bytes[i];
        i += 1;
        let body_start = i;
        let mut depth = 1;
        let mut in_quote = false;
        while i < bytes.len() && depth > 0 {
            match bytes[i] {
                '"' => in_quote = !in_quote,
                c if c == open && !in_quote => depth += 1,
                c if c == close && !in_quote => depth -= 1,
                _ => {}
            }
            if depth > 0 {
                i += 1;
            }
        }
        let body: String = bytes[body_start..i].iter().collect();
        if i < bytes.len() {
            i += 1; // consume closing delimiter
        } else {
            diagnostics.warn_reference(ref_index, format!("unterminated @{entry_type} starting at byte {start}"));
        }

        if entry_type.eq_ignore_ascii_case("STRING") {
            if let Some((name, value)) = parse_string_macro(&body, &macros) {
                macros.insert(name.to_ascii_lowercase(), value);
            }
            continue;
        }
        if entry_type.eq_ignore_ascii_case("COMMENT") || entry_type.eq_ignore_ascii_case("PREAMBLE") {
            continue;
        }

        match parse_entry_body(&body, &macros) {
            Some((key, fields)) => {
                entries.push(RawEntry { entry_type, key, fields });
                ref_index += 1;
            }
            None => diagnostics.warn_reference(ref_index, "could not parse entry body"),
        }
    }
    entries
}

fn parse_string_macro(body: &str, macros: &HashMap<String, String>) -> Option<(String, String)> {
    let eq = body.find('=')?;
    let name = body[..eq].trim().to_string();
    let value = resolve_value(body[eq + 1..].trim(), macros);
    Some((name, value))
}

/// Parse `key, tag = value, tag = value, ...` into the cite key and
/// resolved `(tag, value)` pairs.
fn parse_entry_body(body: &str, macros: &HashMap<String, String>) -> Option<(String, Vec<(String, String)>)> {
    let comma = body.find(',')?;
    let key = body[..comma].trim().to_string();
    let rest = &body[comma + 1..];

    let mut fields = Vec::new();
    let chars: Vec<char> = rest.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        while i < chars.len() && (chars[i].is_whitespace() || chars[i] == ',') {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }
        let tag_start = i;
        while i < chars.len() && chars[i] != '=' {
            i += 1;
        }
        let tag: String = chars[tag_start..i].iter().collect();
        let tag = tag.trim().to_string();
        if tag.is_empty() || i >= chars.len() {
            break;
        }
        i += 1; // consume '='
        let (value, next) = parse_value_tokens(&chars, i, macros);
        if !tag.is_empty() {
            fields.push((tag, value));
        }
        i = next;
    }
    Some((key, fields))
}

/// Parse one `#`-concatenated value expression starting at `start`, return
/// the resolved string and the index just past the trailing comma (or
/// end-of-input).
fn parse_value_tokens(chars: &[char], mut i: usize, macros: &HashMap<String, String>) -> (String, usize) {
    let mut parts = Vec::new();
    loop {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }
        match chars[i] {
            '{' => {
                let mut depth = 1;
                i += 1;
                let start = i;
                while i < chars.len() && depth > 0 {
                    match chars[i] {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    if depth > 0 {
                        i += 1;
                    }
                }
                parts.push(chars[start..i].iter().collect::<String>());
                if i < chars.len() {
                    i += 1;
                }
            }
            '"' => {
                i += 1;
                let start = i;
                while i < chars.len() && chars[i] != '"' {
                    i += 1;
                }
                parts.push(chars[start..i].iter().collect::<String>());
                if i < chars.len() {
                    i += 1;
                }
            }
            _ => {
                let start = i;
                while i < chars.len() && chars[i] != ',' && chars[i] != '#' {
                    i += 1;
                }
                let token: String = chars[start..i].iter().collect();
                let token = token.trim().to_string();
                if !token.is_empty() {
                    parts.push(resolve_value(&token, macros));
                }
            }
        }
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i < chars.len() && chars[i] == '#' {
            i += 1;
            continue;
        }
        break;
    }
    while i < chars.len() && chars[i] != ',' {
        i += 1;
    }
    if i < chars.len() {
        i += 1;
    }
    (parts.concat(), i)
}

fn resolve_value(token: &str, macros: &HashMap<String, String>) -> String {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return token.to_string();
    }
    macros
        .get(&token.to_ascii_lowercase())
        .cloned()
        .unwrap_or_else(|| token.to_string())
}

impl FormatReader for BibtexReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let entries = parse_entries(source, diagnostics);
        Ok(entries
            .into_iter()
            .map(|e| {
                let mut r = Reference::new();
                r.set_internal_type(e.entry_type);
                r.set_refnum(e.key);
                for (tag, value) in e.fields {
                    r.fields.add(tag, value, MAIN);
                }
                r
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_article_entry() {
        let src = r#"@article{smith2020,
            author = {Smith, John},
            title = {A Great Paper},
            year = 2020
        }"#;
        let mut diag = Diagnostics::new();
        let refs = BibtexReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].internal_type(), Some("article"));
        assert_eq!(refs[0].refnum(), Some("smith2020"));
        assert_eq!(refs[0].fields.findv(MAIN, "title"), Some("A Great Paper"));
        assert_eq!(refs[0].fields.findv(MAIN, "year"), Some("2020"));
    }

    #[test]
    fn concatenates_hash_joined_tokens() {
        let src = r#"@string{acm = "Association for Computing Machinery"}
        @misc{k1, publisher = acm # " Press"}"#;
        let mut diag = Diagnostics::new();
        let refs = BibtexReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(
            refs[0].fields.findv(MAIN, "publisher"),
            Some("Association for Computing Machinery Press")
        );
    }

    #[test]
    fn ignores_percent_commented_lines() {
        let src = "% @misc{bad, title = {nope}}\n@misc{k1, title = {yes}}";
        let mut diag = Diagnostics::new();
        let refs = BibtexReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].fields.findv(MAIN, "title"), Some("yes"));
    }

    #[test]
    fn handles_nested_braces_in_value() {
        let src = "@misc{k1, title = {A {Nested} Title}}";
        let mut diag = Diagnostics::new();
        let refs = BibtexReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs[0].fields.findv(MAIN, "title"), Some("A {Nested} Title"));
    }
}
