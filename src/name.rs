//! Personal name parsing and formatting.
//!
//! Directly grounded in `bibutils_sys/src/name.c`. A name's surface form
//! (`"Smith, John Q. Jr."`, `"H. F. Author"`, `"SMITH JQ"`) is parsed into
//! the store's `Family|Given1|Given2||Suffix` encoding (spec §3); writers
//! reverse the encoding back into whatever punctuation their target format
//! wants.

use smallvec::SmallVec;

/// Outcome of parsing one name token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedName {
    /// A personal name in `Family|Given...||Suffix` form.
    Person(String),
    /// A name that should be emitted verbatim, untouched by name mangling
    /// (caller-supplied as-is list, or anything that fails to tokenize into
    /// more than one part).
    AsIs(String),
    /// A corporate name, emitted verbatim under a `:CORP` tag.
    Corp(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SuffixFlags {
    junior: bool,
    senior: bool,
    third: bool,
    fourth: bool,
    with_comma: bool,
}

impl SuffixFlags {
    fn any(self) -> bool {
        self.junior || self.senior || self.third || self.fourth
    }

    fn suffix_str(self) -> Option<&'static str> {
        if self.junior {
            Some("Jr.")
        } else if self.senior {
            Some("Sr.")
        } else if self.third {
            Some("III")
        } else if self.fourth {
            Some("IV")
        } else {
            None
        }
    }
}

fn identify_suffix(token: &str) -> SuffixFlags {
    match token {
        "Jr." | "Jr" => SuffixFlags { junior: true, ..Default::default() },
        "Jr.," | "Jr," => SuffixFlags { junior: true, with_comma: true, ..Default::default() },
        "Sr." | "Sr" => SuffixFlags { senior: true, ..Default::default() },
        "Sr.," | "Sr," => SuffixFlags { senior: true, with_comma: true, ..Default::default() },
        "III" => SuffixFlags { third: true, ..Default::default() },
        "III," => SuffixFlags { third: true, with_comma: true, ..Default::default() },
        "IV" => SuffixFlags { fourth: true, ..Default::default() },
        "IV," => SuffixFlags { fourth: true, with_comma: true, ..Default::default() },
        _ => SuffixFlags::default(),
    }
}

/// Locate a suffix token within `tokens[begin..end]`, per `name.c`'s
/// `has_suffix`: check the last token first (`"H. F. Author, Sr."`), then
/// any token immediately following a comma-terminated token
/// (`"Author, Sr., H. F."`).
fn find_suffix(tokens: &[String], begin: usize, end: usize) -> Option<(usize, SuffixFlags)> {
    if end == begin {
        return None;
    }
    let last = identify_suffix(&tokens[end - 1]);
    if last.any() {
        return Some((end - 1, last));
    }
    for i in begin..end.saturating_sub(1) {
        if tokens[i].ends_with(',') {
            let candidate = identify_suffix(&tokens[i + 1]);
            if candidate.any() {
                return Some((i + 1, candidate));
            }
        }
    }
    None
}

fn token_has_upper(token: &str) -> bool {
    token.chars().any(char::is_uppercase)
}

/// Absorb capitalised particle tokens preceding the trailing family-name
/// token, per `name.c`'s `name_multielement_nocomma` — handles quoted
/// multi-word surnames like `"Ludwig von Beethoven"` when `von Beethoven`
/// reads as capitalised. Lowercase particles (`von`, `de la`) are absorbed
/// too, matching the source's unconditional backward scan.
fn family_span_nocomma(tokens: &[String], begin: usize, end: usize, suffixpos: Option<usize>) -> (usize, usize) {
    let mut family_end = end - 1;
    if Some(family_end) == suffixpos {
        family_end = end.saturating_sub(2);
    }
    let mut family_start = family_end;
    if family_start >= begin && token_has_upper(&tokens[family_start]) {
        let mut i = family_start as isize - 1;
        let mut found: isize = -1;
        while i >= begin as isize && (found == -1 || !token_has_upper(&tokens[i as usize])) {
            if !token_has_upper(&tokens[i as usize]) {
                found = i;
            }
            i -= 1;
        }
        if found != -1 {
            family_start = found as usize;
        }
    }
    (family_start, family_end)
}

struct MultiParts {
    family: Vec<usize>,
    given: Vec<usize>,
    /// Set when `split_nocomma` recognised a trailing glommed-initials token
    /// (MEDLINE-style `"SMITH JQ"`); forces given-token character splitting
    /// in `build_multi` even though the family token isn't mixed-case.
    force_split_given: bool,
}

/// A trailing token that looks like concatenated initials with no periods
/// (`"JQ"`, `"RJ"`) rather than a real surname, per `name.c`'s handling of
/// MEDLINE-style `"Surname Initials"` author fields.
fn is_glommed_initials(token: &str) -> bool {
    let letters: Vec<char> = token.chars().filter(|c| c.is_alphabetic()).collect();
    (2..=4).contains(&letters.len()) && letters.iter().all(|c| c.is_uppercase()) && !token.contains('.')
}

fn split_nocomma(tokens: &[String], begin: usize, end: usize, suffixpos: Option<usize>) -> MultiParts {
    let last = if Some(end - 1) == suffixpos { end.saturating_sub(2) } else { end - 1 };
    if last > begin && is_glommed_initials(tokens[last].trim_end_matches(',')) {
        let family: Vec<usize> = (begin..last).filter(|&i| Some(i) != suffixpos).collect();
        return MultiParts { family, given: vec![last], force_split_given: true };
    }

    let (family_start, family_end) = family_span_nocomma(tokens, begin, end, suffixpos);
    let family: Vec<usize> = (family_start..=family_end).collect();
    let given: Vec<usize> = (begin..end - 1)
        .filter(|&i| !(family_start..=family_end).contains(&i) && Some(i) != suffixpos)
        .collect();
    MultiParts { family, given, force_split_given: false }
}

fn split_comma(tokens: &[String], begin: usize, end: usize, comma: usize, suffixpos: Option<usize>) -> MultiParts {
    let family: Vec<usize> = (begin..comma).filter(|&i| Some(i) != suffixpos).chain(std::iter::once(comma)).collect();
    let given: Vec<usize> = (comma + 1..end).filter(|&i| Some(i) != suffixpos).collect();
    MultiParts { family, given, force_split_given: false }
}

/// Classification used to decide whether given names should be split into
/// single-letter initials: all-uppercase tokens vs. mixed-case tokens.
fn is_all_upper(token: &str) -> bool {
    token.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase())
}

fn is_mixed_case(token: &str) -> bool {
    let has_upper = token.chars().any(char::is_uppercase);
    let has_lower = token.chars().any(char::is_lowercase);
    has_upper && has_lower
}

/// Split a given-name token into single-character initials, per `name.c`'s
/// `add_given_split`, joined into the `|`-separated given-name slots.
fn split_given_chars(token: &str, out: &mut Vec<String>) {
    for ch in token.trim_matches(',').chars() {
        if ch.is_whitespace() {
            continue;
        }
        out.push(ch.to_string());
    }
}

fn build_multi(tokens: &[String], parts: &MultiParts) -> String {
    let family_case_mixed = parts
        .family
        .iter()
        .any(|&i| is_mixed_case(tokens[i].trim_end_matches(',')));
    let given_all_upper = !parts.given.is_empty()
        && parts
            .given
            .iter()
            .all(|&i| is_all_upper(tokens[i].trim_end_matches(',')));

    let mut name = String::new();
    for (n, &i) in parts.family.iter().enumerate() {
        if n > 0 {
            name.push(' ');
        }
        name.push_str(tokens[i].trim_end_matches(','));
    }

    let should_split = given_all_upper && (family_case_mixed || parts.force_split_given);
    let mut given_tokens: Vec<String> = Vec::new();
    for &i in &parts.given {
        let tok = tokens[i].trim_end_matches(',');
        if should_split {
            split_given_chars(tok, &mut given_tokens);
        } else {
            given_tokens.push(tok.to_string());
        }
    }
    for g in given_tokens {
        name.push('|');
        name.push_str(&g);
    }
    name
}

/// Parse a single already-tokenised name span into the store encoding,
/// mirroring `name.c`'s `name_construct_multi`.
fn construct_multi(tokens: &[String]) -> String {
    let begin = 0;
    let end = tokens.len();
    let (suffixpos, suffix) = find_suffix(tokens, begin, end)
        .map(|(pos, f)| (Some(pos), f))
        .unwrap_or((None, SuffixFlags::default()));

    let mut comma: Option<usize> = None;
    let mut tokens = tokens.to_vec();
    for i in begin..end {
        if comma.is_some() {
            break;
        }
        if Some(i) == suffixpos {
            continue;
        }
        if tokens[i].ends_with(',') {
            if suffix.any() && Some(i) == suffixpos.map(|p| p.wrapping_sub(1)) && !suffix.with_comma {
                let trimmed = tokens[i].trim_end_matches(',').to_string();
                tokens[i] = trimmed;
            } else {
                comma = Some(i);
            }
        }
    }

    let parts = match comma {
        Some(c) => split_comma(&tokens, begin, end, c, suffixpos),
        None => split_nocomma(&tokens, begin, end, suffixpos),
    };

    let mut built = build_multi(&tokens, &parts);
    if let Some(suffix_str) = suffix.suffix_str() {
        built.push_str("||");
        built.push_str(suffix_str);
    }
    built
}

/// Tokenise a name's surface form on whitespace, after inserting a space
/// after every comma (so `"Smith,John"` tokenises like `"Smith, John"`).
fn tokenize(input: &str) -> SmallVec<[String; 4]> {
    let spaced = input.replace(',', ", ");
    spaced.split_whitespace().map(str::to_string).collect()
}

/// Parse one name. `asis`/`corps` are caller-supplied verbatim lists
/// (company names, names that should never be mangled); if `name` appears
/// in either, it is returned untouched as [`ParsedName::AsIs`] /
/// [`ParsedName::Corp`].
///
/// Idempotent on already-parsed names: feeding `"Smith|John"` back in
/// produces a single-token name (no comma, contains `|`), which the source
/// treats as already-mangled and returns as-is — see
/// [`parse_name_idempotent`] test below for the property this guarantees.
#[must_use]
pub fn parse_name(input: &str, asis: &[&str], corps: &[&str]) -> ParsedName {
    if input.is_empty() {
        return ParsedName::AsIs(String::new());
    }
    if asis.contains(&input) {
        return ParsedName::AsIs(input.to_string());
    }
    if corps.contains(&input) {
        return ParsedName::Corp(input.to_string());
    }
    let tokens = tokenize(input);
    if tokens.len() <= 1 {
        return ParsedName::AsIs(input.to_string());
    }
    ParsedName::Person(construct_multi(&tokens))
}

/// Number of trailing tokens that form an `et al.` marker, per `name.c`'s
/// `name_findetal`: either a single token (`"et al."`, `"etalia"`, …) or
/// the two-token form `"et" "al."`.
#[must_use]
pub fn et_al_trailing_count(names: &[&str]) -> usize {
    const SINGLE: &[&str] = &[
        "et alia", "et al.", "et al.,", "et al", "etalia", "etal.", "etal",
    ];
    let Some(&last) = names.last() else {
        return 0;
    };
    if SINGLE.iter().any(|s| s.eq_ignore_ascii_case(last)) {
        return 1;
    }
    if names.len() >= 2 {
        let second_last = names[names.len() - 2];
        if second_last.eq_ignore_ascii_case("et") {
            const TAIL: &[&str] = &["alia", "al.", "al.,", "al"];
            if TAIL.iter().any(|s| s.eq_ignore_ascii_case(last)) {
                return 2;
            }
        }
    }
    0
}

/// Split a ` and `-joined BibTeX/BibLaTeX author list into individual
/// surface-form names, detecting a trailing `and others` / `et al.` marker.
/// Returns `(names, has_et_al)`.
#[must_use]
pub fn split_author_list(value: &str) -> (Vec<String>, bool) {
    let mut parts: Vec<String> = value
        .split(" and ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let has_et_al = parts
        .last()
        .is_some_and(|p| p.eq_ignore_ascii_case("others") || p.eq_ignore_ascii_case("et al."));
    if has_et_al {
        parts.pop();
    }
    (parts, has_et_al)
}

/// Reconstruct `"Family, Given Given, Suffix"`-style display form from the
/// store encoding, per `name.c`'s `name_build_withcomma`: the suffix trails
/// the given names after a comma, rather than attaching to the surname.
/// Single-character given-name tokens get a trailing period (initials).
#[must_use]
pub fn build_with_comma(encoded: &str) -> String {
    let (name_part, suffix) = match encoded.split_once("||") {
        Some((n, s)) => (n, Some(s)),
        None => (encoded, None),
    };
    let mut tokens = name_part.split('|');
    let mut out = String::new();
    if let Some(family) = tokens.next() {
        out.push_str(family);
    }
    let mut first = true;
    for given in tokens {
        out.push_str(if first { ", " } else { " " });
        first = false;
        out.push_str(given);
        if given.chars().count() == 1 {
            out.push('.');
        }
    }
    if let Some(suffix) = suffix {
        out.push_str(", ");
        out.push_str(suffix);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_two_token_name() {
        match parse_name("John Smith", &[], &[]) {
            ParsedName::Person(p) => assert_eq!(p, "Smith|John"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parse_comma_form_with_suffix() {
        match parse_name("Smith, John Q. Jr.", &[], &[]) {
            ParsedName::Person(p) => assert_eq!(p, "Smith|John|Q||Jr."),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parse_name_idempotent() {
        let first = match parse_name("Smith, John", &[], &[]) {
            ParsedName::Person(p) => p,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(first, "Smith|John");
        // Already-parsed single-token input (no comma) is not re-mangled.
        match parse_name(&first, &[], &[]) {
            ParsedName::AsIs(s) => assert_eq!(s, first),
            other => panic!("expected AsIs on re-parse, got {other:?}"),
        }
    }

    #[test]
    fn asis_and_corp_lists() {
        assert_eq!(
            parse_name("Acme Corp.", &[], &["Acme Corp."]),
            ParsedName::Corp("Acme Corp.".to_string())
        );
        assert_eq!(
            parse_name("The Rolling Stones", &["The Rolling Stones"], &[]),
            ParsedName::AsIs("The Rolling Stones".to_string())
        );
    }

    #[test]
    fn et_al_detection_single_and_split_forms() {
        assert_eq!(et_al_trailing_count(&["Jones", "et al."]), 1);
        assert_eq!(et_al_trailing_count(&["Jones", "et", "al."]), 2);
        assert_eq!(et_al_trailing_count(&["Jones", "Lee"]), 0);
    }

    #[test]
    fn split_author_list_detects_others() {
        let (names, et_al) = split_author_list("Alice Jones and Bob Lee and others");
        assert_eq!(names, vec!["Alice Jones", "Bob Lee"]);
        assert!(et_al);
    }

    #[test]
    fn mixed_case_family_all_upper_given_splits_initials() {
        match parse_name("SMITH JQ", &[], &[]) {
            ParsedName::Person(p) => assert_eq!(p, "SMITH|J|Q"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn build_with_comma_roundtrip() {
        assert_eq!(build_with_comma("Smith|John|Q"), "Smith, John Q.");
        assert_eq!(build_with_comma("Smith|John||Jr."), "Smith, John, Jr.");
    }
}
