//! BibLaTeX reader.
//!
//! Reuses the BibTeX entry tokenizer (identical brace/quote/macro grammar)
//! and adds BibLaTeX-specific post-processing: `\href{url}{text}` anchors
//! are split into a `URL` field plus the anchor text left in place, per
//! `biblatexin.c`'s `process_url`.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::field_store::level::MAIN;
use crate::reference::Reference;
use crate::readers::bibtex::BibtexReader;
use crate::readers::FormatReader;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HREF: Regex = Regex::new(r"\\href\{([^{}]*)\}\{([^{}]*)\}").unwrap();
}

/// BibLaTeX reader.
#[derive(Debug, Default)]
pub struct BiblatexReader;

fn extract_href(value: &str) -> (String, Option<String>) {
    if let Some(caps) = HREF.captures(value) {
        let url = caps.get(1).unwrap().as_str().to_string();
        let text = caps.get(2).unwrap().as_str().to_string();
        let replaced = HREF.replace(value, text.as_str()).to_string();
        (replaced, Some(url))
    } else {
        (value.to_string(), None)
    }
}

impl FormatReader for BiblatexReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let mut refs = BibtexReader.read_all(source, diagnostics)?;
        for r in &mut refs {
            let hrefs: Vec<(usize, String, String)> = r
                .fields
                .iter_indexed()
                .filter_map(|(i, e)| {
                    let (replaced, url) = extract_href(&e.value);
                    url.map(|u| (i, replaced, u))
                })
                .collect();
            for (i, replaced, url) in hrefs {
                let tag = r.fields.tag(i).to_string();
                let level = r.fields.level(i);
                r.fields.replace_or_add(tag, replaced, level);
                r.fields.add("URL", url, MAIN);
            }
        }
        Ok(refs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_href_url_and_keeps_anchor_text() {
        let src = r#"@misc{k1, title = {See \href{http://x.example/p}{this page}}}"#;
        let mut diag = Diagnostics::new();
        let refs = BiblatexReader.read_all(src, &mut diag).unwrap();
        assert_eq!(refs[0].fields.findv(MAIN, "title"), Some("See this page"));
        assert_eq!(refs[0].fields.findv(MAIN, "URL"), Some("http://x.example/p"));
    }
}
