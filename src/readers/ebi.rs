//! EBI/Medline XML reader.
//!
//! Walks `<PubmedArticle>`/`<MedlineCitation>` wrapper elements, per
//! `bibutils_sys/src/ebiin.c`.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::field_store::level::MAIN;
use crate::reference::Reference;
use crate::readers::FormatReader;
use crate::xmltree::{parse_all, XmlNode};

/// EBI reader.
#[derive(Debug, Default)]
pub struct EbiReader;

fn extract(node: &XmlNode, ref_index: usize, diagnostics: &mut Diagnostics) -> Reference {
    let mut r = Reference::new();
    r.set_internal_type("Journal Article");

    let citation = node.child("MedlineCitation").unwrap_or(node);
    if let Some(pmid) = citation.child_text("PMID") {
        r.set_refnum(pmid.to_string());
        r.fields.add("PMID", pmid, MAIN);
    } else {
        diagnostics.warn_reference(ref_index, "no PMID element");
    }

    if let Some(article) = citation.child("Article") {
        if let Some(title) = article.child_text("ArticleTitle") {
            r.fields.add("title", title, MAIN);
        }
        if let Some(abs) = article.child("Abstract").and_then(|a| a.child_text("AbstractText")) {
            r.fields.add("ABSTRACT", abs, MAIN);
        }
        if let Some(author_list) = article.child("AuthorList") {
            for author in author_list.children_named("Author") {
                let last = author.child_text("LastName").unwrap_or_default();
                let fore = author.child_text("ForeName").unwrap_or_default();
                if !last.is_empty() {
                    let encoded = if fore.is_empty() {
                        last.to_string()
                    } else {
                        format!("{last}, {fore}")
                    };
                    r.fields.add("author", encoded, MAIN);
                }
            }
        }
        if let Some(journal) = article.child("Journal") {
            if let Some(title) = journal.child_text("Title") {
                r.fields.add("title", title, crate::field_store::level::HOST);
            }
        }
    }
    r
}

impl FormatReader for EbiReader {
    fn read_all(&self, source: &str, diagnostics: &mut Diagnostics) -> Result<Vec<Reference>> {
        let nodes = parse_all(source, "PubmedArticle")?;
        Ok(nodes
            .iter()
            .enumerate()
            .map(|(i, n)| extract(n, i, diagnostics))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_pmid_title_and_author() {
        let xml = r#"<PubmedArticle>
            <MedlineCitation>
                <PMID>555</PMID>
                <Article>
                    <ArticleTitle>An EBI Title</ArticleTitle>
                    <AuthorList>
                        <Author><LastName>Smith</LastName><ForeName>John</ForeName></Author>
                    </AuthorList>
                </Article>
            </MedlineCitation>
        </PubmedArticle>"#;
        let mut diag = Diagnostics::new();
        let refs = EbiReader.read_all(xml, &mut diag).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].refnum(), Some("555"));
        assert_eq!(refs[0].fields.findv(MAIN, "title"), Some("An EBI Title"));
        assert_eq!(refs[0].fields.findv(MAIN, "author"), Some("Smith, John"));
    }
}
