//! BibTeX writer.
//!
//! Grounded in `bibutils_sys/src/bibtexout.c`: bib type is picked from
//! `GENRE:*`/`ISSUANCE`, authors join via `\n and ` with family/given
//! mangling, titles route to `title`/`chapter`/`journal`/`booktitle`
//! depending on type and level, and a handful of identifier tags get
//! synthesised URL prefixes.

use crate::error::Result;
use crate::field_store::level::{HOST, MAIN, SERIES};
use crate::params::WriterOptions;
use crate::reference::{Reference, ReferenceCollection};
use crate::writers::{display_name, FormatWriter};

fn bib_type(reference: &Reference) -> &'static str {
    let genre = reference
        .fields
        .findv(MAIN, "GENRE:MARC")
        .or_else(|| reference.fields.findv(MAIN, "GENRE:BIBUTILS"))
        .unwrap_or("");
    let lower = genre.to_ascii_lowercase();
    if lower.contains("thesis") {
        "phdthesis"
    } else if lower.contains("conference") || lower.contains("proceedings") {
        "inproceedings"
    } else if reference.fields.findv(HOST, "TITLE").is_some() {
        "incollection"
    } else if reference.fields.findv(MAIN, "PUBLISHER").is_some()
        && reference.fields.findv(HOST, "TITLE").is_none()
    {
        "book"
    } else {
        "article"
    }
}

fn citation_key(reference: &Reference, strict_key: bool) -> String {
    let raw = reference.refnum().unwrap_or("ref").to_string();
    if strict_key {
        raw.chars().filter(char::is_ascii_alphanumeric).collect()
    } else {
        raw
    }
}

fn quote(value: &str, brackets: bool) -> String {
    if brackets {
        format!("{{{value}}}")
    } else {
        format!("\"{value}\"")
    }
}

fn format_authors(reference: &Reference, tag: &str) -> Option<String> {
    let names: Vec<String> = reference
        .fields
        .findv_each(MAIN, tag)
        .into_iter()
        .map(display_name)
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join("\n and "))
    }
}

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn month_name(value: &str) -> String {
    value
        .parse::<usize>()
        .ok()
        .and_then(|n| (1..=12).contains(&n).then(|| MONTH_NAMES[n - 1].to_string()))
        .unwrap_or_else(|| value.to_string())
}

fn synth_url(reference: &Reference) -> Option<String> {
    if let Some(v) = reference.fields.findv(MAIN, "ARXIV") {
        return Some(format!("http://arxiv.org/abs/{v}"));
    }
    if let Some(v) = reference.fields.findv(MAIN, "JSTOR") {
        return Some(format!("http://www.jstor.org/stable/{v}"));
    }
    if let Some(v) = reference.fields.findv(MAIN, "PMID") {
        return Some(format!("https://www.ncbi.nlm.nih.gov/pubmed/{v}"));
    }
    reference.fields.findv(MAIN, "URL").map(str::to_string)
}

fn write_field(out: &mut String, tag: &str, value: &str, options: &WriterOptions) {
    let tag = if options.uppercase_tags { tag.to_ascii_uppercase() } else { tag.to_string() };
    let pad = if options.whitespace { " " } else { "" };
    out.push_str(&format!("  {tag}{pad}={pad}{}", quote(value, options.brackets)));
}

/// BibTeX writer.
#[derive(Debug, Default)]
pub struct BibtexWriter;

fn write_reference(out: &mut String, reference: &Reference, options: &WriterOptions, is_last: bool) {
    let bibtype = bib_type(reference);
    let key = citation_key(reference, options.strict_key);
    out.push('@');
    out.push_str(bibtype);
    out.push('{');
    if !options.drop_key {
        out.push_str(&key);
    }
    out.push_str(",\n");

    let mut fields: Vec<(String, String)> = Vec::new();

    let main_title_tag = if bibtype == "inbook" { "chapter" } else { "title" };
    if let Some(title) = reference.fields.findv(MAIN, "TITLE") {
        let mut combined = title.to_string();
        if let Some(subtitle) = reference.fields.findv(MAIN, "SUBTITLE") {
            if !combined.ends_with('?') && !combined.ends_with(':') {
                combined.push(':');
            }
            combined.push(' ');
            combined.push_str(subtitle);
        }
        fields.push((main_title_tag.to_string(), combined));
    }
    if let Some(host_title) = reference.fields.findv(HOST, "TITLE") {
        let host_tag = match bibtype {
            "article" => "journal",
            "inproceedings" | "incollection" => "booktitle",
            _ => "title",
        };
        fields.push((host_tag.to_string(), host_title.to_string()));
    }
    if let Some(series) = reference.fields.findv(SERIES, "TITLE") {
        fields.push(("series".to_string(), series.to_string()));
    }

    if let Some(authors) = format_authors(reference, "AUTHOR") {
        fields.push(("author".to_string(), authors));
    }
    if let Some(editors) = format_authors(reference, "editor") {
        fields.push(("editor".to_string(), editors));
    }

    if let Some(year) = reference.fields.findv(MAIN, "DATE:YEAR") {
        fields.push(("year".to_string(), year.to_string()));
    }
    if let Some(month) = reference.fields.findv(MAIN, "DATE:MONTH") {
        fields.push(("month".to_string(), month_name(month)));
    }
    if let Some(day) = reference.fields.findv(MAIN, "DATE:DAY") {
        fields.push(("day".to_string(), day.to_string()));
    }

    let start = reference.fields.findv(MAIN, "PAGES:START");
    let stop = reference.fields.findv(MAIN, "PAGES:STOP");
    match (start, stop) {
        (Some(s), Some(e)) => {
            let dash = if options.single_dash { "-" } else { "--" };
            fields.push(("pages".to_string(), format!("{s}{dash}{e}")));
        }
        (Some(s), None) => fields.push(("pages".to_string(), s.to_string())),
        _ => {
            if let Some(an) = reference.fields.findv(MAIN, "ARTICLENUMBER") {
                fields.push(("pages".to_string(), an.to_string()));
            }
        }
    }

    let issue = reference.fields.findv(MAIN, "ISSUE");
    let number = reference.fields.findv(MAIN, "NUMBER");
    match (issue, number) {
        (Some(i), Some(n)) if i != n => {
            fields.push(("number".to_string(), i.to_string()));
            fields.push(("issue".to_string(), n.to_string()));
        }
        (Some(v), _) | (_, Some(v)) => fields.push(("number".to_string(), v.to_string())),
        _ => {}
    }

    for keyword in reference.fields.findv_each(MAIN, "KEYWORD") {
        fields.push(("keyword".to_string(), keyword.to_string()));
    }

    for (src, dst) in [
        ("DOI", "doi"),
        ("ISBN", "isbn"),
        ("ISSN", "issn"),
        ("LANGUAGE", "language"),
        ("NOTES", "note"),
        ("ANNOTE", "annote"),
        ("ABSTRACT", "abstract"),
    ] {
        if let Some(v) = reference.fields.findv(MAIN, src) {
            fields.push((dst.to_string(), v.to_string()));
        }
    }
    if let Some(url) = synth_url(reference) {
        fields.push(("url".to_string(), url));
    }

    for (i, (tag, value)) in fields.iter().enumerate() {
        write_field(out, tag, value, options);
        let is_field_last = i == fields.len() - 1;
        if !is_field_last || options.final_comma {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("}\n");
    if !is_last {
        out.push('\n');
    }
}

impl FormatWriter for BibtexWriter {
    fn write_all(&self, collection: &ReferenceCollection, options: &WriterOptions) -> Result<String> {
        let mut out = String::new();
        let len = collection.len();
        for (i, reference) in collection.iter().enumerate() {
            write_reference(&mut out, reference, options, i + 1 == len);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Reference;

    #[test]
    fn writes_article_with_author_and_pages() {
        let mut r = Reference::new();
        r.set_refnum("smith2020");
        r.fields.add("TITLE", "A Great Paper", MAIN);
        r.fields.add("AUTHOR", "Smith|John", MAIN);
        r.fields.add("DATE:YEAR", "2020", MAIN);
        r.fields.add("PAGES:START", "1", MAIN);
        r.fields.add("PAGES:STOP", "10", MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);

        let out = BibtexWriter.write_all(&c, &WriterOptions::default()).unwrap();
        assert!(out.starts_with("@article{smith2020,\n"));
        assert!(out.contains("title = \"A Great Paper\""));
        assert!(out.contains("author = \"Smith, John\""));
        assert!(out.contains("pages = \"1--10\""));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn synthesizes_arxiv_url() {
        let mut r = Reference::new();
        r.fields.add("ARXIV", "2001.00001", MAIN);
        let mut c = ReferenceCollection::new();
        c.add(r);
        let out = BibtexWriter.write_all(&c, &WriterOptions::default()).unwrap();
        assert!(out.contains("url = \"http://arxiv.org/abs/2001.00001\""));
    }

    #[test]
    fn strict_key_strips_non_alphanumerics() {
        let mut r = Reference::new();
        r.set_refnum("smith-2020!");
        let mut c = ReferenceCollection::new();
        c.add(r);
        let mut options = WriterOptions::default();
        options.strict_key = true;
        let out = BibtexWriter.write_all(&c, &options).unwrap();
        assert!(out.starts_with("@article{smith2020,\n"));
    }
}
