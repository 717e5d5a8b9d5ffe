//! End-to-end conversion scenarios run through `bibl::driver`.

use bibl::driver;
use bibl::field_store::level::MAIN;
use bibl::params::{InputFormat, OutputFormat, Params};

#[test]
fn bibtex_to_ris_minimal() {
    let source = br#"@article{key1, author = {Smith, John Q. Jr.}, title = {A Paper}, journal = {J. Phys.}, year = 2020, pages = {12--34}}"#;
    let params = Params::new(InputFormat::BibTeX, OutputFormat::Ris);
    let (collection, diagnostics) = driver::read(source, &params).expect("read");
    assert!(diagnostics.is_empty());
    assert_eq!(collection.len(), 1);

    let out = driver::write(&collection, &params).expect("write");
    assert!(out.starts_with("TY  - JOUR\n"));
    assert!(out.contains("TI  - A Paper\n"));
    assert!(out.contains("AU  - Smith, John Q., Jr.\n"));
    assert!(out.contains("PY  - 2020\n"));
    assert!(out.contains("SP  - 12\n"));
    assert!(out.contains("EP  - 34\n"));
    assert!(out.trim_end().ends_with("ER  -"));
}

#[test]
fn bibtex_crossref_inherits_parent_title_as_booktitle() {
    let source = br#"
@proceedings{p, title = {Parent}, year = {2019}}
@inproceedings{c, crossref = {p}, title = {Sub}}
"#;
    let params = Params::new(InputFormat::BibTeX, OutputFormat::BibTeX);
    let (collection, diagnostics) = driver::read(source, &params).expect("read");
    assert!(diagnostics.is_empty());

    let child = collection
        .iter()
        .find(|r| r.refnum() == Some("c"))
        .expect("child reference present");
    assert_eq!(child.fields.findv(MAIN, "TITLE"), Some("Sub"));
    assert_eq!(child.fields.findv(MAIN + 1, "booktitle"), Some("Parent"));
    assert_eq!(child.fields.findv(MAIN + 1, "DATE:YEAR"), Some("2019"));
}

#[test]
fn biblatex_string_macro_concatenation() {
    let source = br#"
@STRING{JPHYS = "J. Phys."}
@article{k, journal = JPHYS # " A"}
"#;
    let params = Params::new(InputFormat::BibLaTeX, OutputFormat::Ris);
    let (collection, diagnostics) = driver::read(source, &params).expect("read");
    assert!(diagnostics.is_empty());
    let reference = collection.get(0).expect("one reference");
    assert_eq!(reference.fields.findv(MAIN + 1, "TITLE"), Some("J. Phys. A"));
}

#[test]
fn author_list_with_et_al() {
    let source = br#"@misc{k, author = {Alice Jones and Bob Lee and others}}"#;
    let params = Params::new(InputFormat::BibTeX, OutputFormat::Ris);
    let (collection, diagnostics) = driver::read(source, &params).expect("read");
    assert!(diagnostics.is_empty());
    let reference = collection.get(0).expect("one reference");
    let authors = reference.fields.findv_each(MAIN, "AUTHOR");
    assert_eq!(authors, vec!["Jones|Alice", "Lee|Bob"]);
}

#[test]
fn mods_title_assembly_feeds_bibtex_writer() {
    let source = r#"<mods>
  <genre>academic journal</genre>
  <titleInfo><title>A</title><subTitle>B</subTitle></titleInfo>
</mods>"#;
    let params = Params::new(InputFormat::Mods, OutputFormat::BibTeX);
    let (collection, diagnostics) = driver::read(source.as_bytes(), &params).expect("read");
    assert!(diagnostics.is_empty());
    assert_eq!(collection.get(0).unwrap().fields.findv(MAIN, "TITLE"), Some("A"));
    assert_eq!(collection.get(0).unwrap().fields.findv(MAIN, "SUBTITLE"), Some("B"));

    let out = driver::write(&collection, &params).expect("write");
    assert!(out.contains("title = \"A: B\""));
}

#[test]
fn pubmed_style_pages_split() {
    let source = br#"@article{k, pages = {101-9}}"#;
    let params = Params::new(InputFormat::BibTeX, OutputFormat::Ris);
    let (collection, diagnostics) = driver::read(source, &params).expect("read");
    assert!(diagnostics.is_empty());
    let reference = collection.get(0).expect("one reference");
    assert_eq!(reference.fields.findv(MAIN, "PAGES:START"), Some("101"));
    assert_eq!(reference.fields.findv(MAIN, "PAGES:STOP"), Some("109"));
}
