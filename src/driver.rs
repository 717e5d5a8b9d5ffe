//! Top-level read/convert/write dispatch: the single entry point a caller
//! uses instead of reaching into `readers`/`converter`/`writers` directly.
//!
//! Grounded in `bibutils_sys/src/bibutils.c`'s `bibl_read`/`bibl_write`
//! pair: pick a reader by [`InputFormat`], run the shared cleaning /
//! typing / cross-reference / conversion passes, then pick a writer by
//! [`OutputFormat`].

use crate::charset::detect_encoding;
use crate::cleaner::clean_bibtex_fields;
use crate::converter::{apply_process, process_title_all, translate_oldtag, Process, TranslateEntry};
use crate::crossref::resolve_crossrefs;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::field_store::{level, FieldStore};
use crate::params::{InputFormat, OutputFormat, Params};
use crate::readers::{
    biblatex::BiblatexReader, bibtex::BibtexReader, copac::CopacReader, ebi::EbiReader,
    endnote::EndNoteReader, endnote_xml::EndNoteXmlReader, isi::IsiReader, medline::MedlineReader,
    mods::ModsReader, nbib::NbibReader, ris::RisReader, word::WordReader, FormatReader,
};
use crate::reference::{Reference, ReferenceCollection};
use crate::reftypes::{type_of, Reftype};
use crate::writers::{
    adsabs::AdsAbsWriter, bibtex::BibtexWriter, endnote::EndNoteWriter, isi::IsiWriter,
    mods::ModsWriter, nbib::NbibWriter, ris::RisWriter, word2007::Word2007Writer, FormatWriter,
};

/// BibTeX input-tag translation table (article-shaped entries; the common
/// case across the example scenarios in spec §8).
const BIBTEX_TABLE: &[TranslateEntry] = &[
    TranslateEntry { input_tag: "title", output_tag: "title", process: Process::Title, level_offset: 0 },
    TranslateEntry { input_tag: "subtitle", output_tag: "subtitle", process: Process::Title, level_offset: 0 },
    TranslateEntry { input_tag: "titleaddon", output_tag: "titleaddon", process: Process::Title, level_offset: 0 },
    TranslateEntry { input_tag: "journal", output_tag: "TITLE", process: Process::Simple, level_offset: 1 },
    TranslateEntry { input_tag: "booktitle", output_tag: "TITLE", process: Process::Simple, level_offset: 1 },
    TranslateEntry { input_tag: "series", output_tag: "TITLE", process: Process::Simple, level_offset: 2 },
    TranslateEntry { input_tag: "author", output_tag: "AUTHOR", process: Process::Person, level_offset: 0 },
    TranslateEntry { input_tag: "editor", output_tag: "editor", process: Process::Person, level_offset: 0 },
    TranslateEntry { input_tag: "year", output_tag: "DATE:YEAR", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "month", output_tag: "DATE:MONTH", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "pages", output_tag: "PAGES", process: Process::Pages, level_offset: 0 },
    TranslateEntry { input_tag: "volume", output_tag: "VOLUME", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "number", output_tag: "ISSUE", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "publisher", output_tag: "PUBLISHER", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "school", output_tag: "SCHOOL", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "institution", output_tag: "SCHOOL", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "howpublished", output_tag: "PUBLISHER", process: Process::Howpublished, level_offset: 0 },
    TranslateEntry { input_tag: "abstract", output_tag: "ABSTRACT", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "note", output_tag: "NOTES", process: Process::Notes, level_offset: 0 },
    TranslateEntry { input_tag: "doi", output_tag: "DOI", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "isbn", output_tag: "ISBN", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "issn", output_tag: "ISSN", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "url", output_tag: "URL", process: Process::Url, level_offset: 0 },
    TranslateEntry { input_tag: "keywords", output_tag: "KEYWORD", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "language", output_tag: "LANGUAGE", process: Process::Simple, level_offset: 0 },
    TranslateEntry { input_tag: "crossref", output_tag: "CROSSREF", process: Process::Simple, level_offset: 0 },
];

/// BibLaTeX-specific additions layered on top of [`BIBTEX_TABLE`].
const BIBLATEX_EXTRA: &[TranslateEntry] = &[
    TranslateEntry { input_tag: "eprint", output_tag: "EPRINT", process: Process::BtEprint, level_offset: 0 },
    TranslateEntry { input_tag: "entrysubtype", output_tag: "", process: Process::BltSubtype, level_offset: 0 },
];

fn bibtex_translate(table: &[TranslateEntry], tag: &str) -> Option<&TranslateEntry> {
    translate_oldtag(table, tag).or_else(|| translate_oldtag(BIBLATEX_EXTRA, tag))
}

/// Select a [`FormatReader`] for `format`.
fn reader_for(format: InputFormat) -> Box<dyn FormatReader> {
    match format {
        InputFormat::Mods => Box::new(ModsReader),
        InputFormat::BibTeX => Box::new(BibtexReader),
        InputFormat::BibLaTeX => Box::new(BiblatexReader),
        InputFormat::Ris => Box::new(RisReader),
        InputFormat::EndNote => Box::new(EndNoteReader),
        InputFormat::Copac => Box::new(CopacReader),
        InputFormat::Isi => Box::new(IsiReader),
        InputFormat::Medline => Box::new(MedlineReader),
        InputFormat::EndNoteXml => Box::new(EndNoteXmlReader),
        InputFormat::Ebi => Box::new(EbiReader),
        InputFormat::Word => Box::new(WordReader),
        InputFormat::Nbib => Box::new(NbibReader),
    }
}

/// Select a [`FormatWriter`] for `format`.
fn writer_for(format: OutputFormat) -> Box<dyn FormatWriter> {
    match format {
        OutputFormat::Mods => Box::new(ModsWriter),
        OutputFormat::BibTeX => Box::new(BibtexWriter),
        OutputFormat::Ris => Box::new(RisWriter),
        OutputFormat::EndNote => Box::new(EndNoteWriter),
        OutputFormat::Isi => Box::new(IsiWriter),
        OutputFormat::Word2007 => Box::new(Word2007Writer),
        OutputFormat::AdsAbs => Box::new(AdsAbsWriter),
        OutputFormat::Nbib => Box::new(NbibWriter),
    }
}

/// Run the BibTeX/BibLaTeX input-tag translation table over every raw
/// field of one reference, producing its converted field store. Other
/// input formats already emit canonical tags directly from their readers
/// (spec §4.4/§4.5), so only BibTeX/BibLaTeX go through this table.
fn convert_bibtex_like(raw: &Reference, params: &Params, diagnostics: &mut Diagnostics, idx: usize) -> Reference {
    let table = BIBTEX_TABLE;
    let asis: Vec<&str> = params.asis.iter().map(String::as_str).collect();
    let corps: Vec<&str> = params.corps.iter().map(String::as_str).collect();

    let mut converted = FieldStore::new();

    for (_, entry) in raw.fields.iter_indexed() {
        if entry.tag.eq_ignore_ascii_case(crate::reference::INTERNAL_TYPE)
            || entry.tag.eq_ignore_ascii_case(crate::reference::REFNUM)
        {
            converted.add(&entry.tag, &entry.value, entry.level);
            continue;
        }
        match bibtex_translate(table, &entry.tag) {
            Some(e) if e.process == Process::Title => {
                // Left under its original lowercase tag for `finalize_titles`
                // to assemble uniformly across every reader, not just this one.
                converted.add(&entry.tag, &entry.value, entry.level);
            }
            Some(e) => {
                apply_process(e, &entry.value, entry.level, &mut converted, &asis, &corps, None);
            }
            None => {
                diagnostics.warn_field(idx, &entry.tag, "unrecognised tag, copied verbatim");
                converted.add(entry.tag.to_ascii_uppercase(), &entry.value, entry.level);
            }
        }
    }

    let mut out = Reference::new();
    out.fields = converted;
    out
}

fn is_title_component_tag(tag: &str) -> bool {
    ["title", "subtitle", "titleaddon"].iter().any(|t| tag.eq_ignore_ascii_case(t))
}

/// Assemble any lowercase `title`/`subtitle`/`titleaddon` entries left by a
/// reader or the BibTeX translation pass into canonical `TITLE`/`SUBTITLE`
/// entries, one level at a time. Applied uniformly after every reader, since
/// MODS (and any XML reader) defers title assembly the same way BibTeX does
/// (spec §4.6).
fn finalize_titles(fields: &mut FieldStore) {
    if !fields.iter().any(|e| is_title_component_tag(&e.tag)) {
        return;
    }
    let mut title_input = FieldStore::new();
    let mut rebuilt = FieldStore::new();
    for entry in fields.iter() {
        if is_title_component_tag(&entry.tag) {
            title_input.add(&entry.tag, &entry.value, entry.level);
        } else {
            rebuilt.add(&entry.tag, &entry.value, entry.level);
        }
    }
    process_title_all(&title_input, &mut rebuilt, false);
    *fields = rebuilt;
}

/// Read `source` under `params.read_format`, convert, and return the
/// resulting collection plus any diagnostics raised along the way.
pub fn read(source_bytes: &[u8], params: &Params) -> Result<(ReferenceCollection, Diagnostics)> {
    let mut diagnostics = Diagnostics::new();
    let reader = reader_for(params.read_format);

    let detected = detect_encoding(source_bytes);
    let charset = params.effective_charset(detected);
    let text = crate::charset::decode(source_bytes, charset);

    let raw_refs = reader.read_all(&text, &mut diagnostics)?;

    let needs_bibtex_pass = matches!(params.read_format, InputFormat::BibTeX | InputFormat::BibLaTeX);
    let mut collection: ReferenceCollection = raw_refs
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mut converted = if needs_bibtex_pass {
                convert_bibtex_like(r, params, &mut diagnostics, i)
            } else {
                r.clone()
            };
            if needs_bibtex_pass {
                clean_bibtex_fields(&mut converted.fields);
            }
            finalize_titles(&mut converted.fields);
            converted
        })
        .collect();

    // Resolved up front (not as a closure borrowing `collection`) since
    // `resolve_crossrefs` needs a mutable borrow of `collection` at the same
    // time it asks for each reference's type.
    let reftypes: Vec<Reftype> = collection
        .iter()
        .map(|r| {
            r.internal_type()
                .map_or(Reftype::Misc, |raw| type_of(params.read_format, Some(raw)))
        })
        .collect();
    resolve_crossrefs(&mut collection, |i| reftypes[i], &mut diagnostics);

    for (i, reftype) in reftypes.into_iter().enumerate() {
        collection.get_mut(i).unwrap().set_reftype(reftype);
    }

    Ok((collection, diagnostics))
}

/// Write `collection` under `params.write_format`.
pub fn write(collection: &ReferenceCollection, params: &Params) -> Result<String> {
    writer_for(params.write_format).write_all(collection, &params.options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_simple_bibtex_to_ris() {
        let source = b"@article{doe2020,\n  title = {A Paper},\n  author = {Jane Doe},\n  year = {2020},\n  pages = {1--9},\n}\n";
        let params = Params::new(InputFormat::BibTeX, OutputFormat::Ris);
        let (collection, _diag) = read(source, &params).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(0).unwrap().fields.findv(level::MAIN, "TITLE"), Some("A Paper"));

        let out = write(&collection, &params).unwrap();
        assert!(out.starts_with("TY  - JOUR\n"));
        assert!(out.contains("TI  - A Paper"));
        assert!(out.contains("AU  - Doe, Jane"));
    }

    #[test]
    fn unrecognised_bibtex_tag_is_diagnosed_not_dropped() {
        let source = b"@misc{x,\n  weirdtag = {value},\n}\n";
        let params = Params::new(InputFormat::BibTeX, OutputFormat::Ris);
        let (collection, diagnostics) = read(source, &params).unwrap();
        assert_eq!(collection.get(0).unwrap().fields.findv(level::MAIN, "WEIRDTAG"), Some("value"));
        assert!(!diagnostics.warnings().is_empty());
    }
}
