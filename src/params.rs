//! Per-conversion parameters: format selection, writer options, and charset
//! overrides.
//!
//! Mirrors the source's `param` struct, but format identifiers become a
//! closed Rust enum instead of a runtime string lookup — construction
//! (spec §6) cannot fail the way the source's string-keyed table lookup
//! could, so [`Params::new`] has no fallible counterpart.

use crate::charset::{Charset, CharsetSource};

/// An input format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// MODS XML.
    Mods,
    /// BibTeX.
    BibTeX,
    /// RIS.
    Ris,
    /// EndNote tagged text.
    EndNote,
    /// Copac tagged text.
    Copac,
    /// ISI / Web of Science tagged text.
    Isi,
    /// Medline tagged text.
    Medline,
    /// EndNote XML.
    EndNoteXml,
    /// BibLaTeX.
    BibLaTeX,
    /// EBI XML.
    Ebi,
    /// Word 2007 bibliography XML.
    Word,
    /// NBIB (PubMed) tagged text.
    Nbib,
}

/// An output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// MODS XML.
    Mods,
    /// BibTeX.
    BibTeX,
    /// RIS.
    Ris,
    /// EndNote tagged text.
    EndNote,
    /// ISI / Web of Science tagged text.
    Isi,
    /// Word 2007 bibliography XML.
    Word2007,
    /// ADS abstract service tagged text.
    AdsAbs,
    /// NBIB (PubMed) tagged text.
    Nbib,
}

/// Writer-honoured formatting options. Kept as a plain struct of booleans
/// rather than a bitflags type: the option count is small and a struct is
/// more self-documenting at call sites (`opts.verbose`, not `opts.contains
/// (Opt::VERBOSE)`).
#[derive(Debug, Clone, Copy)]
pub struct WriterOptions {
    /// Emit extra diagnostic fields some formats support (e.g. BibTeX
    /// comments noting skipped fields).
    pub verbose: bool,
    /// End the last entry in a list with a trailing comma/separator where
    /// the format allows it.
    pub final_comma: bool,
    /// Render page ranges with a single dash instead of an en-dash.
    pub single_dash: bool,
    /// Pad output with extra whitespace for readability.
    pub whitespace: bool,
    /// Use brackets instead of quotes for BibTeX values.
    pub brackets: bool,
    /// Upper-case tag names in output.
    pub uppercase_tags: bool,
    /// Reject non-alphanumeric characters in generated citation keys.
    pub strict_key: bool,
    /// Truncate long titles in generated citation keys.
    pub short_title: bool,
    /// Omit the citation key entirely.
    pub drop_key: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            final_comma: false,
            single_dash: false,
            whitespace: true,
            brackets: false,
            uppercase_tags: false,
            strict_key: false,
            short_title: false,
            drop_key: false,
        }
    }
}

/// All parameters governing one read+write conversion pass.
#[derive(Debug, Clone)]
pub struct Params {
    /// Selected input format.
    pub read_format: InputFormat,
    /// Selected output format.
    pub write_format: OutputFormat,
    /// Writer formatting options.
    pub options: WriterOptions,
    /// Caller-supplied charset override, if any.
    pub charset_user: Option<Charset>,
    /// Where the effective charset came from, updated as detection runs.
    pub charset_source: CharsetSource,
    /// Caller-supplied as-is name list (never name-mangled).
    pub asis: Vec<String>,
    /// Caller-supplied corporate name list.
    pub corps: Vec<String>,
    /// Emit `tracing` progress/verbose events during the pass.
    pub verbose: bool,
}

impl Params {
    /// Build parameters for converting `read_format` references into
    /// `write_format`. Cannot fail: both formats are closed enum variants,
    /// so there is no runtime lookup to miss.
    #[must_use]
    pub fn new(read_format: InputFormat, write_format: OutputFormat) -> Self {
        Self {
            read_format,
            write_format,
            options: WriterOptions::default(),
            charset_user: None,
            charset_source: CharsetSource::Default,
            asis: Vec::new(),
            corps: Vec::new(),
            verbose: false,
        }
    }

    /// Override the detected charset with an explicit user choice.
    pub fn set_charset(&mut self, charset: Charset) {
        self.charset_user = Some(charset);
        self.charset_source = CharsetSource::User;
    }

    /// The effective charset for this pass: the user override if set, else
    /// `detected`.
    #[must_use]
    pub fn effective_charset(&self, detected: Charset) -> Charset {
        self.charset_user.unwrap_or(detected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_no_charset_override() {
        let p = Params::new(InputFormat::BibTeX, OutputFormat::Ris);
        assert_eq!(p.charset_source, CharsetSource::Default);
        assert_eq!(p.effective_charset(Charset::Gb18030), Charset::Gb18030);
    }

    #[test]
    fn set_charset_overrides_detection() {
        let mut p = Params::new(InputFormat::Mods, OutputFormat::Mods);
        p.set_charset(Charset::Unicode);
        assert_eq!(p.charset_source, CharsetSource::User);
        assert_eq!(p.effective_charset(Charset::Gb18030), Charset::Unicode);
    }
}
