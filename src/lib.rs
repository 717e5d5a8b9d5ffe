#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # bibl: a bibliographic reference conversion library
//!
//! Reads bibliographic references from a dozen exchange formats (BibTeX,
//! BibLaTeX, RIS, EndNote tagged text and XML, ISI/Web of Science, Medline,
//! NBIB, MODS XML, EBI XML, Word 2007 bibliography XML, Copac) into a
//! single in-memory [`ReferenceCollection`], and writes that collection
//! back out to any of BibTeX, RIS, EndNote, ISI, NBIB, ADS-abs, MODS, or
//! Word 2007.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bibl::driver;
//! use bibl::params::{InputFormat, OutputFormat, Params};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = Params::new(InputFormat::BibTeX, OutputFormat::Ris);
//! let source = std::fs::read("refs.bib")?;
//! let (collection, diagnostics) = driver::read(&source, &params)?;
//! for warning in diagnostics.warnings() {
//!     eprintln!("{warning}");
//! }
//! let ris = driver::write(&collection, &params)?;
//! println!("{ris}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`field_store`] — the ordered, tagged, levelled field store shared by
//!   every reference
//! - [`reference`] — [`Reference`] and [`ReferenceCollection`]
//! - [`name`] — personal-name parsing, family/given splitting, "et al."
//!   detection
//! - [`xmltree`] — a generic, namespace-stripping XML tree for the XML
//!   exchange formats
//! - [`charset`] — BOM/XML-declaration charset detection and transcoding
//! - [`params`] — format selection and writer formatting options
//! - [`reftypes`] — per-format raw-type → canonical `Reftype` resolution
//! - [`genre`] — MARC/bibutils genre-term authority lookups
//! - [`cleaner`] — LaTeX-stripping and whitespace normalisation
//! - [`crossref`] — BibTeX-style cross-reference inheritance
//! - [`converter`] — the tag-translation dispatch table and title assembly
//! - [`readers`] — one `FormatReader` implementation per input format
//! - [`writers`] — one `FormatWriter` implementation per output format
//! - [`driver`] — top-level read/convert/write entry points
//! - [`diagnostics`] — non-fatal per-reference warnings collected during a
//!   pass
//! - [`error`] — `BiblError` and `Result`

pub mod charset;
pub mod cleaner;
pub mod converter;
pub mod crossref;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod field_store;
pub mod genre;
pub mod name;
pub mod params;
pub mod readers;
pub mod reference;
pub mod reftypes;
pub mod writers;
pub mod xmltree;

pub use diagnostics::Diagnostics;
pub use error::{BiblError, Result};
pub use field_store::{FieldEntry, FieldStore};
pub use params::{InputFormat, OutputFormat, Params, WriterOptions};
pub use reference::{Reference, ReferenceCollection};
pub use reftypes::Reftype;
