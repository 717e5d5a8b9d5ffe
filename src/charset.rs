//! Character encoding identification and transcoding.
//!
//! Detection follows the source's charset-guessing order: an XML
//! declaration's `encoding="…"` attribute, then a UTF-8/UTF-16 byte-order
//! mark, else [`Charset::Unknown`]. [`CharsetSource`] records whether a
//! detected charset was superseded by an explicit caller override, so a
//! later stage can tell "the file said GB18030" from "the user told us
//! GB18030" apart.

use encoding_rs::{Encoding, GB18030, UTF_8};

/// An identified or assumed character encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// Encoding could not be determined.
    #[default]
    Unknown,
    /// UTF-8.
    Unicode,
    /// GB18030 (simplified Chinese).
    Gb18030,
    /// The format's documented default encoding (e.g. Latin-1 for classic
    /// RIS/ISI text files).
    Default,
}

/// Where a [`Charset`] value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetSource {
    /// The format's documented default, unconfirmed by any in-band signal.
    Default,
    /// Detected from the file itself (BOM, XML declaration).
    File,
    /// Explicitly supplied by the caller, overriding file detection.
    User,
}

impl Charset {
    /// The `encoding_rs` encoding to transcode with, if this charset needs
    /// transcoding at all (`Unicode` and `Unknown` are read as UTF-8
    /// directly and never reach this path).
    #[must_use]
    pub fn encoding(self) -> Option<&'static Encoding> {
        match self {
            Charset::Gb18030 => Some(GB18030),
            _ => None,
        }
    }
}

/// Detect a charset from a complete XML document's declaration and/or BOM.
///
/// Checks, in order: a UTF-8/UTF-16 BOM, then the `encoding="…"` attribute
/// of a leading `<?xml …?>` declaration. Returns [`Charset::Unknown`] if
/// neither is present or the declared name isn't recognised.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> Charset {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Charset::Unicode;
    }
    if bytes.starts_with(&[0xFE, 0xFF]) || bytes.starts_with(&[0xFF, 0xFE]) {
        return Charset::Unicode;
    }
    if let Some(decl_end) = find_decl_end(bytes) {
        let decl = &bytes[..decl_end];
        if let Some(name) = extract_encoding_name(decl) {
            return charset_from_name(&name);
        }
    }
    Charset::Unknown
}

fn find_decl_end(bytes: &[u8]) -> Option<usize> {
    let prefix = b"<?xml";
    if !bytes.starts_with(prefix) {
        return None;
    }
    memchr::memmem::find(bytes, b"?>").map(|pos| pos + 2)
}

fn extract_encoding_name(decl: &[u8]) -> Option<String> {
    let decl = std::str::from_utf8(decl).ok()?;
    let key = "encoding=";
    let start = decl.find(key)? + key.len();
    let rest = decl[start..].trim_start();
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

fn charset_from_name(name: &str) -> Charset {
    match name.to_ascii_lowercase().as_str() {
        "utf-8" | "utf8" => Charset::Unicode,
        "gb18030" | "gbk" | "gb2312" => Charset::Gb18030,
        _ => Charset::Unknown,
    }
}

/// Transcode `bytes` from `charset` into a UTF-8 `String`. `Unknown` and
/// `Unicode` are decoded as UTF-8 (lossily, replacing invalid sequences);
/// `Gb18030` is transcoded via `encoding_rs`; `Default` is treated as
/// UTF-8 since every format this crate reads ships its "default" bytes as
/// 7-bit-clean ASCII in practice.
#[must_use]
pub fn decode(bytes: &[u8], charset: Charset) -> String {
    match charset.encoding() {
        Some(enc) => {
            let (text, _, _) = enc.decode(bytes);
            text.into_owned()
        }
        None => {
            let (text, _, _) = UTF_8.decode(bytes);
            text.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"<root/>");
        assert_eq!(detect_encoding(&bytes), Charset::Unicode);
    }

    #[test]
    fn detects_declared_encoding() {
        let xml = b"<?xml version=\"1.0\" encoding=\"GB18030\"?><root/>";
        assert_eq!(detect_encoding(xml), Charset::Gb18030);
    }

    #[test]
    fn unknown_without_bom_or_declaration() {
        assert_eq!(detect_encoding(b"<root/>"), Charset::Unknown);
    }

    #[test]
    fn decode_gb18030_roundtrips_ascii_subset() {
        let bytes = b"hello";
        assert_eq!(decode(bytes, Charset::Gb18030), "hello");
    }
}
