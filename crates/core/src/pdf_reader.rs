use crate::error::ProcessError;
use crate::metadata::{Metadata, MetadataReader};
use chrono::NaiveDate;
use lopdf::{Dictionary, Document, Object};
use std::path::Path;
use tracing::{debug, warn};

const DATE_KEYS: &[&str] = &["CreationDate", "ModDate"];
const UTF16_BOM: &[u8] = &[0xFE, 0xFF];
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Reads the document information dictionary of a PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl MetadataReader for PdfReader {
    fn extract(&self, path: &Path) -> Result<Metadata, ProcessError> {
        let doc = Document::load(path).map_err(|err| ProcessError::load(path, err))?;

        let mut metadata = Metadata::new();
        let Some(info) = info_dictionary(&doc) else {
            debug!(path = %path.display(), "PDF has no information dictionary");
            return Ok(metadata);
        };

        for (key, value) in info.iter() {
            let key = String::from_utf8_lossy(key).into_owned();
            let Some(text) = text_value(&doc, value) else {
                warn!(path = %path.display(), key = %key, "skipping non-text PDF info entry");
                continue;
            };
            let text = if DATE_KEYS.contains(&key.as_str()) {
                normalize_pdf_date(&text).unwrap_or(text)
            } else {
                text
            };
            metadata.insert(key, &text);
        }

        debug!(path = %path.display(), fields = metadata.len(), "read PDF metadata");
        Ok(metadata)
    }
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Resolves at most one level of indirection.
fn text_value(doc: &Document, value: &Object) -> Option<String> {
    match value {
        Object::Reference(id) => doc.get_object(*id).ok().and_then(direct_text),
        other => direct_text(other),
    }
}

fn direct_text(value: &Object) -> Option<String> {
    match value {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// PDF text strings are UTF-16BE with a byte order mark, or PDFDocEncoding,
/// which agrees with Latin-1 for the printable range.
pub(crate) fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(UTF16_BOM) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(utf8) = bytes.strip_prefix(UTF8_BOM) {
        return String::from_utf8_lossy(utf8).into_owned();
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// `D:20200131153000+01'00'` -> `2020-01-31`. Only the date part is kept so
/// the value stays usable inside a file name.
pub(crate) fn normalize_pdf_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.strip_prefix("D:").unwrap_or(raw);
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        0..=3 => None,
        4 | 5 => Some(digits[..4].to_string()),
        6 | 7 => NaiveDate::parse_from_str(&format!("{}01", &digits[..6]), "%Y%m%d")
            .ok()
            .map(|d| d.format("%Y-%m").to_string()),
        _ => NaiveDate::parse_from_str(&digits[..8], "%Y%m%d")
            .ok()
            .map(|d| d.format("%Y-%m-%d").to_string()),
    }
}


#[cfg(test)]
mod tests {
    use super::fixture::write_pdf;
    use super::{decode_text_string, normalize_pdf_date, PdfReader};
    use crate::error::ProcessError;
    use crate::metadata::MetadataReader;
    use lopdf::{Object, StringFormat};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn decode_text_string_handles_utf16_and_latin1() {
        let utf16 = [0xFE, 0xFF, 0x00, 0x43, 0x00, 0x61, 0x00, 0x66, 0x00, 0xE9];
        assert_eq!(decode_text_string(&utf16), "Café");
        assert_eq!(decode_text_string(b"Caf\xe9"), "Café");
        assert_eq!(decode_text_string(b"\xef\xbb\xbfCaf\xc3\xa9"), "Café");
    }

    #[test]
    fn normalize_pdf_date_keeps_date_part() {
        assert_eq!(
            normalize_pdf_date("D:20200131153000+01'00'").as_deref(),
            Some("2020-01-31")
        );
        assert_eq!(normalize_pdf_date("D:199912").as_deref(), Some("1999-12"));
        assert_eq!(normalize_pdf_date("2021").as_deref(), Some("2021"));
        assert_eq!(normalize_pdf_date("D:20201399"), None);
        assert_eq!(normalize_pdf_date("yesterday"), None);
    }

    #[test]
    fn extract_reads_info_dictionary() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("paper.pdf");
        write_pdf(
            &path,
            vec![
                (
                    "Title",
                    Object::String(b"Foo\0\0".to_vec(), StringFormat::Hexadecimal),
                ),
                (
                    "Author",
                    Object::String(
                        vec![0xFE, 0xFF, 0x00, 0x42, 0x00, 0xE4, 0x00, 0x72],
                        StringFormat::Hexadecimal,
                    ),
                ),
                ("CreationDate", Object::string_literal("D:20200131153000Z")),
                ("Pages", Object::Integer(3)),
            ],
        );

        let meta = PdfReader.extract(&path).expect("pdf should parse");
        assert_eq!(meta.get("Title"), Some("Foo"));
        assert_eq!(meta.get("Author"), Some("Bär"));
        assert_eq!(meta.get("CreationDate"), Some("2020-01-31"));
        assert_eq!(meta.get("Pages"), None);
    }

    #[test]
    fn extract_fails_for_garbage() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("broken.pdf");
        fs::write(&path, b"definitely not a pdf").expect("write");

        let err = PdfReader.extract(&path).expect_err("must fail");
        assert!(matches!(err, ProcessError::Load { .. }));
    }
}
