use crate::epub_reader::EpubReader;
use crate::error::ProcessError;
use crate::pdf_reader::PdfReader;
use crate::sanitize::clean_value;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Epub,
    Pdf,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Epub, DocumentKind::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Epub => "epub",
            DocumentKind::Pdf => "pdf",
        }
    }

    pub fn default_template(self) -> &'static str {
        match self {
            DocumentKind::Epub => "{{.Title}} - {{.Creator}}",
            DocumentKind::Pdf => "{{.Title}} - {{.Author}}",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.extension().eq_ignore_ascii_case(ext))
    }

    /// Picks the kind from the file extension, falling back to the leading
    /// magic bytes for files without a recognised extension.
    pub fn detect(path: &Path) -> Option<Self> {
        if let Some(kind) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
        {
            return Some(kind);
        }
        sniff(path)
    }

    fn reader(self) -> &'static dyn MetadataReader {
        match self {
            DocumentKind::Epub => &EpubReader,
            DocumentKind::Pdf => &PdfReader,
        }
    }
}

fn sniff(path: &Path) -> Option<DocumentKind> {
    let mut head = [0u8; 8];
    let mut file = File::open(path).ok()?;
    let n = file.read(&mut head).ok()?;
    let head = &head[..n];
    if head.starts_with(PDF_MAGIC) {
        Some(DocumentKind::Pdf)
    } else if head.starts_with(ZIP_MAGIC) {
        Some(DocumentKind::Epub)
    } else {
        None
    }
}

/// Field name to value mapping read from a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the cleaned value. Values that are empty after cleaning are dropped.
    pub fn insert(&mut self, key: impl Into<String>, value: &str) {
        let value = clean_value(value);
        if value.is_empty() {
            return;
        }
        self.0.insert(key.into(), value);
    }

    /// Like `insert`, but joins onto an existing value with `", "`.
    pub fn append(&mut self, key: impl Into<String>, value: &str) {
        let value = clean_value(value);
        if value.is_empty() {
            return;
        }
        match self.0.entry(key.into()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
            }
            btree_map::Entry::Occupied(mut slot) => {
                let joined = slot.get_mut();
                joined.push_str(", ");
                joined.push_str(&value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value.as_ref());
        }
        metadata
    }
}

pub trait MetadataReader {
    fn extract(&self, path: &Path) -> Result<Metadata, ProcessError>;
}

pub fn read_metadata(path: &Path, kind: DocumentKind) -> Result<Metadata, ProcessError> {
    kind.reader().extract(path)
}
