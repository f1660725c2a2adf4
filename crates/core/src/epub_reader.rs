use crate::error::ProcessError;
use crate::metadata::{Metadata, MetadataReader};
use epub::doc::EpubDoc;
use std::path::Path;
use tracing::debug;

/// Reads the OPF package metadata of an EPUB container.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpubReader;

impl MetadataReader for EpubReader {
    fn extract(&self, path: &Path) -> Result<Metadata, ProcessError> {
        let doc = EpubDoc::new(path).map_err(|err| ProcessError::load(path, err))?;

        let mut metadata = Metadata::new();
        for item in &doc.metadata {
            let key = field_name(&item.property);
            if key.is_empty() {
                continue;
            }
            metadata.append(key, &item.value);
        }

        debug!(path = %path.display(), fields = metadata.len(), "read EPUB metadata");
        Ok(metadata)
    }
}

/// `creator` -> `Creator`; prefixed names such as `dcterms:modified` are kept.
fn field_name(property: &str) -> String {
    let property = property.trim();
    if property.contains(':') {
        return property.to_string();
    }
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
