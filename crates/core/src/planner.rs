use crate::apply::{rename_or_preview, RenameOutcome};
use crate::config::RenameOptions;
use crate::error::ProcessError;
use crate::lister::list_metadata;
use crate::metadata::{read_metadata, DocumentKind, Metadata};
use crate::sanitize::{is_ascii, neutralize_separators, strip_illegal, transliterate};
use crate::template::{RenderError, Template, TemplateSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReport {
    Listed { path: PathBuf },
    Renamed(RenameOutcome),
}

/// Renders the new file name (with extension) for one document.
pub fn build_candidate_name(
    template: &Template,
    metadata: &Metadata,
    kind: DocumentKind,
    options: &RenameOptions,
) -> Result<String, RenderError> {
    let rendered = template.render(metadata)?;
    let mut name = format!("{}.{}", rendered, kind.extension());

    if options.ascii && !is_ascii(&name) {
        info!("transliterating non-ASCII: {name}");
        name = transliterate(&name);
    }

    // transliteration may introduce separators, e.g. "½" -> "1/2"
    name = neutralize_separators(&name);

    if options.safe {
        name = strip_illegal(&name);
    }

    let stem = name
        .strip_suffix(kind.extension())
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(&name);
    if stem.trim().is_empty() {
        return Err(RenderError::EmptyName);
    }

    Ok(name)
}

/// Lists or renames a single document according to `options`.
pub fn process_file<W: Write>(
    path: &Path,
    templates: &TemplateSet,
    options: &RenameOptions,
    out: &mut W,
) -> Result<FileReport, ProcessError> {
    let kind = DocumentKind::detect(path)
        .ok_or_else(|| ProcessError::UnsupportedFormat(path.to_path_buf()))?;
    debug!(path = %path.display(), ?kind, "processing");

    let metadata = read_metadata(path, kind)?;

    if options.list {
        list_metadata(out, path, &metadata, options.json)?;
        return Ok(FileReport::Listed {
            path: path.to_path_buf(),
        });
    }

    let name = build_candidate_name(templates.for_kind(kind), &metadata, kind, options)?;
    let outcome = rename_or_preview(path, &name, options.dry_run)?;
    Ok(FileReport::Renamed(outcome))
}
