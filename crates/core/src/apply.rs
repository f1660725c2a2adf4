use crate::error::ProcessError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The computed name equals the current one.
    Unchanged { path: PathBuf },
    /// Dry run; nothing was touched.
    Preview { from: PathBuf, to: PathBuf },
    Renamed { from: PathBuf, to: PathBuf },
}

pub fn destination_for(source: &Path, candidate_base: &str) -> PathBuf {
    match source.parent() {
        Some(dir) => dir.join(candidate_base),
        None => PathBuf::from(candidate_base),
    }
}

/// Renames `source` to `candidate_base` inside its own directory, never
/// overwriting an existing file.
pub fn rename_or_preview(
    source: &Path,
    candidate_base: &str,
    dry_run: bool,
) -> Result<RenameOutcome, ProcessError> {
    let target = destination_for(source, candidate_base);

    if target == source {
        return Ok(RenameOutcome::Unchanged {
            path: source.to_path_buf(),
        });
    }

    if dry_run {
        return Ok(RenameOutcome::Preview {
            from: source.to_path_buf(),
            to: target,
        });
    }

    if path_exists(&target) {
        return Err(ProcessError::Conflict(target));
    }

    fs::rename(source, &target).map_err(|source_err| ProcessError::Rename {
        from: source.to_path_buf(),
        to: target.clone(),
        source: source_err,
    })?;
    debug!(from = %source.display(), to = %target.display(), "renamed");

    Ok(RenameOutcome::Renamed {
        from: source.to_path_buf(),
        to: target,
    })
}

/// Anything other than a definite "not found" counts as existing,
/// dangling symlinks included.
fn path_exists(path: &Path) -> bool {
    match fs::symlink_metadata(path) {
        Ok(_) => true,
        Err(err) => err.kind() != io::ErrorKind::NotFound,
    }
}
