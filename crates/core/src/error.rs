use crate::template::RenderError;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("cannot use --json without --list")]
    JsonWithoutList,
}

/// Failure while handling a single input file.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("unsupported document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("loading file: {message}")]
    Load { path: PathBuf, message: String },
    #[error("executing template")]
    Render(#[from] RenderError),
    #[error("file already exists: {}", .0.display())]
    Conflict(PathBuf),
    #[error("renaming file: {} -> {}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("writing listing")]
    Output(#[source] io::Error),
}

impl ProcessError {
    pub(crate) fn load(path: &Path, err: impl fmt::Display) -> Self {
        ProcessError::Load {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
