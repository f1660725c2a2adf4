use crate::error::UsageError;
use crate::template::{TemplateError, TemplateSet};

/// Run-wide settings, built once from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameOptions {
    pub list: bool,
    pub json: bool,
    pub ascii: bool,
    pub safe: bool,
    pub dry_run: bool,
    /// User template; `None` selects the default for each document kind.
    pub format: Option<String>,
}

impl RenameOptions {
    pub fn validate(&self) -> Result<(), UsageError> {
        if self.json && !self.list {
            return Err(UsageError::JsonWithoutList);
        }
        Ok(())
    }

    pub fn templates(&self) -> Result<TemplateSet, TemplateError> {
        TemplateSet::from_format(self.format.as_deref())
    }
}
