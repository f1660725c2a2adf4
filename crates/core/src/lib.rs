mod apply;
mod config;
mod epub_reader;
mod error;
mod lister;
mod metadata;
mod pdf_reader;
mod planner;
mod sanitize;
mod template;

pub use apply::{destination_for, rename_or_preview, RenameOutcome};
pub use config::RenameOptions;
pub use epub_reader::EpubReader;
pub use error::{ProcessError, UsageError};
pub use lister::{display_path, list_metadata};
pub use metadata::{read_metadata, DocumentKind, Metadata, MetadataReader};
pub use pdf_reader::PdfReader;
pub use planner::{build_candidate_name, process_file, FileReport};
pub use sanitize::{clean_value, is_ascii, neutralize_separators, strip_illegal, transliterate};
pub use template::{
    parse_template, render_template, trim_document_suffix, RenderError, Template, TemplateError,
    TemplatePart, TemplateSet,
};
