use crate::metadata::{DocumentKind, Metadata};
use thiserror::Error;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Field(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,
    #[error("unclosed placeholder, missing \"}}}}\"")]
    Unclosed,
    #[error("empty placeholder")]
    EmptyPlaceholder,
    #[error("placeholder \"{0}\" must start with '.'")]
    MissingDot(String),
    #[error("invalid field name \"{0}\"")]
    InvalidField(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("no field \"{0}\" in document metadata")]
    MissingField(String),
    #[error("rendered name is empty")]
    EmptyName,
}

/// A parsed name template such as `{{.Title}} - {{.Creator}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    parts: Vec<TemplatePart>,
}

impl Template {
    /// Parses `input` after dropping a trailing document extension.
    pub fn parse(input: &str) -> Result<Self, TemplateError> {
        parse_template(trim_document_suffix(input)).map(|parts| Self { parts })
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    pub fn render(&self, metadata: &Metadata) -> Result<String, RenderError> {
        render_template(&self.parts, metadata)
    }
}

/// Templates for every document kind, all parsed up front.
#[derive(Debug, Clone)]
pub enum TemplateSet {
    Custom(Template),
    PerKind { epub: Template, pdf: Template },
}

impl TemplateSet {
    pub fn from_format(format: Option<&str>) -> Result<Self, TemplateError> {
        match format {
            Some(format) => Ok(TemplateSet::Custom(Template::parse(format)?)),
            None => Ok(TemplateSet::PerKind {
                epub: Template::parse(DocumentKind::Epub.default_template())?,
                pdf: Template::parse(DocumentKind::Pdf.default_template())?,
            }),
        }
    }

    pub fn for_kind(&self, kind: DocumentKind) -> &Template {
        match (self, kind) {
            (TemplateSet::Custom(template), _) => template,
            (TemplateSet::PerKind { epub, .. }, DocumentKind::Epub) => epub,
            (TemplateSet::PerKind { pdf, .. }, DocumentKind::Pdf) => pdf,
        }
    }
}

/// Strips one trailing `.epub` or `.pdf`, compared case-insensitively.
pub fn trim_document_suffix(input: &str) -> &str {
    for kind in DocumentKind::ALL {
        let ext = kind.extension();
        let Some(split) = input.len().checked_sub(ext.len() + 1) else {
            continue;
        };
        let Some(tail) = input.get(split..) else {
            continue;
        };
        if tail.starts_with('.') && tail[1..].eq_ignore_ascii_case(ext) {
            return &input[..split];
        }
    }
    input
}

pub fn parse_template(input: &str) -> Result<Vec<TemplatePart>, TemplateError> {
    if input.is_empty() {
        return Err(TemplateError::Empty);
    }

    let mut parts = Vec::new();
    let mut rest = input;

    while let Some(start) = rest.find(OPEN) {
        if start > 0 {
            parts.push(TemplatePart::Literal(rest[..start].to_string()));
        }
        let inner_and_rest = &rest[start + OPEN.len()..];
        let end = inner_and_rest.find(CLOSE).ok_or(TemplateError::Unclosed)?;
        parts.push(TemplatePart::Field(parse_field(&inner_and_rest[..end])?));
        rest = &inner_and_rest[end + CLOSE.len()..];
    }

    if !rest.is_empty() {
        parts.push(TemplatePart::Literal(rest.to_string()));
    }

    Ok(parts)
}

pub fn render_template(parts: &[TemplatePart], metadata: &Metadata) -> Result<String, RenderError> {
    let mut output = String::new();
    for part in parts {
        match part {
            TemplatePart::Literal(s) => output.push_str(s),
            TemplatePart::Field(key) => {
                let value = metadata
                    .get(key)
                    .ok_or_else(|| RenderError::MissingField(key.clone()))?;
                output.push_str(value);
            }
        }
    }
    Ok(output)
}

fn parse_field(raw: &str) -> Result<String, TemplateError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TemplateError::EmptyPlaceholder);
    }
    let Some(key) = raw.strip_prefix('.') else {
        return Err(TemplateError::MissingDot(raw.to_string()));
    };
    if key.is_empty() {
        return Err(TemplateError::EmptyPlaceholder);
    }
    if key.chars().any(|ch| ch.is_whitespace() || ch == '{' || ch == '}') {
        return Err(TemplateError::InvalidField(key.to_string()));
    }
    Ok(key.to_string())
}
