use crate::error::ProcessError;
use crate::metadata::Metadata;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

const LABEL_WIDTH: usize = 10;

#[derive(Debug, Serialize)]
struct ListRecord<'a> {
    path: String,
    metadata: &'a Metadata,
}

/// Path as shown in listings: relative input stays as typed, absolute input
/// is shown relative to `cwd` when beneath it, otherwise by file name.
pub fn display_path(path: &Path, cwd: Option<&Path>) -> PathBuf {
    if path.is_relative() {
        return path.to_path_buf();
    }
    if let Some(relative) = cwd.and_then(|cwd| path.strip_prefix(cwd).ok()) {
        if !relative.as_os_str().is_empty() {
            return relative.to_path_buf();
        }
    }
    path.file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| path.to_path_buf())
}

pub fn list_metadata<W: Write>(
    out: &mut W,
    path: &Path,
    metadata: &Metadata,
    json: bool,
) -> Result<(), ProcessError> {
    let cwd = std::env::current_dir().ok();
    let shown = display_path(path, cwd.as_deref());
    write_listing(out, &shown, metadata, json).map_err(ProcessError::Output)
}

fn write_listing<W: Write>(
    out: &mut W,
    shown: &Path,
    metadata: &Metadata,
    json: bool,
) -> std::io::Result<()> {
    if json {
        let record = ListRecord {
            path: shown.display().to_string(),
            metadata,
        };
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
        return Ok(());
    }

    let pretty = serde_json::to_string_pretty(metadata)?;
    let continuation = format!("\n{:LABEL_WIDTH$}| ", "");
    writeln!(out, "{:<LABEL_WIDTH$}| {}", "path", shown.display())?;
    writeln!(
        out,
        "{:<LABEL_WIDTH$}| {}",
        "metadata",
        pretty.replace('\n', &continuation)
    )?;
    writeln!(out, "{}+", "-".repeat(LABEL_WIDTH))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{display_path, write_listing};
    use crate::metadata::Metadata;
    use std::path::{Path, PathBuf};

    fn metadata() -> Metadata {
        [("Title", "Foo"), ("Creator", "Bar")].into_iter().collect()
    }

    #[test]
    fn display_path_relative_is_kept() {
        assert_eq!(
            display_path(Path::new("books/a.epub"), Some(Path::new("/home/u"))),
            PathBuf::from("books/a.epub")
        );
    }

    #[cfg(unix)]
    #[test]
    fn display_path_absolute_is_relativized_or_basename() {
        let cwd = Path::new("/home/u");
        assert_eq!(
            display_path(Path::new("/home/u/books/a.epub"), Some(cwd)),
            PathBuf::from("books/a.epub")
        );
        assert_eq!(
            display_path(Path::new("/srv/books/a.epub"), Some(cwd)),
            PathBuf::from("a.epub")
        );
        assert_eq!(
            display_path(Path::new("/srv/books/a.epub"), None),
            PathBuf::from("a.epub")
        );
    }

    #[test]
    fn human_listing_indents_metadata_under_label() {
        let mut out = Vec::new();
        write_listing(&mut out, Path::new("a.epub"), &metadata(), false).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text,
            concat!(
                "path      | a.epub\n",
                "metadata  | {\n",
                "          |   \"Creator\": \"Bar\",\n",
                "          |   \"Title\": \"Foo\"\n",
                "          | }\n",
                "----------+\n",
            )
        );
    }

    #[test]
    fn json_listing_is_one_line_per_file() {
        let mut out = Vec::new();
        write_listing(&mut out, Path::new("a.epub"), &metadata(), true).expect("write");
        write_listing(&mut out, Path::new("b.epub"), &Metadata::new(), true).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).expect("json");
        assert_eq!(first["path"], "a.epub");
        assert_eq!(first["metadata"]["Title"], "Foo");
        assert_eq!(first["metadata"]["Creator"], "Bar");

        let second: serde_json::Value = serde_json::from_str(lines[1]).expect("json");
        assert_eq!(second["metadata"], serde_json::json!({}));
    }
}
