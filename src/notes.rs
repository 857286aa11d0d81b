use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::error::{MatrixError, MatrixResult};

/// Default number of body lines after which a note page counts as
/// human-curated and automatic appends stop.
pub const DEFAULT_STABILIZE_THRESHOLD: usize = 10;

// The Creation-Date is deliberately frozen so note files are byte-stable
// across runs.
const HEADER_TEMPLATE: &str = "Content-Type: text/x-zim-wiki\n\
Wiki-Format: zim 0.6\n\
Creation-Date: 2022-11-28T21:43:31+00:00\n\
\n\
====== {page_name} ======\n\
--------------------\n";

/// Render the fixed zim-wiki header for `page_name`.
pub fn note_header(page_name: &str) -> String {
    HEADER_TEMPLATE.replace("{page_name}", page_name)
}

/// Path of the note describing the directory `dir/<page_name>/`: a sibling
/// text file named after the segment itself.
pub fn note_path(dir: &Path, page_name: &str) -> PathBuf {
    dir.join(format!("{page_name}.txt"))
}

/// Idempotently guarantee that the note for `dir/<page_name>/` exists. When
/// the file is absent it is created (with parent directories) holding the
/// header only; an existing file is left untouched, whatever its content.
pub fn ensure_note(dir: &Path, page_name: &str) -> MatrixResult<PathBuf> {
    let path = note_path(dir, page_name);
    if path.exists() {
        if !path.is_file() {
            return Err(MatrixError::filesystem(format!(
                "note path '{}' exists but is not a regular file",
                path.display()
            )));
        }
        return Ok(path);
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create note directory '{}'", dir.display()))?;
    std::fs::write(&path, note_header(page_name))
        .with_context(|| format!("failed to write note '{}'", path.display()))?;
    Ok(path)
}

/// Merge one machine-generated reference line into the leaf note for
/// `dir/<page_name>/` without discarding prior content.
///
/// This is the generator's only read-modify-write path, kept as an explicit
/// read -> decide -> write transaction: read the current content, strip one
/// leading occurrence of the rendered header to get the body, and rewrite
/// the file as header + body + `reference_line` + newline — unless the body
/// has already grown to `stabilize_threshold` lines, in which case the page
/// is assumed human-curated and left untouched.
pub fn merge_leaf_reference(
    dir: &Path,
    page_name: &str,
    reference_line: &str,
    stabilize_threshold: usize,
) -> MatrixResult<()> {
    let path = note_path(dir, page_name);
    let content = if path.exists() {
        if !path.is_file() {
            return Err(MatrixError::filesystem(format!(
                "note path '{}' exists but is not a regular file",
                path.display()
            )));
        }
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read note '{}'", path.display()))?
    } else {
        String::new()
    };

    let header = note_header(page_name);
    let body = content.strip_prefix(&header).unwrap_or(&content);
    if body.split('\n').count() >= stabilize_threshold {
        tracing::debug!(path = %path.display(), "leaf note stabilized, not appending");
        return Ok(());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create note directory '{}'", dir.display()))?;
    let rewritten = format!("{header}{body}{reference_line}\n");
    std::fs::write(&path, rewritten)
        .with_context(|| format!("failed to write note '{}'", path.display()))?;
    Ok(())
}

/// Build the link-style reference token recorded in leaf notes:
/// `{{../../<fixture_file_name>}}`, with an optional `?query` suffix. The
/// `../../` hop climbs from the scale-axis level back to the case directory
/// holding the fixture.
pub fn reference_line(fixture_file_name: &str, query_suffix: Option<&str>) -> String {
    match query_suffix {
        Some(query) => format!("{{{{../../{fixture_file_name}?{query}}}}}"),
        None => format!("{{{{../../{fixture_file_name}}}}}"),
    }
}
