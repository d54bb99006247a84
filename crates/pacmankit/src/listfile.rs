//! Parser for package list files.
//!
//! A package list is plain text with one or more package names per line:
//! ```text
//! # base system
//! base linux linux-firmware
//! git vim        ; editors
//! &python-pip    * wanted, but only as a dependency
//! ```
//!
//! Everything after the first `#`, `*` or `;` on a line is a comment. A name
//! prefixed with `&` is optional: it should be installed as a dependency
//! rather than explicitly.

use crate::error::{Error, Result};
use crate::types::{DesiredState, PackageName};
use std::path::{Path, PathBuf};

/// Characters that start a comment anywhere on a line.
pub const COMMENT_CHARS: [char; 3] = ['#', '*', ';'];

/// Prefix marking a package as optional.
pub const OPTIONAL_MARKER: char = '&';

/// Parse and merge several package lists.
///
/// Fails with [`Error::ListNotFound`] on the first path that does not exist.
pub fn parse_files<P: AsRef<Path>>(paths: &[P]) -> Result<DesiredState> {
    let mut desired = DesiredState::new();
    for path in paths {
        desired.merge(parse_file(path.as_ref())?);
    }
    Ok(desired)
}

/// Parse a single package list from a file path.
pub fn parse_file(path: &Path) -> Result<DesiredState> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::ListNotFound(PathBuf::from(path)),
        _ => Error::Io(e),
    })?;

    let desired = parse_string(&content);
    log::debug!(
        "Parsed {}: {} regular, {} optional",
        path.display(),
        desired.regular.len(),
        desired.optional.len()
    );
    Ok(desired)
}

/// Parse a package list from a string.
pub fn parse_string(content: &str) -> DesiredState {
    let mut desired = DesiredState::new();
    for line in content.lines() {
        parse_line(line, &mut desired);
    }
    desired
}

/// Parse a single line into `desired`.
fn parse_line(line: &str, desired: &mut DesiredState) {
    let line = strip_comment(line).trim();
    if line.is_empty() {
        return;
    }

    for token in line.split_whitespace() {
        match token.strip_prefix(OPTIONAL_MARKER) {
            // A bare `&` names nothing
            Some(rest) => {
                if let Some(name) = PackageName::new(rest) {
                    desired.optional.insert(name);
                }
            }
            None => {
                if let Some(name) = PackageName::new(token) {
                    desired.regular.insert(name);
                }
            }
        }
    }
}

/// Truncate a line at the first comment character.
fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_CHARS) {
        Some(pos) => &line[..pos],
        None => line,
    }
}
