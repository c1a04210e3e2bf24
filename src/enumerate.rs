//! Turns the command line's file-list argument into the ordered list of
//! paths the driver lexes, honoring the new/old separator grammar (`-S`),
//! directory recursion (`-R`), and reading filenames from stdin (`-i`).
//!
//! Directory walking reuses the codebase's existing `ignore`-crate
//! conventions: `.gitignore`-aware, hidden files still visited, `.git`
//! always skipped.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::{Result, SimError};

/// One file slated for lexing, tagged with which side of the `-S`
/// new/old separator it fell on (`false` unless `-S`'s grammar applied).
#[derive(Debug, Clone)]
pub struct NamedFile {
    pub path: PathBuf,
    pub is_old: bool,
}

/// Split the raw file-list argument on the first bare `/` or `|` token
/// into a "new" prefix and an "old" suffix, per the grammar `new_file* [
/// ('/' | '|') old_file* ]`. Without a separator, every file is "new".
pub fn split_new_old(args: &[String]) -> (Vec<&str>, Vec<&str>) {
    match args.iter().position(|a| a == "/" || a == "|") {
        Some(idx) => {
            let new = args[..idx].iter().map(String::as_str).collect();
            let old = args[idx + 1..].iter().map(String::as_str).collect();
            (new, old)
        }
        None => (args.iter().map(String::as_str).collect(), Vec::new()),
    }
}

/// Read newline-separated paths from standard input, ignoring blank lines.
/// Used by `-i` in place of argv file arguments.
pub fn read_stdin_paths() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut out = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| SimError::Usage(format!("cannot read stdin: {e}")))?;
        let line = line.trim();
        if !line.is_empty() {
            out.push(line.to_string());
        }
    }
    Ok(out)
}

/// Expand one command-line argument into the files it names: a plain file
/// is returned as-is; a directory requires `-R` and is recursed via the
/// `ignore` crate's gitignore-aware walker (hidden files still visited,
/// `.git` always skipped); a directory without `-R` is a usage error.
fn expand_one(raw: &str, is_old: bool, recurse: bool) -> Result<Vec<NamedFile>> {
    let path = Path::new(raw);
    let meta = std::fs::metadata(path)
        .map_err(|source| SimError::FileRead { path: path.to_path_buf(), source })?;

    if meta.is_file() {
        return Ok(vec![NamedFile { path: path.to_path_buf(), is_old }]);
    }

    if !meta.is_dir() {
        return Err(SimError::Usage(format!("{raw}: not a regular file or directory")));
    }

    if !recurse {
        return Err(SimError::Usage(format!("{raw}: is a directory (use -R to recurse)")));
    }

    let mut out = Vec::new();
    let walker = WalkBuilder::new(path)
        .hidden(false)
        .follow_links(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();
    for entry in walker {
        let entry = entry.map_err(|e| SimError::Usage(format!("{raw}: {e}")))?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            out.push(NamedFile { path: entry.path().to_path_buf(), is_old });
        }
    }
    Ok(out)
}

/// Expand a `new` and an `old` group of raw file-list arguments into their
/// fully enumerated file lists, in order, recursing into directories when
/// `recurse` is set.
pub fn expand_all(new: &[&str], old: &[&str], recurse: bool) -> Result<Vec<NamedFile>> {
    let mut out = Vec::new();
    for raw in new {
        out.extend(expand_one(raw, false, recurse)?);
    }
    for raw in old {
        out.extend(expand_one(raw, true, recurse)?);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "enumerate_test.rs"]
mod tests;
