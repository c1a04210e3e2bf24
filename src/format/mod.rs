//! The four output formatters (§6): default run listing with source
//! excerpts, diff-style, terse, and the percentage table, plus a lexical-
//! scan-only dump used by `--`.
//!
//! Source excerpts are recovered by re-opening the originating file and
//! reading the recorded line range — consistent with the Non-goal "does
//! not reconstruct original source from tokens": what's shown is the
//! literal file content at those lines, not a token-to-text reconstruction.

mod default;
mod diff;
mod lexdump;
mod percentage;
mod terse;

use std::collections::HashMap;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::percent::MatchRecord;
use crate::runs::{Chunk, Run};
use crate::store::TokenStore;

pub use lexdump::dump_tokens;

const FALLBACK_WIDTH: usize = 80;

/// Resolve the effective page width: the explicit `-w` value if given,
/// else the `COLUMNS` environment variable when stdout is a terminal,
/// else the fallback of 80 columns.
pub fn effective_width(explicit: Option<usize>) -> usize {
    if let Some(w) = explicit {
        return w;
    }
    if io::stdout().is_terminal() {
        if let Ok(cols) = std::env::var("COLUMNS") {
            if let Ok(n) = cols.trim().parse::<usize>() {
                if n > 0 {
                    return n;
                }
            }
        }
    }
    FALLBACK_WIDTH
}

/// Truncate `s` to at most `width` display columns (via `unicode-width`),
/// appending an ellipsis marker when truncated.
pub fn clip_to_width(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    if width == 0 || s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('\u{2026}');
    out
}

/// Caches each file's lines, read at most once per formatting pass.
#[derive(Default)]
pub struct SourceCache {
    cache: HashMap<Arc<str>, Vec<String>>,
}

impl SourceCache {
    pub fn new() -> Self {
        SourceCache::default()
    }

    /// 1-based inclusive line range `[first_line, last_line]`, clamped to
    /// what the file actually contains (a file edited since lexing may be
    /// shorter; a read failure yields no lines rather than an error, since
    /// the formatter's job is best-effort presentation, not re-validating
    /// input already accepted by the driver).
    pub fn excerpt(&mut self, filename: &Arc<str>, first_line: u32, last_line: u32) -> &[String] {
        let lines = self.cache.entry(filename.clone()).or_insert_with(|| {
            std::fs::read_to_string(&**filename)
                .map(|s| s.lines().map(str::to_string).collect())
                .unwrap_or_default()
        });
        let start = (first_line.saturating_sub(1) as usize).min(lines.len());
        let end = (last_line as usize).min(lines.len());
        &lines[start..end]
    }
}

/// A run's two chunks resolved to `(filename, first_line, last_line)` for
/// display, in canonical `(c0, c1)` order.
pub fn headers(store: &TokenStore, run: &Run) -> ((Arc<str>, u32, u32), (Arc<str>, u32, u32)) {
    (chunk_header(store, &run.c0), chunk_header(store, &run.c1))
}

fn chunk_header(store: &TokenStore, c: &Chunk) -> (Arc<str>, u32, u32) {
    let text = store.text(c.text);
    let first_line = text.line_at(c.first);
    let last_line = text.line_at(c.last - 1);
    (text.filename.clone(), first_line, last_line)
}

/// Dispatch to the formatter selected by `format`, writing to `out`.
pub fn write_runs(out: &mut dyn Write, store: &TokenStore, runs: &[Run], format: OutputFormat, width: usize) -> io::Result<()> {
    match format {
        OutputFormat::Default => default::write(out, store, runs, width, true),
        OutputFormat::HeadingsOnly => default::write(out, store, runs, width, false),
        OutputFormat::Diff => diff::write(out, store, runs, width),
        OutputFormat::Terse => terse::write(out, store, runs),
        OutputFormat::Percentage { .. } => unreachable!("percentage mode routes through write_percentages"),
    }
}

/// Write the percentage table (`-p`/`-P`).
pub fn write_percentages(out: &mut dyn Write, records: &[MatchRecord], width: usize) -> io::Result<()> {
    percentage::write(out, records, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_to_width_leaves_short_strings_alone() {
        assert_eq!(clip_to_width("hello", 80), "hello");
    }

    #[test]
    fn clip_to_width_truncates_and_marks_long_strings() {
        let clipped = clip_to_width("0123456789", 5);
        assert!(clipped.ends_with('\u{2026}'));
        assert!(clipped.chars().count() <= 5);
    }

    #[test]
    fn effective_width_falls_back_to_80_without_explicit_or_terminal() {
        // Test runs non-interactively, so stdout is never a terminal here.
        assert_eq!(effective_width(None), FALLBACK_WIDTH);
    }

    #[test]
    fn effective_width_prefers_explicit_value() {
        assert_eq!(effective_width(Some(42)), 42);
    }
}
