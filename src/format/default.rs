//! The default run listing: a heading per run plus, unless `-n` asked for
//! headings only, the matching source excerpt from each side.

use std::io::{self, Write};

use super::{clip_to_width, headers, SourceCache};
use crate::report_helpers::separator;
use crate::runs::Run;
use crate::store::TokenStore;

pub fn write(out: &mut dyn Write, store: &TokenStore, runs: &[Run], width: usize, show_excerpts: bool) -> io::Result<()> {
    let mut cache = SourceCache::new();
    let rule = separator(width);

    for run in runs {
        let ((f0, l0a, l0b), (f1, l1a, l1b)) = headers(store, run);
        writeln!(out, "{rule}")?;
        writeln!(
            out,
            "{}:{}-{}  <=>  {}:{}-{}  (size {})",
            f0, l0a, l0b, f1, l1a, l1b, run.size
        )?;

        if show_excerpts {
            writeln!(out)?;
            for line in cache.excerpt(&f0, l0a, l0b) {
                writeln!(out, "  {}", clip_to_width(line, width.saturating_sub(2)))?;
            }
            writeln!(out, "  {}", separator(width.saturating_sub(2).min(20)))?;
            for line in cache.excerpt(&f1, l1a, l1b) {
                writeln!(out, "  {}", clip_to_width(line, width.saturating_sub(2)))?;
            }
        }
    }
    if !runs.is_empty() {
        writeln!(out, "{rule}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runs::{chunk_from, Run};
    use crate::store::{Token, TokenStore};
    use std::sync::Arc;

    fn make_run(store: &mut TokenStore) -> Run {
        let h0 = store.begin_text(Arc::from("a.txt"), false);
        for n in 0..30u32 {
            store.append(Token { id: n, may_start_run: true });
            store.push_line(h0, n + 1);
        }
        store.end_text(h0);
        let h1 = store.begin_text(Arc::from("b.txt"), false);
        for n in 0..30u32 {
            store.append(Token { id: n, may_start_run: true });
            store.push_line(h1, n + 1);
        }
        store.end_text(h1);
        Run::new(chunk_from(store, 1, 24).unwrap(), chunk_from(store, 31, 24).unwrap(), 24)
    }

    #[test]
    fn headings_only_mode_omits_excerpts() {
        let mut store = TokenStore::new();
        let run = make_run(&mut store);
        let mut out = Vec::new();
        write(&mut out, &store, &[run], 80, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a.txt:1-24"));
        assert!(text.contains("b.txt:1-24"));
        // no excerpt lines indented by two spaces beyond the heading
        assert_eq!(text.lines().filter(|l| l.starts_with("  ")).count(), 0);
    }

    #[test]
    fn default_mode_includes_both_headings() {
        let mut store = TokenStore::new();
        let run = make_run(&mut store);
        let mut out = Vec::new();
        write(&mut out, &store, &[run], 80, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("(size 24)"));
    }

    #[test]
    fn empty_run_list_prints_nothing() {
        let store = TokenStore::new();
        let mut out = Vec::new();
        write(&mut out, &store, &[], 80, true).unwrap();
        assert!(out.is_empty());
    }
}
