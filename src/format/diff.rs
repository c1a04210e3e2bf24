//! Diff-style output (`-d`): each run rendered in classic `NcM` change
//! notation, `<`-prefixed lines from the first chunk, `>`-prefixed lines
//! from the second.

use std::io::{self, Write};

use super::{clip_to_width, headers, SourceCache};
use crate::runs::Run;
use crate::store::TokenStore;

pub fn write(out: &mut dyn Write, store: &TokenStore, runs: &[Run], width: usize) -> io::Result<()> {
    let mut cache = SourceCache::new();
    for run in runs {
        let ((f0, l0a, l0b), (f1, l1a, l1b)) = headers(store, run);
        writeln!(out, "{f0}:{l0a},{l0b}c{f1}:{l1a},{l1b}")?;
        for line in cache.excerpt(&f0, l0a, l0b) {
            writeln!(out, "< {}", clip_to_width(line, width.saturating_sub(2)))?;
        }
        writeln!(out, "---")?;
        for line in cache.excerpt(&f1, l1a, l1b) {
            writeln!(out, "> {}", clip_to_width(line, width.saturating_sub(2)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runs::{chunk_from, Run};
    use crate::store::{Token, TokenStore};
    use std::sync::Arc;

    #[test]
    fn emits_ncm_header_and_change_markers() {
        let mut store = TokenStore::new();
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
        let run = Run::new(chunk_from(&store, 1, 24).unwrap(), chunk_from(&store, 31, 24).unwrap(), 24);

        let mut out = Vec::new();
        write(&mut out, &store, &[run], 80).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a.txt:1,24c"));
        assert!(text.contains("---"));
    }
}
