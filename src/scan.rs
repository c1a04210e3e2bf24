//! The Run Scanner: walks the forward-reference index, verifies and extends
//! candidate windows, and emits maximal runs.

use crate::error::Result;
use crate::index::ForwardIndex;
use crate::runs::{chunk_from, Run, RunStore};
use crate::store::TokenStore;

/// The three orthogonal file-pair comparison-mode flags (`-e`/`-s`/`-S`).
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareMode {
    /// `-e`: compare every file against every other file. Without it, a
    /// cross-file pair is only considered when the second file is the one
    /// immediately following the first in the input list — the "each file
    /// vs. the next one" sequential-diff default this flag widens into
    /// "each file vs. every other file". Order-dependent by construction
    /// (it is defined in terms of list position), which is why the
    /// commutativity law is only claimed "with `-e`".
    pub each_to_each: bool,
    pub no_self: bool,
    pub new_vs_old: bool,
}

fn pair_allowed(mode: CompareMode, store: &TokenStore, text_i: usize, text_j: usize) -> bool {
    if mode.no_self && text_i == text_j {
        return false;
    }
    if mode.new_vs_old {
        let old_i = store.text(text_i).is_old;
        let old_j = store.text(text_j).is_old;
        if old_i == old_j {
            return false;
        }
    }
    if !mode.each_to_each && text_i != text_j && text_j != text_i + 1 {
        return false;
    }
    true
}

fn tokens_equal(store: &TokenStore, i: usize, j: usize, r: usize) -> bool {
    (0..r).all(|k| store.token(i + k).id == store.token(j + k).id)
}

/// Extend the match forward as long as both sides stay inside their own
/// Text and keep agreeing; returns the final (>= r) window size.
fn extend_forward(store: &TokenStore, i: usize, j: usize, r: usize) -> Result<usize> {
    let limit_i = store.text_of(i)?.limit;
    let limit_j = store.text_of(j)?.limit;
    let mut size = r;
    while i + size < limit_i
        && j + size < limit_j
        && store.token(i + size).id == store.token(j + size).id
    {
        size += 1;
    }
    Ok(size)
}

/// A run is emitted only when it cannot be extended left. The spec phrases
/// the check purely in terms of `i`'s text start; taken literally that can
/// misfire across a Text boundary on the `j` side, since the global array
/// abuts unrelated texts back to back. This also checks `j`'s own text
/// start, which is the natural reading once texts can differ on both
/// sides of the pair.
fn is_left_maximal(store: &TokenStore, i: usize, j: usize) -> Result<bool> {
    let text_i = store.text_of(i)?;
    if i == text_i.start {
        return Ok(true);
    }
    let text_j = store.text_of(j)?;
    if j == text_j.start {
        return Ok(true);
    }
    Ok(store.token(i - 1).id != store.token(j - 1).id)
}

/// Walk F and emit every maximal run, honoring `mode`.
///
/// For a given `i`, the chain `F[i], F[F[i]], ...` is walked past entries
/// the comparison mode forbids or that turn out to be hash false-positives
/// (skipped without stopping the walk); the first entry that verifies as a
/// genuine equal window is extended, maximality-checked, and the walk for
/// this `i` stops there. Without this early stop a file consisting of one
/// endlessly repeated token would re-examine its entire remaining chain
/// from every starting position, the quadratic blowup the design
/// explicitly warns against; the chain-disjointness invariant means the
/// first verified hit is also the only one worth reporting from `i` — any
/// further hit reachable from `i` is either subsumed by a larger run found
/// from an earlier `i`, or will be found in its own right when the scan
/// reaches its own starting position.
pub fn scan(store: &TokenStore, index: &ForwardIndex, r: usize, mode: CompareMode) -> Result<RunStore> {
    let mut out = RunStore::new();
    let l = store.length();
    if l < r || r == 0 {
        return Ok(out);
    }
    for i in 1..=(l - r) {
        let mut j = match index.forward(i) {
            Ok(j) => j,
            Err(_) => continue,
        };
        while j != 0 {
            let text_i = store.text_index_of(i)?;
            let text_j = store.text_index_of(j)?;
            if !pair_allowed(mode, store, text_i, text_j) {
                j = match index.forward(j) {
                    Ok(next) => next,
                    Err(_) => 0,
                };
                continue;
            }
            if !tokens_equal(store, i, j, r) {
                j = match index.forward(j) {
                    Ok(next) => next,
                    Err(_) => 0,
                };
                continue;
            }
            let size = extend_forward(store, i, j, r)?;
            if is_left_maximal(store, i, j)? {
                let c0 = chunk_from(store, i, size)?;
                let c1 = chunk_from(store, j, size)?;
                out.insert(Run::new(c0, c1, size));
            }
            break;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Token, TokenStore};
    use std::sync::Arc;

    fn word(id: u32) -> Token {
        Token { id, may_start_run: true }
    }

    fn one_text(store: &mut TokenStore, name: &str, ids: &[u32], is_old: bool) {
        let h = store.begin_text(Arc::from(name), is_old);
        for (n, &id) in ids.iter().enumerate() {
            store.append(word(id));
            store.push_line(h, n as u32 + 1);
        }
        store.end_text(h);
    }

    #[test]
    fn uniform_token_file_emits_one_run_not_quadratic() {
        let mut store = TokenStore::new();
        let ids = vec![1u32; 1000];
        one_text(&mut store, "w.txt", &ids, false);
        let index = ForwardIndex::build(&store, 24).unwrap();
        let mode = CompareMode { each_to_each: true, no_self: false, new_vs_old: false };
        let runs = scan(&store, &index, 24, mode).unwrap().retrieve();
        assert_eq!(runs.len(), 1, "expected exactly one maximal run, got {}", runs.len());
        assert!(runs[0].size >= 24);
    }

    #[test]
    fn disjoint_alphabets_emit_nothing() {
        let mut store = TokenStore::new();
        one_text(&mut store, "a.txt", &(1..=100).collect::<Vec<_>>(), false);
        one_text(&mut store, "b.txt", &(101..=200).collect::<Vec<_>>(), false);
        let index = ForwardIndex::build(&store, 24).unwrap();
        let mode = CompareMode { each_to_each: true, no_self: true, new_vs_old: false };
        let runs = scan(&store, &index, 24, mode).unwrap().retrieve();
        assert!(runs.is_empty());
    }

    #[test]
    fn embedded_slice_is_found_as_single_cross_file_run() {
        let mut store = TokenStore::new();
        let a: Vec<u32> = (1..=200).collect();
        let mut b = vec![9000u32, 9001, 9002];
        b.extend_from_slice(&a[50..150]);
        b.extend_from_slice(&[9003, 9004, 9005]);
        one_text(&mut store, "a.txt", &a, false);
        one_text(&mut store, "b.txt", &b, false);
        let index = ForwardIndex::build(&store, 24).unwrap();
        let mode = CompareMode { each_to_each: true, no_self: true, new_vs_old: false };
        let runs = scan(&store, &index, 24, mode).unwrap().retrieve();
        let cross: Vec<_> = runs.iter().filter(|r| r.c0.text != r.c1.text).collect();
        assert_eq!(cross.len(), 1);
        assert_eq!(cross[0].size, 100);
    }

    #[test]
    fn new_vs_old_keeps_only_boundary_crossing_pairs() {
        let mut store = TokenStore::new();
        let shared: Vec<u32> = (1..=40).collect();
        one_text(&mut store, "new1.txt", &shared, false);
        one_text(&mut store, "old1.txt", &shared, true);
        let index = ForwardIndex::build(&store, 24).unwrap();
        let mode = CompareMode { each_to_each: false, no_self: false, new_vs_old: true };
        let runs = scan(&store, &index, 24, mode).unwrap().retrieve();
        assert!(!runs.is_empty());
        for r in &runs {
            let old0 = store.text(r.c0.text).is_old;
            let old1 = store.text(r.c1.text).is_old;
            assert_ne!(old0, old1);
        }
    }

    #[test]
    fn no_self_drops_intra_file_runs() {
        let mut store = TokenStore::new();
        let mut ids: Vec<u32> = (1..=50).collect();
        ids.extend(1..=50); // file repeats itself
        one_text(&mut store, "rep.txt", &ids, false);
        let index = ForwardIndex::build(&store, 24).unwrap();
        let mode = CompareMode { each_to_each: true, no_self: true, new_vs_old: false };
        let runs = scan(&store, &index, 24, mode).unwrap().retrieve();
        assert!(runs.is_empty());
    }

    #[test]
    fn without_each_to_each_only_adjacent_files_are_compared() {
        // a.txt and c.txt share a run, but are not adjacent in the input
        // list (b.txt sits between them); without -e that pair is skipped,
        // with -e it is found.
        let mut store = TokenStore::new();
        let shared: Vec<u32> = (1..=40).collect();
        one_text(&mut store, "a.txt", &shared, false);
        one_text(&mut store, "b.txt", &(101..=140).collect::<Vec<_>>(), false);
        one_text(&mut store, "c.txt", &shared, false);
        let index = ForwardIndex::build(&store, 24).unwrap();

        let default_mode = CompareMode { each_to_each: false, no_self: true, new_vs_old: false };
        let default_runs = scan(&store, &index, 24, default_mode).unwrap().retrieve();
        assert!(default_runs.is_empty(), "a.txt/c.txt are not adjacent and -e was not given");

        let each_to_each_mode = CompareMode { each_to_each: true, no_self: true, new_vs_old: false };
        let all_runs = scan(&store, &index, 24, each_to_each_mode).unwrap().retrieve();
        assert!(!all_runs.is_empty(), "-e should find the a.txt/c.txt match despite the gap");
    }

    #[test]
    fn without_each_to_each_adjacent_files_are_still_compared() {
        let mut store = TokenStore::new();
        let shared: Vec<u32> = (1..=40).collect();
        one_text(&mut store, "a.txt", &shared, false);
        one_text(&mut store, "b.txt", &shared, false);
        let index = ForwardIndex::build(&store, 24).unwrap();
        let mode = CompareMode { each_to_each: false, no_self: true, new_vs_old: false };
        let runs = scan(&store, &index, 24, mode).unwrap().retrieve();
        assert!(!runs.is_empty(), "adjacent files must still be compared without -e");
    }
}
