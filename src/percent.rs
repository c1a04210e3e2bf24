//! The Percentage Aggregator: folds runs into per-ordered-file-pair
//! coverage totals and orders them for `Show_Percentages`.

use crate::runs::Run;
use crate::store::TokenStore;

/// Keyed by the ordered pair `(fname0, fname1)`; `covered` is how many
/// tokens of `fname0` were found inside `fname1`, `size0 = |fname0|`.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub fname0: std::sync::Arc<str>,
    pub fname1: std::sync::Arc<str>,
    pub covered: u64,
    pub size0: u64,
}

impl MatchRecord {
    /// Integer percentage, `floor(100 * covered / size0)`, clamped at 100.
    pub fn percentage(&self) -> u32 {
        if self.size0 == 0 {
            return 0;
        }
        let pct = (100 * self.covered) / self.size0;
        pct.min(100) as u32
    }
}

/// Accumulates match records from a run stream. N is small (pairs of
/// files, not positions), so a linear list is the right representation —
/// matching the distilled spec's own note that lookups here are by
/// filename-pointer identity in a short list, not a hash map.
#[derive(Debug, Default)]
pub struct PercentageAggregator {
    records: Vec<MatchRecord>,
}

impl PercentageAggregator {
    pub fn new() -> Self {
        PercentageAggregator { records: Vec::new() }
    }

    fn bump(&mut self, fname0: &std::sync::Arc<str>, fname1: &std::sync::Arc<str>, size0: u64, covered: u64) {
        if let Some(rec) = self
            .records
            .iter_mut()
            .find(|r| std::sync::Arc::ptr_eq(&r.fname0, fname0) && std::sync::Arc::ptr_eq(&r.fname1, fname1))
        {
            rec.covered += covered;
        } else {
            self.records.push(MatchRecord {
                fname0: fname0.clone(),
                fname1: fname1.clone(),
                covered,
                size0,
            });
        }
    }

    /// Fold every run whose two chunks lie in different Texts into both
    /// directions of the ordered pair.
    pub fn add_run(&mut self, store: &TokenStore, run: &Run) {
        if run.c0.text == run.c1.text {
            return;
        }
        let text0 = store.text(run.c0.text);
        let text1 = store.text(run.c1.text);
        self.bump(&text0.filename, &text1.filename, text0.len() as u64, run.size as u64);
        self.bump(&text1.filename, &text0.filename, text1.len() as u64, run.size as u64);
    }

    /// `Show_Percentages`: sort by `covered/size0` descending, then
    /// group each `fname0`'s main contributor with (or without, under
    /// `-P`) its remaining entries, suppressing anything below
    /// `threshold`.
    pub fn show(mut self, threshold: u32, main_contributor_only: bool) -> Vec<MatchRecord> {
        self.records.sort_by(|a, b| {
            let pa = a.covered as u128 * b.size0.max(1) as u128;
            let pb = b.covered as u128 * a.size0.max(1) as u128;
            pb.cmp(&pa)
        });

        let mut out = Vec::new();
        let mut remaining = self.records;
        while !remaining.is_empty() {
            let main_fname0 = remaining[0].fname0.clone();
            let (same, rest): (Vec<_>, Vec<_>) = remaining
                .into_iter()
                .partition(|r| std::sync::Arc::ptr_eq(&r.fname0, &main_fname0));
            remaining = rest;
            let mut group = same.into_iter();
            if let Some(main) = group.next() {
                if main.percentage() >= threshold {
                    out.push(main);
                }
            }
            if !main_contributor_only {
                for rec in group {
                    if rec.percentage() >= threshold {
                        out.push(rec);
                    }
                }
            }
        }
        out
    }
}
